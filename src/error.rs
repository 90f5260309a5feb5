use ariadne::{Label, Report, ReportKind, Source};
use std::fmt;
use std::ops::Range;

use crate::scanner::Token;

// Error handling. Consider using thiserror crate.
#[derive(Debug, Clone)]
pub enum Error {
    /// The input produced no tokens at all.
    Lex {
        message: String,
        span: Range<usize>,
    },
    /// The token sequence violates the grammar.
    Syntax {
        message: String,
        span: Range<usize>,
    },
    /// Integer division by zero.
    Arithmetic {
        message: String,
        span: Range<usize>,
    },
    /// An operator node holds a spelling its evaluation step does not
    /// recognize. Reachable through the bare '=' token.
    Eval {
        message: String,
        span: Range<usize>,
    },
}

impl Error {
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Lex { .. } => "Lex",
            Error::Syntax { .. } => "Syntax",
            Error::Arithmetic { .. } => "Arithmetic",
            Error::Eval { .. } => "Eval",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::Lex { message, .. }
            | Error::Syntax { message, .. }
            | Error::Arithmetic { message, .. }
            | Error::Eval { message, .. } => message,
        }
    }

    pub fn span(&self) -> Range<usize> {
        match self {
            Error::Lex { span, .. }
            | Error::Syntax { span, .. }
            | Error::Arithmetic { span, .. }
            | Error::Eval { span, .. } => span.clone(),
        }
    }

    /// An operator spelling reached an evaluation step with no rule for it.
    pub fn unsupported_operator(operator: &Token) -> Error {
        Error::Eval {
            message: format!("Operator '{}' is not implemented", operator.lexeme),
            span: operator.span.clone(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} error: {} (at {})", self.kind(), self.message(), self.span().start)
    }
}

impl std::error::Error for Error {}

pub fn print_error(source: &str, error: &Error) {
    let source_name = "CLI";
    let label = Label::new((source_name, error.span())).with_message(error.message());

    Report::build(ReportKind::Error, (source_name, error.span()))
        .with_message(format!("{} error", error.kind()))
        .with_label(label)
        .finish()
        .print((source_name, Source::from(source)))
        .unwrap();
}
