use std::fmt;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;
use crate::token_type::TokenType::{self, *};

/// One combined pattern covering the whole token vocabulary. Alternatives
/// are tried in priority order: logical keywords, two-character relational
/// operators, single-character relational operators, arithmetic operators,
/// integer literals, parentheses. The `(?i)` flag makes keyword matching
/// case-insensitive.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(and|or|xor)|(<=|>=|==|!=|/=)|([<>=])|([-+*/])|([0-9]+)|([()])")
        .expect("Error compiling regex.")
});

/// The `Scanner` walks the source string by repeatedly searching for the
/// leftmost match of the token pattern, returning the tokens as Vec<Token>.
/// Characters between matches are skipped silently, whitespace included;
/// an input with no match at all is a lex error.
pub struct Scanner<'a> {
    source: &'a str,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            tokens: Vec::new(),
        }
    }

    /// Scans the whole input in one pass and terminates the sequence with
    /// an EOF token, so the parser can always peek at a real token.
    pub fn scan(mut self) -> Result<Vec<Token>, Error> {
        for found in TOKEN_PATTERN.find_iter(self.source) {
            let lexeme = found.as_str();
            // classify() covers every lexeme the pattern can produce; a
            // miss falls under the same skip policy as unmatched input.
            let Some(variant) = TokenType::classify(lexeme) else {
                continue;
            };
            self.add_token(variant, lexeme, found.range());
        }

        if self.tokens.is_empty() {
            return Err(Error::Lex {
                message: "Input contains no recognizable token".to_string(),
                span: 0..self.source.len(),
            });
        }

        let end = self.source.len();
        self.add_token(EOF, "", end..end);
        Ok(self.tokens)
    }

    fn add_token(&mut self, variant: TokenType, lexeme: &str, span: Range<usize>) {
        self.tokens.push(Token {
            variant,
            lexeme: lexeme.to_string(),
            span,
        });
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub variant: TokenType,
    pub lexeme: String,
    pub span: Range<usize>, // byte offsets into the source string
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.variant, self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants(source: &str) -> Vec<TokenType> {
        let tokens = Scanner::new(source).scan().unwrap();
        tokens.into_iter().map(|t| t.variant).collect()
    }

    #[test]
    fn test_two_char_operators_win_over_one_char() {
        assert_eq!(variants("1<=2"), vec![Number, LessEqual, Number, EOF]);
        assert_eq!(variants("1>=2"), vec![Number, GreaterEqual, Number, EOF]);
        assert_eq!(variants("1/=2"), vec![Number, SlashEqual, Number, EOF]);
        assert_eq!(variants("1==2"), vec![Number, EqualEqual, Number, EOF]);
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(variants("1 AND 2"), vec![Number, And, Number, EOF]);
        assert_eq!(variants("1 Or 2"), vec![Number, Or, Number, EOF]);
        assert_eq!(variants("1 xOr 2"), vec![Number, Xor, Number, EOF]);
    }

    #[test]
    fn test_digit_runs_are_maximal() {
        let tokens = Scanner::new("123+45").scan().unwrap();
        assert_eq!(tokens[0].lexeme, "123");
        assert_eq!(tokens[2].lexeme, "45");
    }

    #[test]
    fn test_unrecognized_characters_are_skipped() {
        assert_eq!(variants("1@@+2"), vec![Number, Plus, Number, EOF]);
        assert_eq!(variants("  7  "), vec![Number, EOF]);
    }

    #[test]
    fn test_bare_equal_is_a_token() {
        assert_eq!(variants("1=2"), vec![Number, Equal, Number, EOF]);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(Scanner::new("").scan().is_err());
        assert!(Scanner::new("   ").scan().is_err());
        assert!(Scanner::new("@#!.").scan().is_err());
    }

    #[test]
    fn test_spans_point_into_source() {
        let source = "10 + 2";
        let tokens = Scanner::new(source).scan().unwrap();
        assert_eq!(&source[tokens[0].span.clone()], "10");
        assert_eq!(&source[tokens[1].span.clone()], "+");
        assert_eq!(&source[tokens[2].span.clone()], "2");
    }
}
