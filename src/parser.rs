/// A recursive descent parser for integer expressions.
///
/// Grammar, lowest to highest precedence:
///
/// logical  -> relation ( ( "and" | "or" | "xor" ) relation )*
/// relation -> term ( ( "<" | "<=" | ">" | ">=" | "=" | "==" | "!=" | "/=" ) term )*
/// term     -> factor ( ( "+" | "-" ) factor )*
/// factor   -> primary ( ( "*" | "/" ) primary )*
/// primary  -> NUMBER | "(" logical ")"
///
/// Every level is strictly left-associative: "10-3-2" groups as "(10-3)-2".
///
/// Examples: "555/5 + 1 - 100", "(2+3)*4", "1 < 2 and 3 >= 3"
use crate::error::Error;
use crate::expr::Expr;
use crate::scanner::Token;
use crate::token_type::TokenType::{self, *};

pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
}

impl<'a> Parser<'a> {
    /// The token slice must end with an EOF token; the scanner guarantees
    /// this, so the cursor never runs off the end.
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses all tokens into one expression tree. The first grammar
    /// violation aborts the parse; trailing tokens after a complete
    /// expression are rejected as well.
    pub fn parse(&mut self) -> Result<Expr, Error> {
        let expr = self.logical()?;
        if !self.at_end() {
            let message = format!("Did not expect '{}'", self.peek().lexeme);
            return Err(self.error(message));
        }
        Ok(expr)
    }

    /// Matches production: logical -> relation ( ( "and" | "or" | "xor" ) relation )*
    fn logical(&mut self) -> Result<Expr, Error> {
        let mut left = self.relation()?;
        while self.match_token(&[And, Or, Xor]) {
            let operator = self.previous();
            let right = self.relation()?;
            left = Expr::Logical { left: Box::new(left), operator, right: Box::new(right) };
        }
        Ok(left)
    }

    /// Matches production: relation -> term ( REL_OP term )*
    /// The bare '=' token belongs to this class even though it has no
    /// evaluation rule; see Expr::evaluate.
    fn relation(&mut self) -> Result<Expr, Error> {
        let mut left = self.term()?;
        while self.match_token(&[
            Less, LessEqual, Greater, GreaterEqual, Equal, EqualEqual, BangEqual, SlashEqual,
        ]) {
            let operator = self.previous();
            let right = self.term()?;
            left = Expr::Relation { left: Box::new(left), operator, right: Box::new(right) };
        }
        Ok(left)
    }

    /// Matches production: term -> factor ( ( "+" | "-" ) factor )*
    fn term(&mut self) -> Result<Expr, Error> {
        let mut left = self.factor()?;
        while self.match_token(&[Plus, Minus]) {
            let operator = self.previous();
            let right = self.factor()?;
            left = Expr::Term { left: Box::new(left), operator, right: Box::new(right) };
        }
        Ok(left)
    }

    /// Matches production: factor -> primary ( ( "*" | "/" ) primary )*
    fn factor(&mut self) -> Result<Expr, Error> {
        let mut left = self.primary()?;
        while self.match_token(&[Star, Slash]) {
            let operator = self.previous();
            let right = self.primary()?;
            left = Expr::Factor { left: Box::new(left), operator, right: Box::new(right) };
        }
        Ok(left)
    }

    /// Matches production: primary -> NUMBER | "(" logical ")"
    fn primary(&mut self) -> Result<Expr, Error> {
        if self.match_token(&[Number]) {
            let token = self.previous();
            let value = token.lexeme.parse::<i64>().map_err(|_| Error::Syntax {
                message: format!("Integer literal '{}' is out of range", token.lexeme),
                span: token.span.clone(),
            })?;
            return Ok(Expr::Literal { value });
        }

        if self.match_token(&[LeftParen]) {
            let expr = self.logical()?;
            if self.match_token(&[RightParen]) {
                return Ok(Expr::Grouping { expr: Box::new(expr) });
            }
            return Err(self.error("Expected ')' to close parenthesized expression".to_string()));
        }

        let message = if self.at_end() {
            "Expected integer or '(', found end of input".to_string()
        } else {
            format!("Expected integer or '(', found '{}'", self.peek().lexeme)
        };
        Err(self.error(message))
    }

    fn match_token(&mut self, token_types: &[TokenType]) -> bool {
        for token_type in token_types {
            if self.check(token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: &TokenType) -> bool {
        if self.at_end() {
            false
        } else {
            self.peek().variant == *token_type
        }
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.current += 1;
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    fn at_end(&self) -> bool {
        self.tokens[self.current].variant == EOF
    }

    /// Creates a syntax error located at the current token. At end of input
    /// this is the EOF token, whose span sits just past the source.
    fn error(&self, message: String) -> Error {
        let token = self.peek();
        Error::Syntax { message, span: token.span.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;

    fn parse(source: &str) -> Result<Expr, Error> {
        let tokens = Scanner::new(source).scan()?;
        Parser::new(&tokens).parse()
    }

    #[test]
    fn test_left_associative_tree_shape() {
        // "10-3-2" must group as "(10-3)-2"
        let expr = parse("10-3-2").unwrap();
        match expr {
            Expr::Term { left, operator, right } => {
                assert_eq!(operator.lexeme, "-");
                assert!(matches!(*left, Expr::Term { .. }));
                assert!(matches!(*right, Expr::Literal { value: 2 }));
            }
            other => panic!("Expected Term at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_tree_shape() {
        // "2+3*4": the root is '+', the multiplication hangs on the right
        let expr = parse("2+3*4").unwrap();
        match expr {
            Expr::Term { left, operator, right } => {
                assert_eq!(operator.lexeme, "+");
                assert!(matches!(*left, Expr::Literal { value: 2 }));
                assert!(matches!(*right, Expr::Factor { .. }));
            }
            other => panic!("Expected Term at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_grouping_is_preserved() {
        let expr = parse("(2+3)*4").unwrap();
        match expr {
            Expr::Factor { left, .. } => assert!(matches!(*left, Expr::Grouping { .. })),
            other => panic!("Expected Factor at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_parenthesis() {
        let result = parse("(1+2");
        assert!(matches!(result, Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_trailing_token_is_rejected() {
        let result = parse("1 2");
        assert!(matches!(result, Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_trailing_operator_is_rejected() {
        let result = parse("1+");
        assert!(matches!(result, Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_literal_out_of_range() {
        let result = parse("99999999999999999999");
        assert!(matches!(result, Err(Error::Syntax { .. })));
    }
}
