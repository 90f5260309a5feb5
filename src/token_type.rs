#[derive(Debug, Clone, PartialEq, strum_macros::Display)]
pub enum TokenType {
    LeftParen, RightParen, // ()
    Plus, Minus,
    Star, Slash,
    Less, LessEqual,
    Greater, GreaterEqual,
    Equal, EqualEqual,
    BangEqual, SlashEqual, // '!=' and '/=' are synonyms
    And, Or, Xor,
    Number,
    EOF,
}

impl TokenType {
    /// Maps a lexeme produced by the token pattern to its type. Keywords
    /// compare case-insensitively; everything else is exact. Returns `None`
    /// for a lexeme outside the token vocabulary.
    pub fn classify(lexeme: &str) -> Option<TokenType> {
        use TokenType::*;
        let variant = match lexeme {
            "(" => LeftParen,
            ")" => RightParen,
            "+" => Plus,
            "-" => Minus,
            "*" => Star,
            "/" => Slash,
            "<" => Less,
            "<=" => LessEqual,
            ">" => Greater,
            ">=" => GreaterEqual,
            "=" => Equal,
            "==" => EqualEqual,
            "!=" => BangEqual,
            "/=" => SlashEqual,
            _ if lexeme.eq_ignore_ascii_case("and") => And,
            _ if lexeme.eq_ignore_ascii_case("or") => Or,
            _ if lexeme.eq_ignore_ascii_case("xor") => Xor,
            _ if !lexeme.is_empty() && lexeme.bytes().all(|b| b.is_ascii_digit()) => Number,
            _ => return None,
        };
        Some(variant)
    }
}
