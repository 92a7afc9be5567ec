use logos::Logos;
use serde::Serialize;

use super::ExprError;

/// Token kinds of the little assignment language. Rules are tried at
/// the current position only; whitespace is skipped, never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Logos, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Variable,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Multiply,

    #[token("/")]
    Divide,

    #[token("(")]
    #[serde(rename = "LPAREN")]
    LParen,

    #[token(")")]
    #[serde(rename = "RPAREN")]
    RParen,

    #[token("=")]
    Assign,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Variable => "VARIABLE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Assign => "ASSIGN",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Converts source text into a token sequence in one pass, failing on
/// the first character no rule matches.
pub fn tokenize(src: &str) -> Result<Vec<Token>, ExprError> {
    let mut lexer = TokenKind::lexer(src);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token::new(kind, lexer.slice())),
            Err(()) => {
                let span = lexer.span();
                let ch = src[span.start..].chars().next().unwrap_or('\u{fffd}');
                return Err(ExprError::InvalidCharacter {
                    ch,
                    pos: span.start,
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(src: &str) -> Vec<(TokenKind, String)> {
        tokenize(src)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn assignment_with_whitespace() {
        assert_eq!(
            kinds_and_texts("x = 1 + 2"),
            vec![
                (TokenKind::Variable, "x".to_string()),
                (TokenKind::Assign, "=".to_string()),
                (TokenKind::Number, "1".to_string()),
                (TokenKind::Plus, "+".to_string()),
                (TokenKind::Number, "2".to_string()),
            ]
        );
    }

    #[test]
    fn all_operators_and_parens() {
        assert_eq!(
            kinds_and_texts("(a*b)/c-2")
                .into_iter()
                .map(|(k, _)| k)
                .collect::<Vec<_>>(),
            vec![
                TokenKind::LParen,
                TokenKind::Variable,
                TokenKind::Multiply,
                TokenKind::Variable,
                TokenKind::RParen,
                TokenKind::Divide,
                TokenKind::Variable,
                TokenKind::Minus,
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn underscore_identifier() {
        assert_eq!(
            kinds_and_texts("_tmp1 = 2"),
            vec![
                (TokenKind::Variable, "_tmp1".to_string()),
                (TokenKind::Assign, "=".to_string()),
                (TokenKind::Number, "2".to_string()),
            ]
        );
    }

    #[test]
    fn invalid_character_reports_position() {
        assert_eq!(
            tokenize("x = 1 ? 2"),
            Err(ExprError::InvalidCharacter { ch: '?', pos: 6 })
        );
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(tokenize("  \t\n "), Ok(vec![]));
    }
}
