use serde::Serialize;

use super::lexer::{Token, TokenKind};
use super::symbol_table::SymbolTable;
use super::ExprError;

/// Parse tree of the assignment language. Pure tree, built bottom-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseTree {
    Number(String),
    Variable(String),
    BinaryOp {
        op: TokenKind,
        left: Box<ParseTree>,
        right: Box<ParseTree>,
    },
    Assignment {
        target: String,
        value: Box<ParseTree>,
    },
}

impl std::fmt::Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseTree::Number(n) => f.write_str(n),
            ParseTree::Variable(v) => f.write_str(v),
            ParseTree::BinaryOp { op, left, right } => {
                let op = match op {
                    TokenKind::Plus => "+",
                    TokenKind::Minus => "-",
                    TokenKind::Multiply => "*",
                    TokenKind::Divide => "/",
                    other => other.name(),
                };
                write!(f, "({} {} {})", left, op, right)
            }
            ParseTree::Assignment { target, value } => write!(f, "{} = {}", target, value),
        }
    }
}

/// Recursive-descent parser over a token sequence. Precedence is
/// structural: `term` binds tighter than `expression`. Variable reads
/// are checked against the bound symbol table; assignment targets are
/// declared on first assignment.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    index: usize,
    symbol_table: &'a mut dyn SymbolTable,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, symbol_table: &'a mut dyn SymbolTable) -> Self {
        Self {
            tokens,
            index: 0,
            symbol_table,
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ExprError> {
        match self.current() {
            Some(token) if token.kind == kind => {
                let token = token.clone();
                self.advance();
                Ok(token)
            }
            _ => Err(ExprError::Syntax(format!("expected {}", kind))),
        }
    }

    /// Factor -> NUMBER | VARIABLE | '(' Expr ')'
    ///
    /// Every VARIABLE reaching this point is a read (assignment targets
    /// never come through here), so it must already be defined.
    fn factor(&mut self) -> Result<ParseTree, ExprError> {
        let token = match self.current() {
            Some(token) => token.clone(),
            None => return Err(ExprError::Syntax("unexpected end of input".to_string())),
        };
        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(ParseTree::Number(token.text))
            }
            TokenKind::Variable => {
                if self.symbol_table.lookup(&token.text).is_none() {
                    return Err(ExprError::UndefinedVariable(token.text));
                }
                self.advance();
                Ok(ParseTree::Variable(token.text))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                match self.current() {
                    Some(token) if token.kind == TokenKind::RParen => {
                        self.advance();
                        Ok(inner)
                    }
                    _ => Err(ExprError::Syntax("expected closing parenthesis".to_string())),
                }
            }
            _ => Err(ExprError::Syntax(format!(
                "unexpected token {} {:?}",
                token.kind, token.text
            ))),
        }
    }

    /// Term -> Factor (('*' | '/') Factor)*
    fn term(&mut self) -> Result<ParseTree, ExprError> {
        let mut result = self.factor()?;
        while let Some(op) = self.current().map(|t| t.kind).filter(|k| {
            matches!(k, TokenKind::Multiply | TokenKind::Divide)
        }) {
            self.advance();
            let right = self.factor()?;
            result = ParseTree::BinaryOp {
                op,
                left: Box::new(result),
                right: Box::new(right),
            };
        }
        Ok(result)
    }

    /// Expr -> Term (('+' | '-') Term)*
    fn expression(&mut self) -> Result<ParseTree, ExprError> {
        let mut result = self.term()?;
        while let Some(op) = self
            .current()
            .map(|t| t.kind)
            .filter(|k| matches!(k, TokenKind::Plus | TokenKind::Minus))
        {
            self.advance();
            let right = self.term()?;
            result = ParseTree::BinaryOp {
                op,
                left: Box::new(result),
                right: Box::new(right),
            };
        }
        Ok(result)
    }

    /// Assignment -> VARIABLE '=' Expr
    fn assignment(&mut self) -> Result<ParseTree, ExprError> {
        let target = self.expect(TokenKind::Variable)?.text;
        self.expect(TokenKind::Assign)
            .map_err(|_| ExprError::Syntax("expected '=' for assignment".to_string()))?;
        let value = self.expression()?;

        // Declaration on first assignment; re-assignment changes nothing.
        if self.symbol_table.lookup(&target).is_none() {
            self.symbol_table.insert(&target);
        }

        Ok(ParseTree::Assignment {
            target,
            value: Box::new(value),
        })
    }

    /// Program -> Assignment*
    ///
    /// The first failure aborts the whole parse; nothing partial is
    /// returned.
    pub fn parse(mut self) -> Result<Vec<ParseTree>, ExprError> {
        let mut trees = Vec::new();
        while let Some(token) = self.current() {
            if token.kind != TokenKind::Variable {
                return Err(ExprError::Syntax(format!(
                    "expected an assignment, found {} {:?}",
                    token.kind, token.text
                )));
            }
            trees.push(self.assignment()?);
        }
        Ok(trees)
    }
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::super::symbol_table::UnorderedSymbolTable;
    use super::*;

    fn parse(src: &str) -> Result<Vec<ParseTree>, ExprError> {
        let mut table = UnorderedSymbolTable::new();
        Parser::new(tokenize(src)?, &mut table).parse()
    }

    #[test]
    fn declaration_on_first_assignment() {
        let trees = parse("x = 1\ny = x + 1").unwrap();
        assert_eq!(trees.len(), 2);
    }

    #[test]
    fn read_before_assignment_fails() {
        assert_eq!(
            parse("y = x + 1"),
            Err(ExprError::UndefinedVariable("x".to_string()))
        );
    }

    #[test]
    fn reassignment_keeps_single_entry() {
        let mut table = UnorderedSymbolTable::new();
        let tokens = tokenize("x = 1\nx = x + 1").unwrap();
        Parser::new(tokens, &mut table).parse().unwrap();
        assert_eq!(table.entries().len(), 1);
    }

    #[test]
    fn subtraction_is_left_associative() {
        let trees = parse("x = 1 - 2 - 3").unwrap();
        assert_eq!(trees[0].to_string(), "x = ((1 - 2) - 3)");
    }

    #[test]
    fn term_binds_tighter_than_expression() {
        let trees = parse("x = 1 + 2 * 3").unwrap();
        assert_eq!(trees[0].to_string(), "x = (1 + (2 * 3))");
    }

    #[test]
    fn parentheses_override_precedence() {
        let trees = parse("x = (1 + 2) * 3").unwrap();
        assert_eq!(trees[0].to_string(), "x = ((1 + 2) * 3)");
    }

    #[test]
    fn missing_assign_is_a_syntax_error() {
        assert!(matches!(parse("x 1"), Err(ExprError::Syntax(_))));
    }

    #[test]
    fn missing_closing_paren_is_a_syntax_error() {
        assert!(matches!(parse("x = (1 + 2"), Err(ExprError::Syntax(_))));
    }

    #[test]
    fn non_variable_at_top_level_is_a_syntax_error() {
        assert!(matches!(parse("1 = x"), Err(ExprError::Syntax(_))));
    }

    #[test]
    fn dangling_operator_is_a_syntax_error() {
        assert!(matches!(parse("x = 1 +"), Err(ExprError::Syntax(_))));
    }

    #[test]
    fn empty_source_parses_to_nothing() {
        assert_eq!(parse(""), Ok(vec![]));
    }

    #[test]
    fn variable_read_inside_parentheses() {
        let trees = parse("a = 2\nb = (a + 1) * a").unwrap();
        assert_eq!(trees[1].to_string(), "b = ((a + 1) * a)");
    }
}
