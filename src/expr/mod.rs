pub mod lexer;
pub mod parser;
pub mod symbol_table;

pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{ParseTree, Parser};
pub use symbol_table::{
    HashSymbolTable, OrderedSymbolTable, SymbolEntry, SymbolTable, TreeSymbolTable,
    UnorderedSymbolTable,
};

/// Everything that can go wrong between raw source text and a parse
/// tree. All three are fatal where raised: no recovery, no partial
/// results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    #[error("invalid character {ch:?} at byte {pos}")]
    InvalidCharacter { ch: char, pos: usize },
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("variable `{0}` is not defined")]
    UndefinedVariable(String),
}

pub fn parse_with_unordered(tokens: Vec<Token>) -> Result<(Vec<ParseTree>, Vec<SymbolEntry>), ExprError> {
    let mut table = UnorderedSymbolTable::new();
    let trees = Parser::new(tokens, &mut table).parse()?;
    Ok((trees, table.entries()))
}

pub fn parse_with_ordered(tokens: Vec<Token>) -> Result<(Vec<ParseTree>, Vec<SymbolEntry>), ExprError> {
    let mut table = OrderedSymbolTable::new();
    let trees = Parser::new(tokens, &mut table).parse()?;
    Ok((trees, table.entries()))
}

pub fn parse_with_tree(tokens: Vec<Token>) -> Result<(Vec<ParseTree>, Vec<SymbolEntry>), ExprError> {
    let mut table = TreeSymbolTable::new();
    let trees = Parser::new(tokens, &mut table).parse()?;
    Ok((trees, table.entries()))
}

/// The hash variant groups names into buckets only after the parse is
/// done, so its export is a bucketed grouping rather than a flat list.
pub fn parse_with_hash(
    tokens: Vec<Token>,
) -> Result<(Vec<ParseTree>, Vec<(usize, Vec<SymbolEntry>)>), ExprError> {
    let mut table = HashSymbolTable::new();
    let trees = Parser::new(tokens, &mut table).parse()?;
    Ok((trees, table.into_buckets()))
}
