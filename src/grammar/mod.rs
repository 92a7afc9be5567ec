pub mod grammar;
pub mod ll1_table;
pub mod nullable_first_follow;
pub mod parse;
pub mod pretty_print;
pub use grammar::Grammar;
pub use ll1_table::Ll1Table;

pub const EPSILON: &str = "ε";
pub const END_MARK: &str = "$";
