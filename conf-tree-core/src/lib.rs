//! Generic parsing and query primitives for network device configurations.
//!
//! Raw config text is parsed into a [`ConfigTree`]: an ordered forest of
//! statement lines linked by index. Two dialects are supported — flat
//! indentation-nested text (IOS-like) and brace-nested blocks (Junos-like) —
//! both reducing to the same line/children model. Higher-level tools query
//! the tree with compiled regex patterns; vendor knowledge stays out of this
//! crate.

pub mod addr;
pub mod parser;
pub mod query;
pub mod tree;

pub use addr::{normalize_cidr, AddrError};
pub use parser::{parse, parse_file, ParseError, Syntax};
pub use query::{PatternError, TypedPattern};
pub use tree::{ConfigLine, ConfigTree, LineId};
