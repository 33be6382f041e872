//! Bidirectional outline-text transcoding.
//!
//! # Responsibility
//! - Parse a heading/bullet outline into `(nodes, edges)`.
//! - Serialize a graph back to the same textual format.
//!
//! # Invariants
//! - `parse(serialize(graph))` reproduces the tree shape and labels.
//! - A failed parse produces no partial graph.

pub mod parse;
pub mod serialize;

pub use parse::parse_outline;
pub use serialize::serialize_outline;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Deepest level the outline format can express.
pub const MAX_OUTLINE_LEVEL: u32 = 6;

/// Errors from outline transcoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    /// Input text is empty or whitespace-only.
    EmptyInput,
    /// Input text contains no heading or bullet producing a node.
    NoContent,
}

impl Display for OutlineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "outline text is empty"),
            Self::NoContent => write!(f, "outline text contains no headings or bullets"),
        }
    }
}

impl Error for OutlineError {}
