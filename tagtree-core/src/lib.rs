//! tagtree Core Parser
//!
//! Streaming parser for a small markup dialect: elements with a lowercase
//! name, double-quoted attributes and text content. Input is consumed as a
//! byte stream and turned into an ordered element tree.
//!
//! ```text
//! <shelf owner="ana"><book id="1">Dune</book><book id="2">Emma</book></shelf>
//! ```
//!
//! # Architecture
//!
//! - **chars.rs** - Name byte classification
//! - **state.rs** - Per-element state enum and the pure transition function
//! - **parser.rs** - Streaming driver: chunk feeding, cursor, tree building
//! - **tree.rs** - Arena tree with parent links and navigation handles
//! - **error.rs** - Structured errors with byte offsets
//! - **options.rs** - Parser configuration
//!
//! Not supported: namespaces, comments, processing instructions, CDATA,
//! entity references, self-closing elements, quotes inside attribute values.

pub mod chars;
pub mod error;
pub mod options;
pub mod parser;
pub mod state;
pub mod tree;

pub use error::{ParseError, Result, SyntaxError, SyntaxErrorKind};
pub use options::{ParseOptions, TrailingPolicy};
pub use parser::{parse, parse_bytes, parse_file, parse_file_with, parse_with, FeedResult, Parser};
pub use state::State;
pub use tree::{Descendants, Document, Node, NodeId};
