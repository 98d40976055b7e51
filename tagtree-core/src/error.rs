//! Parse errors.
//!
//! Every error aborts the parse; the parser never recovers and never hands
//! out a partial tree. Syntax errors carry the offending byte, the tag that
//! was being parsed and the 1-based byte offset as separate fields so callers
//! can match on [`SyntaxErrorKind`] instead of message text.

/// Kind of syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Input does not start with `<`
    ExpectedRoot,
    /// Byte not allowed in a tag name (also raised for an empty name)
    InvalidTagName,
    /// Byte not allowed in an attribute key (also raised for an empty key)
    InvalidAttributeKey,
    /// Attribute key not followed by `=`
    ExpectedEquals,
    /// Attribute value not opened with `"` after `=`
    UnquotedValue,
    /// Unexpected byte right after an attribute value's closing `"`
    MalformedValue,
    /// `<` while a tag is still open
    UnclosedTag,
    /// Closing tag name differs from the opening tag name
    MismatchedClose { found: String },
    /// Non-whitespace input after the root element (strict mode)
    TrailingContent,
}

impl SyntaxErrorKind {
    /// Get a human-readable message for this error kind.
    pub fn message(&self) -> &'static str {
        match self {
            Self::ExpectedRoot => "expected '<' to open the root element",
            Self::InvalidTagName => "unexpected byte in tag name",
            Self::InvalidAttributeKey => "unexpected byte in attribute key",
            Self::ExpectedEquals => "expected '=' after attribute key",
            Self::UnquotedValue => "expected '\"' to open attribute value",
            Self::MalformedValue => "unexpected byte after attribute value",
            Self::UnclosedTag => "unexpected '<' in unclosed tag",
            Self::MismatchedClose { .. } => "mismatched closing tag",
            Self::TrailingContent => "unexpected content after root element",
        }
    }

    /// Extra context appended to the message, empty for most kinds.
    fn detail(&self) -> String {
        match self {
            Self::MismatchedClose { found } => format!(" (got '{}')", found),
            _ => String::new(),
        }
    }
}

/// A grammar violation at a specific byte.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "syntax error at byte {offset}: {} '{}' in tag '{tag}'{}",
    .kind.message(),
    .byte.escape_ascii(),
    .kind.detail()
)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// The offending byte.
    pub byte: u8,
    /// Tag in progress: the partial name while still reading it.
    pub tag: String,
    /// 1-based offset of the offending byte.
    pub offset: u64,
}

/// Error returned when parsing fails.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Opening or reading the byte source failed.
    #[error("failed to read source: {0}")]
    Source(#[from] std::io::Error),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Input ended before the root element was closed.
    #[error("unexpected end of input after byte {offset}: tag '{tag}' is not closed ({depth} open)")]
    Unterminated {
        /// Innermost open tag, empty if no element was started.
        tag: String,
        /// Number of elements still open.
        depth: usize,
        offset: u64,
    },
}

impl ParseError {
    /// Get the syntax error kind, if this is a syntax error.
    pub fn syntax_kind(&self) -> Option<&SyntaxErrorKind> {
        match self {
            ParseError::Syntax(e) => Some(&e.kind),
            _ => None,
        }
    }

    /// Byte offset associated with the error, if any.
    pub fn offset(&self) -> Option<u64> {
        match self {
            ParseError::Source(_) => None,
            ParseError::Syntax(e) => Some(e.offset),
            ParseError::Unterminated { offset, .. } => Some(*offset),
        }
    }
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;
