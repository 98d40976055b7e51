//! Parser configuration.

/// Default read chunk size for [`crate::parse`].
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// What happens to input after the root element closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingPolicy {
    /// Stop at the root's closing `>`; later bytes are never inspected.
    #[default]
    Ignore,
    /// Keep reading to end of input; only whitespace may follow the root.
    Reject,
}

/// Options for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub trailing: TrailingPolicy,
    /// Bytes requested per read from the source.
    pub buffer_size: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject non-whitespace input after the root element.
    pub fn strict(mut self) -> Self {
        self.trailing = TrailingPolicy::Reject;
        self
    }

    /// Set the read chunk size (clamped to at least one byte).
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trailing: TrailingPolicy::Ignore,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}
