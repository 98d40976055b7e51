//! Streaming parser driver.
//!
//! Input arrives in chunks of any size (down to single bytes) through
//! [`Parser::feed`]; every byte moves the innermost open element through its
//! [`State`]. Elements are created in the document arena as soon as they
//! open and linked into their parent's children only when their closing tag
//! validates, so everything reachable from the root is final.
//!
//! ```text
//! Source ──read(chunk)──▶ Parser::feed ──step(state, byte)──▶ Action
//!                            │                                  │
//!                            │◀──── open / close / commit ──────┘
//!                            ▼
//!                       Parser::finish ──▶ Document
//! ```
//!
//! Runs of content and attribute-value bytes are located with `memchr` and
//! appended in one go; offsets and results are identical to feeding the
//! same input one byte at a time.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use log::{debug, trace};
use memchr::{memchr, memchr2};

use crate::chars::is_trailing_space;
use crate::error::{ParseError, Result, SyntaxError, SyntaxErrorKind};
use crate::options::{ParseOptions, TrailingPolicy};
use crate::state::{step, Action, State};
use crate::tree::{Document, NodeData, NodeId};

/// Result of a feed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedResult {
    /// Number of bytes consumed from the chunk
    pub bytes_consumed: usize,
    /// Whether the root element has been closed
    pub complete: bool,
}

/// Parse state of one open element.
#[derive(Debug)]
struct Frame {
    id: NodeId,
    state: State,
    /// Tag name, key, value, content or closing name being accumulated.
    buf: Vec<u8>,
    /// Key waiting for its value.
    key: Vec<u8>,
}

impl Frame {
    fn new(id: NodeId) -> Self {
        Self {
            id,
            state: State::TagName,
            buf: Vec::new(),
            key: Vec::new(),
        }
    }
}

/// Incremental parser building a [`Document`].
///
/// ```
/// use tagtree_core::Parser;
///
/// let mut parser = Parser::new();
/// parser.feed(b"<greeting lang=\"en\">hel").unwrap();
/// let fed = parser.feed(b"lo</greeting>").unwrap();
/// assert!(fed.complete);
///
/// let doc = parser.finish().unwrap();
/// assert_eq!(doc.root().content(), "hello");
/// ```
#[derive(Debug)]
pub struct Parser {
    nodes: Vec<NodeData>,
    /// Open elements, root first; the last one is the cursor.
    open: Vec<Frame>,
    /// Bytes consumed so far.
    offset: u64,
    complete: bool,
    trailing: TrailingPolicy,
    /// First syntax error; once set, every later call reports it again.
    failed: Option<SyntaxError>,
}

impl Parser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(&ParseOptions::default())
    }

    /// Create a parser with the given options.
    pub fn with_options(options: &ParseOptions) -> Self {
        Self {
            nodes: Vec::new(),
            open: Vec::new(),
            offset: 0,
            complete: false,
            trailing: options.trailing,
            failed: None,
        }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of elements currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Whether the root element has been closed.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Feed a chunk of input.
    ///
    /// Once the root element closes, the rest of the chunk (and any later
    /// chunk) is left unconsumed unless trailing input is rejected, in which
    /// case it is checked for non-whitespace bytes.
    ///
    /// After a syntax error the parser is poisoned: this and [`finish`]
    /// keep returning that error and no tree is ever produced.
    ///
    /// [`finish`]: Parser::finish
    pub fn feed(&mut self, chunk: &[u8]) -> Result<FeedResult> {
        if let Some(err) = &self.failed {
            return Err(err.clone().into());
        }

        let fed = self.feed_chunk(chunk);
        if let Err(ParseError::Syntax(err)) = &fed {
            self.failed = Some(err.clone());
        }
        fed
    }

    fn feed_chunk(&mut self, chunk: &[u8]) -> Result<FeedResult> {
        let mut pos = 0;

        while pos < chunk.len() {
            if self.complete {
                if self.trailing == TrailingPolicy::Ignore {
                    break;
                }
                self.check_trailing(&chunk[pos..])?;
                pos = chunk.len();
                break;
            }

            let run = self.text_run(&chunk[pos..]);
            if run > 0 {
                pos += run;
                continue;
            }

            let byte = chunk[pos];
            pos += 1;
            self.offset += 1;
            self.consume(byte)?;
        }

        Ok(FeedResult {
            bytes_consumed: pos,
            complete: self.complete,
        })
    }

    /// Finish parsing and return the document.
    ///
    /// Fails with [`ParseError::Unterminated`] if the root element was never
    /// closed, or with the earlier syntax error if one was reported.
    pub fn finish(self) -> Result<Document> {
        if let Some(err) = self.failed {
            return Err(err.into());
        }
        if !self.complete {
            let tag = self
                .open
                .last()
                .map(|frame| self.tag_in_progress(frame))
                .unwrap_or_default();
            return Err(ParseError::Unterminated {
                tag,
                depth: self.open.len(),
                offset: self.offset,
            });
        }

        Ok(Document::from_parts(self.nodes, NodeId::new(0)))
    }

    /// Append a run of plain content or value bytes to the cursor's
    /// accumulator, returning how many bytes were taken.
    fn text_run(&mut self, rest: &[u8]) -> usize {
        let Some(frame) = self.open.last_mut() else {
            return 0;
        };
        let len = match frame.state {
            State::Content => memchr(b'<', rest),
            State::AttrValue => memchr2(b'"', b'<', rest),
            _ => return 0,
        }
        .unwrap_or(rest.len());

        frame.buf.extend_from_slice(&rest[..len]);
        self.offset += len as u64;
        len
    }

    fn consume(&mut self, byte: u8) -> Result<()> {
        let Some(mut frame) = self.open.pop() else {
            return self.start_root(byte);
        };

        let transition = match step(frame.state, byte, frame.buf.is_empty()) {
            Ok(transition) => transition,
            Err(kind) => return Err(self.syntax_error(&frame, kind, byte)),
        };
        frame.state = transition.next;

        let index = frame.id.index();
        match transition.action {
            Action::Push => frame.buf.push(byte),
            Action::Skip => {}
            Action::CommitTag => self.nodes[index].tag = take_string(&mut frame.buf),
            Action::CommitKey => frame.key = std::mem::take(&mut frame.buf),
            Action::CommitValue => {
                let key = take_string(&mut frame.key);
                let value = take_string(&mut frame.buf);
                self.nodes[index].attributes.insert(key, value);
            }
            Action::CommitContent => self.nodes[index].content = take_string(&mut frame.buf),
            Action::OpenChild => {
                let parent = frame.id;
                self.open.push(frame);
                self.open_element(Some(parent));
                return self.consume(byte);
            }
            Action::Close => return self.close(frame, byte),
        }

        self.open.push(frame);
        Ok(())
    }

    fn start_root(&mut self, byte: u8) -> Result<()> {
        if byte != b'<' {
            return Err(SyntaxError {
                kind: SyntaxErrorKind::ExpectedRoot,
                byte,
                tag: String::new(),
                offset: self.offset,
            }
            .into());
        }
        self.open_element(None);
        Ok(())
    }

    fn open_element(&mut self, parent: Option<NodeId>) {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData::new(parent));
        self.open.push(Frame::new(id));
        trace!("open element #{} at byte {}", id.index(), self.offset);
    }

    fn close(&mut self, frame: Frame, byte: u8) -> Result<()> {
        let node = &self.nodes[frame.id.index()];
        if frame.buf != node.tag.as_bytes() {
            let found = String::from_utf8_lossy(&frame.buf).into_owned();
            return Err(self.syntax_error(&frame, SyntaxErrorKind::MismatchedClose { found }, byte));
        }

        trace!("close element '{}' at byte {}", node.tag, self.offset);
        match node.parent {
            Some(parent) => self.nodes[parent.index()].children.push(frame.id),
            None => {
                self.complete = true;
                debug!(
                    "parsed '{}': {} elements in {} bytes",
                    node.tag,
                    self.nodes.len(),
                    self.offset
                );
            }
        }
        Ok(())
    }

    fn check_trailing(&mut self, rest: &[u8]) -> Result<()> {
        for &byte in rest {
            self.offset += 1;
            if !is_trailing_space(byte) {
                return Err(SyntaxError {
                    kind: SyntaxErrorKind::TrailingContent,
                    byte,
                    tag: self.nodes[0].tag.clone(),
                    offset: self.offset,
                }
                .into());
            }
        }
        Ok(())
    }

    fn syntax_error(&self, frame: &Frame, kind: SyntaxErrorKind, byte: u8) -> ParseError {
        SyntaxError {
            kind,
            byte,
            tag: self.tag_in_progress(frame),
            offset: self.offset,
        }
        .into()
    }

    /// Name of the element a frame belongs to; the partial name while it is
    /// still being read.
    fn tag_in_progress(&self, frame: &Frame) -> String {
        if frame.state == State::TagName {
            String::from_utf8_lossy(&frame.buf).into_owned()
        } else {
            self.nodes[frame.id.index()].tag.clone()
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Take the accumulated bytes as a string, replacing invalid UTF-8.
fn take_string(buf: &mut Vec<u8>) -> String {
    match String::from_utf8(std::mem::take(buf)) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Parse a document from a byte source with default options.
pub fn parse<R: Read>(source: R) -> Result<Document> {
    parse_with(source, &ParseOptions::default())
}

/// Parse a document from a byte source.
///
/// Reads `options.buffer_size` bytes at a time until the root element closes
/// (or, when trailing input is rejected, until end of input).
pub fn parse_with<R: Read>(mut source: R, options: &ParseOptions) -> Result<Document> {
    let mut parser = Parser::with_options(options);
    let mut buf = vec![0u8; options.buffer_size.max(1)];

    loop {
        let len = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(len) => len,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        let fed = parser.feed(&buf[..len])?;
        if fed.complete && options.trailing == TrailingPolicy::Ignore {
            break;
        }
    }

    parser.finish()
}

/// Parse an in-memory document with default options.
pub fn parse_bytes(input: &[u8]) -> Result<Document> {
    let mut parser = Parser::new();
    parser.feed(input)?;
    parser.finish()
}

/// Open and parse a file with default options.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with(path, &ParseOptions::default())
}

/// Open and parse a file. The file is closed on every return path.
pub fn parse_file_with<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Document> {
    let file = File::open(path)?;
    parse_with(file, options)
}

// ============================================================================
// Tests
// ============================================================================
