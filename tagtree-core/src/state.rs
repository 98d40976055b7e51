//! Per-element parse state and the byte transition function.
//!
//! Each open element carries exactly one [`State`]. [`step`] maps the
//! element's state and the next input byte to an [`Action`] for the parser
//! driver plus the state the element moves to. It is pure: accumulator
//! contents and the tree live in the driver, the only extra input is whether
//! the element's accumulator is currently empty.
//!
//! ```text
//! TagName ─' '─▶ AttrKey ─'='─▶ AwaitQuote ─'"'─▶ AttrValue ─'"'─▶ AfterValue
//!    │              ▲                                                 │  │
//!    │              └──────────────────────' '────────────────────────┘  │
//!    └─'>'─▶ Content ◀──────────────────────'>'──────────────────────────┘
//!              │ ▲
//!             '<' └─(other: child opened)─ AngleOpen ─'/'─▶ ClosingTag ─'>'─▶ closed
//! ```

use crate::chars::is_name_byte;
use crate::error::SyntaxErrorKind;

/// Where an element is in its own syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Reading the element name right after `<`.
    TagName,
    /// Between attributes or reading a key. The key may still be empty.
    AttrKey,
    /// `=` seen, expecting the opening `"`.
    AwaitQuote,
    /// Inside a quoted attribute value.
    AttrValue,
    /// Closing `"` seen, expecting a space or `>`.
    AfterValue,
    /// Inside the element body.
    Content,
    /// `<` seen in content: `/` closes this element, anything else opens a child.
    AngleOpen,
    /// Reading the name of `</name>`.
    ClosingTag,
}

/// What the driver does with the byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append the byte to the element's accumulator.
    Push,
    /// Consume the byte without storing it.
    Skip,
    /// The accumulator becomes the tag name.
    CommitTag,
    /// The accumulator becomes the pending attribute key.
    CommitKey,
    /// Store `attributes[pending key] = accumulator`.
    CommitValue,
    /// The accumulator becomes the element's content.
    CommitContent,
    /// Open a child element and feed it this byte in [`State::TagName`].
    OpenChild,
    /// Compare the accumulator against the tag name and close the element.
    Close,
}

/// Result of a single [`step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: Action,
    pub next: State,
}

impl Transition {
    #[inline]
    fn new(action: Action, next: State) -> Self {
        Self { action, next }
    }
}

/// Compute the transition for `byte` in `state`.
///
/// `pending_empty` is true when the element's accumulator holds no bytes.
pub fn step(state: State, byte: u8, pending_empty: bool) -> Result<Transition, SyntaxErrorKind> {
    use Action::*;
    use State::*;

    match state {
        TagName => match byte {
            b' ' | b'>' if pending_empty => Err(SyntaxErrorKind::InvalidTagName),
            b' ' => Ok(Transition::new(CommitTag, AttrKey)),
            b'>' => Ok(Transition::new(CommitTag, Content)),
            b'<' => Err(SyntaxErrorKind::UnclosedTag),
            b if is_name_byte(b) => Ok(Transition::new(Push, TagName)),
            _ => Err(SyntaxErrorKind::InvalidTagName),
        },

        AttrKey => match byte {
            b if is_name_byte(b) => Ok(Transition::new(Push, AttrKey)),
            b' ' if pending_empty => Ok(Transition::new(Skip, AttrKey)),
            b'=' if !pending_empty => Ok(Transition::new(CommitKey, AwaitQuote)),
            b'<' => Err(SyntaxErrorKind::UnclosedTag),
            _ if pending_empty => Err(SyntaxErrorKind::InvalidAttributeKey),
            _ => Err(SyntaxErrorKind::ExpectedEquals),
        },

        AwaitQuote => match byte {
            b'"' => Ok(Transition::new(Skip, AttrValue)),
            b'<' => Err(SyntaxErrorKind::UnclosedTag),
            _ => Err(SyntaxErrorKind::UnquotedValue),
        },

        AttrValue => match byte {
            b'"' => Ok(Transition::new(CommitValue, AfterValue)),
            b'<' => Err(SyntaxErrorKind::UnclosedTag),
            _ => Ok(Transition::new(Push, AttrValue)),
        },

        AfterValue => match byte {
            b' ' => Ok(Transition::new(Skip, AttrKey)),
            b'>' => Ok(Transition::new(Skip, Content)),
            b'<' => Err(SyntaxErrorKind::UnclosedTag),
            _ => Err(SyntaxErrorKind::MalformedValue),
        },

        Content => match byte {
            b'<' => Ok(Transition::new(Skip, AngleOpen)),
            _ => Ok(Transition::new(Push, Content)),
        },

        AngleOpen => match byte {
            b'/' => Ok(Transition::new(CommitContent, ClosingTag)),
            _ => Ok(Transition::new(OpenChild, Content)),
        },

        ClosingTag => match byte {
            b'>' => Ok(Transition::new(Close, ClosingTag)),
            _ => Ok(Transition::new(Push, ClosingTag)),
        },
    }
}
