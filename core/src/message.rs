//! Message abstraction at the transport boundary.
//!
//! The engine never talks to a bot transport directly; it only needs the
//! text/caption content and the identity of the incoming message. The
//! transport layer implements [`IncomingMessage`] for its own message type,
//! and [`PlainMessage`] covers tests and non-transport callers.

/// Read-only view of an incoming message.
pub trait IncomingMessage: Send + Sync {
    /// Identifier of the message within its chat.
    fn message_id(&self) -> i64;

    /// Plain text content, if any. Only text can carry the bot command.
    fn text(&self) -> Option<&str>;

    /// Media caption, if any.
    fn caption(&self) -> Option<&str> {
        None
    }
}

/// Owned, struct-backed [`IncomingMessage`] implementation.
///
/// # Examples
///
/// ```
/// use message_schema_core::{IncomingMessage, PlainMessage};
///
/// let message = PlainMessage::with_text(42, "/ban spammer");
/// assert_eq!(message.message_id(), 42);
/// assert_eq!(message.text(), Some("/ban spammer"));
/// assert_eq!(message.caption(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainMessage {
    pub message_id: i64,
    pub text: Option<String>,
    pub caption: Option<String>,
}

impl PlainMessage {
    /// Message carrying only text.
    pub fn with_text(message_id: i64, text: impl Into<String>) -> Self {
        Self {
            message_id,
            text: Some(text.into()),
            caption: None,
        }
    }

    /// Message carrying only a media caption.
    pub fn with_caption(message_id: i64, caption: impl Into<String>) -> Self {
        Self {
            message_id,
            text: None,
            caption: Some(caption.into()),
        }
    }

    /// Message with neither text nor caption.
    pub fn empty(message_id: i64) -> Self {
        Self {
            message_id,
            text: None,
            caption: None,
        }
    }
}

impl IncomingMessage for PlainMessage {
    fn message_id(&self) -> i64 {
        self.message_id
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}
