//! Send draft state and dispatch request assembly.

use mailroster_remote::{FilePart, SendRequest};

use crate::selection::SelectionSet;

/// Placeholder used when the draft subject is empty, so the service
/// always receives a non-empty string.
pub const DEFAULT_SUBJECT: &str = "(no subject)";

/// Placeholder used when the draft body is empty.
pub const DEFAULT_CONTENT: &str = "(no content)";

/// An opaque attachment: a name and raw contents, never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name as picked by the user.
    pub name: String,
    /// Raw contents, threaded through to dispatch untouched.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment from a name and contents.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Draft of the next outgoing message plus its target selections.
///
/// Lives for one send-screen interaction: kept intact across failed
/// sends so nothing has to be re-entered, reset wholesale after a
/// successful one.
#[derive(Debug, Clone, Default)]
pub struct SendDraft {
    /// Subject line; empty falls back to [`DEFAULT_SUBJECT`].
    pub subject: String,
    /// Body text; empty falls back to [`DEFAULT_CONTENT`].
    pub content: String,
    /// Attachments in pick order.
    pub attachments: Vec<Attachment>,
    /// Directly selected recipient addresses.
    pub emails: SelectionSet,
    /// Selected group ids.
    pub groups: SelectionSet,
}

impl SendDraft {
    /// Clears subject, content, attachments, and both selections.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Removes one attachment by index; out-of-range is ignored.
    pub fn remove_attachment(&mut self, index: usize) {
        if index < self.attachments.len() {
            self.attachments.remove(index);
        }
    }

    /// Assembles the wire request for an already-resolved recipient
    /// list, applying the placeholder defaults.
    #[must_use]
    pub fn to_request(&self, recipients: Vec<String>) -> SendRequest {
        SendRequest {
            subject: if self.subject.is_empty() {
                DEFAULT_SUBJECT.to_string()
            } else {
                self.subject.clone()
            },
            content: if self.content.is_empty() {
                DEFAULT_CONTENT.to_string()
            } else {
                self.content.clone()
            },
            recipients,
            attachments: self
                .attachments
                .iter()
                .map(|a| FilePart {
                    name: a.name.clone(),
                    bytes: a.bytes.clone(),
                })
                .collect(),
        }
    }
}
