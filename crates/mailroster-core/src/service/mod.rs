//! Service layer bridging the roster with the remote service.
//!
//! The session applies mutations locally, mirrors the full snapshot to
//! the remote after each one, merges file imports, and dispatches
//! composed messages to resolved recipient lists.

mod dispatch;
mod gateway;
mod session;

pub use dispatch::{Attachment, DEFAULT_CONTENT, DEFAULT_SUBJECT, SendDraft};
pub use gateway::Gateway;
pub use session::{
    GroupDraft, ImportReport, ImportTarget, SendReport, Session, SnapshotStatus,
};
