//! # mailroster-core
//!
//! Core business logic for the `mailroster` recipient curation and bulk
//! dispatch tool.
//!
//! This crate provides:
//! - Address validation
//! - The recipient roster: unique addresses plus named groups, with
//!   change notifications for observers
//! - Transient selection sets and recipient resolution
//! - The persistence gateway seam and the session service that keeps
//!   local state mirrored to the remote snapshot store
//! - Dispatch of a composed message to a resolved recipient list
//!
//! The roster is the sole source of truth. Every mutation applies
//! locally first and then persists the complete snapshot; a failed save
//! is reported, never rolled back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod notice;
pub mod resolve;
pub mod roster;
pub mod selection;
pub mod service;

pub use error::{Error, Result};
pub use notice::{Notice, Severity};
pub use resolve::resolve;
pub use roster::{Group, GroupId, Roster, RosterEvent, ValidationError, is_valid_email};
pub use selection::SelectionSet;
pub use service::{
    Attachment, DEFAULT_CONTENT, DEFAULT_SUBJECT, Gateway, GroupDraft, ImportReport,
    ImportTarget, SendDraft, SendReport, Session, SnapshotStatus,
};
