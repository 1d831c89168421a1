//! # mailroster-remote
//!
//! HTTP client for the remote persistence and mail-transport service that
//! backs `mailroster`.
//!
//! The service exposes five endpoints under `/api`:
//!
//! - `GET get-data`: full persisted snapshot (addresses + groups)
//! - `POST save-data`: replace the persisted snapshot wholesale
//! - `POST clear-data`: wipe the persisted snapshot
//! - `POST upload-file`: extract addresses from a spreadsheet/CSV upload
//! - `POST send-emails`: dispatch one message to a recipient list
//!
//! Every response distinguishes transport failures (unreachable service,
//! non-JSON body) from application failures (`success: false` with a
//! service-supplied message); see [`Error`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailroster_remote::{RemoteClient, Snapshot};
//!
//! #[tokio::main]
//! async fn main() -> mailroster_remote::Result<()> {
//!     let client = RemoteClient::new("http://localhost:3001");
//!
//!     let snapshot = client.fetch_data().await?;
//!     println!("{} addresses on record", snapshot.emails.len());
//!
//!     client.save_data(&snapshot).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod types;

pub use client::RemoteClient;
pub use error::{Error, Result};
pub use types::{FilePart, GroupRecord, SendRequest, Snapshot};
