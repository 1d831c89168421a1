//! Wire types for the remote snapshot and dispatch service.

use serde::{Deserialize, Serialize};

/// A persisted recipient group record.
///
/// `emails` is the member list frozen at the time the group was written;
/// it is a value copy, not a reference into the global address list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Stable group identifier.
    pub id: String,
    /// Display label (uniqueness not enforced).
    pub name: String,
    /// Member addresses in insertion order.
    #[serde(default)]
    pub emails: Vec<String>,
}

/// The full persisted state: every address plus every group.
///
/// This is both the `get-data` result and the `save-data` request body.
/// Saves always carry the complete state; the service keeps no deltas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All known addresses in insertion order.
    #[serde(default)]
    pub emails: Vec<String>,
    /// All groups in creation order.
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
}

/// A message ready for dispatch to an already-resolved recipient list.
#[derive(Debug, Clone, Default)]
pub struct SendRequest {
    /// Subject line. The service expects a non-empty string; callers
    /// substitute a placeholder before building the request.
    pub subject: String,
    /// Message body, same non-empty expectation as `subject`.
    pub content: String,
    /// Deduplicated recipient addresses.
    pub recipients: Vec<String>,
    /// Attachment payloads, transmitted as `attachment0..N` form parts.
    pub attachments: Vec<FilePart>,
}

/// Raw file contents threaded through to the service untouched.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// File name reported to the service.
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Response body of `GET /api/get-data`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataResponse {
    pub success: bool,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
    pub error: Option<String>,
}

/// Acknowledgement body of `POST /api/save-data`.
#[derive(Debug, Deserialize)]
pub(crate) struct AckResponse {
    pub success: bool,
    pub error: Option<String>,
}

/// Response body of `POST /api/upload-file`.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub emails: Vec<String>,
    pub error: Option<String>,
}

/// Response body of `POST /api/send-emails`.
#[derive(Debug, Deserialize)]
pub(crate) struct SendResponse {
    pub success: bool,
    pub sent: Option<u64>,
    pub error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = Snapshot {
            emails: vec!["a@example.com".to_string()],
            groups: vec![GroupRecord {
                id: "g1".to_string(),
                name: "Team".to_string(),
                emails: vec!["a@example.com".to_string()],
            }],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn data_response_tolerates_missing_collections() {
        let body: DataResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(body.success);
        assert!(body.emails.is_empty());
        assert!(body.groups.is_empty());
        assert!(body.error.is_none());
    }

    #[test]
    fn group_record_defaults_empty_members() {
        let record: GroupRecord =
            serde_json::from_str(r#"{"id": "1", "name": "Empty"}"#).unwrap();
        assert!(record.emails.is_empty());
    }
}
