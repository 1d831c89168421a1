//! HTTP client for the remote persistence and mail-transport service.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{
    AckResponse, DataResponse, SendRequest, SendResponse, Snapshot, UploadResponse,
};

/// Client for the remote snapshot and dispatch endpoints.
///
/// Thin wrapper around a shared [`reqwest::Client`] plus the service base
/// URL. Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RemoteClient {
    /// Base URL used when none is configured.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3001";

    /// Creates a client for the given base URL (trailing slashes tolerated).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http_client: reqwest::Client::new(),
        }
    }

    /// The configured base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/{name}", self.base_url)
    }

    /// Fetches the full persisted snapshot.
    ///
    /// Missing `emails`/`groups` fields in the response deserialize as
    /// empty collections.
    ///
    /// # Errors
    ///
    /// [`Error::Http`] on transport failure or a non-JSON body,
    /// [`Error::Service`] when the service reports `success: false`.
    pub async fn fetch_data(&self) -> Result<Snapshot> {
        let response = self
            .http_client
            .get(self.endpoint("get-data"))
            .send()
            .await?;

        let body: DataResponse = response.json().await?;
        if body.success {
            debug!(
                emails = body.emails.len(),
                groups = body.groups.len(),
                "fetched snapshot"
            );
            Ok(Snapshot {
                emails: body.emails,
                groups: body.groups,
            })
        } else {
            Err(Error::service(body.error))
        }
    }

    /// Replaces the persisted snapshot with `snapshot` (last write wins).
    ///
    /// The body always carries the complete current state; the service
    /// keeps no deltas and no versioning.
    ///
    /// # Errors
    ///
    /// [`Error::Http`] on transport failure, [`Error::Service`] when the
    /// service reports `success: false`.
    pub async fn save_data(&self, snapshot: &Snapshot) -> Result<()> {
        let response = self
            .http_client
            .post(self.endpoint("save-data"))
            .json(snapshot)
            .send()
            .await?;

        let body: AckResponse = response.json().await?;
        if body.success {
            debug!(
                emails = snapshot.emails.len(),
                groups = snapshot.groups.len(),
                "saved snapshot"
            );
            Ok(())
        } else {
            Err(Error::service(body.error))
        }
    }

    /// Asks the service to wipe its stored state.
    ///
    /// Any response at all counts as acknowledged. Callers reset local
    /// state regardless of the response shape, so only a transport
    /// failure is an error here.
    ///
    /// # Errors
    ///
    /// [`Error::Http`] when the request cannot be completed.
    pub async fn clear_data(&self) -> Result<()> {
        self.http_client
            .post(self.endpoint("clear-data"))
            .send()
            .await?;
        debug!("remote wipe acknowledged");
        Ok(())
    }

    /// Uploads a spreadsheet/CSV and returns the extracted addresses.
    ///
    /// Extraction happens entirely on the service side; the returned
    /// list may contain duplicates and is not validated here.
    ///
    /// # Errors
    ///
    /// [`Error::Http`] on transport failure or a non-JSON body,
    /// [`Error::Service`] when the service cannot parse the file.
    pub async fn upload_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<Vec<String>> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http_client
            .post(self.endpoint("upload-file"))
            .multipart(form)
            .send()
            .await?;

        let body: UploadResponse = response.json().await?;
        if body.success {
            debug!(extracted = body.emails.len(), "file upload processed");
            Ok(body.emails)
        } else {
            Err(Error::service(body.error))
        }
    }

    /// Submits one message for dispatch to every recipient.
    ///
    /// Encoded as a multipart form: `subject`, `content`, `emails` (a
    /// JSON-encoded array) and one `attachment{N}` part per attachment.
    /// Returns the number of messages the service reports as sent,
    /// falling back to the recipient count when the field is omitted.
    ///
    /// # Errors
    ///
    /// [`Error::Http`] on transport failure or a non-JSON body,
    /// [`Error::Service`] when the service reports the send unsuccessful.
    pub async fn send_emails(&self, request: SendRequest) -> Result<u64> {
        let recipient_count = request.recipients.len() as u64;

        let mut form = Form::new()
            .text("subject", request.subject)
            .text("content", request.content)
            .text("emails", serde_json::to_string(&request.recipients)?);

        for (index, file) in request.attachments.into_iter().enumerate() {
            let part = Part::bytes(file.bytes).file_name(file.name);
            form = form.part(format!("attachment{index}"), part);
        }

        let response = self
            .http_client
            .post(self.endpoint("send-emails"))
            .multipart(form)
            .send()
            .await?;

        let body: SendResponse = response.json().await?;
        if body.success {
            let sent = body.sent.unwrap_or(recipient_count);
            debug!(sent, "dispatch accepted");
            Ok(sent)
        } else {
            Err(Error::service(body.error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let client = RemoteClient::new("http://localhost:3001///");
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(
            client.endpoint("get-data"),
            "http://localhost:3001/api/get-data"
        );
    }

    #[test]
    fn default_base_url_is_local() {
        let client = RemoteClient::new(RemoteClient::DEFAULT_BASE_URL);
        assert_eq!(client.base_url(), "http://localhost:3001");
    }
}
