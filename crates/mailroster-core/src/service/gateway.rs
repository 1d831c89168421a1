//! Persistence gateway seam between the session and the remote service.

use mailroster_remote::{RemoteClient, Result, SendRequest, Snapshot};

/// Remote operations the session depends on.
///
/// Mirrors the remote service contract one-to-one: wholesale load,
/// full-snapshot save, wipe, server-side address extraction, and
/// dispatch. The production implementation wraps [`RemoteClient`];
/// tests substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Loads the full persisted snapshot.
    async fn load(&self) -> Result<Snapshot>;

    /// Replaces the persisted snapshot with the complete current state.
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Wipes the persisted state. Only transport failures error; the
    /// response body is not interpreted.
    async fn wipe(&self) -> Result<()>;

    /// Extracts addresses from an uploaded file.
    async fn extract(&self, file_name: &str, bytes: Vec<u8>) -> Result<Vec<String>>;

    /// Dispatches one message; returns the reported sent count.
    async fn dispatch(&self, request: SendRequest) -> Result<u64>;
}

impl Gateway for RemoteClient {
    async fn load(&self) -> Result<Snapshot> {
        self.fetch_data().await
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.save_data(snapshot).await
    }

    async fn wipe(&self) -> Result<()> {
        self.clear_data().await
    }

    async fn extract(&self, file_name: &str, bytes: Vec<u8>) -> Result<Vec<String>> {
        self.upload_file(file_name, bytes).await
    }

    async fn dispatch(&self, request: SendRequest) -> Result<u64> {
        self.send_emails(request).await
    }
}
