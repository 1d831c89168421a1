//! Session orchestration: optimistic local mutation, snapshot
//! persistence, import merging, and dispatch.

use tracing::{info, warn};

use mailroster_remote::Error as RemoteError;

use crate::error::{Error, Result};
use crate::resolve::resolve;
use crate::roster::{GroupId, Roster, ValidationError};
use crate::selection::SelectionSet;
use crate::service::dispatch::SendDraft;
use crate::service::gateway::Gateway;

/// Outcome of the persistence phase of a mutation.
///
/// Mutations apply locally first, then the full snapshot is saved. A
/// failed save never rolls the local change back; it is reported here
/// and the two stores stay divergent until the next successful save.
#[derive(Debug)]
pub enum SnapshotStatus {
    /// The remote snapshot matches local state again.
    Saved,
    /// Local state is ahead of the remote.
    Failed(RemoteError),
}

impl SnapshotStatus {
    /// True when the snapshot reached the remote.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Which surface initiated a file import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportTarget {
    /// The global address book; only the roster is touched.
    AddressBook,
    /// The group editor; extracted addresses also join the member
    /// selection of the draft being edited.
    GroupEditor,
    /// The send screen; extracted addresses also join the direct
    /// recipient selection.
    SendPicker,
}

/// Group editor state, scoped to one create/edit interaction.
#[derive(Debug, Clone, Default)]
pub struct GroupDraft {
    /// Group being edited, or `None` when creating a new one.
    pub editing: Option<GroupId>,
    /// Name field.
    pub name: String,
    /// Member selection.
    pub members: SelectionSet,
}

/// Report of a completed import.
#[derive(Debug)]
pub struct ImportReport {
    /// How many addresses the service extracted, duplicates included.
    pub extracted: usize,
    /// How many of them were new to the global collection.
    pub added: usize,
    /// Persistence outcome of the merge.
    pub snapshot: SnapshotStatus,
}

/// Report of a completed send.
#[derive(Debug)]
pub struct SendReport {
    /// Messages the service reports as sent.
    pub sent: u64,
}

/// A single client session: the roster, the transient drafts and
/// selections, and the gateway to the remote service.
///
/// Every mutation is two-phase: apply locally, then persist the full
/// snapshot. Long-running operations (import, send) hold a coarse busy
/// flag for the duration of their remote call; a second entry while the
/// flag is up is rejected with [`Error::Busy`] rather than raced. There
/// is no cancellation: a remote call that never settles leaves the flag
/// up indefinitely.
#[derive(Debug)]
pub struct Session<G> {
    roster: Roster,
    group_draft: GroupDraft,
    send_draft: SendDraft,
    gateway: G,
    busy: bool,
}

impl<G: Gateway> Session<G> {
    /// Creates a session over the given gateway with an empty roster.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            roster: Roster::new(),
            group_draft: GroupDraft::default(),
            send_draft: SendDraft::default(),
            gateway,
            busy: false,
        }
    }

    /// The authoritative roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The group editor draft.
    #[must_use]
    pub fn group_draft(&self) -> &GroupDraft {
        &self.group_draft
    }

    /// Mutable access to the group editor draft, for the UI to type
    /// into.
    pub fn group_draft_mut(&mut self) -> &mut GroupDraft {
        &mut self.group_draft
    }

    /// The send draft.
    #[must_use]
    pub fn send_draft(&self) -> &SendDraft {
        &self.send_draft
    }

    /// Mutable access to the send draft.
    pub fn send_draft_mut(&mut self) -> &mut SendDraft {
        &mut self.send_draft
    }

    /// True while an import or send is settling. The calling UI is
    /// expected to honor this before starting another one.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Startup load: replaces local state wholesale with the persisted
    /// snapshot. No incremental merge.
    ///
    /// # Errors
    ///
    /// [`Error::Remote`]; local state is left untouched on failure.
    pub async fn load(&mut self) -> Result<()> {
        let snapshot = self.gateway.load().await?;
        self.roster.replace(snapshot);
        Ok(())
    }

    async fn persist(&self) -> SnapshotStatus {
        match self.gateway.save(&self.roster.snapshot()).await {
            Ok(()) => SnapshotStatus::Saved,
            Err(error) => {
                warn!(%error, "snapshot save failed; local state is ahead of the remote");
                SnapshotStatus::Failed(error)
            }
        }
    }

    /// Adds one address, then snapshots.
    ///
    /// # Errors
    ///
    /// Validation errors reject before any state change; a persist
    /// failure is reported in the returned status, not as an error.
    pub async fn add_email(&mut self, value: &str) -> Result<SnapshotStatus> {
        self.roster.add_email(value)?;
        Ok(self.persist().await)
    }

    /// Removes one address (idempotent), then snapshots.
    pub async fn remove_email(&mut self, value: &str) -> SnapshotStatus {
        self.roster.remove_email(value);
        self.persist().await
    }

    /// Creates a group, then snapshots.
    ///
    /// # Errors
    ///
    /// Validation errors reject before any state change.
    pub async fn create_group(
        &mut self,
        name: &str,
        members: Vec<String>,
    ) -> Result<(GroupId, SnapshotStatus)> {
        let id = self.roster.create_group(name, members)?;
        Ok((id, self.persist().await))
    }

    /// Replaces a group's name and members, then snapshots.
    ///
    /// # Errors
    ///
    /// Validation errors and unknown ids reject before any state change.
    pub async fn update_group(
        &mut self,
        id: &GroupId,
        name: &str,
        members: Vec<String>,
    ) -> Result<SnapshotStatus> {
        self.roster.update_group(id, name, members)?;
        Ok(self.persist().await)
    }

    /// Deletes a group (idempotent), then snapshots.
    pub async fn delete_group(&mut self, id: &GroupId) -> SnapshotStatus {
        self.roster.delete_group(id);
        self.persist().await
    }

    /// Begins creating a group: resets the editor draft.
    pub fn begin_group(&mut self) {
        self.group_draft = GroupDraft::default();
    }

    /// Begins editing a group, seeding the draft with its current name
    /// and frozen member list.
    ///
    /// # Errors
    ///
    /// [`Error::GroupNotFound`] when the id is stale.
    pub fn begin_group_edit(&mut self, id: &GroupId) -> Result<()> {
        let group = self
            .roster
            .group(id)
            .ok_or_else(|| Error::GroupNotFound(id.clone()))?;
        self.group_draft = GroupDraft {
            editing: Some(group.id.clone()),
            name: group.name.clone(),
            members: SelectionSet::from_values(group.emails.iter().cloned()),
        };
        Ok(())
    }

    /// Cancels the group editor, dropping the draft.
    pub fn cancel_group_draft(&mut self) {
        self.group_draft = GroupDraft::default();
    }

    /// Saves the editor draft (create or update, depending on how it
    /// was begun), resets it, and snapshots.
    ///
    /// # Errors
    ///
    /// Validation errors leave both the roster and the draft untouched.
    pub async fn save_group_draft(&mut self) -> Result<(GroupId, SnapshotStatus)> {
        let name = self.group_draft.name.clone();
        let members = self.group_draft.members.as_slice().to_vec();
        let id = match self.group_draft.editing.clone() {
            Some(id) => {
                self.roster.update_group(&id, &name, members)?;
                id
            }
            None => self.roster.create_group(&name, members)?,
        };
        self.group_draft = GroupDraft::default();
        let status = self.persist().await;
        Ok((id, status))
    }

    /// Imports a file of addresses through the remote extractor.
    ///
    /// The extracted list is set-unioned into the global collection
    /// (which is itself a mutation and snapshots), and additionally into
    /// the selection set matching `target`. A failed or empty extraction
    /// touches neither.
    ///
    /// # Errors
    ///
    /// [`Error::Busy`] while another import or send is settling,
    /// [`Error::Remote`] when the upload fails, [`Error::EmptyImport`]
    /// when the service extracted nothing.
    pub async fn import_file(
        &mut self,
        target: ImportTarget,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ImportReport> {
        if self.busy {
            return Err(Error::Busy);
        }
        self.busy = true;
        let result = self.import_inner(target, file_name, bytes).await;
        self.busy = false;
        result
    }

    async fn import_inner(
        &mut self,
        target: ImportTarget,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ImportReport> {
        let extracted = self.gateway.extract(file_name, bytes).await?;
        if extracted.is_empty() {
            return Err(Error::EmptyImport);
        }

        let added = self.roster.merge_emails(extracted.iter().cloned());
        let snapshot = self.persist().await;

        match target {
            ImportTarget::AddressBook => {}
            ImportTarget::GroupEditor => {
                self.group_draft.members.union(extracted.iter().cloned());
            }
            ImportTarget::SendPicker => {
                self.send_draft.emails.union(extracted.iter().cloned());
            }
        }

        info!(file_name, extracted = extracted.len(), added, "file imported");
        Ok(ImportReport {
            extracted: extracted.len(),
            added,
            snapshot,
        })
    }

    /// Computes the current resolved recipient list, fresh on every
    /// call.
    #[must_use]
    pub fn resolved_recipients(&self) -> Vec<String> {
        resolve(
            self.send_draft.emails.as_slice(),
            self.send_draft.groups.as_slice(),
            self.roster.groups(),
        )
    }

    /// Dispatches the current draft to the resolved recipients.
    ///
    /// An empty resolution is rejected locally without contacting the
    /// service. On success the whole draft is reset: subject, content,
    /// attachments, and both send selections. Any failure leaves the
    /// draft intact so the user can retry without re-entering anything.
    ///
    /// # Errors
    ///
    /// [`Error::Busy`] while another import or send is settling,
    /// `NoRecipients` on an empty resolution, [`Error::Remote`] for
    /// transport and service-reported failures.
    pub async fn send(&mut self) -> Result<SendReport> {
        if self.busy {
            return Err(Error::Busy);
        }
        let recipients = self.resolved_recipients();
        if recipients.is_empty() {
            return Err(ValidationError::NoRecipients.into());
        }

        self.busy = true;
        let request = self.send_draft.to_request(recipients);
        let result = self.gateway.dispatch(request).await;
        self.busy = false;

        let sent = result?;
        info!(sent, "dispatch succeeded");
        self.send_draft.reset();
        Ok(SendReport { sent })
    }

    /// Clears everything: remote wipe first, then local reset.
    ///
    /// A transport failure aborts before any local change. Once the wipe
    /// request gets any response at all, whatever the body says, the
    /// roster, both drafts, and every selection are emptied; the local
    /// clear does not wait for proof that the remote wipe took effect.
    ///
    /// # Errors
    ///
    /// [`Error::Remote`] when the wipe request cannot be delivered.
    pub async fn clear_all(&mut self) -> Result<()> {
        self.gateway.wipe().await?;
        self.roster.clear();
        self.group_draft = GroupDraft::default();
        self.send_draft.reset();
        info!("all data cleared");
        Ok(())
    }
}
