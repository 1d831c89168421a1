//! The authoritative in-memory recipient store.

use tokio::sync::broadcast;
use tracing::debug;

use mailroster_remote::{GroupRecord, Snapshot};

use super::model::{Group, GroupId};
use super::validate::{ValidationError, is_valid_email};
use crate::error::{Error, Result};

/// Change notification emitted after each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// State was replaced wholesale from a remote snapshot.
    Loaded,
    /// A single address was appended.
    EmailAdded(String),
    /// An address was removed from the global collection.
    EmailRemoved(String),
    /// Extracted addresses were unioned into the global collection.
    EmailsMerged {
        /// How many of them were new.
        added: usize,
    },
    /// A group was created.
    GroupCreated(GroupId),
    /// A group's name and members were replaced.
    GroupUpdated(GroupId),
    /// A group was deleted.
    GroupDeleted(GroupId),
    /// Both collections were emptied.
    Cleared,
}

/// The authoritative collection of addresses and groups.
///
/// Addresses are unique and kept in insertion order; groups are kept in
/// creation order. Mutations are synchronous and validated up front, so
/// observers never see a partially-applied change. Persistence is the
/// caller's concern; the store only owns the data and the notifications.
#[derive(Debug)]
pub struct Roster {
    emails: Vec<String>,
    groups: Vec<Group>,
    events: broadcast::Sender<RosterEvent>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            emails: Vec::new(),
            groups: Vec::new(),
            events,
        }
    }

    /// Subscribes to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: RosterEvent) {
        // No receivers is fine; notifications are best-effort.
        let _ = self.events.send(event);
    }

    /// All addresses in insertion order.
    #[must_use]
    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    /// All groups in creation order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Looks up a group by id.
    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// True when the address is already on the roster.
    #[must_use]
    pub fn contains_email(&self, value: &str) -> bool {
        self.emails.iter().any(|e| e == value)
    }

    /// Appends a single address.
    ///
    /// # Errors
    ///
    /// `EmptyOrDuplicateEmail` when `value` is empty or already present,
    /// `InvalidEmailFormat` when it fails validation. Either way the
    /// store is left untouched.
    pub fn add_email(&mut self, value: &str) -> Result<()> {
        if value.is_empty() || self.contains_email(value) {
            return Err(ValidationError::EmptyOrDuplicateEmail.into());
        }
        if !is_valid_email(value) {
            return Err(ValidationError::InvalidEmailFormat.into());
        }
        self.emails.push(value.to_string());
        debug!(email = value, "address added");
        self.notify(RosterEvent::EmailAdded(value.to_string()));
        Ok(())
    }

    /// Removes an address if present; absent values are a no-op.
    /// Returns whether anything was removed.
    ///
    /// Existing groups keep their frozen member lists either way.
    pub fn remove_email(&mut self, value: &str) -> bool {
        let Some(pos) = self.emails.iter().position(|e| e == value) else {
            return false;
        };
        self.emails.remove(pos);
        debug!(email = value, "address removed");
        self.notify(RosterEvent::EmailRemoved(value.to_string()));
        true
    }

    /// Set-unions `values` into the address collection, preserving the
    /// order of first appearance. Returns how many were new.
    ///
    /// Used by the import path; the values come from the remote
    /// extractor and are not re-validated here.
    pub fn merge_emails<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for value in values {
            if !self.contains_email(&value) {
                self.emails.push(value);
                added += 1;
            }
        }
        debug!(added, "addresses merged");
        self.notify(RosterEvent::EmailsMerged { added });
        added
    }

    /// Creates a group from a name and a member selection.
    ///
    /// Members are deduplicated preserving first occurrence; the new
    /// group is appended with a freshly generated id.
    ///
    /// # Errors
    ///
    /// `EmptyGroupName` or `NoGroupMembers`; the store is left untouched.
    pub fn create_group<I>(&mut self, name: &str, members: I) -> Result<GroupId>
    where
        I: IntoIterator<Item = String>,
    {
        if name.is_empty() {
            return Err(ValidationError::EmptyGroupName.into());
        }
        let members = dedup(members);
        if members.is_empty() {
            return Err(ValidationError::NoGroupMembers.into());
        }
        let id = GroupId::generate();
        self.groups.push(Group {
            id: id.clone(),
            name: name.to_string(),
            emails: members,
        });
        debug!(group = %id, name, "group created");
        self.notify(RosterEvent::GroupCreated(id.clone()));
        Ok(id)
    }

    /// Replaces a group's name and members in place, preserving its id
    /// and position.
    ///
    /// # Errors
    ///
    /// `EmptyGroupName` when the name is empty, `GroupNotFound` when the
    /// id does not exist. An empty member list is allowed here: edits
    /// may deselect every member.
    pub fn update_group<I>(&mut self, id: &GroupId, name: &str, members: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        if name.is_empty() {
            return Err(ValidationError::EmptyGroupName.into());
        }
        let members = dedup(members);
        let Some(group) = self.groups.iter_mut().find(|g| &g.id == id) else {
            return Err(Error::GroupNotFound(id.clone()));
        };
        group.name = name.to_string();
        group.emails = members;
        debug!(group = %id, name, "group updated");
        self.notify(RosterEvent::GroupUpdated(id.clone()));
        Ok(())
    }

    /// Deletes the group with the given id if present; stale ids are a
    /// no-op. Returns whether anything was removed.
    pub fn delete_group(&mut self, id: &GroupId) -> bool {
        let Some(pos) = self.groups.iter().position(|g| &g.id == id) else {
            return false;
        };
        self.groups.remove(pos);
        debug!(group = %id, "group deleted");
        self.notify(RosterEvent::GroupDeleted(id.clone()));
        true
    }

    /// Empties both collections.
    pub fn clear(&mut self) {
        self.emails.clear();
        self.groups.clear();
        debug!("roster cleared");
        self.notify(RosterEvent::Cleared);
    }

    /// Replaces the whole state from a remote snapshot.
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.emails = snapshot.emails;
        self.groups = snapshot.groups.into_iter().map(Group::from).collect();
        debug!(
            emails = self.emails.len(),
            groups = self.groups.len(),
            "roster loaded"
        );
        self.notify(RosterEvent::Loaded);
    }

    /// Exports the complete current state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            emails: self.emails.clone(),
            groups: self.groups.iter().map(GroupRecord::from).collect(),
        }
    }
}

fn dedup<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn emails(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn add_email_preserves_insertion_order() {
        let mut roster = Roster::new();
        roster.add_email("b@example.com").unwrap();
        roster.add_email("a@example.com").unwrap();
        assert_eq!(roster.emails(), emails(&["b@example.com", "a@example.com"]));
    }

    #[test]
    fn add_email_rejects_duplicate_without_mutating() {
        let mut roster = Roster::new();
        roster.add_email("a@example.com").unwrap();

        let err = roster.add_email("a@example.com").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyOrDuplicateEmail)
        ));
        assert_eq!(roster.emails().len(), 1);
    }

    #[test]
    fn add_email_rejects_empty_and_invalid_with_distinct_errors() {
        let mut roster = Roster::new();

        let empty = roster.add_email("").unwrap_err();
        assert!(matches!(
            empty,
            Error::Validation(ValidationError::EmptyOrDuplicateEmail)
        ));

        let invalid = roster.add_email("not-an-email").unwrap_err();
        assert!(matches!(
            invalid,
            Error::Validation(ValidationError::InvalidEmailFormat)
        ));

        assert!(roster.emails().is_empty());
    }

    #[test]
    fn remove_email_is_idempotent() {
        let mut roster = Roster::new();
        roster.add_email("a@example.com").unwrap();

        assert!(roster.remove_email("a@example.com"));
        assert!(!roster.remove_email("a@example.com"));
        assert!(roster.emails().is_empty());
    }

    #[test]
    fn remove_email_does_not_cascade_into_groups() {
        let mut roster = Roster::new();
        roster.add_email("a@example.com").unwrap();
        roster.add_email("b@example.com").unwrap();
        let id = roster
            .create_group("Team", emails(&["a@example.com", "b@example.com"]))
            .unwrap();

        roster.remove_email("a@example.com");

        // The group's member list is a frozen snapshot.
        assert_eq!(
            roster.group(&id).unwrap().emails,
            emails(&["a@example.com", "b@example.com"])
        );
        assert_eq!(roster.emails(), emails(&["b@example.com"]));
    }

    #[test]
    fn merge_emails_unions_and_counts_new() {
        let mut roster = Roster::new();
        roster.add_email("a@example.com").unwrap();

        let added = roster.merge_emails(emails(&[
            "a@example.com",
            "b@example.com",
            "b@example.com",
            "c@example.com",
        ]));

        assert_eq!(added, 2);
        assert_eq!(
            roster.emails(),
            emails(&["a@example.com", "b@example.com", "c@example.com"])
        );
    }

    #[test]
    fn create_group_requires_name_and_members() {
        let mut roster = Roster::new();

        let no_name = roster.create_group("", emails(&["a@example.com"]));
        assert!(matches!(
            no_name.unwrap_err(),
            Error::Validation(ValidationError::EmptyGroupName)
        ));

        let no_members = roster.create_group("Team", Vec::new());
        assert!(matches!(
            no_members.unwrap_err(),
            Error::Validation(ValidationError::NoGroupMembers)
        ));

        assert!(roster.groups().is_empty());
    }

    #[test]
    fn create_group_dedups_members() {
        let mut roster = Roster::new();
        let id = roster
            .create_group(
                "Team",
                emails(&["a@example.com", "b@example.com", "a@example.com"]),
            )
            .unwrap();
        assert_eq!(
            roster.group(&id).unwrap().emails,
            emails(&["a@example.com", "b@example.com"])
        );
    }

    #[test]
    fn update_group_preserves_id_and_position() {
        let mut roster = Roster::new();
        let first = roster
            .create_group("First", emails(&["a@example.com"]))
            .unwrap();
        let second = roster
            .create_group("Second", emails(&["b@example.com"]))
            .unwrap();

        roster
            .update_group(&first, "Renamed", emails(&["c@example.com", "c@example.com"]))
            .unwrap();

        assert_eq!(roster.groups()[0].id, first);
        assert_eq!(roster.groups()[0].name, "Renamed");
        assert_eq!(roster.groups()[0].emails, emails(&["c@example.com"]));
        assert_eq!(roster.groups()[1].id, second);
    }

    #[test]
    fn update_group_rejects_unknown_id() {
        let mut roster = Roster::new();
        let err = roster
            .update_group(&GroupId::new("missing"), "Name", emails(&["a@b.c"]))
            .unwrap_err();
        assert!(matches!(err, Error::GroupNotFound(_)));
    }

    #[test]
    fn delete_group_is_idempotent() {
        let mut roster = Roster::new();
        let id = roster
            .create_group("Team", emails(&["a@example.com"]))
            .unwrap();

        assert!(roster.delete_group(&id));
        assert!(!roster.delete_group(&id));
        assert!(roster.groups().is_empty());
    }

    #[test]
    fn snapshot_round_trips_through_replace() {
        let mut roster = Roster::new();
        roster.add_email("a@example.com").unwrap();
        roster
            .create_group("Team", emails(&["a@example.com"]))
            .unwrap();
        let snapshot = roster.snapshot();

        let mut other = Roster::new();
        other.replace(snapshot.clone());
        assert_eq!(other.emails(), roster.emails());
        assert_eq!(other.groups(), roster.groups());
        assert_eq!(other.snapshot(), snapshot);
    }

    #[test]
    fn mutations_notify_subscribers() {
        let mut roster = Roster::new();
        let mut events = roster.subscribe();

        roster.add_email("a@example.com").unwrap();
        let id = roster
            .create_group("Team", emails(&["a@example.com"]))
            .unwrap();
        roster.clear();

        assert_eq!(
            events.try_recv().unwrap(),
            RosterEvent::EmailAdded("a@example.com".to_string())
        );
        assert_eq!(events.try_recv().unwrap(), RosterEvent::GroupCreated(id));
        assert_eq!(events.try_recv().unwrap(), RosterEvent::Cleared);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn failed_mutations_do_not_notify() {
        let mut roster = Roster::new();
        let mut events = roster.subscribe();

        roster.add_email("").unwrap_err();
        roster.create_group("", Vec::new()).unwrap_err();

        assert!(events.try_recv().is_err());
    }
}
