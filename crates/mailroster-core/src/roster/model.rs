//! Roster model types.

use mailroster_remote::GroupRecord;
use uuid::Uuid;

/// Unique identifier for a recipient group.
///
/// Assigned at creation and stable for the lifetime of the store; group
/// edits replace name and members but never the id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(String);

impl GroupId {
    /// Wraps an existing id, e.g. one loaded from the remote snapshot.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh unique id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, frozen subset of recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Stable identifier.
    pub id: GroupId,
    /// Display label; uniqueness is not enforced.
    pub name: String,
    /// Member addresses, captured by value when the group was written.
    ///
    /// Deliberately not a live view of the roster: removing an address
    /// from the global collection leaves existing groups untouched.
    /// Contains no duplicates; writes go through set-semantics dedup.
    pub emails: Vec<String>,
}

impl Group {
    /// Renders the local download listing: a header line followed by
    /// one address per line. No remote round-trip is involved.
    #[must_use]
    pub fn export_listing(&self) -> String {
        let mut listing = String::from("Emails\n");
        listing.push_str(&self.emails.join("\n"));
        listing
    }

    /// Suggested file name for the exported listing.
    #[must_use]
    pub fn export_file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

impl From<GroupRecord> for Group {
    fn from(record: GroupRecord) -> Self {
        Self {
            id: GroupId::new(record.id),
            name: record.name,
            emails: record.emails,
        }
    }
}

impl From<&Group> for GroupRecord {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.as_str().to_string(),
            name: group.name.clone(),
            emails: group.emails.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = GroupId::generate();
        let b = GroupId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn export_listing_has_header_and_one_address_per_line() {
        let group = Group {
            id: GroupId::new("g1"),
            name: "Team".to_string(),
            emails: vec!["a@example.com".to_string(), "b@example.com".to_string()],
        };
        assert_eq!(group.export_listing(), "Emails\na@example.com\nb@example.com");
        assert_eq!(group.export_file_name(), "Team.csv");
    }

    #[test]
    fn record_round_trip_preserves_fields() {
        let group = Group {
            id: GroupId::new("g1"),
            name: "Team".to_string(),
            emails: vec!["a@example.com".to_string()],
        };
        let record = GroupRecord::from(&group);
        assert_eq!(record.id, "g1");
        let back = Group::from(record);
        assert_eq!(back, group);
    }
}
