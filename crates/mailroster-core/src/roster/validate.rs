//! Address validation.

/// Validation error raised locally, before any state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Candidate address is empty or already on the roster.
    EmptyOrDuplicateEmail,
    /// Candidate address does not look like `local@domain.tld`.
    InvalidEmailFormat,
    /// Group name is empty.
    EmptyGroupName,
    /// Group member selection is empty.
    NoGroupMembers,
    /// Resolved recipient list is empty.
    NoRecipients,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyOrDuplicateEmail => "Email is empty or already present",
            Self::InvalidEmailFormat => "Please enter a valid email address",
            Self::EmptyGroupName => "Group name is required",
            Self::NoGroupMembers => "Select at least one email for the group",
            Self::NoRecipients => "Select at least one recipient",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Checks a candidate against the `local@domain.tld` shape.
///
/// True iff the candidate is one run of non-whitespace, non-`@`
/// characters, then `@`, then a domain of the same character set
/// containing at least one interior `.`. Case-sensitive, no trimming,
/// no DNS or mailbox-existence check. Duplicate and empty checks are
/// the caller's job.
#[must_use]
pub fn is_valid_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.contains('@') || domain.chars().any(char::is_whitespace) {
        return false;
    }
    // The dot needs at least one domain character on each side, so it
    // can be neither the first nor the last character. `.` is ASCII and
    // never a UTF-8 continuation byte, so a byte scan is exact.
    if domain.len() < 3 {
        return false;
    }
    domain.as_bytes()[1..domain.len() - 1].contains(&b'.')
}
