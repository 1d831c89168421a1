//! Transient selection sets.

/// An insertion-ordered set of string values.
///
/// Backs the three transient selections: member emails for the group
/// being edited, direct recipient emails for the next send, and group
/// ids for the next send. Selections live for one modal/tab interaction,
/// are never persisted, and are reset on cancel, submit, and clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    values: Vec<String>,
}

impl SelectionSet {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection from values, collapsing duplicates.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut set = Self::new();
        set.union(values);
        set
    }

    /// Inserts a value; duplicates are ignored. Returns whether it was new.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.contains(&value) {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Removes a value if present. Returns whether anything was removed.
    pub fn remove(&mut self, value: &str) -> bool {
        let Some(pos) = self.values.iter().position(|v| v == value) else {
            return false;
        };
        self.values.remove(pos);
        true
    }

    /// Set-unions `values` into the selection, preserving existing order
    /// and appending new values in first-appearance order. Returns how
    /// many were new.
    pub fn union<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for value in values {
            if self.insert(value) {
                added += 1;
            }
        }
        added
    }

    /// True when the value is selected.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of selected values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The selected values in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    /// Consumes the selection, yielding its values in insertion order.
    #[must_use]
    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_values(iter.into_iter().map(Into::into))
    }
}
