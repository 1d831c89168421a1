//! Recipient resolution: flattening selections into one send list.

use crate::roster::Group;

/// Flattens direct email selections plus group selections into a single
/// deduplicated recipient list.
///
/// Directly selected addresses come first, in selection order; then each
/// selected group expands in selection order, members in member order.
/// Duplicates across both sources keep their first position. Group ids
/// that no longer exist are skipped silently: a selection may outlive a
/// group's deletion.
///
/// Pure and never cached. Callers recompute whenever the current list or
/// count is needed, so the result always reflects the current roster and
/// selection state.
#[must_use]
pub fn resolve(
    selected_emails: &[String],
    selected_group_ids: &[String],
    groups: &[Group],
) -> Vec<String> {
    let mut recipients: Vec<String> = Vec::new();

    for email in selected_emails {
        if !recipients.contains(email) {
            recipients.push(email.clone());
        }
    }

    for id in selected_group_ids {
        let Some(group) = groups.iter().find(|g| g.id.as_str() == id) else {
            continue;
        };
        for email in &group.emails {
            if !recipients.contains(email) {
                recipients.push(email.clone());
            }
        }
    }

    recipients
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::GroupId;

    fn group(id: &str, members: &[&str]) -> Group {
        Group {
            id: GroupId::new(id),
            name: id.to_string(),
            emails: members.iter().map(ToString::to_string).collect(),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn group_only_selection_expands_in_member_order() {
        let groups = [group("g1", &["a", "b"])];
        let resolved = resolve(&[], &strings(&["g1"]), &groups);
        assert_eq!(resolved, strings(&["a", "b"]));
    }

    #[test]
    fn direct_selections_come_first_and_dedup_wins_by_position() {
        let groups = [group("g1", &["a", "b"])];
        let resolved = resolve(&strings(&["b", "c"]), &strings(&["g1"]), &groups);
        assert_eq!(resolved, strings(&["b", "c", "a"]));
    }

    #[test]
    fn groups_expand_in_selection_order() {
        let groups = [group("g1", &["a", "b"]), group("g2", &["c", "a"])];
        let resolved = resolve(&[], &strings(&["g2", "g1"]), &groups);
        assert_eq!(resolved, strings(&["c", "a", "b"]));
    }

    #[test]
    fn stale_group_ids_are_skipped() {
        let groups = [group("g1", &["a"])];
        let resolved = resolve(&strings(&["b"]), &strings(&["gone", "g1"]), &groups);
        assert_eq!(resolved, strings(&["b", "a"]));
    }

    #[test]
    fn empty_selections_resolve_to_empty() {
        assert!(resolve(&[], &[], &[]).is_empty());
    }

    #[test]
    fn duplicate_direct_selections_collapse() {
        let resolved = resolve(&strings(&["a", "a", "b"]), &[], &[]);
        assert_eq!(resolved, strings(&["a", "b"]));
    }
}
