//! Specificity Filter
//!
//! Reduces the capability-conforming candidates of one bundle to the
//! most-derived concrete leaves. A bundle may legitimately ship an abstract
//! base plus several concrete specializations; only the leaves are ever
//! instantiated, exactly once each. Multiple unrelated concrete leaves in
//! one bundle are a supported case, not an error.

use crate::plugin::types::HandlerEntry;
use std::collections::HashSet;

/// Keep only candidates that are (a) not a strict ancestor of another
/// candidate in the list and (b) concrete.
///
/// Pairwise over the declared `supersedes` relation; quadratic, which is
/// fine at per-bundle candidate counts.
pub fn most_specific(candidates: Vec<HandlerEntry>) -> Vec<HandlerEntry> {
    let mut ancestors: HashSet<&str> = HashSet::new();
    for descendant in &candidates {
        for ancestor in &candidates {
            if ancestor.type_name != descendant.type_name
                && descendant
                    .supersedes
                    .iter()
                    .any(|s| s == &ancestor.type_name)
            {
                ancestors.insert(ancestor.type_name.as_str());
            }
        }
    }

    let ancestors: HashSet<String> = ancestors.into_iter().map(|s| s.to_string()).collect();
    candidates
        .into_iter()
        .filter(|c| !ancestors.contains(&c.type_name))
        .filter(|c| c.concrete)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::traits::EventHandler;

    struct NoopHandler;
    impl EventHandler for NoopHandler {}

    fn concrete(name: &str) -> HandlerEntry {
        HandlerEntry::concrete(name, || Box::new(NoopHandler))
    }

    fn names(entries: &[HandlerEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.type_name.as_str()).collect()
    }

    #[test]
    fn test_abstract_base_removed_concrete_subtype_kept() {
        let survivors = most_specific(vec![
            HandlerEntry::abstract_base("Y"),
            concrete("Z").with_supersedes(&["Y"]),
        ]);
        assert_eq!(names(&survivors), vec!["Z"]);
    }

    #[test]
    fn test_unrelated_concrete_candidates_both_survive() {
        let survivors = most_specific(vec![concrete("X"), concrete("W")]);
        assert_eq!(survivors.len(), 2);
    }

    #[test]
    fn test_concrete_ancestor_removed() {
        // Specialization wins even when the ancestor is itself instantiable
        let survivors = most_specific(vec![
            concrete("Base"),
            concrete("Derived").with_supersedes(&["Base"]),
        ]);
        assert_eq!(names(&survivors), vec!["Derived"]);
    }

    #[test]
    fn test_chain_keeps_only_the_leaf() {
        let survivors = most_specific(vec![
            HandlerEntry::abstract_base("A"),
            concrete("B").with_supersedes(&["A"]),
            concrete("C").with_supersedes(&["A", "B"]),
        ]);
        assert_eq!(names(&survivors), vec!["C"]);
    }

    #[test]
    fn test_unrelated_abstract_candidate_removed() {
        let survivors = most_specific(vec![HandlerEntry::abstract_base("Lonely"), concrete("X")]);
        assert_eq!(names(&survivors), vec!["X"]);
    }

    #[test]
    fn test_supersedes_of_types_outside_the_list_is_ignored() {
        let survivors = most_specific(vec![concrete("X").with_supersedes(&["vendor::Elsewhere"])]);
        assert_eq!(names(&survivors), vec!["X"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(most_specific(Vec::new()).is_empty());
    }
}
