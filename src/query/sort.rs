//! Locale-aware ordering of the user listing.
//!
//! Sorting uses the ICU4X root collator, which orders names the way a
//! standard locale comparator does (case- and accent-aware natural
//! alphabetic order) instead of raw byte or code-point order. The ascending
//! pass is stable; descending output is the exact reverse of the ascending
//! output rather than a negated comparator, so equal names flip together
//! with everything else and the reverse property holds verbatim.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

use crate::domain::User;

/// Ordering applied to the listing's `name` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Natural alphabetic order (A → Z).
    #[default]
    Ascending,
    /// Exact reverse of the ascending order (Z → A).
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction; bound to the sort toggle key.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Single-character indicator rendered next to the NAME column header.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Returns a new sequence with all input users ordered by `name`.
///
/// The input is never mutated; the output is a permutation of the input and
/// sorting an already-sorted sequence is a no-op.
///
/// # Examples
///
/// ```
/// use userdeck::domain::User;
/// use userdeck::query::{sort_by_name, SortDirection};
///
/// let users: Vec<User> = Vec::new();
/// assert!(sort_by_name(&users, SortDirection::Ascending).is_empty());
/// ```
#[must_use]
pub fn sort_by_name(users: &[User], direction: SortDirection) -> Vec<User> {
    let collator = Collator::try_new(&Default::default(), CollatorOptions::new()).ok();

    let mut sorted = users.to_vec();
    sorted.sort_by(|a, b| compare_names(collator.as_ref(), &a.name, &b.name));

    if direction == SortDirection::Descending {
        sorted.reverse();
    }
    sorted
}

/// Compares two names with the collator, falling back to code-point
/// lower-case comparison if collator construction failed.
fn compare_names(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    collator.map_or_else(
        || a.to_lowercase().cmp(&b.to_lowercase()),
        |collator| collator.compare(a, b),
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn names(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn orders_case_insensitively() {
        let users = vec![User::fixture(1, "Bob"), User::fixture(2, "alice")];

        let sorted = sort_by_name(&users, SortDirection::Ascending);

        assert_eq!(names(&sorted), &["alice", "Bob"]);
    }

    #[test]
    fn descending_is_exact_reverse_of_ascending() {
        let users = vec![
            User::fixture(1, "Glenna Reichert"),
            User::fixture(2, "alice"),
            User::fixture(3, "Chelsey Dietrich"),
            User::fixture(4, "alice"),
            User::fixture(5, "Bob"),
        ];

        let ascending = sort_by_name(&users, SortDirection::Ascending);
        let mut reversed = ascending.clone();
        reversed.reverse();

        assert_eq!(sort_by_name(&users, SortDirection::Descending), reversed);
    }

    #[rstest]
    #[case(SortDirection::Ascending)]
    #[case(SortDirection::Descending)]
    fn output_is_a_permutation(#[case] direction: SortDirection) {
        let users = vec![
            User::fixture(1, "Nicholas Runolfsdottir V"),
            User::fixture(2, "Ervin Howell"),
            User::fixture(3, "Patricia Lebsack"),
        ];

        let sorted = sort_by_name(&users, direction);

        assert_eq!(sorted.len(), users.len());
        for user in &users {
            assert!(sorted.contains(user));
        }
    }

    #[rstest]
    #[case(SortDirection::Ascending)]
    #[case(SortDirection::Descending)]
    fn sorting_is_idempotent(#[case] direction: SortDirection) {
        let users = vec![
            User::fixture(1, "Kurtis Weissnat"),
            User::fixture(2, "alice"),
            User::fixture(3, "Leanne Graham"),
        ];

        let once = sort_by_name(&users, direction);
        let twice = sort_by_name(&once, direction);

        assert_eq!(once, twice);
    }

    #[test]
    fn equal_names_keep_their_relative_order_when_ascending() {
        let users = vec![
            User::fixture(1, "alice"),
            User::fixture(2, "Bob"),
            User::fixture(3, "alice"),
        ];

        let sorted = sort_by_name(&users, SortDirection::Ascending);

        let ids: Vec<u64> = sorted.iter().map(|u| u.id).collect();
        assert_eq!(ids, &[1, 3, 2]);
    }

    #[test]
    fn accented_names_sort_alphabetically() {
        let users = vec![
            User::fixture(1, "Zoe"),
            User::fixture(2, "Émile"),
            User::fixture(3, "alice"),
        ];

        let sorted = sort_by_name(&users, SortDirection::Ascending);

        assert_eq!(names(&sorted), &["alice", "Émile", "Zoe"]);
    }

    #[test]
    fn does_not_mutate_input() {
        let users = vec![User::fixture(1, "Bob"), User::fixture(2, "alice")];
        let snapshot = users.clone();

        let _ = sort_by_name(&users, SortDirection::Descending);

        assert_eq!(users, snapshot);
    }

    #[test]
    fn toggled_flips_both_ways() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
    }
}
