//! Name filtering for the user listing.
//!
//! Filtering is deliberately simpler than the sort comparator: the search
//! term and each name are lower-cased per Unicode code point
//! (`str::to_lowercase`) and matched by substring containment, with no locale
//! folding. The two intentionally diverge for some non-ASCII names; see
//! DESIGN.md.

use crate::domain::User;

/// Returns the users whose `name` contains `term`, case-insensitively.
///
/// The term is trimmed first; a trimmed-empty term selects every user. The
/// result preserves the input's relative order and never aliases the input;
/// a fresh `Vec` is returned even when nothing is filtered out.
///
/// # Examples
///
/// ```
/// use userdeck::domain::User;
/// use userdeck::query::filter_by_name;
///
/// let users: Vec<User> = Vec::new();
/// assert!(filter_by_name(&users, "anything").is_empty());
/// ```
#[must_use]
pub fn filter_by_name(users: &[User], term: &str) -> Vec<User> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return users.to_vec();
    }

    users
        .iter()
        .filter(|user| user.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Computes the character-index ranges of `term` occurrences within `name`.
///
/// Used by the renderer to highlight the matched substring in the table. The
/// comparison mirrors [`filter_by_name`]: trimmed term, code-point
/// lower-casing. Ranges are `(start, end)` char indices (exclusive end),
/// non-overlapping and in left-to-right order. A match must end on a
/// character boundary of `name`, so lower-case expansions (one character
/// lowering to several) never produce half-character ranges.
#[must_use]
pub fn match_ranges(name: &str, term: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = term.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let lowered: Vec<String> = name
        .chars()
        .map(|c| c.to_lowercase().collect())
        .collect();

    let mut ranges = Vec::new();
    let mut start = 0;
    while start < lowered.len() {
        match match_at(&lowered, start, &needle) {
            Some(end) => {
                ranges.push((start, end));
                start = end;
            }
            None => start += 1,
        }
    }
    ranges
}

/// Checks whether `needle` matches the lowered characters beginning at
/// `start`, returning the exclusive end index of the consumed characters.
fn match_at(lowered: &[String], start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    let mut index = start;
    while matched < needle.len() {
        let cell = lowered.get(index)?;
        for c in cell.chars() {
            if matched >= needle.len() {
                // The needle ended in the middle of this character's
                // lower-case expansion; not a whole-character match.
                return None;
            }
            if needle[matched] != c {
                return None;
            }
            matched += 1;
        }
        index += 1;
    }
    Some(index)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn names(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.name.as_str()).collect()
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t \n")]
    fn blank_terms_select_everyone(#[case] term: &str) {
        let users = vec![User::fixture(1, "Bob"), User::fixture(2, "alice")];

        let filtered = filter_by_name(&users, term);

        assert_eq!(filtered, users);
    }

    #[rstest]
    #[case("bo", &["Bob"])]
    #[case("ALICE", &["alice"])]
    #[case("li", &["alice", "Charlie"])]
    #[case("xyz", &[])]
    fn matches_are_case_insensitive_substrings(#[case] term: &str, #[case] expected: &[&str]) {
        let users = vec![
            User::fixture(1, "Bob"),
            User::fixture(2, "alice"),
            User::fixture(3, "Charlie"),
        ];

        assert_eq!(names(&filter_by_name(&users, term)), expected);
    }

    #[test]
    fn preserves_relative_order() {
        let users = vec![
            User::fixture(1, "Clementina DuBuque"),
            User::fixture(2, "Clementine Bauch"),
            User::fixture(3, "Chelsey Dietrich"),
        ];

        let filtered = filter_by_name(&users, "clement");

        assert_eq!(
            names(&filtered),
            &["Clementina DuBuque", "Clementine Bauch"]
        );
    }

    #[test]
    fn leading_and_trailing_whitespace_is_trimmed() {
        let users = vec![User::fixture(1, "Bob"), User::fixture(2, "alice")];

        assert_eq!(names(&filter_by_name(&users, "  bo  ")), &["Bob"]);
    }

    #[test]
    fn does_not_mutate_input() {
        let users = vec![User::fixture(1, "Bob"), User::fixture(2, "alice")];
        let snapshot = users.clone();

        let _ = filter_by_name(&users, "bo");

        assert_eq!(users, snapshot);
    }

    #[rstest]
    #[case("Bob", "bo", vec![(0, 2)])]
    #[case("Bob", "", vec![])]
    #[case("banana", "an", vec![(1, 3), (3, 5)])]
    #[case("Ana Banana", "ana", vec![(0, 3), (5, 8)])]
    #[case("alice", "xyz", vec![])]
    fn highlight_ranges_cover_each_occurrence(
        #[case] name: &str,
        #[case] term: &str,
        #[case] expected: Vec<(usize, usize)>,
    ) {
        assert_eq!(match_ranges(name, term), expected);
    }

    #[test]
    fn highlight_ranges_use_char_indices() {
        // "Érika" lowers to "érika"; the match starts at char index 0.
        assert_eq!(match_ranges("Érika", "éri"), vec![(0, 3)]);
    }
}
