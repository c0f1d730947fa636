//! Deduplicated set of team member logins.

use std::collections::BTreeSet;

/// Logins gathered from every requested team.
///
/// Iteration is in lexicographic order, which keeps log lines and request
/// payloads stable regardless of the order teams were expanded in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSet {
    logins: BTreeSet<String>,
}

impl MemberSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            logins: BTreeSet::new(),
        }
    }

    /// Adds every login from a team's member list.
    pub fn extend<I>(&mut self, logins: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.logins.extend(logins);
    }

    /// Returns the set without `login`.
    #[must_use]
    pub fn without(mut self, login: &str) -> Self {
        self.logins.remove(login);
        self
    }

    /// Iterates logins in lexicographic order.
    pub fn logins(&self) -> impl Iterator<Item = &str> {
        self.logins.iter().map(String::as_str)
    }

    /// Consumes the set into a sorted list of logins.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.logins.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::MemberSet;

    fn set_of(values: &[&str]) -> MemberSet {
        let mut set = MemberSet::new();
        set.extend(values.iter().map(|value| (*value).to_owned()));
        set
    }

    #[rstest]
    fn overlapping_rosters_collapse_to_sorted_logins() {
        let mut set = set_of(&["carol", "bob"]);
        set.extend(["bob".to_owned(), "alice".to_owned()]);

        assert_eq!(set.into_vec(), vec!["alice", "bob", "carol"]);
    }

    #[rstest]
    fn removing_absent_login_is_a_no_op() {
        let set = set_of(&["bob"]);
        let filtered = set.clone().without("alice");
        assert_eq!(filtered, set);
    }

    #[rstest]
    fn without_drops_the_login() {
        let filtered = set_of(&["alice", "bob"]).without("alice");
        assert_eq!(filtered.logins().collect::<Vec<_>>(), vec!["bob"]);
    }
}
