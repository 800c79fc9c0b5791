/// Confidence of a cross-node entity match.
///
/// `Exact` matches are taken as-is by the reconciler; `Possible` matches are
/// retained only until something better turns up. Matchers are pure and
/// never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchConfidence {
    /// The entities are not the same thing.
    None,
    /// The entities could be the same thing.
    Possible,
    /// The entities are the same thing.
    Exact,
}

/// Case-insensitive string equality used by the matchers.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
