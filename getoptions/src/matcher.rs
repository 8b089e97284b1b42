//! Resolution of a candidate name to a registered option.

use crate::registry::{Registry, Target};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    Exact(Target),
    /// Unique abbreviation of one option's names.
    Prefix(Target),
    /// Abbreviation shared by several options; holds the matching names.
    Ambiguous(Vec<String>),
    Unknown,
}

/// Exact names win. Otherwise `candidate` must be a prefix of exactly one
/// registered name; two or more is ambiguous, even when they belong to the
/// same option. Matching is case-sensitive.
pub fn resolve(candidate: &str, registry: &Registry<'_>) -> Match {
    if let Some(target) = registry.lookup(candidate) {
        return Match::Exact(target);
    }
    if candidate.is_empty() {
        return Match::Unknown;
    }

    let hits: Vec<(&str, Target)> = registry
        .names()
        .filter(|(name, _)| name.starts_with(candidate))
        .collect();

    match hits.as_slice() {
        [] => Match::Unknown,
        [(_, target)] => Match::Prefix(*target),
        _ => Match::Ambiguous(hits.iter().map(|(name, _)| name.to_string()).collect()),
    }
}
