//! Dashboard query: free-text search plus status and priority facets.
//!
//! `filter` is a stable linear scan; it never reorders or mutates its input.

use crate::bug::{BugRecord, Priority, Status};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::debug;

/// Status facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

/// Priority facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl StatusFilter {
    /// Parse a facet value. Unrecognized text widens to `All`.
    pub fn parse_permissive(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Self::All;
        }
        match raw.parse::<Status>() {
            Ok(status) => Self::Only(status),
            Err(err) => {
                debug!(%err, "ignoring unrecognized status filter");
                Self::All
            }
        }
    }

    pub fn matches(&self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl PriorityFilter {
    /// Parse a facet value. Unrecognized text widens to `All`.
    pub fn parse_permissive(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Self::All;
        }
        match raw.parse::<Priority>() {
            Ok(priority) => Self::Only(priority),
            Err(err) => {
                debug!(%err, "ignoring unrecognized priority filter");
                Self::All
            }
        }
    }

    pub fn matches(&self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == priority,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_permissive(s))
    }
}

impl FromStr for PriorityFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_permissive(s))
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

impl Display for PriorityFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(priority) => write!(f, "{priority}"),
        }
    }
}

/// Combined filter state. `Default` is the cleared state (matches everything).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub text: String,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

impl FilterCriteria {
    pub fn new(text: impl Into<String>, status: StatusFilter, priority: PriorityFilter) -> Self {
        Self {
            text: text.into(),
            status,
            priority,
        }
    }
}

/// Whether `bug` passes all three predicates; `needle` is already lowercased.
fn passes(criteria: &FilterCriteria, needle: &str, bug: &BugRecord) -> bool {
    criteria.status.matches(bug.status)
        && criteria.priority.matches(bug.priority)
        && (needle.is_empty()
            || [&bug.title, &bug.description, &bug.reporter]
                .into_iter()
                .any(|field| field.to_lowercase().contains(needle)))
}

/// Records passing `criteria`, in input order.
pub fn filter<'a>(bugs: &'a [BugRecord], criteria: &FilterCriteria) -> Vec<&'a BugRecord> {
    let needle = criteria.text.to_lowercase();
    bugs.iter()
        .filter(|bug| passes(criteria, &needle, bug))
        .collect()
}
