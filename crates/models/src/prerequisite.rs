//! Prerequisite formulas: an AND over groups of OR-ed course codes.
//!
//! The raw encoding is a JSON array of arrays of strings, e.g.
//! `[["ACCT 2120"],["BSNS 2120","BUSA 2120"]]` which reads as
//! `ACCT 2120 AND (BSNS 2120 OR BUSA 2120)`.

use crate::course_key::CourseKey;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Alternatives of one AND-group; any single member satisfies it
pub type OrGroup = Vec<String>;

/// A parsed prerequisite formula
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Formula {
    groups: Vec<OrGroup>,
}

impl Formula {
    pub fn new(groups: Vec<OrGroup>) -> Self {
        Self { groups }
    }

    /// Parses a raw prerequisite string, failing open
    ///
    /// # Returns
    /// `None` for absent, empty or malformed input; the rejection reason is
    /// logged at debug level
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        if raw.is_empty() {
            return None;
        }

        raw.parse()
            .map_err(|e: ParseError| debug!("Ignoring prerequisite {raw:?}: {e}"))
            .ok()
    }

    pub fn groups(&self) -> &[OrGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the AND-groups with no member in `taken`, in formula order
    ///
    /// Tokens are canonicalized before the lookup; the returned groups keep
    /// their original spelling for display.
    pub fn unmet_groups(&self, taken: &HashSet<CourseKey>) -> Vec<OrGroup> {
        self.groups
            .iter()
            .filter(|group| {
                !group
                    .iter()
                    .any(|option| taken.contains(&CourseKey::canonicalize(option)))
            })
            .cloned()
            .collect()
    }

    /// Evaluate if this formula is satisfied by the given taken courses
    pub fn is_satisfied(&self, taken: &HashSet<CourseKey>) -> bool {
        self.groups.iter().all(|group| {
            group
                .iter()
                .any(|option| taken.contains(&CourseKey::canonicalize(option)))
        })
    }

    /// Canonical keys of every token in the formula, ignoring its AND/OR structure
    pub fn course_keys(&self) -> impl Iterator<Item = CourseKey> + '_ {
        self.groups
            .iter()
            .flatten()
            .map(|option| CourseKey::canonicalize(option))
    }

    /// Whether any group names the given course
    pub fn mentions(&self, key: &CourseKey) -> bool {
        self.course_keys().any(|k| &k == key)
    }
}

/// Custom error type for parsing prerequisites
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError(pub String);

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Error for ParseError {}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Rejects anything that isn't an array of arrays of strings
        let groups: Vec<OrGroup> = serde_json::from_str(s)
            .map_err(|e| ParseError(format!("expected an array of arrays of strings: {e}")))?;

        for (idx, group) in groups.iter().enumerate() {
            if group.is_empty() {
                return Err(ParseError(format!("group {idx} has no alternatives")));
            }
            if group.iter().any(String::is_empty) {
                return Err(ParseError(format!("group {idx} contains an empty course code")));
            }
        }

        Ok(Self { groups })
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", format_missing(&self.groups))
    }
}

/// Parse a raw prerequisite string into a formula, treating bad input as no prerequisite
pub fn parse_prerequisite(raw: Option<&str>) -> Option<Formula> {
    Formula::parse(raw)
}

/// Normalizes a prerequisite delivered as JSON into its raw string encoding
///
/// Strings pass through untouched, inline arrays are re-encoded and `null`
/// means no prerequisite.
pub fn raw_from_json(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(raw) => Some(raw.clone()),
        other => Some(other.to_string()),
    }
}

/// Unmet AND-groups of an optional formula; a missing formula is always satisfied
pub fn unmet_groups(formula: Option<&Formula>, taken: &HashSet<CourseKey>) -> Vec<OrGroup> {
    formula
        .map(|formula| formula.unmet_groups(taken))
        .unwrap_or_default()
}

pub fn is_satisfied(formula: Option<&Formula>, taken: &HashSet<CourseKey>) -> bool {
    unmet_groups(formula, taken).is_empty()
}

/// Formats one OR-group: a single code is shown bare, alternatives as `(A OR B)`
pub fn format_group(group: &[String]) -> String {
    match group {
        [single] => single.clone(),
        _ => format!("({})", group.join(" OR ")),
    }
}

/// Formats several unmet groups joined with ` AND `
pub fn format_missing(groups: &[OrGroup]) -> String {
    groups
        .iter()
        .map(|group| format_group(group))
        .collect::<Vec<_>>()
        .join(" AND ")
}
