use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    borrow::Borrow,
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Deref,
};

lazy_static! {
    /// Subject letters followed by a 3 or 4 digit course number, e.g. "ACCT 2120 001"
    static ref DISPLAY_NAME: Regex = Regex::new(r"^([A-Za-z]+)[ \t]+([0-9]{3,4})\b").unwrap();
}

/// Normalized `SUBJECT NUMBER` identity of a course, ignoring section and suffix.
///
/// Keys are never stored on plan data; they are derived on demand from the raw
/// course name or prerequisite token so they cannot go stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseKey(String);

impl CourseKey {
    /// Canonicalizes a prerequisite token or loosely formatted course code
    ///
    /// # Arguments
    /// * `token` - Raw course reference, e.g. "csci 1011 001"
    ///
    /// # Returns
    /// The upper-cased subject and the course number joined by a single space.
    /// Inputs with fewer than two tokens are upper-cased and trimmed as a whole.
    pub fn canonicalize(token: &str) -> Self {
        let mut parts = token.split_whitespace();

        match (parts.next(), parts.next()) {
            (Some(subject), Some(number)) => Self(format!("{} {number}", subject.to_uppercase())),
            _ => Self(token.trim().to_uppercase()),
        }
    }

    /// Canonicalizes a planner display name such as "ACCT 2120 001"
    ///
    /// Requires a 3-4 digit number directly after the subject letters and
    /// falls back to [`CourseKey::canonicalize`] when the name does not match.
    pub fn from_display_name(name: &str) -> Self {
        Self::try_from_display_name(name).unwrap_or_else(|| Self::canonicalize(name))
    }

    /// Strict form of [`CourseKey::from_display_name`] without the fallback
    pub fn try_from_display_name(name: &str) -> Option<Self> {
        DISPLAY_NAME
            .captures(name)
            .map(|caps| Self(format!("{} {}", caps[1].to_uppercase(), &caps[2])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for CourseKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for CourseKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for CourseKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_drops_section() {
        assert_eq!(CourseKey::canonicalize("csci 1011 001").as_str(), "CSCI 1011");
        assert_eq!(
            CourseKey::canonicalize("csci 1011 001"),
            CourseKey::canonicalize("CSCI 1011")
        );
    }

    #[test]
    fn test_canonicalize_normalizes_whitespace() {
        assert_eq!(CourseKey::canonicalize("  acct\t 2120  ").as_str(), "ACCT 2120");
    }

    #[test]
    fn test_canonicalize_degenerate() {
        assert_eq!(CourseKey::canonicalize("  csci1011 ").as_str(), "CSCI1011");
        assert_eq!(CourseKey::canonicalize("").as_str(), "");
    }

    #[test]
    fn test_canonicalize_keeps_number_case() {
        // Only the subject is upper-cased
        assert_eq!(CourseKey::canonicalize("math 101h").as_str(), "MATH 101h");
    }

    #[test]
    fn test_from_display_name() {
        assert_eq!(CourseKey::from_display_name("ACCT 2120 001").as_str(), "ACCT 2120");
        assert_eq!(CourseKey::from_display_name("bio 101 A").as_str(), "BIO 101");
    }

    #[test]
    fn test_from_display_name_fallback() {
        // Five digit numbers don't match the strict pattern
        assert_eq!(CourseKey::from_display_name("CSCI 10110 1").as_str(), "CSCI 10110");
        assert_eq!(CourseKey::from_display_name("Independent Study").as_str(), "INDEPENDENT Study");
    }

    #[test]
    fn test_try_from_display_name() {
        assert_eq!(
            CourseKey::try_from_display_name("math 1011").map(|k| k.to_string()),
            Some("MATH 1011".to_string())
        );
        assert_eq!(CourseKey::try_from_display_name("Independent Study"), None);
        assert_eq!(CourseKey::try_from_display_name(" CSCI 1011"), None);
    }

    #[test]
    fn test_display_name_requires_ascii_digits() {
        assert_eq!(CourseKey::try_from_display_name("ACCT \u{662}\u{661}\u{662}\u{660}"), None);
        assert_eq!(CourseKey::try_from_display_name("ACCT\u{3000}2120"), None);
        assert_eq!(
            CourseKey::try_from_display_name("ACCT\t2120 001").map(|k| k.to_string()),
            Some("ACCT 2120".to_string())
        );
    }

    #[test]
    fn test_borrow_lookup() {
        let keys: std::collections::HashSet<CourseKey> =
            [CourseKey::canonicalize("math 1011")].into_iter().collect();
        assert!(keys.contains("MATH 1011"));
    }
}
