use crate::{
    course_key::CourseKey,
    prerequisite::Formula,
    term::{Term, TermId, chronological},
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Opaque identifier of a course placement
///
/// Backend ids arrive as strings; older local placeholders were numbers, so
/// both JSON forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseId {
    Number(u64),
    Text(String),
}

impl CourseId {
    /// Generates a placeholder id for a course that has not been persisted
    pub fn local() -> Self {
        Self::Text(format!("local-{}", Uuid::new_v4()))
    }
}

impl Display for CourseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for CourseId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<u64> for CourseId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

/// A course placed in a term of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedCourse {
    pub id: CourseId,
    /// Display name, e.g. "ACCT 2120 001"
    pub name: String,
    pub credits: u32,
    /// Raw JSON-encoded prerequisite formula
    #[serde(default)]
    pub prerequisite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unmet_prereqs: Option<Vec<String>>,
}

impl PlannedCourse {
    pub fn new(
        id: CourseId,
        name: impl Into<String>,
        credits: u32,
        prerequisite: Option<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            credits,
            prerequisite,
            unmet_prereqs: None,
        }
    }

    /// Canonical key of this course, derived from its display name
    pub fn key(&self) -> CourseKey {
        CourseKey::from_display_name(&self.name)
    }

    /// Parsed prerequisite formula, `None` when absent or malformed
    pub fn formula(&self) -> Option<Formula> {
        Formula::parse(self.prerequisite.as_deref())
    }

    /// Formatted unmet prerequisite groups from the last recomputation
    pub fn unmet_prereqs(&self) -> Option<&[String]> {
        self.unmet_prereqs.as_deref()
    }

    /// Replaces the derived unmet-prerequisite list wholesale
    ///
    /// An empty list is stored as absent.
    pub fn with_unmet_prereqs(mut self, unmet: Vec<String>) -> Self {
        self.unmet_prereqs = (!unmet.is_empty()).then_some(unmet);
        self
    }
}

/// Every term belonging to one student
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    terms: Vec<Term>,
}

impl Plan {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    /// Terms in chronological order, independent of storage order
    pub fn chronological(&self) -> Vec<&Term> {
        chronological(&self.terms)
    }

    pub fn term(&self, id: &str) -> Option<&Term> {
        self.terms.iter().find(|term| term.id == id)
    }

    pub fn term_mut(&mut self, id: &str) -> Option<&mut Term> {
        self.terms.iter_mut().find(|term| term.id == id)
    }

    pub fn push_term(&mut self, term: Term) {
        self.terms.push(term);
    }

    pub fn remove_term(&mut self, id: &str) -> Option<Term> {
        let idx = self.terms.iter().position(|term| term.id == id)?;
        Some(self.terms.remove(idx))
    }

    /// Every course in the plan alongside the id of its term
    pub fn courses(&self) -> impl Iterator<Item = (&TermId, &PlannedCourse)> {
        self.terms
            .iter()
            .flat_map(|term| term.courses.iter().map(move |course| (&term.id, course)))
    }

    pub fn find_course(&self, id: &CourseId) -> Option<&PlannedCourse> {
        self.courses()
            .map(|(_, course)| course)
            .find(|course| &course.id == id)
    }

    pub fn course_count(&self) -> usize {
        self.terms.iter().map(|term| term.courses.len()).sum()
    }
}

impl From<Vec<Term>> for Plan {
    fn from(terms: Vec<Term>) -> Self {
        Self::new(terms)
    }
}
