use models::{plan::CourseId, term::Year};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Reasons a plan edit is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    TermNotFound(String),
    CourseNotFound(CourseId),
    /// A course with the same display name is already in the term
    DuplicateCourse(String),
    /// Adding the course would push the term past the credit limit
    CreditLimitExceeded {
        current: u32,
        adding: u32,
        limit: u32,
    },
    YearOutOfRange {
        year: Year,
        first: Year,
        last: Year,
    },
}

impl Display for PlanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::TermNotFound(id) => write!(f, "Term {id} not found"),
            Self::CourseNotFound(id) => write!(f, "Course {id} not found"),
            Self::DuplicateCourse(name) => {
                write!(f, "{name} already exists in this semester")
            }
            Self::CreditLimitExceeded {
                current,
                adding,
                limit,
            } => write!(
                f,
                "Adding {adding} credits to a term with {current} exceeds the {limit} credit limit"
            ),
            Self::YearOutOfRange { year, first, last } => {
                write!(f, "Year {year} is outside {first}-{last}")
            }
        }
    }
}

impl Error for PlanError {}
