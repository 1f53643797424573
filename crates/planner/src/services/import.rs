use crate::services::{catalog::CatalogIndex, recompute::RecomputeService};
use log::{debug, info};
use models::{
    plan::{CourseId, Plan, PlannedCourse},
    prerequisite::raw_from_json,
    term::{Term, Year},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Planned course record as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendPlannedCourse {
    pub id: String,
    pub subject: String,
    pub course_number: u32,
    #[serde(default)]
    pub section: Option<String>,
    pub credits: u32,
    /// Either the JSON-encoded string or an inline array
    #[serde(default)]
    pub prerequisite: Value,
}

impl BackendPlannedCourse {
    /// Display name such as "ACCT 2120 001"
    pub fn display_name(&self) -> String {
        match self.section.as_deref().map(str::trim) {
            Some(section) if !section.is_empty() => {
                format!("{} {} {section}", self.subject, self.course_number)
            }
            _ => format!("{} {}", self.subject, self.course_number),
        }
    }
}

impl From<&BackendPlannedCourse> for PlannedCourse {
    fn from(course: &BackendPlannedCourse) -> Self {
        PlannedCourse::new(
            CourseId::Text(course.id.clone()),
            course.display_name(),
            course.credits,
            raw_from_json(&course.prerequisite),
        )
    }
}

/// Semester record as stored by the backend; season and year live in the title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendSemester {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub planned_courses: Vec<BackendPlannedCourse>,
}

pub struct ImportService;

impl ImportService {
    /// Converts backend semesters into terms, in the order given
    ///
    /// # Arguments
    /// * `current_year` - Year used for titles without a parseable year
    pub fn terms_from_backend(semesters: &[BackendSemester], current_year: Year) -> Vec<Term> {
        semesters
            .iter()
            .map(|semester| {
                Term::from_title(semester.id.clone(), &semester.title, current_year).with_courses(
                    semester
                        .planned_courses
                        .iter()
                        .map(PlannedCourse::from)
                        .collect(),
                )
            })
            .collect()
    }

    /// Builds a recomputed plan from backend semesters
    ///
    /// Courses stored without a prerequisite are back-filled from `catalog`
    /// when one is available.
    pub fn plan_from_backend(
        semesters: &[BackendSemester],
        catalog: Option<&CatalogIndex>,
        current_year: Year,
    ) -> Plan {
        let plan = Plan::new(Self::terms_from_backend(semesters, current_year));
        let missing = CatalogIndex::missing_keys(&plan);
        let plan = match catalog {
            Some(index) if !missing.is_empty() => {
                debug!("Back-filling prerequisites for {} courses", missing.len());
                index.fill_missing_prerequisites(&plan)
            }
            _ => plan,
        };

        info!(
            "Imported {} semesters with {} courses",
            plan.terms().len(),
            plan.course_count()
        );
        RecomputeService::recompute(&plan)
    }
}
