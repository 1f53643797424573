use crate::{config::PlannerConfig, error::PlanError, services::recompute::RecomputeService};
use log::{info, warn};
use models::{
    plan::{CourseId, Plan, PlannedCourse},
    term::{Season, Term, TermId, Year, suggest_next_term},
};
use serde::{Deserialize, Serialize};

/// A course about to be placed into a term
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    /// Id from the persistence layer; a local placeholder is generated when absent
    #[serde(default)]
    pub id: Option<CourseId>,
    pub name: String,
    pub credits: u32,
    #[serde(default)]
    pub prerequisite: Option<String>,
}

/// Result of a successful course addition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAdded {
    pub plan: Plan,
    pub course_id: CourseId,
    /// Unmet prerequisites of the new course in its term
    pub unmet_prereqs: Option<Vec<String>>,
}

impl CourseAdded {
    /// Warning shown when the new course is missing prerequisites
    pub fn warning(&self) -> Option<String> {
        self.unmet_prereqs.as_ref().map(|unmet| {
            format!(
                "Added course, missing prerequisites: {}",
                unmet.join(" AND ")
            )
        })
    }
}

/// Plan edits; every operation returns a freshly recomputed plan
pub struct EditPlanService;

impl EditPlanService {
    /// Adds an empty term for `season` and `year`
    pub fn add_term(
        config: &PlannerConfig,
        plan: &Plan,
        id: impl Into<TermId>,
        season: Season,
        year: Year,
    ) -> Result<Plan, PlanError> {
        Self::check_year(config, year)?;

        let mut plan = plan.clone();
        let term = Term::new(id, season, year);
        info!("Adding term {} ({})", term.id, term.title);
        plan.push_term(term);

        Ok(RecomputeService::recompute(&plan))
    }

    /// Adds the term that follows the chronologically last one
    ///
    /// An empty plan starts with Fall of `current_year`.
    pub fn add_next_term(
        config: &PlannerConfig,
        plan: &Plan,
        id: impl Into<TermId>,
        current_year: Year,
    ) -> Result<Plan, PlanError> {
        let last = plan.chronological().last().copied();
        let (season, year) = suggest_next_term(last, current_year).ok_or_else(|| {
            PlanError::YearOutOfRange {
                year: last.map_or(current_year, |term| term.year),
                first: config.first_year,
                last: config.last_year,
            }
        })?;

        Self::add_term(config, plan, id, season, year)
    }

    /// Moves a term to a new season and year
    pub fn rename_term(
        config: &PlannerConfig,
        plan: &Plan,
        term_id: &str,
        season: Season,
        year: Year,
    ) -> Result<Plan, PlanError> {
        Self::check_year(config, year)?;

        let mut plan = plan.clone();
        let term = plan
            .term_mut(term_id)
            .ok_or_else(|| PlanError::TermNotFound(term_id.to_string()))?;
        term.rename(season, year);

        Ok(RecomputeService::recompute(&plan))
    }

    /// Deletes a term together with its courses
    pub fn delete_term(plan: &Plan, term_id: &str) -> Result<Plan, PlanError> {
        let mut plan = plan.clone();
        plan.remove_term(term_id)
            .ok_or_else(|| PlanError::TermNotFound(term_id.to_string()))?;

        Ok(RecomputeService::recompute(&plan))
    }

    /// Places a course into a term
    ///
    /// # Arguments
    /// * `confirm_over_limit` - Accept the course even if the term then exceeds
    ///   the credit limit
    ///
    /// # Returns
    /// The recomputed plan, the new course's id and its unmet prerequisites
    pub fn add_course(
        config: &PlannerConfig,
        plan: &Plan,
        term_id: &str,
        course: NewCourse,
        confirm_over_limit: bool,
    ) -> Result<CourseAdded, PlanError> {
        let mut plan = plan.clone();
        let term = plan
            .term_mut(term_id)
            .ok_or_else(|| PlanError::TermNotFound(term_id.to_string()))?;

        if term.courses.iter().any(|c| c.name == course.name) {
            warn!("Rejected duplicate {} in term {term_id}", course.name);
            return Err(PlanError::DuplicateCourse(course.name));
        }

        let current = term.total_credits();
        if current.saturating_add(course.credits) > config.credit_limit && !confirm_over_limit {
            return Err(PlanError::CreditLimitExceeded {
                current,
                adding: course.credits,
                limit: config.credit_limit,
            });
        }

        let course_id = course.id.unwrap_or_else(CourseId::local);
        term.courses.push(PlannedCourse::new(
            course_id.clone(),
            course.name,
            course.credits,
            course.prerequisite,
        ));

        let plan = RecomputeService::recompute(&plan);
        let unmet_prereqs = plan
            .find_course(&course_id)
            .and_then(PlannedCourse::unmet_prereqs)
            .map(<[String]>::to_vec);

        Ok(CourseAdded {
            plan,
            course_id,
            unmet_prereqs,
        })
    }

    /// Removes a course placement from a term
    pub fn remove_course(
        plan: &Plan,
        term_id: &str,
        course_id: &CourseId,
    ) -> Result<Plan, PlanError> {
        let mut plan = plan.clone();
        let term = plan
            .term_mut(term_id)
            .ok_or_else(|| PlanError::TermNotFound(term_id.to_string()))?;

        let before = term.courses.len();
        term.courses.retain(|course| &course.id != course_id);
        if term.courses.len() == before {
            return Err(PlanError::CourseNotFound(course_id.clone()));
        }

        Ok(RecomputeService::recompute(&plan))
    }

    fn check_year(config: &PlannerConfig, year: Year) -> Result<(), PlanError> {
        if config.allows_year(year) {
            Ok(())
        } else {
            Err(PlanError::YearOutOfRange {
                year,
                first: config.first_year,
                last: config.last_year,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PlannerConfig {
        PlannerConfig::default()
    }

    fn new_course(name: &str, credits: u32, prereq: Option<&str>) -> NewCourse {
        NewCourse {
            id: None,
            name: name.to_string(),
            credits,
            prerequisite: prereq.map(str::to_string),
        }
    }

    fn base_plan() -> Plan {
        let plan = EditPlanService::add_term(&config(), &Plan::default(), "f24", Season::Fall, Year(2024))
            .unwrap();
        EditPlanService::add_term(&config(), &plan, "s25", Season::Spring, Year(2025)).unwrap()
    }

    #[test]
    fn test_add_course_reports_unmet() {
        let added = EditPlanService::add_course(
            &config(),
            &base_plan(),
            "s25",
            new_course("CSCI 2101 001", 3, Some(r#"[["CSCI 1011"]]"#)),
            false,
        )
        .unwrap();

        assert!(matches!(&added.course_id, CourseId::Text(id) if id.starts_with("local-")));
        assert_eq!(added.unmet_prereqs, Some(vec!["CSCI 1011".to_string()]));
        assert_eq!(
            added.warning().as_deref(),
            Some("Added course, missing prerequisites: CSCI 1011")
        );

        // Placing the prerequisite earlier clears the warning
        let added = EditPlanService::add_course(
            &config(),
            &added.plan,
            "f24",
            new_course("CSCI 1011 001", 4, None),
            false,
        )
        .unwrap();
        let ds = added
            .plan
            .courses()
            .find(|(_, c)| c.name == "CSCI 2101 001")
            .unwrap()
            .1;
        assert_eq!(ds.unmet_prereqs(), None);
        assert_eq!(added.warning(), None);
    }

    #[test]
    fn test_add_course_keeps_given_id() {
        let mut course = new_course("ART 1000 001", 3, None);
        course.id = Some("3f9c".into());
        let added =
            EditPlanService::add_course(&config(), &base_plan(), "f24", course, false).unwrap();
        assert_eq!(added.course_id, CourseId::from("3f9c"));
    }

    #[test]
    fn test_add_course_rejects_duplicate_name() {
        let plan = EditPlanService::add_course(
            &config(),
            &base_plan(),
            "f24",
            new_course("ART 1000 001", 3, None),
            false,
        )
        .unwrap()
        .plan;

        let err = EditPlanService::add_course(
            &config(),
            &plan,
            "f24",
            new_course("ART 1000 001", 3, None),
            false,
        )
        .unwrap_err();
        assert_eq!(err, PlanError::DuplicateCourse("ART 1000 001".to_string()));

        // A different section is a different placement
        assert!(
            EditPlanService::add_course(
                &config(),
                &plan,
                "f24",
                new_course("ART 1000 002", 3, None),
                false,
            )
            .is_ok()
        );
    }

    #[test]
    fn test_credit_limit_requires_confirmation() {
        let mut plan = base_plan();
        for (i, credits) in [6, 6, 6].into_iter().enumerate() {
            plan = EditPlanService::add_course(
                &config(),
                &plan,
                "f24",
                new_course(&format!("ART {}000 001", i + 1), credits, None),
                false,
            )
            .unwrap()
            .plan;
        }

        // 18 + 3 is exactly at the limit
        let at_limit = EditPlanService::add_course(
            &config(),
            &plan,
            "f24",
            new_course("ART 4000 001", 3, None),
            false,
        )
        .unwrap()
        .plan;

        let err = EditPlanService::add_course(
            &config(),
            &at_limit,
            "f24",
            new_course("ART 5000 001", 1, None),
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PlanError::CreditLimitExceeded {
                current: 21,
                adding: 1,
                limit: 21
            }
        );

        let confirmed = EditPlanService::add_course(
            &config(),
            &at_limit,
            "f24",
            new_course("ART 5000 001", 1, None),
            true,
        )
        .unwrap();
        assert_eq!(confirmed.plan.term("f24").unwrap().total_credits(), 22);
    }

    #[test]
    fn test_add_course_unknown_term() {
        let err = EditPlanService::add_course(
            &config(),
            &base_plan(),
            "nope",
            new_course("ART 1000 001", 3, None),
            false,
        )
        .unwrap_err();
        assert_eq!(err, PlanError::TermNotFound("nope".to_string()));
    }

    #[test]
    fn test_remove_course_recomputes() {
        let added = EditPlanService::add_course(
            &config(),
            &base_plan(),
            "f24",
            new_course("CSCI 1011 001", 4, None),
            false,
        )
        .unwrap();
        let intro = added.course_id;
        let plan = EditPlanService::add_course(
            &config(),
            &added.plan,
            "s25",
            new_course("CSCI 2101 001", 3, Some(r#"[["CSCI 1011"]]"#)),
            false,
        )
        .unwrap()
        .plan;

        let plan = EditPlanService::remove_course(&plan, "f24", &intro).unwrap();
        let ds = plan.courses().next().unwrap().1;
        assert_eq!(ds.unmet_prereqs(), Some(&["CSCI 1011".to_string()][..]));

        let err = EditPlanService::remove_course(&plan, "f24", &intro).unwrap_err();
        assert_eq!(err, PlanError::CourseNotFound(intro));
    }

    #[test]
    fn test_rename_term_reorders_and_recomputes() {
        let plan = EditPlanService::add_course(
            &config(),
            &base_plan(),
            "f24",
            new_course("CSCI 1011 001", 4, None),
            false,
        )
        .unwrap()
        .plan;
        let plan = EditPlanService::add_course(
            &config(),
            &plan,
            "s25",
            new_course("CSCI 2101 001", 3, Some(r#"[["CSCI 1011"]]"#)),
            false,
        )
        .unwrap()
        .plan;

        // Move the intro term after the dependent one
        let plan =
            EditPlanService::rename_term(&config(), &plan, "f24", Season::Fall, Year(2025)).unwrap();
        assert_eq!(plan.terms()[0].id, "s25");
        assert_eq!(plan.term("f24").unwrap().title, "Fall 2025");

        let ds = plan.term("s25").unwrap().courses[0].clone();
        assert_eq!(ds.unmet_prereqs(), Some(&["CSCI 1011".to_string()][..]));
    }

    #[test]
    fn test_year_range_enforced() {
        let err =
            EditPlanService::add_term(&config(), &Plan::default(), "t", Season::Fall, Year(2040))
                .unwrap_err();
        assert!(matches!(err, PlanError::YearOutOfRange { year: Year(2040), .. }));

        let err = EditPlanService::rename_term(&config(), &base_plan(), "f24", Season::Fall, Year(2000))
            .unwrap_err();
        assert!(matches!(err, PlanError::YearOutOfRange { .. }));
    }

    #[test]
    fn test_add_next_term() {
        let plan =
            EditPlanService::add_next_term(&config(), &Plan::default(), "a", Year(2024)).unwrap();
        assert_eq!(plan.terms()[0].title, "Fall 2024");

        let plan = EditPlanService::add_next_term(&config(), &plan, "b", Year(2024)).unwrap();
        assert_eq!(plan.term("b").unwrap().title, "Spring 2025");

        let plan = EditPlanService::add_next_term(&config(), &plan, "c", Year(2024)).unwrap();
        assert_eq!(plan.term("c").unwrap().title, "Fall 2025");
    }

    #[test]
    fn test_add_next_term_after_last_year() {
        let plan = Plan::new(vec![Term::new("f", Season::Fall, Year(i32::MAX))]);
        let err = EditPlanService::add_next_term(&config(), &plan, "n", Year(2024)).unwrap_err();
        assert_eq!(
            err,
            PlanError::YearOutOfRange {
                year: Year(i32::MAX),
                first: config().first_year,
                last: config().last_year,
            }
        );
    }

    #[test]
    fn test_credit_limit_with_huge_credits() {
        let plan = EditPlanService::add_course(
            &config(),
            &base_plan(),
            "f24",
            new_course("ART 1000 001", u32::MAX, None),
            true,
        )
        .unwrap()
        .plan;

        let err = EditPlanService::add_course(
            &config(),
            &plan,
            "f24",
            new_course("ART 2000 001", 1, None),
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PlanError::CreditLimitExceeded {
                current: u32::MAX,
                adding: 1,
                limit: 21
            }
        );
    }

    #[test]
    fn test_delete_term() {
        let plan = EditPlanService::delete_term(&base_plan(), "f24").unwrap();
        assert_eq!(plan.terms().len(), 1);
        assert_eq!(
            EditPlanService::delete_term(&plan, "f24").unwrap_err(),
            PlanError::TermNotFound("f24".to_string())
        );
    }
}
