use log::debug;
use models::{
    course_key::CourseKey,
    plan::{Plan, PlannedCourse},
    prerequisite::format_group,
    term::Term,
};
use std::collections::HashSet;

pub struct RecomputeService;

impl RecomputeService {
    /// Recomputes the unmet prerequisites of every course in the plan
    ///
    /// Only courses in chronologically earlier terms count towards a
    /// prerequisite; courses in the same term or any later one never do.
    /// Terms sharing a season and year are treated as one slot, so the result
    /// does not depend on the order terms are stored in.
    ///
    /// # Returns
    /// A new plan with terms in chronological order and every course's
    /// unmet-prerequisite list replaced
    pub fn recompute(plan: &Plan) -> Plan {
        let ordered = plan.chronological();
        let priors = Self::prior_sets(&ordered);

        let terms: Vec<Term> = ordered
            .into_iter()
            .zip(&priors)
            .map(|(term, prior)| {
                let courses = term
                    .courses
                    .iter()
                    .map(|course| Self::evaluate(course, prior))
                    .collect();

                Term {
                    id: term.id.clone(),
                    title: term.title.clone(),
                    season: term.season.clone(),
                    year: term.year,
                    courses,
                }
            })
            .collect();

        let recomputed = Plan::new(terms);
        debug!(
            "Recomputed prerequisites for {} courses across {} terms, {} unmet",
            recomputed.course_count(),
            recomputed.terms().len(),
            recomputed
                .courses()
                .filter(|(_, course)| course.unmet_prereqs().is_some())
                .count()
        );

        recomputed
    }

    /// Snapshots the courses taken strictly before each term
    ///
    /// # Arguments
    /// * `ordered` - Terms in chronological order
    ///
    /// # Returns
    /// One key set per term, aligned with `ordered`
    pub fn prior_sets(ordered: &[&Term]) -> Vec<HashSet<CourseKey>> {
        let mut cumulative = HashSet::new();
        let mut priors = Vec::with_capacity(ordered.len());

        for slot in ordered.chunk_by(|a, b| a.order_key() == b.order_key()) {
            // Snapshot before any course of this slot is added
            priors.extend(slot.iter().map(|_| cumulative.clone()));

            for term in slot {
                cumulative.extend(term.courses.iter().map(PlannedCourse::key));
            }
        }

        priors
    }

    /// Evaluates one course against the keys taken before its term
    fn evaluate(course: &PlannedCourse, prior: &HashSet<CourseKey>) -> PlannedCourse {
        let unmet = course
            .formula()
            .map(|formula| formula.unmet_groups(prior))
            .unwrap_or_default();

        course
            .clone()
            .with_unmet_prereqs(unmet.iter().map(|group| format_group(group)).collect())
    }
}
