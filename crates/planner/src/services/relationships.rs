use models::{
    course_key::CourseKey,
    plan::{CourseId, Plan, PlannedCourse},
};
use serde::Serialize;
use std::collections::HashSet;

/// How a course relates to the focused course, in display priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Highlight {
    Focused,
    /// The course is a prerequisite of the focused course
    Prerequisite,
    /// The focused course is a prerequisite of this course
    Postrequisite,
    None,
}

/// Prerequisite and postrequisite links of one focused course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Relationships {
    pub focus: Option<CourseId>,
    /// Canonical codes named anywhere in the focused course's formula
    pub prerequisites: HashSet<CourseKey>,
    /// Other course placements whose formula names the focused course
    pub postrequisites: HashSet<CourseId>,
}

impl Relationships {
    /// Classifies a course for hover highlighting
    pub fn highlight(&self, course: &PlannedCourse) -> Highlight {
        if self.focus.as_ref() == Some(&course.id) {
            Highlight::Focused
        } else if self.prerequisites.contains(&course.key()) {
            Highlight::Prerequisite
        } else if self.postrequisites.contains(&course.id) {
            Highlight::Postrequisite
        } else {
            Highlight::None
        }
    }
}

pub struct RelationshipService;

impl RelationshipService {
    /// Derives the hover relationships of `focus` across the whole plan
    ///
    /// Any OR-group membership counts as a link, even when a sibling
    /// alternative is what actually satisfies the group. An unknown focus id
    /// yields empty sets.
    pub fn relationships_of(plan: &Plan, focus: &CourseId) -> Relationships {
        let Some(target) = plan.find_course(focus) else {
            return Relationships::default();
        };

        let prerequisites = target
            .formula()
            .map(|formula| formula.course_keys().collect())
            .unwrap_or_default();

        let target_key = target.key();
        let postrequisites = plan
            .courses()
            .map(|(_, course)| course)
            .filter(|course| &course.id != focus)
            .filter(|course| {
                course
                    .formula()
                    .is_some_and(|formula| formula.mentions(&target_key))
            })
            .map(|course| course.id.clone())
            .collect();

        Relationships {
            focus: Some(focus.clone()),
            prerequisites,
            postrequisites,
        }
    }
}
