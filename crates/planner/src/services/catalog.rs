use log::{debug, info};
use models::{
    course_key::CourseKey,
    plan::{Plan, PlannedCourse},
    prerequisite::raw_from_json,
    term::Term,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Composite catalog id, `{ "subject": "ACCT", "courseNumber": 2120 }`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogCourseId {
    subject: Option<String>,
    course_number: Option<u32>,
}

/// One catalog entry in any of the shapes the catalog API has returned
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    course_id: Option<CatalogCourseId>,
    subject: Option<String>,
    course_number: Option<u32>,
    name: Option<String>,
    #[serde(default)]
    prerequisite: Value,
}

impl CatalogEntry {
    /// Canonical key from the composite id, flat fields or name, in that order
    fn key(&self) -> Option<CourseKey> {
        let from_parts = |subject: &Option<String>, number: Option<u32>| {
            subject
                .as_deref()
                .zip(number)
                .map(|(subject, number)| CourseKey::canonicalize(&format!("{subject} {number}")))
        };

        self.course_id
            .as_ref()
            .and_then(|id| from_parts(&id.subject, id.course_number))
            .or_else(|| from_parts(&self.subject, self.course_number))
            .or_else(|| {
                self.name
                    .as_deref()
                    .and_then(CourseKey::try_from_display_name)
            })
    }
}

/// Prerequisites of catalog courses, keyed by canonical course key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogIndex {
    prerequisites: HashMap<CourseKey, Option<String>>,
}

impl CatalogIndex {
    /// Indexes raw catalog entries, skipping entries without a usable key
    pub fn from_entries(entries: &[Value]) -> Self {
        let mut prerequisites = HashMap::new();

        for entry in entries {
            let parsed = match CatalogEntry::deserialize(entry) {
                Ok(parsed) => parsed,
                Err(e) => {
                    debug!("Skipping malformed catalog entry: {e}");
                    continue;
                }
            };

            match parsed.key() {
                Some(key) => {
                    prerequisites.insert(key, raw_from_json(&parsed.prerequisite));
                }
                None => debug!("Skipping catalog entry without a course code"),
            }
        }

        info!("Indexed {} catalog courses", prerequisites.len());
        Self { prerequisites }
    }

    pub fn len(&self) -> usize {
        self.prerequisites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prerequisites.is_empty()
    }

    /// Raw prerequisite of a catalog course; `None` if unknown or without one
    pub fn prerequisite(&self, key: &CourseKey) -> Option<&str> {
        self.prerequisites.get(key).and_then(|raw| raw.as_deref())
    }

    /// Keys of planned courses that have no prerequisite string yet
    pub fn missing_keys(plan: &Plan) -> HashSet<CourseKey> {
        plan.courses()
            .map(|(_, course)| course)
            .filter(|course| Self::lacks_prerequisite(course))
            .filter_map(|course| CourseKey::try_from_display_name(&course.name))
            .collect()
    }

    /// Copies catalog prerequisites onto planned courses that lack one
    ///
    /// Courses that already carry a prerequisite are left untouched. The
    /// result still needs a recomputation pass.
    pub fn fill_missing_prerequisites(&self, plan: &Plan) -> Plan {
        let terms = plan
            .terms()
            .iter()
            .map(|term| {
                let courses = term
                    .courses
                    .iter()
                    .map(|course| self.fill_course(course))
                    .collect();
                Term {
                    courses,
                    ..term.clone()
                }
            })
            .collect();

        Plan::new(terms)
    }

    fn fill_course(&self, course: &PlannedCourse) -> PlannedCourse {
        let mut course = course.clone();
        if Self::lacks_prerequisite(&course)
            && let Some(key) = CourseKey::try_from_display_name(&course.name)
        {
            course.prerequisite = self.prerequisite(&key).map(str::to_string);
        }
        course
    }

    fn lacks_prerequisite(course: &PlannedCourse) -> bool {
        course.prerequisite.as_deref().is_none_or(str::is_empty)
    }
}

/// Holds one built [`CatalogIndex`] until explicitly invalidated
#[derive(Debug, Default)]
pub struct CatalogCache {
    index: Option<CatalogIndex>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&CatalogIndex> {
        self.index.as_ref()
    }

    /// Replaces the cached index with one built from `entries`
    pub fn store(&mut self, entries: &[Value]) -> &CatalogIndex {
        self.index.insert(CatalogIndex::from_entries(entries))
    }

    /// Drops the cached index; returns whether one was held
    pub fn invalidate(&mut self) -> bool {
        self.index.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::term::{Season, Year};
    use serde_json::json;

    fn catalog() -> Vec<Value> {
        vec![
            json!({"courseId": {"subject": "csci", "courseNumber": 2101}, "prerequisite": "[[\"CSCI 1011\"]]"}),
            json!({"subject": "MATH", "courseNumber": 2200, "prerequisite": [["MATH 1011"]]}),
            json!({"name": "ART 1000 Drawing", "prerequisite": null}),
            json!({"name": "Special Topics"}),
            json!({"subject": "BAD", "courseNumber": "not a number"}),
            json!("garbage"),
        ]
    }

    fn plan() -> Plan {
        Plan::new(vec![Term::new("f24", Season::Fall, Year(2024)).with_courses(vec![
            PlannedCourse::new("a".into(), "CSCI 2101 001", 3, None),
            PlannedCourse::new("b".into(), "MATH 2200 001", 3, Some(String::new())),
            PlannedCourse::new("c".into(), "ART 1000 001", 3, None),
            PlannedCourse::new("d".into(), "HIST 1000 001", 3, Some(r#"[["HIST 0001"]]"#.to_string())),
        ])])
    }

    #[test]
    fn test_index_accepts_all_shapes() {
        let index = CatalogIndex::from_entries(&catalog());
        assert_eq!(index.len(), 3);
        assert_eq!(
            index.prerequisite(&CourseKey::canonicalize("CSCI 2101")),
            Some(r#"[["CSCI 1011"]]"#)
        );
        assert_eq!(
            index.prerequisite(&CourseKey::canonicalize("MATH 2200")),
            Some(r#"[["MATH 1011"]]"#)
        );
        assert_eq!(index.prerequisite(&CourseKey::canonicalize("ART 1000")), None);
    }

    #[test]
    fn test_missing_keys() {
        let mut keys: Vec<String> = CatalogIndex::missing_keys(&plan())
            .into_iter()
            .map(|k| k.to_string())
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["ART 1000", "CSCI 2101", "MATH 2200"]);
    }

    #[test]
    fn test_fill_missing_prerequisites() {
        let index = CatalogIndex::from_entries(&catalog());
        let filled = index.fill_missing_prerequisites(&plan());
        let prereq = |id: &str| {
            filled
                .find_course(&id.into())
                .and_then(|c| c.prerequisite.clone())
        };

        assert_eq!(prereq("a").as_deref(), Some(r#"[["CSCI 1011"]]"#));
        assert_eq!(prereq("b").as_deref(), Some(r#"[["MATH 1011"]]"#));
        assert_eq!(prereq("c"), None);
        // Existing prerequisites win over the catalog
        assert_eq!(prereq("d").as_deref(), Some(r#"[["HIST 0001"]]"#));
    }

    #[test]
    fn test_cache_store_and_invalidate() {
        let mut cache = CatalogCache::new();
        assert!(cache.get().is_none());
        assert!(!cache.invalidate());

        assert_eq!(cache.store(&catalog()).len(), 3);
        assert_eq!(cache.get().map(CatalogIndex::len), Some(3));

        // A later store replaces the whole index
        cache.store(&catalog()[1..2]);
        assert_eq!(cache.get().map(CatalogIndex::len), Some(1));

        assert!(cache.invalidate());
        assert!(cache.get().is_none());
    }
}
