use models::{
    plan::{CourseId, Plan},
    term::{Season, Year},
};
use planner::services::{edit_plan::NewCourse, import::BackendSemester};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A whole plan: the list of terms with their courses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Vec<Object>)]
pub struct PlanBody(pub Plan);

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipsRequest {
    #[schema(value_type = Vec<Object>)]
    pub plan: Plan,
    /// Id of the hovered course
    #[schema(value_type = String)]
    pub focus: CourseId,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipsResponse {
    /// Canonical codes the focused course requires
    pub prerequisites: Vec<String>,
    /// Ids of courses that require the focused course
    #[schema(value_type = Vec<String>)]
    pub postrequisites: Vec<CourseId>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    /// JSON-encoded prerequisite formula
    pub prerequisite: Option<String>,
    /// Courses taken before the term, by code or display name
    #[serde(default)]
    pub taken: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub satisfied: bool,
    pub unmet: Vec<Vec<String>>,
    /// Unmet groups formatted for display
    pub missing: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCourseRequest {
    #[schema(value_type = Vec<Object>)]
    pub plan: Plan,
    pub term_id: String,
    #[schema(value_type = Object)]
    pub course: NewCourse,
    /// Accept the course even if the term goes over the credit limit
    #[serde(default)]
    pub confirm_over_limit: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCourseResponse {
    #[schema(value_type = Vec<Object>)]
    pub plan: Plan,
    #[schema(value_type = String)]
    pub course_id: CourseId,
    pub unmet_prereqs: Option<Vec<String>>,
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCourseRequest {
    #[schema(value_type = Vec<Object>)]
    pub plan: Plan,
    pub term_id: String,
    #[schema(value_type = String)]
    pub course_id: CourseId,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTermRequest {
    #[schema(value_type = Vec<Object>)]
    pub plan: Plan,
    pub id: String,
    /// Omit both season and year to append the term after the last one
    #[schema(value_type = Option<String>)]
    pub season: Option<Season>,
    #[schema(value_type = Option<i32>)]
    pub year: Option<Year>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameTermRequest {
    #[schema(value_type = Vec<Object>)]
    pub plan: Plan,
    pub term_id: String,
    #[schema(value_type = String)]
    pub season: Season,
    #[schema(value_type = i32)]
    pub year: Year,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTermRequest {
    #[schema(value_type = Vec<Object>)]
    pub plan: Plan,
    pub term_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    #[schema(value_type = Vec<Object>)]
    pub semesters: Vec<BackendSemester>,
    /// Course catalog; replaces the cached catalog when present
    #[schema(value_type = Option<Vec<Object>>)]
    pub catalog: Option<Vec<Value>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
