use crate::{
    dtos::plan::{
        AddCourseRequest, AddCourseResponse, AddTermRequest, CheckRequest, CheckResponse,
        DeleteTermRequest, ErrorResponse, ImportRequest, PlanBody, RelationshipsRequest,
        RelationshipsResponse, RemoveCourseRequest, RenameTermRequest,
    },
    routes::{health, plan, prerequisite, root},
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        plan::recompute,
        plan::relationships,
        plan::add_course,
        plan::remove_course,
        plan::add_term,
        plan::rename_term,
        plan::delete_term,
        plan::import,
        plan::clear_catalog,
        prerequisite::check
    ),
    components(schemas(
        PlanBody,
        RelationshipsRequest,
        RelationshipsResponse,
        CheckRequest,
        CheckResponse,
        AddCourseRequest,
        AddCourseResponse,
        RemoveCourseRequest,
        AddTermRequest,
        RenameTermRequest,
        DeleteTermRequest,
        ImportRequest,
        ErrorResponse,
        health::HealthResponse
    )),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Planner", description = "Plan recomputation, hover relationships and plan edits"),
        (name = "Prerequisites", description = "Standalone prerequisite evaluation"),
    ),
    info(
        title = "Degree Planner API",
        version = "1.0.0",
        description = "Prerequisite and term-ordering engine for degree plans",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
