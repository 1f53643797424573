use crate::{
    dtos::plan::{
        AddCourseRequest, AddCourseResponse, AddTermRequest, DeleteTermRequest, ErrorResponse,
        ImportRequest, PlanBody, RelationshipsRequest, RelationshipsResponse, RemoveCourseRequest,
        RenameTermRequest,
    },
    state::AppState,
    utils::error::ApiError,
};
use axum::{Json, extract::State, http::StatusCode};
use log::info;
use models::term::Year;
use planner::services::{
    edit_plan::EditPlanService, import::ImportService, recompute::RecomputeService,
    relationships::RelationshipService,
};

/// Recompute unmet prerequisites for every course in a plan
#[utoipa::path(
    post,
    path = "/plan/recompute",
    request_body = PlanBody,
    responses(
        (status = 200, description = "Plan in chronological order with unmet prerequisites filled in", body = PlanBody)
    ),
    tag = "Planner"
)]
pub async fn recompute(Json(PlanBody(plan)): Json<PlanBody>) -> Json<PlanBody> {
    Json(PlanBody(RecomputeService::recompute(&plan)))
}

/// Get the prerequisite and postrequisite links of a focused course
#[utoipa::path(
    post,
    path = "/plan/relationships",
    request_body = RelationshipsRequest,
    responses(
        (status = 200, description = "Relationships of the focused course; empty if it is not in the plan", body = RelationshipsResponse)
    ),
    tag = "Planner"
)]
pub async fn relationships(Json(request): Json<RelationshipsRequest>) -> Json<RelationshipsResponse> {
    let relationships = RelationshipService::relationships_of(&request.plan, &request.focus);

    let mut prerequisites: Vec<String> = relationships
        .prerequisites
        .into_iter()
        .map(|key| key.to_string())
        .collect();
    let mut postrequisites: Vec<_> = relationships.postrequisites.into_iter().collect();
    prerequisites.sort();
    postrequisites.sort();

    Json(RelationshipsResponse {
        prerequisites,
        postrequisites,
    })
}

/// Add a course to a term
#[utoipa::path(
    post,
    path = "/plan/courses",
    request_body = AddCourseRequest,
    responses(
        (status = 200, description = "Course added", body = AddCourseResponse),
        (status = 404, description = "Term not found", body = ErrorResponse),
        (status = 409, description = "Duplicate course or credit limit needs confirmation", body = ErrorResponse)
    ),
    tag = "Planner"
)]
pub async fn add_course(
    State(state): State<AppState>,
    Json(request): Json<AddCourseRequest>,
) -> Result<Json<AddCourseResponse>, ApiError> {
    let added = EditPlanService::add_course(
        &state.config,
        &request.plan,
        &request.term_id,
        request.course,
        request.confirm_over_limit,
    )?;

    let warning = added.warning();
    if let Some(warning) = &warning {
        info!("{warning}");
    }

    Ok(Json(AddCourseResponse {
        plan: added.plan,
        course_id: added.course_id,
        unmet_prereqs: added.unmet_prereqs,
        warning,
    }))
}

/// Remove a course from a term
#[utoipa::path(
    delete,
    path = "/plan/courses",
    request_body = RemoveCourseRequest,
    responses(
        (status = 200, description = "Course removed", body = PlanBody),
        (status = 404, description = "Term or course not found", body = ErrorResponse)
    ),
    tag = "Planner"
)]
pub async fn remove_course(
    Json(request): Json<RemoveCourseRequest>,
) -> Result<Json<PlanBody>, ApiError> {
    let plan = EditPlanService::remove_course(&request.plan, &request.term_id, &request.course_id)?;
    Ok(Json(PlanBody(plan)))
}

/// Add a term, either at an explicit season and year or after the last term
#[utoipa::path(
    post,
    path = "/plan/terms",
    request_body = AddTermRequest,
    responses(
        (status = 200, description = "Term added", body = PlanBody),
        (status = 400, description = "Only one of season and year given", body = ErrorResponse),
        (status = 422, description = "Year outside the plannable range", body = ErrorResponse)
    ),
    tag = "Planner"
)]
pub async fn add_term(
    State(state): State<AppState>,
    Json(request): Json<AddTermRequest>,
) -> Result<Json<PlanBody>, ApiError> {
    let plan = match (request.season, request.year) {
        (Some(season), Some(year)) => {
            EditPlanService::add_term(&state.config, &request.plan, request.id, season, year)?
        }
        (None, None) => EditPlanService::add_next_term(
            &state.config,
            &request.plan,
            request.id,
            Year::current(),
        )?,
        _ => {
            return Err(ApiError::BadRequest(
                "season and year must be given together".to_string(),
            ));
        }
    };

    Ok(Json(PlanBody(plan)))
}

/// Move a term to a new season and year
#[utoipa::path(
    patch,
    path = "/plan/terms",
    request_body = RenameTermRequest,
    responses(
        (status = 200, description = "Term renamed", body = PlanBody),
        (status = 404, description = "Term not found", body = ErrorResponse),
        (status = 422, description = "Year outside the plannable range", body = ErrorResponse)
    ),
    tag = "Planner"
)]
pub async fn rename_term(
    State(state): State<AppState>,
    Json(request): Json<RenameTermRequest>,
) -> Result<Json<PlanBody>, ApiError> {
    let plan = EditPlanService::rename_term(
        &state.config,
        &request.plan,
        &request.term_id,
        request.season,
        request.year,
    )?;
    Ok(Json(PlanBody(plan)))
}

/// Delete a term and its courses
#[utoipa::path(
    delete,
    path = "/plan/terms",
    request_body = DeleteTermRequest,
    responses(
        (status = 200, description = "Term deleted", body = PlanBody),
        (status = 404, description = "Term not found", body = ErrorResponse)
    ),
    tag = "Planner"
)]
pub async fn delete_term(
    Json(request): Json<DeleteTermRequest>,
) -> Result<Json<PlanBody>, ApiError> {
    let plan = EditPlanService::delete_term(&request.plan, &request.term_id)?;
    Ok(Json(PlanBody(plan)))
}

/// Build a plan from backend semester records
#[utoipa::path(
    post,
    path = "/plan/import",
    request_body = ImportRequest,
    responses(
        (status = 200, description = "Imported and recomputed plan", body = PlanBody)
    ),
    tag = "Planner"
)]
pub async fn import(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Json<PlanBody> {
    let mut cache = state.catalog_cache();

    let catalog = match &request.catalog {
        Some(entries) => Some(cache.store(entries)),
        None => cache.get(),
    };

    let plan = ImportService::plan_from_backend(&request.semesters, catalog, Year::current());
    Json(PlanBody(plan))
}

/// Drop the cached catalog so later imports stop back-filling from it
#[utoipa::path(
    delete,
    path = "/plan/catalog",
    responses(
        (status = 204, description = "Cached catalog dropped"),
        (status = 404, description = "No catalog was cached", body = ErrorResponse)
    ),
    tag = "Planner"
)]
pub async fn clear_catalog(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    if state.catalog_cache().invalidate() {
        info!("Cleared cached catalog");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("no catalog is cached".to_string()))
    }
}
