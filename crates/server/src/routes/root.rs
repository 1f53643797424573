use axum::http::StatusCode;

/// Names the service so a browser hitting the bare host gets a hint
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Degree planner prerequisite API, see /docs")
}
