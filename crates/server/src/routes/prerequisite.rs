use crate::dtos::plan::{CheckRequest, CheckResponse};
use axum::Json;
use models::{
    course_key::CourseKey,
    prerequisite::{Formula, format_missing},
};
use std::collections::HashSet;

/// Checks a prerequisite formula against a set of taken courses
///
/// Malformed formulas are treated as having no prerequisites.
#[utoipa::path(
    post,
    path = "/prerequisites/check",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Evaluation result", body = CheckResponse)
    ),
    tag = "Prerequisites"
)]
pub async fn check(Json(request): Json<CheckRequest>) -> Json<CheckResponse> {
    let taken: HashSet<CourseKey> = request
        .taken
        .iter()
        .map(|code| CourseKey::from_display_name(code))
        .collect();

    let unmet = Formula::parse(request.prerequisite.as_deref())
        .map(|formula| formula.unmet_groups(&taken))
        .unwrap_or_default();

    Json(CheckResponse {
        satisfied: unmet.is_empty(),
        missing: (!unmet.is_empty()).then(|| format_missing(&unmet)),
        unmet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(prerequisite: Option<&str>, taken: &[&str]) -> CheckResponse {
        let Json(response) = check(Json(CheckRequest {
            prerequisite: prerequisite.map(str::to_string),
            taken: taken.iter().map(|t| t.to_string()).collect(),
        }))
        .await;
        response
    }

    #[tokio::test]
    async fn test_unmet_group_is_formatted() {
        let response = run(
            Some(r#"[["MATH 1011"],["BSNS 2120","BUSA 2120"]]"#),
            &["MATH 1011 001"],
        )
        .await;
        assert!(!response.satisfied);
        assert_eq!(response.missing.as_deref(), Some("(BSNS 2120 OR BUSA 2120)"));
    }

    #[tokio::test]
    async fn test_satisfied() {
        let response = run(
            Some(r#"[["MATH 1011"],["BSNS 2120","BUSA 2120"]]"#),
            &["MATH 1011", "busa 2120"],
        )
        .await;
        assert!(response.satisfied);
        assert!(response.unmet.is_empty());
        assert_eq!(response.missing, None);
    }

    #[tokio::test]
    async fn test_malformed_is_satisfied() {
        assert!(run(Some("not json"), &[]).await.satisfied);
        assert!(run(None, &[]).await.satisfied);
    }
}
