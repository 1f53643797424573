mod doc;
mod dtos;
mod routes;
mod state;
mod utils;

use crate::{
    doc::ApiDoc,
    routes::{health, plan, prerequisite, root},
    state::AppState,
    utils::shutdown::shutdown_signal,
};
use axum::{
    Router,
    routing::{delete, get, post},
};
use log::info;
use planner::config::PlannerConfig;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Builds the application router
fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/plan/recompute", post(plan::recompute))
        .route("/plan/relationships", post(plan::relationships))
        .route(
            "/plan/courses",
            post(plan::add_course).delete(plan::remove_course),
        )
        .route(
            "/plan/terms",
            post(plan::add_term)
                .patch(plan::rename_term)
                .delete(plan::delete_term),
        )
        .route("/plan/import", post(plan::import))
        .route("/plan/catalog", delete(plan::clear_catalog))
        .route("/prerequisites/check", post(prerequisite::check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = PlannerConfig::from_env().expect("Failed to load planner config");
    info!(
        "Credit limit {}, plannable years {}-{}",
        config.credit_limit, config.first_year, config.last_year
    );

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://{bind_address}");

    axum::serve(listener, app(AppState::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
