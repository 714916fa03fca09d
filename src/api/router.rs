//! API router.
//!
//! Returns a composable `Router` with all endpoints nested under
//! `/api/`. CORS is permissive — the browser frontend is served from a
//! different origin in development.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router.
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/users", post(endpoints::users::create))
        .route(
            "/users/:id",
            get(endpoints::users::get).put(endpoints::users::update),
        )
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::create),
        )
        .route(
            "/prescriptions",
            get(endpoints::prescriptions::list).post(endpoints::prescriptions::create),
        )
        .route(
            "/patients/:id/caregivers",
            post(endpoints::caregivers::grant).get(endpoints::caregivers::list_caregivers),
        )
        .route(
            "/patients/:id/caregivers/:caregiver_id",
            delete(endpoints::caregivers::revoke),
        )
        .route(
            "/caregivers/:id/patients",
            get(endpoints::caregivers::list_patients),
        )
        .route(
            "/consultations/extract",
            post(endpoints::consultations::extract),
        )
        .route("/consultations", post(endpoints::consultations::create))
        .route(
            "/consultations/:id",
            get(endpoints::consultations::get).put(endpoints::consultations::update),
        )
        .route("/transcribe", post(endpoints::ai::transcribe))
        .route("/ai/analyze-image", post(endpoints::ai::analyze_image))
        .route("/ai/prescription", post(endpoints::ai::prescription))
        .route("/first-aid", post(endpoints::ai::first_aid))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}
