//! Route table for the catalog API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{api::handlers, state::AppState};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/chair/search", get(handlers::chairs::search))
        .route(
            "/chair/search/condition",
            get(handlers::chairs::search_condition),
        )
        .route("/chair/low_priced", get(handlers::chairs::low_priced))
        .route("/chair/buy/:id", post(handlers::chairs::buy))
        .route("/chair/:id", get(handlers::chairs::detail))
        .route("/chair", post(handlers::chairs::upload))
        .route("/estate/search", get(handlers::estates::search))
        .route(
            "/estate/search/condition",
            get(handlers::estates::search_condition),
        )
        .route("/estate/low_priced", get(handlers::estates::low_priced))
        .route("/estate/req_doc/:id", post(handlers::estates::request_document))
        .route("/estate/nazotte", post(handlers::estates::area_search))
        .route("/estate/:id", get(handlers::estates::detail))
        .route("/estate", post(handlers::estates::upload))
        .route(
            "/recommended_estate/:id",
            get(handlers::estates::recommended_for_chair),
        )
}
