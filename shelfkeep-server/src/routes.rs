//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Origins allowed when none are configured
const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// CORS policy from a comma-separated origin list, or "*" for any
fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let allow_origin = match origins {
        Some("*") => AllowOrigin::any(),
        Some(origins) => AllowOrigin::list(
            origins
                .split(',')
                .filter_map(|s| s.trim().parse::<HeaderValue>().ok()),
        ),
        None => AllowOrigin::list(
            DEV_ORIGINS.into_iter().map(HeaderValue::from_static),
        ),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState, cors_origins: Option<&str>) -> Router {
    let api_routes = Router::new()
        // Catalog endpoints
        .route("/books", get(handlers::list_books).post(handlers::add_book))
        .route(
            "/books/:isbn",
            get(handlers::get_book).delete(handlers::delete_book),
        )
        .route(
            "/members",
            get(handlers::list_members).post(handlers::add_member),
        )
        .route(
            "/members/:member_id",
            get(handlers::get_member).delete(handlers::delete_member),
        )
        // Circulation endpoints
        .route(
            "/loans",
            get(handlers::list_loans).post(handlers::borrow_book),
        )
        .route("/loans/:isbn", delete(handlers::return_book))
        .route("/stats", get(handlers::stats))
        .route("/save", post(handlers::save))
        // SSE endpoint
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}
