use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use state::AppState;

/// Build the full application router.
///
/// Both `/api/students` and `/api/typeahead` point at the same handler; the
/// typeahead path is a UI-facing alias, not a separate code path.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(student_routes())
        .merge(payment_routes())
        .merge(auth_routes(state.clone()))
        // Anything under public/ is served at the root as a fallback
        .fallback_service(ServeDir::new("public"))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn student_routes() -> Router<AppState> {
    use handlers::students;

    Router::new()
        .route("/api/students", get(students::search))
        .route("/api/typeahead", get(students::search))
        .route("/api/students/:id", get(students::get_one))
}

fn payment_routes() -> Router<AppState> {
    use handlers::payments;

    Router::new().route("/api/payments", get(payments::list).post(payments::record))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    use handlers::auth;

    let protected = Router::new()
        .route("/api/me", get(auth::me))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::jwt_auth_middleware,
        ));

    Router::new().route("/api/login", post(auth::login)).merge(protected)
}
