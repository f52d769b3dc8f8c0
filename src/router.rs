use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{books, login, root, users};
use crate::middleware::{expose_diagnostics, handle_panic};
use crate::state::AppState;

/// Build the full HTTP application around an injected store
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root::root).fallback(root::method_not_allowed))
        .route("/health", get(root::health).fallback(root::method_not_allowed))
        // API
        .merge(book_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .fallback(root::fallback)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    let router = match cors_layer(&config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    // Global middleware
    router
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(config.is_development(), expose_diagnostics))
}

fn book_routes() -> Router<AppState> {
    Router::new()
        // Collection
        .route(
            "/api/books",
            get(books::list).post(books::create).fallback(root::method_not_allowed),
        )
        // Individual records
        .route(
            "/api/books/:id",
            get(books::get)
                .put(books::update)
                .delete(books::delete)
                .fallback(root::method_not_allowed),
        )
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/api/login", post(login::login).fallback(root::method_not_allowed))
}

fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/api/users/:email/verify-security-question",
        post(users::verify_security_question).fallback(root::method_not_allowed),
    )
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
