use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::database::DatabaseManager;
use crate::handlers::{protected, public};
use crate::middleware::require_identity;
use crate::state::AppState;

/// Full router with middleware, ready to serve.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config.security.cors_origins);

    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/user", user_routes(&state))
        .nest("/api/item", item_routes(&state))
        .nest("/api/test", test_routes())
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors);

    let router = if state.config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn user_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/get_user_by_token", get(protected::user::get_user_by_token))
        .route_layer(from_fn_with_state(state.clone(), require_identity));

    Router::new()
        .route("/query_string", get(public::query_string_get))
        .route("/register", post(public::user::register_post))
        .route("/login", post(public::user::login_post))
        .merge(protected)
}

fn item_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/upsert_item", post(protected::item::upsert_item_post))
        .route_layer(from_fn_with_state(state.clone(), require_identity));

    Router::new()
        .route("/query_string", get(public::query_string_get))
        .route("/get_item_by_id", get(public::item::get_item_by_id))
        .merge(protected)
}

fn test_routes() -> Router<AppState> {
    use public::test;

    Router::new()
        .route("/query_string", get(public::query_string_get))
        .route("/query_string_array", get(test::query_string_array_get))
        .route("/header", get(test::header_get))
        .route("/formdata_body", post(test::formdata_body_post))
        .route("/json_body", post(test::json_body_post))
        .route("/imgembed_upload", post(test::imgembed_upload_post))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn root() -> &'static str {
    "health check!"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "msg": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
