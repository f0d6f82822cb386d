pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

#[cfg(test)]
pub mod testing;

use axum::{middleware::from_fn, routing::get, routing::post, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn app() -> Router {
    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Owner-scoped API, bearer token required
        .merge(protected_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http());

    if config::config().security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

fn auth_public_routes() -> Router {
    use handlers::public::auth;

    Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/token", post(auth::token))
}

fn protected_routes() -> Router {
    use handlers::protected::{dashboard, diet_logs, exercises, food_items, sets};

    Router::new()
        .route("/api/exercises", get(exercises::list).post(exercises::create))
        .route(
            "/api/exercises/:id",
            get(exercises::get).put(exercises::update).delete(exercises::delete),
        )
        .route("/api/sets", get(sets::list).post(sets::create))
        .route(
            "/api/sets/:id",
            get(sets::get).put(sets::update).delete(sets::delete),
        )
        .route("/api/dietlogs", get(diet_logs::list).post(diet_logs::create))
        .route(
            "/api/dietlogs/:id",
            get(diet_logs::get).delete(diet_logs::delete),
        )
        .route("/api/fooditems", get(food_items::list).post(food_items::create))
        .route(
            "/api/fooditems/:id",
            get(food_items::get).delete(food_items::delete),
        )
        .route("/api/dashboard", get(dashboard::summary))
        .route_layer(from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "FitHub API",
            "version": version,
            "description": "Personal fitness tracking backend (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "register": "POST /api/register (public)",
                "token": "POST /api/token (public)",
                "exercises": "/api/exercises[/:id] (protected)",
                "sets": "/api/sets[/:id] (protected)",
                "dietlogs": "/api/dietlogs[/:id] (protected)",
                "fooditems": "/api/fooditems[/:id] (protected)",
                "dashboard": "GET /api/dashboard (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
