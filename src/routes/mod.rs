pub mod auth_routes;
pub mod log_routes;
pub mod vehicle_routes;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Armar el router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    let protected = Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest(
            "/vehicles/:vehicleId/logs",
            log_routes::create_log_router(),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/auth", auth_routes::create_auth_router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "vehicle-logbook",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Redirect 302 a la vista de detalle (axum::response::Redirect solo
/// ofrece 303/307/308 y el contrato fija 302)
pub fn found_redirect(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_redirect() {
        let response = found_redirect("/vehicles/abc");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/vehicles/abc"
        );
    }
}
