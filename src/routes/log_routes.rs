use axum::{
    extract::{Path, Request, State},
    response::Response,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::log_controller::LogController;
use crate::dto::log_dto::LogResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::log::Log;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::multipart::parse_submission;

use super::found_redirect;

/// Router anidado bajo /vehicles/:vehicleId/logs
pub fn create_log_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_logs).post(create_log))
        .route("/:logId", get(get_log).delete(delete_log))
}

/// POST /vehicles/:vehicleId/logs — submission de formulario,
/// redirige al detalle del log creado
async fn create_log(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    request: Request,
) -> Result<Response, AppError> {
    let payload = parse_submission(request).await?;
    let controller = LogController::new(state.pool.clone(), state.storage.clone());
    let log = controller.create(user.user_id, vehicle_id, payload).await?;
    Ok(found_redirect(&format!(
        "/vehicles/{}/logs/{}",
        vehicle_id, log.id
    )))
}

async fn list_logs(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<Log>>, AppError> {
    let controller = LogController::new(state.pool.clone(), state.storage.clone());
    let logs = controller.list(user.user_id, vehicle_id).await?;
    Ok(Json(logs))
}

async fn get_log(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path((vehicle_id, log_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<LogResponse>, AppError> {
    let controller = LogController::new(state.pool.clone(), state.storage.clone());
    let response = controller.get_by_id(log_id, user.user_id, vehicle_id).await?;
    Ok(Json(response))
}

/// DELETE /vehicles/:vehicleId/logs/:logId — idempotente,
/// redirige al listado de logs
async fn delete_log(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path((vehicle_id, log_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, AppError> {
    let controller = LogController::new(state.pool.clone(), state.storage.clone());
    controller.delete(log_id, user.user_id, vehicle_id).await?;
    Ok(found_redirect(&format!("/vehicles/{}/logs", vehicle_id)))
}
