use axum::{
    extract::{Path, Request, State},
    response::Response,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{UpdateVehicleRequest, VehicleResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::multipart::parse_submission;

use super::found_redirect;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:vehicleId",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

/// POST /vehicles — submission de formulario, redirige al detalle
async fn create_vehicle(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    let payload = parse_submission(request).await?;
    let controller = VehicleController::new(state.pool.clone(), state.storage.clone());
    let vehicle = controller.create(user.user_id, payload).await?;
    Ok(found_redirect(&format!("/vehicles/{}", vehicle.id)))
}

async fn list_vehicles(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone(), state.storage.clone());
    let response = controller.list(user.user_id).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone(), state.storage.clone());
    let response = controller.get_by_id(vehicle_id, user.user_id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone(), state.storage.clone());
    let response = controller.update(vehicle_id, user.user_id, request).await?;
    Ok(Json(response))
}

/// DELETE /vehicles/:vehicleId — idempotente, redirige al listado
async fn delete_vehicle(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let controller = VehicleController::new(state.pool.clone(), state.storage.clone());
    controller.delete(vehicle_id, user.user_id).await?;
    Ok(found_redirect("/vehicles"))
}
