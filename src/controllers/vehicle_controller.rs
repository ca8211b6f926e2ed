//! Pipeline de submission de vehículos
//!
//! Orquesta: validación → upload de avatar → persistencia → response.

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::{
    NewVehicleForm, UpdateVehicleRequest, VehicleFieldErrors, VehicleResponse,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::storage::{vehicle_avatar_path, StorageGateway};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::multipart::FormPayload;

pub struct VehicleController {
    repository: VehicleRepository,
    storage: Arc<dyn StorageGateway>,
}

impl VehicleController {
    pub fn new(pool: PgPool, storage: Arc<dyn StorageGateway>) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
            storage,
        }
    }

    /// Crear un vehículo a partir de una submission de formulario.
    ///
    /// El avatar se sube recién después de validar los campos; si el upload
    /// falla no se persiste nada. La ruta es
    /// `vehicle-avatars/{userId}/{timestamp}`.
    pub async fn create(&self, user_id: Uuid, payload: FormPayload) -> Result<Vehicle, AppError> {
        let form = NewVehicleForm::from_payload(&payload).map_err(AppError::from)?;

        let mut avatar_path = None;
        if let Some(file) = payload.file("avatar") {
            let path = vehicle_avatar_path(user_id, chrono::Utc::now().timestamp_millis());
            if let Err(e) = self
                .storage
                .upload(&path, &file.bytes, &file.content_type)
                .await
            {
                tracing::error!("Error uploading avatar: {}", e);
                return Err(AppError::from(VehicleFieldErrors {
                    avatar: Some("Error uploading avatar".to_string()),
                    ..VehicleFieldErrors::default()
                }));
            }
            avatar_path = Some(path);
        }

        let vehicle = self
            .repository
            .create(user_id, form.name, form.make, form.model, form.year, avatar_path)
            .await?;

        tracing::info!("Vehículo {} creado para el usuario {}", vehicle.id, user_id);
        Ok(vehicle)
    }

    /// Detalle con la URL del avatar resuelta (o un placeholder si no hay)
    pub async fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        let avatar_url = match &vehicle.avatar_path {
            Some(path) => Some(self.storage.get_url(path).await?),
            None => None,
        };

        Ok(VehicleResponse::from_model(vehicle, avatar_url))
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list(user_id).await?;

        let mut responses = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            let avatar_url = match &vehicle.avatar_path {
                Some(path) => Some(self.storage.get_url(path).await?),
                None => None,
            };
            responses.push(VehicleResponse::from_model(vehicle, avatar_url));
        }

        Ok(responses)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .update(id, user_id, &request)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        let avatar_url = match &vehicle.avatar_path {
            Some(path) => Some(self.storage.get_url(path).await?),
            None => None,
        };

        Ok(VehicleResponse::from_model(vehicle, avatar_url))
    }

    /// Borrado idempotente: repetir el delete nunca es un error
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let deleted = self.repository.delete(id, user_id).await?;
        if deleted == 0 {
            tracing::debug!("Delete de vehículo {} sin filas afectadas", id);
        }
        Ok(())
    }
}
