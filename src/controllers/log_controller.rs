//! Pipeline de submission de logs de mantenimiento
//!
//! Orquesta: validación → scope del vehículo → persistencia (log + tags y
//! parts nuevos en una transacción) → vínculo de existentes → upload de
//! adjuntos en paralelo → guardado de rutas.

use std::sync::Arc;

use futures::future::try_join_all;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::log_dto::{LogFieldErrors, LogResponse, NewLogForm};
use crate::models::log::Log;
use crate::repositories::{
    log_repository::LogRepository, vehicle_repository::VehicleRepository,
};
use crate::storage::{log_attachment_path, StorageGateway};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::multipart::FormPayload;

pub struct LogController {
    logs: LogRepository,
    vehicles: VehicleRepository,
    storage: Arc<dyn StorageGateway>,
}

impl LogController {
    pub fn new(pool: PgPool, storage: Arc<dyn StorageGateway>) -> Self {
        Self {
            logs: LogRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            storage,
        }
    }

    /// Crear un log a partir de una submission de formulario.
    ///
    /// El log y los tags/parts nuevos se persisten primero; el vínculo con
    /// los existentes y el guardado de adjuntos son pasos posteriores que no
    /// hacen rollback del log ya creado si fallan.
    pub async fn create(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
        payload: FormPayload,
    ) -> Result<Log, AppError> {
        let form = NewLogForm::from_payload(&payload).map_err(AppError::from)?;

        // El vehículo tiene que existir y pertenecer al usuario
        self.vehicles
            .find_by_id(vehicle_id, user_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id.to_string()))?;

        let log = self.logs.create(user_id, vehicle_id, &form).await?;

        // Vínculo best-effort: un fallo acá no deshace el log ya creado
        if let Err(e) = self.logs.link_tags(log.id, &form.existing_tag_ids).await {
            tracing::warn!("No se pudieron vincular tags existentes al log {}: {}", log.id, e);
        }
        if let Err(e) = self.logs.link_parts(log.id, &form.existing_part_ids).await {
            tracing::warn!("No se pudieron vincular parts existentes al log {}: {}", log.id, e);
        }

        // Adjuntos: fan-out en paralelo, rutas en el orden de llegada
        let attachments = payload.files("attachments");
        let uploads = attachments.iter().map(|file| {
            let path = log_attachment_path(vehicle_id, log.id, &file.filename);
            let storage = Arc::clone(&self.storage);
            async move {
                storage.upload(&path, &file.bytes, &file.content_type).await?;
                Ok::<String, AppError>(path)
            }
        });

        let attachments_paths = match try_join_all(uploads).await {
            Ok(paths) => paths,
            Err(e) => {
                tracing::error!("Error uploading attachments for log {}: {}", log.id, e);
                return Err(AppError::from(LogFieldErrors::attachments(
                    "Error uploading attachments",
                )));
            }
        };

        if !attachments_paths.is_empty() {
            self.logs
                .set_attachments_paths(log.id, user_id, vehicle_id, &attachments_paths)
                .await?;
        }

        tracing::info!(
            "Log {} creado para el vehículo {} ({} adjuntos)",
            log.id,
            vehicle_id,
            attachments_paths.len()
        );
        Ok(log)
    }

    /// Detalle con URLs de adjuntos resueltas y tags/parts vinculados
    pub async fn get_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<LogResponse, AppError> {
        let log = self
            .logs
            .find_by_id(id, user_id, vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Log", &id.to_string()))?;

        let mut attachments_urls = Vec::with_capacity(log.attachments_paths.len());
        for path in &log.attachments_paths {
            attachments_urls.push(self.storage.get_url(path).await?);
        }

        let tags = self.logs.tags_for_log(log.id).await?;
        let parts = self.logs.parts_for_log(log.id).await?;

        Ok(LogResponse::from_model(log, attachments_urls, tags, parts))
    }

    pub async fn list(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<Vec<Log>, AppError> {
        self.logs.list(user_id, vehicle_id).await
    }

    /// Borrado idempotente: repetir el delete nunca es un error
    pub async fn delete(
        &self,
        id: Uuid,
        user_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<(), AppError> {
        let deleted = self.logs.delete(id, user_id, vehicle_id).await?;
        if deleted == 0 {
            tracing::debug!("Delete de log {} sin filas afectadas", id);
        }
        Ok(())
    }
}
