//! Repositorio de vehículos
//!
//! Todas las queries filtran por (id, user_id) para aislar tenants.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::UpdateVehicleRequest;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        name: Option<String>,
        make: String,
        model: String,
        year: i32,
        avatar_path: Option<String>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, user_id, name, make, model, year, avatar_path, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(name)
        .bind(make)
        .bind(model)
        .bind(year)
        .bind(avatar_path)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(vehicle)
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(vehicles)
    }

    /// Actualización parcial; devuelve None si el filtro de scope no
    /// matchea ninguna fila (no es un error)
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: &UpdateVehicleRequest,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles SET
                name = COALESCE($3, name),
                make = COALESCE($4, make),
                model = COALESCE($5, model),
                year = COALESCE($6, year),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(request.name.as_deref())
        .bind(request.make.as_deref())
        .bind(request.model.as_deref())
        .bind(request.year)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(vehicle)
    }

    /// Borrado idempotente: cero o una fila, nunca error por ausencia
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }
}
