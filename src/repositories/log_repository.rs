//! Repositorio de logs de mantenimiento
//!
//! Todas las queries filtran por (id, user_id, vehicle_id) para aislar
//! tenants. Los tags/parts nuevos se crean en la misma transacción que el
//! log; el vínculo con los existentes es una operación separada.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::log_dto::NewLogForm;
use crate::models::{log::Log, part::Part, tag::Tag};
use crate::utils::errors::AppError;

pub struct LogRepository {
    pool: PgPool,
}

impl LogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear el log y sus tags/parts nuevos en una sola transacción
    pub async fn create(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
        form: &NewLogForm,
    ) -> Result<Log, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let log = sqlx::query_as::<_, Log>(
            r#"
            INSERT INTO logs (
                id, vehicle_id, user_id, mechanic_id, title, notes, "type",
                cost, odometer, serviced_at, self_service, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(user_id)
        .bind(form.mechanic_id)
        .bind(&form.title)
        .bind(form.notes.as_deref())
        .bind(&form.log_type)
        .bind(form.cost)
        .bind(form.odometer)
        .bind(form.serviced_at)
        .bind(form.self_service)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        for name in &form.new_tags {
            let tag_id: (Uuid,) =
                sqlx::query_as("INSERT INTO tags (id, name) VALUES ($1, $2) RETURNING id")
                    .bind(Uuid::new_v4())
                    .bind(name)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;

            sqlx::query("INSERT INTO log_tags (log_id, tag_id) VALUES ($1, $2)")
                .bind(log.id)
                .bind(tag_id.0)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        for part in &form.new_parts {
            let part_id: (Uuid,) = sqlx::query_as(
                "INSERT INTO parts (id, name, manufacturer, price, link) VALUES ($1, $2, $3, $4, $5) RETURNING id",
            )
            .bind(Uuid::new_v4())
            .bind(&part.name)
            .bind(part.manufacturer.as_deref())
            .bind(part.price)
            .bind(part.link.as_deref())
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

            sqlx::query("INSERT INTO log_parts (log_id, part_id) VALUES ($1, $2)")
                .bind(log.id)
                .bind(part_id.0)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(log)
    }

    /// Vincular tags existentes por id (ids desconocidos se ignoran)
    pub async fn link_tags(&self, log_id: Uuid, tag_ids: &[Uuid]) -> Result<(), AppError> {
        if tag_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO log_tags (log_id, tag_id)
            SELECT $1, t.id FROM tags t WHERE t.id = ANY($2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(log_id)
        .bind(tag_ids)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }

    /// Vincular parts existentes por id (ids desconocidos se ignoran)
    pub async fn link_parts(&self, log_id: Uuid, part_ids: &[Uuid]) -> Result<(), AppError> {
        if part_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO log_parts (log_id, part_id)
            SELECT $1, p.id FROM parts p WHERE p.id = ANY($2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(log_id)
        .bind(part_ids)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Option<Log>, AppError> {
        let log = sqlx::query_as::<_, Log>(
            "SELECT * FROM logs WHERE id = $1 AND user_id = $2 AND vehicle_id = $3",
        )
        .bind(id)
        .bind(user_id)
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(log)
    }

    pub async fn list(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<Vec<Log>, AppError> {
        let logs = sqlx::query_as::<_, Log>(
            "SELECT * FROM logs WHERE user_id = $1 AND vehicle_id = $2 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(logs)
    }

    /// Guardar las rutas de adjuntos subidos; devuelve None si el filtro
    /// de scope no matchea ninguna fila (no es un error)
    pub async fn set_attachments_paths(
        &self,
        id: Uuid,
        user_id: Uuid,
        vehicle_id: Uuid,
        attachments_paths: &[String],
    ) -> Result<Option<Log>, AppError> {
        let log = sqlx::query_as::<_, Log>(
            r#"
            UPDATE logs SET attachments_paths = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND vehicle_id = $3
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(vehicle_id)
        .bind(attachments_paths)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(log)
    }

    /// Borrado idempotente: cero o una fila, nunca error por ausencia
    pub async fn delete(
        &self,
        id: Uuid,
        user_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM logs WHERE id = $1 AND user_id = $2 AND vehicle_id = $3",
        )
        .bind(id)
        .bind(user_id)
        .bind(vehicle_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }

    pub async fn tags_for_log(&self, log_id: Uuid) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.* FROM tags t
            JOIN log_tags lt ON lt.tag_id = t.id
            WHERE lt.log_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(log_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(tags)
    }

    pub async fn parts_for_log(&self, log_id: Uuid) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>(
            r#"
            SELECT p.* FROM parts p
            JOIN log_parts lp ON lp.part_id = p.id
            WHERE lp.log_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(log_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(parts)
    }
}
