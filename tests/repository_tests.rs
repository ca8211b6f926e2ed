//! Tests de repositorios contra una base real.
//!
//! Se saltean en silencio si DATABASE_URL no está configurada; con una base
//! disponible corren las migraciones y verifican aislamiento por tenant,
//! borrado idempotente y el vínculo de tags existentes y nuevos.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use vehicle_logbook::dto::log_dto::NewLogForm;
use vehicle_logbook::models::{user::User, vehicle::Vehicle};
use vehicle_logbook::repositories::{
    log_repository::LogRepository, user_repository::UserRepository,
    vehicle_repository::VehicleRepository,
};
use vehicle_logbook::utils::multipart::FormPayload;

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .ok()?;

    let migrator = sqlx::migrate::Migrator::new(std::path::Path::new("migrations"))
        .await
        .ok()?;
    migrator.run(&pool).await.ok()?;

    Some(pool)
}

async fn create_user(pool: &PgPool) -> User {
    UserRepository::new(pool.clone())
        .create(format!("{}@example.com", Uuid::new_v4()), "hash".to_string())
        .await
        .unwrap()
}

async fn create_vehicle(pool: &PgPool, user_id: Uuid) -> Vehicle {
    VehicleRepository::new(pool.clone())
        .create(
            user_id,
            None,
            "Honda".to_string(),
            "Civic".to_string(),
            2020,
            None,
        )
        .await
        .unwrap()
}

fn log_payload() -> FormPayload {
    let mut payload = FormPayload::new();
    payload.push_field("title", "Oil change");
    payload.push_field("type", "maintenance");
    payload.push_field("servicedAt", "2024-01-01");
    payload
}

#[tokio::test]
async fn test_delete_vehicle_twice_never_errors() {
    let Some(pool) = test_pool().await else { return };
    let user = create_user(&pool).await;
    let vehicle = create_vehicle(&pool, user.id).await;

    let repository = VehicleRepository::new(pool.clone());
    assert_eq!(repository.delete(vehicle.id, user.id).await.unwrap(), 1);
    assert_eq!(repository.delete(vehicle.id, user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_log_twice_never_errors() {
    let Some(pool) = test_pool().await else { return };
    let user = create_user(&pool).await;
    let vehicle = create_vehicle(&pool, user.id).await;

    let logs = LogRepository::new(pool.clone());
    let form = NewLogForm::from_payload(&log_payload()).unwrap();
    let log = logs.create(user.id, vehicle.id, &form).await.unwrap();

    assert_eq!(logs.delete(log.id, user.id, vehicle.id).await.unwrap(), 1);
    assert_eq!(logs.delete(log.id, user.id, vehicle.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_get_hides_other_owners_vehicles() {
    let Some(pool) = test_pool().await else { return };
    let owner = create_user(&pool).await;
    let intruder = create_user(&pool).await;
    let vehicle = create_vehicle(&pool, owner.id).await;

    let repository = VehicleRepository::new(pool.clone());
    assert!(repository
        .find_by_id(vehicle.id, owner.id)
        .await
        .unwrap()
        .is_some());
    // Un id ajeno se comporta igual que uno inexistente
    assert!(repository
        .find_by_id(vehicle.id, intruder.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_log_submission_links_existing_and_new_tags() {
    let Some(pool) = test_pool().await else { return };
    let user = create_user(&pool).await;
    let vehicle = create_vehicle(&pool, user.id).await;

    let existing: (Uuid,) =
        sqlx::query_as("INSERT INTO tags (id, name) VALUES ($1, $2) RETURNING id")
            .bind(Uuid::new_v4())
            .bind("existing tag")
            .fetch_one(&pool)
            .await
            .unwrap();

    let new_name = format!("tag-{}", Uuid::new_v4());
    let mut payload = log_payload();
    payload.push_field(
        "tags",
        format!(r#"[{{"id":"{}"}}, {{"name":"{}"}}]"#, existing.0, new_name),
    );
    let form = NewLogForm::from_payload(&payload).unwrap();

    let logs = LogRepository::new(pool.clone());
    let log = logs.create(user.id, vehicle.id, &form).await.unwrap();
    logs.link_tags(log.id, &form.existing_tag_ids).await.unwrap();

    let tags = logs.tags_for_log(log.id).await.unwrap();
    assert_eq!(tags.len(), 2);
    assert!(tags.iter().any(|t| t.id == existing.0));
    assert!(tags.iter().any(|t| t.name == new_name));

    // El tag nuevo se crea exactamente una vez
    let created: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tags WHERE name = $1")
        .bind(&new_name)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(created.0, 1);
}
