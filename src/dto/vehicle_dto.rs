//! DTOs y validación de formularios de vehículos

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use crate::utils::multipart::FormPayload;
use crate::utils::validation::is_not_empty;

/// Mapeo de errores por campo; los campos sin error serializan como null
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct VehicleFieldErrors {
    pub name: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub avatar: Option<String>,
}

impl From<VehicleFieldErrors> for AppError {
    fn from(errors: VehicleFieldErrors) -> Self {
        AppError::FieldValidation(
            serde_json::to_value(&errors).unwrap_or(serde_json::Value::Null),
        )
    }
}

/// Formulario de alta de vehículo ya validado y coercionado
#[derive(Debug, PartialEq)]
pub struct NewVehicleForm {
    pub name: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl NewVehicleForm {
    /// Validar los campos crudos de la submission.
    ///
    /// Devuelve el primer error encontrado, con un slot por campo.
    pub fn from_payload(payload: &FormPayload) -> Result<Self, VehicleFieldErrors> {
        let mut errors = VehicleFieldErrors::default();

        let name = payload
            .get("name")
            .filter(|v| is_not_empty(v))
            .map(str::to_string);

        let make = payload.get("make").unwrap_or_default();
        if !is_not_empty(make) {
            errors.make = Some("Make is required".to_string());
            return Err(errors);
        }

        let model = payload.get("model").unwrap_or_default();
        if !is_not_empty(model) {
            errors.model = Some("Model is required".to_string());
            return Err(errors);
        }

        let year = match payload.get("year").map(str::trim) {
            Some(value) if !value.is_empty() => match value.parse::<i32>() {
                Ok(year) => year,
                Err(_) => {
                    errors.year = Some("Year is required".to_string());
                    return Err(errors);
                }
            },
            _ => {
                errors.year = Some("Year is required".to_string());
                return Err(errors);
            }
        };

        Ok(Self {
            name,
            make: make.to_string(),
            model: model.to_string(),
            year,
        })
    }
}

/// Request de actualización parcial de un vehículo
#[derive(Debug, serde::Deserialize)]
pub struct UpdateVehicleRequest {
    pub name: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

/// Response de vehículo con la URL del avatar ya resuelta
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub avatar_path: Option<String>,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VehicleResponse {
    /// Construir la response. `avatar_url` viene del storage gateway; si el
    /// vehículo no tiene avatar se sintetiza un placeholder.
    pub fn from_model(vehicle: Vehicle, avatar_url: Option<String>) -> Self {
        let avatar_url = avatar_url.unwrap_or_else(|| placeholder_avatar_url(&vehicle));
        Self {
            id: vehicle.id,
            user_id: vehicle.user_id,
            name: vehicle.name,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            avatar_path: vehicle.avatar_path,
            avatar_url,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

/// Placeholder cuando el vehículo no tiene avatar subido
pub fn placeholder_avatar_url(vehicle: &Vehicle) -> String {
    let text = match &vehicle.name {
        Some(name) if !name.is_empty() => name.replace(' ', "+"),
        _ => vehicle.model.clone(),
    };
    format!("https://placehold.co/701x738?text={}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(fields: &[(&str, &str)]) -> FormPayload {
        let mut payload = FormPayload::new();
        for (name, value) in fields {
            payload.push_field(*name, *value);
        }
        payload
    }

    #[test]
    fn test_valid_vehicle_form() {
        let form = NewVehicleForm::from_payload(&payload(&[
            ("name", "Daily driver"),
            ("make", "Honda"),
            ("model", "Civic"),
            ("year", "2020"),
        ]))
        .unwrap();

        assert_eq!(form.name.as_deref(), Some("Daily driver"));
        assert_eq!(form.make, "Honda");
        assert_eq!(form.model, "Civic");
        assert_eq!(form.year, 2020);
    }

    #[test]
    fn test_name_is_optional() {
        let form =
            NewVehicleForm::from_payload(&payload(&[("make", "Honda"), ("model", "Civic"), ("year", "2020")]))
                .unwrap();
        assert_eq!(form.name, None);
    }

    #[test]
    fn test_empty_make_rejected() {
        let errors = NewVehicleForm::from_payload(&payload(&[
            ("make", ""),
            ("model", "Civic"),
            ("year", "2020"),
        ]))
        .unwrap_err();
        assert_eq!(errors.make.as_deref(), Some("Make is required"));
        assert_eq!(errors.model, None);
    }

    #[test]
    fn test_empty_model_rejected() {
        let errors = NewVehicleForm::from_payload(&payload(&[
            ("make", "Honda"),
            ("model", "  "),
            ("year", "2020"),
        ]))
        .unwrap_err();
        assert_eq!(errors.model.as_deref(), Some("Model is required"));
    }

    #[test]
    fn test_year_must_be_numeric() {
        let errors = NewVehicleForm::from_payload(&payload(&[
            ("make", "Honda"),
            ("model", "Civic"),
            ("year", "twenty twenty"),
        ]))
        .unwrap_err();
        assert_eq!(errors.year.as_deref(), Some("Year is required"));

        let errors =
            NewVehicleForm::from_payload(&payload(&[("make", "Honda"), ("model", "Civic")]))
                .unwrap_err();
        assert_eq!(errors.year.as_deref(), Some("Year is required"));
    }

    #[test]
    fn test_error_mapping_serializes_nulls() {
        let errors = NewVehicleForm::from_payload(&payload(&[])).unwrap_err();
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value["make"], serde_json::json!("Make is required"));
        assert_eq!(value["model"], serde_json::Value::Null);
        assert_eq!(value["year"], serde_json::Value::Null);
        assert_eq!(value["avatar"], serde_json::Value::Null);
    }

    #[test]
    fn test_placeholder_avatar_url() {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: Some("Daily driver".to_string()),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2020,
            avatar_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(
            placeholder_avatar_url(&vehicle),
            "https://placehold.co/701x738?text=Daily+driver"
        );

        let unnamed = Vehicle { name: None, ..vehicle };
        assert_eq!(
            placeholder_avatar_url(&unnamed),
            "https://placehold.co/701x738?text=Civic"
        );
    }
}
