//! DTOs y validación de formularios de logs de mantenimiento

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{log::Log, part::Part, tag::Tag};
use crate::utils::errors::AppError;
use crate::utils::multipart::FormPayload;
use crate::utils::validation::{is_not_empty, parse_datetime, parse_uuid};

/// Mapeo de errores por campo; los campos sin error serializan como null
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct LogFieldErrors {
    pub title: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    pub cost: Option<String>,
    pub odometer: Option<String>,
    #[serde(rename = "servicedAt")]
    pub serviced_at: Option<String>,
    #[serde(rename = "selfService")]
    pub self_service: Option<String>,
    #[serde(rename = "mechanicId")]
    pub mechanic_id: Option<String>,
    pub tags: Option<String>,
    pub parts: Option<String>,
    pub attachments: Option<String>,
}

impl LogFieldErrors {
    /// Error único en el slot de attachments (falla de upload)
    pub fn attachments(message: &str) -> Self {
        Self {
            attachments: Some(message.to_string()),
            ..Self::default()
        }
    }
}

impl From<LogFieldErrors> for AppError {
    fn from(errors: LogFieldErrors) -> Self {
        AppError::FieldValidation(
            serde_json::to_value(&errors).unwrap_or(serde_json::Value::Null),
        )
    }
}

/// Elemento del campo `tags`: con id es un tag existente, sin id se crea
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TagInput {
    pub id: Option<Uuid>,
    pub name: Option<String>,
}

/// Elemento del campo `parts`, mismas reglas que `TagInput`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PartInput {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub price: Option<Decimal>,
    pub link: Option<String>,
}

/// Repuesto nuevo a crear junto con el log
#[derive(Debug, Clone, PartialEq)]
pub struct NewPart {
    pub name: String,
    pub manufacturer: Option<String>,
    pub price: Option<Decimal>,
    pub link: Option<String>,
}

/// Formulario de alta de log ya validado y coercionado
#[derive(Debug, PartialEq)]
pub struct NewLogForm {
    pub title: String,
    pub notes: Option<String>,
    pub log_type: String,
    pub cost: Option<Decimal>,
    pub odometer: Option<Decimal>,
    pub serviced_at: DateTime<Utc>,
    pub self_service: bool,
    pub mechanic_id: Option<Uuid>,
    pub new_tags: Vec<String>,
    pub existing_tag_ids: Vec<Uuid>,
    pub new_parts: Vec<NewPart>,
    pub existing_part_ids: Vec<Uuid>,
}

impl NewLogForm {
    /// Validar los campos crudos de la submission.
    ///
    /// Devuelve el primer error encontrado, con un slot por campo.
    pub fn from_payload(payload: &FormPayload) -> Result<Self, LogFieldErrors> {
        let mut errors = LogFieldErrors::default();

        let title = payload.get("title").unwrap_or_default();
        if !is_not_empty(title) {
            errors.title = Some("Title is required".to_string());
            return Err(errors);
        }

        let notes = payload
            .get("notes")
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let log_type = payload.get("type").unwrap_or_default();
        if !is_not_empty(log_type) {
            errors.log_type = Some("Type is required".to_string());
            return Err(errors);
        }

        let odometer = match parse_optional_number(payload.get("odometer")) {
            Ok(value) => value,
            Err(()) => {
                errors.odometer = Some("Odometer must be a number".to_string());
                return Err(errors);
            }
        };

        let cost = match parse_optional_number(payload.get("cost")) {
            Ok(value) => value,
            Err(()) => {
                errors.cost = Some("Cost must be a number".to_string());
                return Err(errors);
            }
        };

        let serviced_at = match payload.get("servicedAt").and_then(parse_datetime) {
            Some(value) => value,
            None => {
                errors.serviced_at = Some("Serviced At must be a date".to_string());
                return Err(errors);
            }
        };

        // Checkbox: cuenta la presencia del campo, no su contenido
        let self_service = payload.get("selfService").is_some();

        let mechanic_id = match payload.get("mechanicId").filter(|v| is_not_empty(v)) {
            Some(value) => match parse_uuid(value) {
                Some(id) => Some(id),
                None => {
                    errors.mechanic_id = Some("Mechanic must be a valid id".to_string());
                    return Err(errors);
                }
            },
            None => None,
        };

        let (new_tags, existing_tag_ids) = match split_tags(payload.get("tags")) {
            Ok(split) => split,
            Err(()) => {
                errors.tags = Some("Tags must be a list".to_string());
                return Err(errors);
            }
        };

        let (new_parts, existing_part_ids) = match split_parts(payload.get("parts")) {
            Ok(split) => split,
            Err(()) => {
                errors.parts = Some("Parts must be a list".to_string());
                return Err(errors);
            }
        };

        Ok(Self {
            title: title.to_string(),
            notes,
            log_type: log_type.to_string(),
            cost,
            odometer,
            serviced_at,
            self_service,
            mechanic_id,
            new_tags,
            existing_tag_ids,
            new_parts,
            existing_part_ids,
        })
    }
}

/// Coerción numérica: vacío o ausente es None, presente debe parsear
fn parse_optional_number(raw: Option<&str>) -> Result<Option<Decimal>, ()> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<Decimal>().map(Some).map_err(|_| ()),
    }
}

/// Separar el campo `tags` en nuevos (sin id) y existentes (con id)
fn split_tags(raw: Option<&str>) -> Result<(Vec<String>, Vec<Uuid>), ()> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok((Vec::new(), Vec::new())),
        Some(value) => value,
    };

    let inputs: Vec<TagInput> = serde_json::from_str(raw).map_err(|_| ())?;

    let mut new_tags = Vec::new();
    let mut existing = Vec::new();
    for input in inputs {
        match input.id {
            Some(id) => existing.push(id),
            None => match input.name.filter(|n| is_not_empty(n)) {
                Some(name) => new_tags.push(name),
                None => return Err(()),
            },
        }
    }
    Ok((new_tags, existing))
}

/// Separar el campo `parts` en nuevos (sin id) y existentes (con id)
fn split_parts(raw: Option<&str>) -> Result<(Vec<NewPart>, Vec<Uuid>), ()> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok((Vec::new(), Vec::new())),
        Some(value) => value,
    };

    let inputs: Vec<PartInput> = serde_json::from_str(raw).map_err(|_| ())?;

    let mut new_parts = Vec::new();
    let mut existing = Vec::new();
    for input in inputs {
        match input.id {
            Some(id) => existing.push(id),
            None => match input.name.filter(|n| is_not_empty(n)) {
                Some(name) => new_parts.push(NewPart {
                    name,
                    manufacturer: input.manufacturer,
                    price: input.price,
                    link: input.link,
                }),
                None => return Err(()),
            },
        }
    }
    Ok((new_parts, existing))
}

/// Response de log con las URLs de los adjuntos ya resueltas
#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub mechanic_id: Option<Uuid>,
    pub title: String,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub log_type: String,
    pub cost: Option<Decimal>,
    pub odometer: Option<Decimal>,
    pub serviced_at: DateTime<Utc>,
    pub self_service: bool,
    pub attachments_paths: Vec<String>,
    pub attachments_urls: Vec<String>,
    pub tags: Vec<Tag>,
    pub parts: Vec<Part>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LogResponse {
    pub fn from_model(
        log: Log,
        attachments_urls: Vec<String>,
        tags: Vec<Tag>,
        parts: Vec<Part>,
    ) -> Self {
        Self {
            id: log.id,
            vehicle_id: log.vehicle_id,
            mechanic_id: log.mechanic_id,
            title: log.title,
            notes: log.notes,
            log_type: log.log_type,
            cost: log.cost,
            odometer: log.odometer,
            serviced_at: log.serviced_at,
            self_service: log.self_service,
            attachments_paths: log.attachments_paths,
            attachments_urls,
            tags,
            parts,
            created_at: log.created_at,
            updated_at: log.updated_at,
        }
    }
}
