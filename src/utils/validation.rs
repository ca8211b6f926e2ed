//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos usadas por la capa de formularios.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;

/// Validar y convertir string a UUID
pub fn parse_uuid(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value.trim()).ok()
}

/// Validar que un string no esté vacío
pub fn is_not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Convertir el valor de un input de fecha a `DateTime<Utc>`.
///
/// Acepta RFC3339, el formato `datetime-local` de los navegadores
/// (`YYYY-MM-DDTHH:MM` con o sin segundos) y fechas sueltas `YYYY-MM-DD`
/// (medianoche UTC).
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_uuid() {
        assert!(parse_uuid("550e8400-e29b-41d4-a716-446655440000").is_some());
        assert!(parse_uuid("invalid-uuid").is_none());
    }

    #[test]
    fn test_is_not_empty() {
        assert!(is_not_empty("oil change"));
        assert!(!is_not_empty(""));
        assert!(!is_not_empty("   "));
    }

    #[test]
    fn test_parse_datetime_rfc3339() {
        let dt = parse_datetime("2024-01-01T10:30:00Z").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_datetime_local_input() {
        // El input datetime-local del navegador no lleva zona ni segundos
        assert!(parse_datetime("2024-01-01T10:30").is_some());
        assert!(parse_datetime("2024-01-01T10:30:15").is_some());
    }

    #[test]
    fn test_parse_datetime_date_only() {
        let dt = parse_datetime("2024-01-01").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("not-a-date").is_none());
        assert!(parse_datetime("2024/01/01").is_none());
    }
}
