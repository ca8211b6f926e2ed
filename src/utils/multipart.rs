//! Parseo de formularios
//!
//! Este módulo convierte el body de una submission (multipart o
//! urlencoded) en un `FormPayload` uniforme para la capa de validación.

use axum::extract::{FromRequest, Multipart, Request};
use axum::Form;

use crate::utils::errors::{AppError, AppResult};

/// Tamaño máximo por parte del multipart (500.000 bytes)
pub const MAX_PART_SIZE: usize = 500_000;

/// Archivo subido en un formulario multipart
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field_name: String,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Campos y archivos de una submission, en orden de llegada
#[derive(Debug, Default)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
    files: Vec<UploadedFile>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn push_file(&mut self, file: UploadedFile) {
        self.files.push(file);
    }

    /// Primer valor del campo con ese nombre
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Primer archivo del campo con ese nombre
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field_name == name)
    }

    /// Todos los archivos del campo con ese nombre
    pub fn files(&self, name: &str) -> Vec<&UploadedFile> {
        self.files.iter().filter(|f| f.field_name == name).collect()
    }
}

/// Parsear el body de una submission.
///
/// Acepta `multipart/form-data` (con tope de 500.000 bytes por parte) y
/// `application/x-www-form-urlencoded`. Una parte que exceda el tope hace
/// fallar toda la submission.
pub async fn parse_submission(request: Request) -> AppResult<FormPayload> {
    let content_type = request
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let mut payload = FormPayload::new();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let filename = field.file_name().map(str::to_string);
            let file_content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;

            if data.len() > MAX_PART_SIZE {
                return Err(AppError::BadRequest(format!(
                    "Part '{}' exceeds the maximum size of {} bytes",
                    name, MAX_PART_SIZE
                )));
            }

            match filename {
                Some(filename) => {
                    // Un input file sin archivo elegido llega como parte vacía
                    if filename.is_empty() && data.is_empty() {
                        continue;
                    }
                    payload.push_file(UploadedFile {
                        field_name: name,
                        filename,
                        content_type: file_content_type,
                        bytes: data.to_vec(),
                    });
                }
                None => {
                    let value = String::from_utf8_lossy(&data).into_owned();
                    payload.push_field(name, value);
                }
            }
        }
    } else {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid form body: {}", e)))?;

        for (name, value) in pairs {
            payload.push_field(name, value);
        }
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_first_value() {
        let mut payload = FormPayload::new();
        payload.push_field("title", "Oil change");
        payload.push_field("title", "duplicate");

        assert_eq!(payload.get("title"), Some("Oil change"));
        assert_eq!(payload.get("missing"), None);
    }

    #[test]
    fn test_files_filters_by_field_name() {
        let mut payload = FormPayload::new();
        payload.push_file(UploadedFile {
            field_name: "attachments".to_string(),
            filename: "receipt.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![1, 2, 3],
        });
        payload.push_file(UploadedFile {
            field_name: "attachments".to_string(),
            filename: "invoice.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![4, 5],
        });
        payload.push_file(UploadedFile {
            field_name: "avatar".to_string(),
            filename: "car.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![6],
        });

        let attachments = payload.files("attachments");
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].filename, "receipt.jpg");
        assert_eq!(attachments[1].filename, "invoice.pdf");
        assert_eq!(payload.file("avatar").unwrap().filename, "car.png");
    }

    #[tokio::test]
    async fn test_parse_urlencoded_submission() {
        let request = Request::builder()
            .method("POST")
            .uri("/vehicles")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(axum::body::Body::from("make=Honda&model=Civic&year=2020"))
            .unwrap();

        let payload = parse_submission(request).await.unwrap();
        assert_eq!(payload.get("make"), Some("Honda"));
        assert_eq!(payload.get("model"), Some("Civic"));
        assert_eq!(payload.get("year"), Some("2020"));
    }

    #[tokio::test]
    async fn test_parse_multipart_submission() {
        let body = concat!(
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"title\"\r\n\r\n",
            "Oil change\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"attachments\"; filename=\"receipt.txt\"\r\n",
            "Content-Type: text/plain\r\n\r\n",
            "hello\r\n",
            "--XBOUNDARY--\r\n",
        );
        let request = Request::builder()
            .method("POST")
            .uri("/vehicles/x/logs")
            .header("content-type", "multipart/form-data; boundary=XBOUNDARY")
            .body(axum::body::Body::from(body))
            .unwrap();

        let payload = parse_submission(request).await.unwrap();
        assert_eq!(payload.get("title"), Some("Oil change"));
        let files = payload.files("attachments");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].bytes, b"hello");
        assert_eq!(files[0].content_type, "text/plain");
    }

    #[tokio::test]
    async fn test_parse_multipart_oversized_part() {
        let big = "a".repeat(MAX_PART_SIZE + 1);
        let body = format!(
            "--XBOUNDARY\r\nContent-Disposition: form-data; name=\"attachments\"; filename=\"big.bin\"\r\nContent-Type: application/octet-stream\r\n\r\n{}\r\n--XBOUNDARY--\r\n",
            big
        );
        let request = Request::builder()
            .method("POST")
            .uri("/vehicles/x/logs")
            .header("content-type", "multipart/form-data; boundary=XBOUNDARY")
            .body(axum::body::Body::from(body))
            .unwrap();

        assert!(parse_submission(request).await.is_err());
    }

    #[tokio::test]
    async fn test_parse_multipart_empty_file_part_skipped() {
        let body = concat!(
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"avatar\"; filename=\"\"\r\n",
            "Content-Type: application/octet-stream\r\n\r\n",
            "\r\n",
            "--XBOUNDARY--\r\n",
        );
        let request = Request::builder()
            .method("POST")
            .uri("/vehicles")
            .header("content-type", "multipart/form-data; boundary=XBOUNDARY")
            .body(axum::body::Body::from(body))
            .unwrap();

        let payload = parse_submission(request).await.unwrap();
        assert!(payload.file("avatar").is_none());
    }
}
