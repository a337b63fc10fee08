// SPDX-License-Identifier: MIT

//! Email relay over a Resend-style HTTP API.
//!
//! This service only constructs payloads and forwards them; delivery is
//! the provider's problem. Attachments are carried base64-encoded in the
//! JSON body, and testimonial images are repackaged into a small zip
//! archive before attaching.

use std::io::{Cursor, Write};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_FROM: &str = "Portfolio <onboarding@resend.dev>";

/// Outgoing email message.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<EmailAttachment>,
}

impl EmailMessage {
    pub fn new(to: &str, subject: String, html: String) -> Self {
        Self {
            from: DEFAULT_FROM.to_string(),
            to: vec![to.to_string()],
            subject,
            html,
            attachments: Vec::new(),
        }
    }
}

/// Attachment with base64-encoded content.
#[derive(Debug, Clone, Serialize)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: String,
}

/// Provider acknowledgement for a sent message.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SentEmail {
    #[serde(default)]
    pub id: String,
}

/// Email relay client.
#[derive(Clone)]
pub struct MailerService {
    http: reqwest::Client,
    base_url: String,
}

impl MailerService {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://api.resend.com".to_string(),
        }
    }

    /// Override the provider endpoint (tests).
    pub fn with_base_url(base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base.to_string(),
        }
    }

    /// Relay a message through the provider.
    pub async fn send(&self, api_key: &str, message: &EmailMessage) -> Result<SentEmail, AppError> {
        let url = format!("{}/emails", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| AppError::Mail(format!("Email relay request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Mail(format!("Email relay HTTP {}: {}", status, body)));
        }

        let sent: SentEmail = response
            .json()
            .await
            .map_err(|e| AppError::Mail(format!("Email relay response parse error: {}", e)))?;

        tracing::info!(id = %sent.id, "Email relayed");
        Ok(sent)
    }
}

impl Default for MailerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Image bytes decoded from a base64 data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// File extension derived from the mime subtype ("png", "jpeg", ...)
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// Decode a `data:<mime>;base64,<payload>` URI.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, AppError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| AppError::BadRequest("Image must be a data URI".to_string()))?;

    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::BadRequest("Image data URI must be base64-encoded".to_string()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid base64 image data: {}", e)))?;

    // "image/svg+xml" -> "svg"
    let extension = mime
        .rsplit('/')
        .next()
        .unwrap_or("bin")
        .split('+')
        .next()
        .unwrap_or("bin")
        .to_string();

    Ok(DecodedImage { extension, bytes })
}

/// Package a single file into an in-memory zip archive.
pub fn zip_bytes(filename: &str, bytes: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    writer
        .start_file(filename, options)
        .map_err(|e| AppError::Mail(format!("Zip entry error: {}", e)))?;
    writer
        .write_all(bytes)
        .map_err(|e| AppError::Mail(format!("Zip write error: {}", e)))?;

    let cursor = writer
        .finish()
        .map_err(|e| AppError::Mail(format!("Zip finalize error: {}", e)))?;

    Ok(cursor.into_inner())
}

/// Build a zip attachment from a decoded testimonial image.
pub fn image_attachment(name_hint: &str, image: &DecodedImage) -> Result<EmailAttachment, AppError> {
    let entry_name = format!("{}.{}", name_hint, image.extension);
    let archive = zip_bytes(&entry_name, &image.bytes)?;

    Ok(EmailAttachment {
        filename: format!("{}.zip", name_hint),
        content: STANDARD.encode(archive),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_uri() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(b"fake-png"));

        let image = decode_data_uri(&uri).unwrap();

        assert_eq!(image.extension, "png");
        assert_eq!(image.bytes, b"fake-png");
    }

    #[test]
    fn test_decode_data_uri_strips_mime_suffix() {
        let uri = format!("data:image/svg+xml;base64,{}", STANDARD.encode(b"<svg/>"));

        let image = decode_data_uri(&uri).unwrap();

        assert_eq!(image.extension, "svg");
    }

    #[test]
    fn test_decode_rejects_non_data_uri() {
        let err = decode_data_uri("https://example.com/image.png").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_decode_rejects_missing_base64_marker() {
        let err = decode_data_uri("data:image/png,rawdata").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_zip_bytes_produces_archive() {
        let archive = zip_bytes("photo.png", b"fake-png").unwrap();

        // Local file header magic
        assert_eq!(&archive[..2], b"PK");
        assert!(archive.len() > 8);
    }

    #[test]
    fn test_image_attachment_names() {
        let image = DecodedImage {
            extension: "png".to_string(),
            bytes: b"fake".to_vec(),
        };

        let attachment = image_attachment("testimonial-image", &image).unwrap();

        assert_eq!(attachment.filename, "testimonial-image.zip");
        assert!(!attachment.content.is_empty());
    }
}
