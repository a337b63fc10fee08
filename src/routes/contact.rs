// SPDX-License-Identifier: MIT

//! Contact form and testimonial relay routes.
//!
//! Both handlers validate the payload first, then check configuration,
//! then talk to the email provider. A validation failure must never
//! reach the provider.

use crate::error::{AppError, Result};
use crate::services::mailer::{decode_data_uri, image_attachment, EmailMessage, SentEmail};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/send", post(send_message))
        .route("/api/send-testimonial", post(send_testimonial))
}

// ─── Contact Form ────────────────────────────────────────────

/// Contact form payload (front-end contract, camelCase).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub inquiry_type: String,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl SendMessageRequest {
    /// Names of required fields that are missing or blank.
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.subject.trim().is_empty() {
            missing.push("subject");
        }
        if self.inquiry_type.trim().is_empty() {
            missing.push("inquiryType");
        }
        if self.message.trim().is_empty() {
            missing.push("message");
        }
        missing
    }
}

#[derive(Serialize)]
pub struct SendResponse {
    pub success: bool,
    pub data: SentEmail,
}

/// Relay a contact form submission to the notification address.
async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<SendResponse>> {
    let missing = payload.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let api_key = state
        .config
        .resend_api_key
        .as_deref()
        .ok_or(AppError::Config("RESEND_API_KEY"))?;
    let to = state
        .config
        .contact_email
        .as_deref()
        .ok_or(AppError::Config("CONTACT_EMAIL"))?;

    let subject = format!("[{}] {}", payload.inquiry_type, payload.subject);
    let message = EmailMessage::new(to, subject, contact_html(&payload));

    let sent = state.mailer.send(api_key, &message).await?;

    tracing::info!(inquiry = %payload.inquiry_type, "Contact form relayed");

    Ok(Json(SendResponse {
        success: true,
        data: sent,
    }))
}

/// Render the contact form as an HTML email body.
fn contact_html(payload: &SendMessageRequest) -> String {
    let mut rows = vec![
        ("Name", payload.name.clone()),
        ("Email", payload.email.clone()),
        ("Inquiry", payload.inquiry_type.clone()),
    ];
    if let Some(phone) = &payload.phone {
        rows.push(("Phone", phone.clone()));
    }
    if let Some(company) = &payload.company {
        rows.push(("Company", company.clone()));
    }
    if let Some(availability) = &payload.availability {
        rows.push(("Availability", availability.clone()));
    }
    if let Some(website) = &payload.website {
        rows.push(("Website", website.clone()));
    }

    let mut html = String::from("<h2>New contact form submission</h2><table>");
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
            label,
            html_escape(&value)
        ));
    }
    html.push_str("</table><h3>Message</h3><p>");
    html.push_str(&html_escape(&payload.message));
    html.push_str("</p>");
    html
}

// ─── Testimonials ────────────────────────────────────────────

/// Testimonial relay payload; `image` is an optional base64 data URI.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTestimonialRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Serialize)]
pub struct SendTestimonialResponse {
    pub success: bool,
    pub message: String,
}

/// Relay a testimonial submission, attaching the image (zipped) if any.
async fn send_testimonial(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendTestimonialRequest>,
) -> Result<Json<SendTestimonialResponse>> {
    let mut missing = Vec::new();
    if payload.name.trim().is_empty() {
        missing.push("name");
    }
    if payload.message.trim().is_empty() {
        missing.push("message");
    }
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let api_key = state
        .config
        .resend_api_key
        .as_deref()
        .ok_or(AppError::Config("RESEND_API_KEY"))?;
    let to = state
        .config
        .contact_email
        .as_deref()
        .ok_or(AppError::Config("CONTACT_EMAIL"))?;

    let subject = format!("New testimonial from {}", payload.name);
    let mut message = EmailMessage::new(to, subject, testimonial_html(&payload));

    if let Some(uri) = payload.image.as_deref() {
        let image = decode_data_uri(uri)?;
        message
            .attachments
            .push(image_attachment("testimonial-image", &image)?);
    }

    state.mailer.send(api_key, &message).await?;

    tracing::info!(name = %payload.name, "Testimonial relayed");

    Ok(Json(SendTestimonialResponse {
        success: true,
        message: "Testimonial submitted. Thank you!".to_string(),
    }))
}

fn testimonial_html(payload: &SendTestimonialRequest) -> String {
    let mut html = format!(
        "<h2>New testimonial</h2><p><strong>{}</strong>",
        html_escape(&payload.name)
    );
    if let Some(role) = &payload.role {
        html.push_str(&format!(", {}", html_escape(role)));
    }
    if let Some(company) = &payload.company {
        html.push_str(&format!(" @ {}", html_escape(company)));
    }
    html.push_str("</p>");
    if let Some(rating) = payload.rating {
        html.push_str(&format!("<p>Rating: {}/5</p>", rating));
    }
    html.push_str(&format!("<p>{}</p>", html_escape(&payload.message)));
    html
}

/// Minimal HTML entity escaping for user-supplied text.
fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(inquiry_type: &str) -> SendMessageRequest {
        SendMessageRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            phone: None,
            company: None,
            inquiry_type: inquiry_type.to_string(),
            availability: None,
            website: None,
            message: "I have a project for you.".to_string(),
        }
    }

    #[test]
    fn test_missing_fields_names_each_blank_field() {
        let mut payload = request("");
        payload.email = "  ".to_string();

        let missing = payload.missing_fields();

        assert_eq!(missing, vec!["email", "inquiryType"]);
    }

    #[test]
    fn test_complete_payload_has_no_missing_fields() {
        assert!(request("freelance").missing_fields().is_empty());
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_contact_html_includes_optional_rows() {
        let mut payload = request("freelance");
        payload.phone = Some("555-0100".to_string());

        let html = contact_html(&payload);

        assert!(html.contains("Phone"));
        assert!(html.contains("555-0100"));
        assert!(html.contains("I have a project for you."));
    }
}
