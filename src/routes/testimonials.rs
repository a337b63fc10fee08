// SPDX-License-Identifier: MIT

//! Testimonial repository routes (thin pass-through to the store).

use crate::error::{AppError, Result};
use crate::models::{NewTestimonial, Testimonial};
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/testimonials",
        get(list_testimonials).post(create_testimonial),
    )
}

/// List stored testimonials, newest first.
async fn list_testimonials(State(state): State<Arc<AppState>>) -> Json<Vec<Testimonial>> {
    Json(state.store.list().await)
}

/// Store a new testimonial.
async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewTestimonial>,
) -> Result<Json<Testimonial>> {
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

    if let Some(rating) = payload.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError::BadRequest(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
    }

    let testimonial = state.store.add(payload).await?;
    Ok(Json(testimonial))
}
