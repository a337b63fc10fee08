// SPDX-License-Identifier: MIT

//! Testimonial repository backed by a JSON snapshot file.
//!
//! Replaces the ambient global state the original site kept testimonials
//! in: an explicit store with an `open -> read/write` lifecycle, injected
//! into handlers through `AppState`. Writes rewrite the snapshot; request
//! volume is low enough that a full rewrite per create is acceptable.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{NewTestimonial, Testimonial};
use crate::time_utils::format_utc_rfc3339;

/// Testimonial store with optional file persistence.
#[derive(Clone)]
pub struct TestimonialStore {
    inner: Arc<RwLock<Vec<Testimonial>>>,
    /// Snapshot path; None keeps the store in memory only (tests).
    path: Option<PathBuf>,
}

impl TestimonialStore {
    /// Open a store, loading the snapshot at `path` if it exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let testimonials: Vec<Testimonial> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AppError::Store(format!("Corrupt snapshot {:?}: {}", path, e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(AppError::Store(format!(
                    "Failed to read snapshot {:?}: {}",
                    path, e
                )))
            }
        };

        tracing::info!(path = ?path, count = testimonials.len(), "Testimonial store opened");

        Ok(Self {
            inner: Arc::new(RwLock::new(testimonials)),
            path: Some(path),
        })
    }

    /// Create an in-memory store for testing (no snapshot file).
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
            path: None,
        }
    }

    /// List testimonials, newest first.
    pub async fn list(&self) -> Vec<Testimonial> {
        let guard = self.inner.read().await;
        let mut testimonials = guard.clone();
        testimonials.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        testimonials
    }

    /// Add a testimonial, assigning an id and creation timestamp.
    pub async fn add(&self, new: NewTestimonial) -> Result<Testimonial, AppError> {
        let mut guard = self.inner.write().await;

        let id = guard.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let testimonial = Testimonial {
            id,
            name: new.name,
            role: new.role,
            company: new.company,
            message: new.message,
            rating: new.rating,
            created_at: format_utc_rfc3339(chrono::Utc::now()),
        };
        guard.push(testimonial.clone());

        if let Some(path) = &self.path {
            let bytes = serde_json::to_vec_pretty(&*guard)
                .map_err(|e| AppError::Store(format!("Serialize snapshot: {}", e)))?;
            tokio::fs::write(path, bytes)
                .await
                .map_err(|e| AppError::Store(format!("Write snapshot {:?}: {}", path, e)))?;
        }

        Ok(testimonial)
    }
}
