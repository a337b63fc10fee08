// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod streak;
pub mod testimonial;

pub use streak::{StreakResult, SubmissionCalendar};
pub use testimonial::{NewTestimonial, Testimonial};
