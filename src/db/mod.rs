//! Persistence layer (testimonial store).

pub mod testimonials;

pub use testimonials::TestimonialStore;
