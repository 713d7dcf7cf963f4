//! HTTP handlers.

mod health;
mod image;
mod status;

pub use health::health_handler;
pub use image::{image_handler, outcome_response, status_for};
pub use status::status_handler;
