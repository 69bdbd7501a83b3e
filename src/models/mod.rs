pub mod paper;
pub mod presentation;

pub use paper::*;
pub use presentation::*;

/// Opaque identifier for a new entity.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
