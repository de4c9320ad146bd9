//! Error types for oustdom.
//!
//! Malformed lines and failed sources are not errors (they are filtered or
//! recorded in statistics); the variants here are the genuinely fatal
//! conditions of the CLI layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OustdomError {
    #[error("Unknown category '{requested}'. Available categories: {}", .available.join(", "))]
    UnknownCategory {
        requested: String,
        available: Vec<String>,
    },

    #[error("No categories configured")]
    NoCategories,
}
