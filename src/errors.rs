// src/errors.rs
// DOCUMENTATION: Custom error types
// PURPOSE: Centralized error handling for both pipelines

use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: One variant per failure class across the two pipelines.
/// These flow between internal layers only: public pipeline operations log
/// them at the point of occurrence and surface success flags or partial
/// collections instead of typed faults.
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse response: {0}")]
    MalformedResponse(String),

    #[error("API error {status}: {message}")]
    ApiStatus { status: String, message: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read {path}: {detail}")]
    ReadFailed { path: String, detail: String },

    #[error("Invalid JSON in {path}: {detail}")]
    MalformedJson { path: String, detail: String },

    #[error("Unsupported data structure: {0}")]
    UnsupportedShape(String),

    #[error("Failed to write {path}: {detail}")]
    WriteFailed { path: String, detail: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
