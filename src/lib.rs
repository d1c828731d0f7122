// src/lib.rs
// DOCUMENTATION: Library root
// PURPOSE: Expose configuration, errors, models and services to the binaries

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
