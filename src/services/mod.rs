// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod excel_exporter;
pub mod google_places_client;
pub mod json_loader;
pub mod table_merger;

pub use excel_exporter::*;
pub use google_places_client::*;
pub use json_loader::*;
pub use table_merger::*;
