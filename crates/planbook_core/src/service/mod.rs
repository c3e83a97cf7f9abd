//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate schema, storage and store calls into use-case level APIs.
//! - Keep UI layers decoupled from validation and storage details.

pub mod import_service;
