//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Compose tag filtering and body rendering for the list view.

pub mod entry_service;
