//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep screens, FFI and CLI decoupled from storage details.

pub mod place_service;
