//! # pawtrack-common
//!
//! Shared types, configuration, error handling, and utilities used across all PawTrack crates.
//! This is the foundation layer — no business logic, just primitives and contracts.

pub mod config;
pub mod envelope;
pub mod error;
pub mod id;
pub mod models;
pub mod validation;
