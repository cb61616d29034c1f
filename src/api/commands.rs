//! Command modules for the converter front-end
//!
//! This module organizes commands into feature-specific submodules following
//! Modern Rust idioms (no mod.rs pattern).
//!
//! ## Architecture
//!
//! - `converter`: conversion, unit catalogue and free-text parsing
//! - `settings`: read-only formatting configuration
//!
//! Every command is synchronous and returns `AppResult`, so a presentation layer can
//! bind them directly or serialise the DTOs across an IPC boundary.

pub mod converter;
pub mod settings;
