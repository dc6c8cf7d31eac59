//! Shared types, configuration and utilities used across the Atelier backend.

pub mod config;
pub mod types;
pub mod utils;
