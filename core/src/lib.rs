//! Core domain layer for the Atelier backend.
//!
//! Holds the entities, error taxonomy, repository contracts and the
//! services that orchestrate authentication, client records, style records
//! and admin queries. Persistence and external services (MySQL, Cloudinary,
//! Google OAuth) live behind traits implemented in the `atelier_infra`
//! crate.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
