//! HTTP API layer for the Atelier backend.
//!
//! Exposes the actix-web application factory plus the DTOs, middleware and
//! error normalization it is built from. The binary in `main.rs` wires the
//! MySQL, Cloudinary and Google implementations in; integration tests wire
//! in-memory doubles instead.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
