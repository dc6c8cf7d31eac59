//! Repository traits defining the persistence contracts.
//!
//! Implementations live in `atelier_infra` (MySQL) and in [`memory`]
//! (in-memory, for tests and wiring the API without a database).

pub mod client;
pub mod memory;
pub mod style;
pub mod user;

pub use client::ClientRepository;
pub use style::StyleRepository;
pub use user::UserRepository;
