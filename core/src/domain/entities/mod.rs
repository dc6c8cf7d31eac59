//! Domain entities.

pub mod client;
pub mod style;
pub mod token;
pub mod user;

pub use client::{Client, Measurement};
pub use style::{Style, StyleCategory};
pub use token::{Claims, TokenPair};
pub use user::User;
