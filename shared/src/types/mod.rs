//! Common wire-level types.

pub mod response;

pub use response::{ErrorBody, FieldError};
