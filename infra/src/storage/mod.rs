//! External image hosting.

pub mod cloudinary;

pub use cloudinary::CloudinaryStorage;
