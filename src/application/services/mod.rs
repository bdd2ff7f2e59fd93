//! Application services

pub mod manifest;

pub use manifest::ManifestService;
