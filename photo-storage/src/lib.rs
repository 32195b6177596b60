//! Confession photo storage backed by Backblaze B2

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Backblaze B2 native API client
pub mod b2;

/// Photo upload orchestration
pub mod photo;

/// Configuration types
pub mod types;

/// Image validation
pub mod validation;
