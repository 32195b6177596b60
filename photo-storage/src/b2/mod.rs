//! Backblaze B2 native API client.
//!
//! Uploading a file takes a short handshake with the provider:
//! 1. `b2_authorize_account` exchanges the application key for a session token
//! 2. `b2_list_buckets` maps a bucket name to its id (unscoped keys only)
//! 3. `b2_get_upload_url` hands out a single-use upload URL
//! 4. the file is posted to that URL together with its SHA-1
//!
//! # Components
//! - `client`: one method per API call
//! - `error`: error types shared by every step
//! - `types`: request and response bodies
//! - `request`: shared HTTP client (internal)

mod client;
mod error;
mod request;
mod types;

pub use client::B2Client;
pub use error::{B2Step, UploadError, UploadResult};
pub use types::{AllowedScope, AuthorizationResult, BucketInfo, UploadTicket, UploadedFile};
