//! Error types for B2 operations

use strum::Display;
use thiserror::Error;

/// Result type for B2 operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Remote call that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum B2Step {
    /// `b2_authorize_account`
    #[strum(serialize = "auth")]
    Authorize,
    /// `b2_list_buckets`
    #[strum(serialize = "list buckets")]
    ListBuckets,
    /// `b2_get_upload_url`
    #[strum(serialize = "get upload URL")]
    GetUploadUrl,
    /// Posting the file to its upload URL
    #[strum(serialize = "upload")]
    Upload,
}

/// Errors that can occur while uploading to B2
#[derive(Error, Debug)]
pub enum UploadError {
    /// Key id or application key not set
    #[error("Backblaze B2 credentials not configured")]
    NotConfigured,

    /// Non-success HTTP status from one of the API calls
    #[error("B2 {step} failed: {status} {body}")]
    Api {
        /// Call that failed
        step: B2Step,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Authorization returned neither a bucket restriction nor an account id
    #[error("B2 auth response missing accountId")]
    MissingAccountId,

    /// No bucket with the configured name is visible to the key
    #[error(
        "B2 bucket '{bucket_name}' not found. Available buckets: {}",
        .available.join(", ")
    )]
    BucketNotFound {
        /// Requested bucket name
        bucket_name: String,
        /// Names of every bucket returned by the listing
        available: Vec<String>,
    },

    /// Transport failure or undecodable response body
    #[error("B2 request error: {0}")]
    Network(#[from] reqwest::Error),
}
