//! Photo uploads for confession pages

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::{
    b2::{B2Client, UploadResult},
    types::StorageEnv,
    validation::{validate_image, ImageFile},
};

/// Extension used when the submitted file name has none
const DEFAULT_EXTENSION: &str = "jpg";

/// Message shown to users when anything past validation goes wrong
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload photo. Please try again! 😢";

/// Outcome of [`upload_photo`], shaped for returning to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUpload {
    /// Public URL of the photo, empty on failure
    pub url: String,
    /// User-facing error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhotoUpload {
    const fn uploaded(url: String) -> Self {
        Self { url, error: None }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            url: String::new(),
            error: Some(message.into()),
        }
    }

    /// Whether the upload succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Builds the public download URL for an object
#[must_use]
pub fn public_url(download_url: &str, bucket_name: &str, key: &str) -> String {
    format!("{download_url}/file/{bucket_name}/{key}")
}

/// Storage key for a confession's photo, `confessions/{slug}/photo.{ext}`
#[must_use]
pub fn photo_key(slug: &str, file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_EXTENSION);

    format!("confessions/{slug}/photo.{extension}")
}

/// Uploads `data` to the configured B2 bucket under `key` and returns its public URL.
///
/// Every call authorizes from scratch; nothing is cached between uploads.
/// The bucket listing is skipped when the key is restricted to a single bucket.
///
/// # Errors
///
/// Returns `UploadError::NotConfigured` if credentials are missing, before any request
/// Returns `UploadError::MissingAccountId` if an unscoped key's authorization lacks an account id
/// Returns `UploadError::BucketNotFound` if the bucket name is not visible to the key
/// Returns `UploadError::Api` or `UploadError::Network` for failed remote calls
#[instrument(skip(env, data), fields(size = data.len()))]
pub async fn upload_to_backblaze(
    env: &StorageEnv,
    key: &str,
    data: &[u8],
    content_type: &str,
) -> UploadResult<String> {
    let credentials = env.credentials()?;
    let client = B2Client::new(env.api_url());

    let auth = client
        .authorize_account(&credentials.key_id, &credentials.app_key)
        .await?;

    let bucket_id = match auth.scoped_bucket_id() {
        Some(bucket_id) => bucket_id.to_string(),
        None => {
            client
                .find_bucket_id(
                    &auth.api_url,
                    &auth.authorization_token,
                    auth.account_id.as_deref(),
                    &credentials.bucket_name,
                )
                .await?
        }
    };

    let ticket = client
        .get_upload_url(&auth.api_url, &auth.authorization_token, &bucket_id)
        .await?;

    client.upload_file(ticket, key, data, content_type).await?;

    Ok(public_url(&auth.download_url, &credentials.bucket_name, key))
}

/// Validates and uploads the photo of the confession identified by `slug`.
///
/// Never fails: validation problems come back with their own message, and any
/// upload error is logged and replaced by [`UPLOAD_FAILED_MESSAGE`].
#[instrument(skip(env, file), fields(file_name = %file.name, content_type = %file.content_type))]
pub async fn upload_photo(env: &StorageEnv, file: &ImageFile, slug: &str) -> PhotoUpload {
    if let Err(rejection) = validate_image(file) {
        info!(%rejection, "Rejected photo");
        return PhotoUpload::failed(rejection.to_string());
    }

    let key = photo_key(slug, &file.name);

    match upload_to_backblaze(env, &key, &file.data, &file.content_type).await {
        Ok(url) => PhotoUpload::uploaded(url),
        Err(e) => {
            error!("Upload error: {e}");
            PhotoUpload::failed(UPLOAD_FAILED_MESSAGE)
        }
    }
}
