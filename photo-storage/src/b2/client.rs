//! B2 native API calls

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
    Client, Response,
};
use sha1::{Digest, Sha1};
use tracing::{debug, info, instrument, warn};

use super::{
    request::http_client,
    types::{GetUploadUrlRequest, ListBucketsRequest, ListBucketsResponse},
    AuthorizationResult, B2Step, UploadError, UploadResult, UploadTicket, UploadedFile,
};

const FILE_NAME_HEADER: &str = "X-Bz-File-Name";
const CONTENT_SHA1_HEADER: &str = "X-Bz-Content-Sha1";

/// Client for the B2 native API (v2)
#[derive(Debug, Clone)]
pub struct B2Client {
    http: Client,
    authorize_base_url: String,
}

impl B2Client {
    /// Creates a client that authorizes against `authorize_base_url`
    ///
    /// # Arguments
    ///
    /// * `authorize_base_url` - Scheme and host of the authorization endpoint, e.g. `https://api.backblazeb2.com`
    #[must_use]
    pub fn new(authorize_base_url: impl Into<String>) -> Self {
        Self {
            http: http_client(),
            authorize_base_url: authorize_base_url.into(),
        }
    }

    /// Exchanges an application key for a session token
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Api` if B2 rejects the credentials
    /// Returns `UploadError::Network` if the request fails or the body cannot be parsed
    #[instrument(skip(self, app_key))]
    pub async fn authorize_account(
        &self,
        key_id: &str,
        app_key: &str,
    ) -> UploadResult<AuthorizationResult> {
        let url = format!(
            "{}/b2api/v2/b2_authorize_account",
            self.authorize_base_url
        );
        let credentials = STANDARD.encode(format!("{key_id}:{app_key}"));

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Basic {credentials}"))
            .send()
            .await?;

        let auth: AuthorizationResult = ensure_success(B2Step::Authorize, response)
            .await?
            .json()
            .await?;

        debug!(
            api_url = %auth.api_url,
            scoped_bucket = ?auth.scoped_bucket_id(),
            "Authorized B2 account"
        );

        Ok(auth)
    }

    /// Looks up the id of `bucket_name` among the buckets visible to the account
    ///
    /// # Errors
    ///
    /// Returns `UploadError::MissingAccountId` if `account_id` is `None`, before any request is made
    /// Returns `UploadError::Api` for a non-success status
    /// Returns `UploadError::BucketNotFound` if no bucket has exactly that name
    #[instrument(skip(self, auth_token))]
    pub async fn find_bucket_id(
        &self,
        api_url: &str,
        auth_token: &str,
        account_id: Option<&str>,
        bucket_name: &str,
    ) -> UploadResult<String> {
        let account_id = account_id.ok_or(UploadError::MissingAccountId)?;

        let response = self
            .http
            .post(format!("{api_url}/b2api/v2/b2_list_buckets"))
            .header(AUTHORIZATION, auth_token)
            .json(&ListBucketsRequest {
                account_id,
                bucket_name,
            })
            .send()
            .await?;

        let listing: ListBucketsResponse = ensure_success(B2Step::ListBuckets, response)
            .await?
            .json()
            .await?;

        if let Some(bucket) = listing
            .buckets
            .iter()
            .find(|bucket| bucket.bucket_name == bucket_name)
        {
            debug!(bucket_id = %bucket.bucket_id, "Resolved bucket id");
            return Ok(bucket.bucket_id.clone());
        }

        let available: Vec<String> = listing
            .buckets
            .into_iter()
            .map(|bucket| bucket.bucket_name)
            .collect();

        warn!(?available, "Configured bucket not visible to this key");

        Err(UploadError::BucketNotFound {
            bucket_name: bucket_name.to_string(),
            available,
        })
    }

    /// Requests a single-use upload URL for a bucket
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Api` for a non-success status
    /// Returns `UploadError::Network` if the request fails or the body cannot be parsed
    #[instrument(skip(self, auth_token))]
    pub async fn get_upload_url(
        &self,
        api_url: &str,
        auth_token: &str,
        bucket_id: &str,
    ) -> UploadResult<UploadTicket> {
        let response = self
            .http
            .post(format!("{api_url}/b2api/v2/b2_get_upload_url"))
            .header(AUTHORIZATION, auth_token)
            .json(&GetUploadUrlRequest { bucket_id })
            .send()
            .await?;

        let ticket: UploadTicket = ensure_success(B2Step::GetUploadUrl, response)
            .await?
            .json()
            .await?;

        debug!(upload_url = %ticket.upload_url, "Got B2 upload URL");

        Ok(ticket)
    }

    /// Uploads `data` under `file_name`, consuming the ticket
    ///
    /// The name is percent-encoded with `urlencoding`, which also escapes `!'()*`;
    /// B2 decodes either form to the same file name.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Api` for a non-success status
    /// Returns `UploadError::Network` if the request fails or the body cannot be parsed
    #[instrument(skip(self, ticket, data), fields(size = data.len()))]
    pub async fn upload_file(
        &self,
        ticket: UploadTicket,
        file_name: &str,
        data: &[u8],
        content_type: &str,
    ) -> UploadResult<UploadedFile> {
        let sha1 = content_sha1(data);

        let response = self
            .http
            .post(&ticket.upload_url)
            .header(AUTHORIZATION, &ticket.authorization_token)
            .header(FILE_NAME_HEADER, urlencoding::encode(file_name).as_ref())
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, data.len())
            .header(CONTENT_SHA1_HEADER, &sha1)
            .body(data.to_vec())
            .send()
            .await?;

        let uploaded: UploadedFile = ensure_success(B2Step::Upload, response)
            .await?
            .json()
            .await?;

        info!(
            file = %uploaded.file_name,
            file_id = %uploaded.file_id,
            "File uploaded to B2"
        );

        Ok(uploaded)
    }
}

/// Lowercase hex SHA-1 of the payload, as expected by `X-Bz-Content-Sha1`
fn content_sha1(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

/// Turns a non-success response into `UploadError::Api`
async fn ensure_success(step: B2Step, response: Response) -> UploadResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(%step, error = %e, "Failed to read B2 error body");
            String::new()
        }
    };
    warn!(%step, status = status.as_u16(), "B2 call failed");

    Err(UploadError::Api {
        step,
        status: status.as_u16(),
        body,
    })
}
