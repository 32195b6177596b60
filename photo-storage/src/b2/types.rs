use serde::{Deserialize, Serialize};

/// Response from `b2_authorize_account`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationResult {
    /// Session token for subsequent API calls
    pub authorization_token: String,
    /// Base URL for API calls
    pub api_url: String,
    /// Base URL for downloading files
    pub download_url: String,
    /// Account owning the key
    #[serde(default)]
    pub account_id: Option<String>,
    /// Restrictions attached to the key
    #[serde(default)]
    pub allowed: Option<AllowedScope>,
}

impl AuthorizationResult {
    /// Bucket the key is restricted to, if any
    #[must_use]
    pub fn scoped_bucket_id(&self) -> Option<&str> {
        self.allowed
            .as_ref()
            .and_then(|allowed| allowed.bucket_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// The `allowed` section of an authorization response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowedScope {
    /// Set when the key is restricted to a single bucket
    #[serde(default)]
    pub bucket_id: Option<String>,
    /// Name of that bucket
    #[serde(default)]
    pub bucket_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListBucketsRequest<'a> {
    pub account_id: &'a str,
    pub bucket_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListBucketsResponse {
    pub buckets: Vec<BucketInfo>,
}

/// Entry of a `b2_list_buckets` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketInfo {
    /// Bucket id
    pub bucket_id: String,
    /// Bucket name
    pub bucket_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GetUploadUrlRequest<'a> {
    pub bucket_id: &'a str,
}

/// Single-use upload URL from `b2_get_upload_url`.
///
/// Consumed by [`B2Client::upload_file`](super::B2Client::upload_file).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    /// URL to post the file to
    pub upload_url: String,
    /// Token for that URL only
    pub authorization_token: String,
}

/// Response from a file upload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Name the file was stored under
    pub file_name: String,
    /// Provider-assigned file id
    pub file_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scoped_authorization() {
        let auth: AuthorizationResult = serde_json::from_str(
            r#"{
                "accountId": "acc",
                "authorizationToken": "token",
                "apiUrl": "https://api000.backblazeb2.com",
                "downloadUrl": "https://f000.backblazeb2.com",
                "allowed": {
                    "bucketId": "bucket-1",
                    "bucketName": "lovesent-photos",
                    "capabilities": ["writeFiles"]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(auth.scoped_bucket_id(), Some("bucket-1"));
        assert_eq!(auth.account_id.as_deref(), Some("acc"));
    }

    #[test]
    fn test_parse_unscoped_authorization() {
        let auth: AuthorizationResult = serde_json::from_str(
            r#"{
                "authorizationToken": "token",
                "apiUrl": "https://api000.backblazeb2.com",
                "downloadUrl": "https://f000.backblazeb2.com",
                "allowed": { "bucketId": null, "bucketName": null }
            }"#,
        )
        .unwrap();

        assert_eq!(auth.scoped_bucket_id(), None);
        assert_eq!(auth.account_id, None);

        let auth: AuthorizationResult = serde_json::from_str(
            r#"{"authorizationToken":"t","apiUrl":"a","downloadUrl":"d"}"#,
        )
        .unwrap();
        assert!(auth.allowed.is_none());
    }

    #[test]
    fn test_request_bodies_are_camel_case() {
        let body = serde_json::to_value(ListBucketsRequest {
            account_id: "acc",
            bucket_name: "photos",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"accountId": "acc", "bucketName": "photos"}));

        let body = serde_json::to_value(GetUploadUrlRequest { bucket_id: "b" }).unwrap();
        assert_eq!(body, serde_json::json!({"bucketId": "b"}));
    }
}
