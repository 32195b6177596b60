#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use photo_storage::types::StorageEnv;
use serde_json::{json, Value};

pub const KEY_ID: &str = "keyid";
pub const APP_KEY: &str = "appkey";
/// `Basic base64("keyid:appkey")`
pub const BASIC_AUTH: &str = "Basic a2V5aWQ6YXBwa2V5";
pub const BUCKET_NAME: &str = "lovesent-photos";
pub const BUCKET_ID: &str = "4a48fe8875c6214145260818";
pub const ACCOUNT_ID: &str = "e4b2a1d6c3f9";
pub const SESSION_TOKEN: &str = "4_session_token";
pub const UPLOAD_TOKEN: &str = "4_upload_token";
pub const DOWNLOAD_URL: &str = "https://f000.example.com";

pub const AUTHORIZE_PATH: &str = "/b2api/v2/b2_authorize_account";
pub const LIST_BUCKETS_PATH: &str = "/b2api/v2/b2_list_buckets";
pub const GET_UPLOAD_URL_PATH: &str = "/b2api/v2/b2_get_upload_url";
pub const UPLOAD_PATH: &str = "/b2api/v2/b2_upload_file/4a48fe8875c6214145260818/c001";

/// Initialize tracing for tests
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Mock B2 API for a single test
pub struct TestContext {
    pub server: ServerGuard,
}

impl TestContext {
    pub async fn new() -> Self {
        setup_tracing();

        Self {
            server: Server::new_async().await,
        }
    }

    /// Storage configuration pointing at the mock server
    pub fn storage_env(&self) -> StorageEnv {
        StorageEnv {
            key_id: Some(KEY_ID.to_string()),
            app_key: Some(APP_KEY.to_string()),
            bucket_name: Some(BUCKET_NAME.to_string()),
            api_url: Some(self.server.url()),
        }
    }

    pub fn authorize_body(&self, account_id: Option<&str>, bucket_id: Option<&str>) -> Value {
        let mut body = json!({
            "authorizationToken": SESSION_TOKEN,
            "apiUrl": self.server.url(),
            "downloadUrl": DOWNLOAD_URL,
            "allowed": {
                "bucketId": bucket_id,
                "bucketName": bucket_id.map(|_| BUCKET_NAME),
                "capabilities": ["listBuckets", "writeFiles"],
            },
        });

        if let Some(account_id) = account_id {
            body["accountId"] = json!(account_id);
        }

        body
    }

    pub async fn mock_authorize(&mut self, body: &Value) -> Mock {
        self.server
            .mock("GET", AUTHORIZE_PATH)
            .match_header("authorization", BASIC_AUTH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    pub async fn mock_list_buckets(&mut self, bucket_names: &[&str]) -> Mock {
        let buckets: Vec<Value> = bucket_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let bucket_id = if *name == BUCKET_NAME {
                    BUCKET_ID.to_string()
                } else {
                    format!("bucket-{i}")
                };
                json!({ "bucketId": bucket_id, "bucketName": name, "bucketType": "allPublic" })
            })
            .collect();

        self.server
            .mock("POST", LIST_BUCKETS_PATH)
            .match_header("authorization", SESSION_TOKEN)
            .match_body(Matcher::Json(
                json!({ "accountId": ACCOUNT_ID, "bucketName": BUCKET_NAME }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "buckets": buckets }).to_string())
            .create_async()
            .await
    }

    pub async fn mock_get_upload_url(&mut self) -> Mock {
        let upload_url = format!("{}{UPLOAD_PATH}", self.server.url());

        self.server
            .mock("POST", GET_UPLOAD_URL_PATH)
            .match_header("authorization", SESSION_TOKEN)
            .match_body(Matcher::Json(json!({ "bucketId": BUCKET_ID })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "bucketId": BUCKET_ID,
                    "uploadUrl": upload_url,
                    "authorizationToken": UPLOAD_TOKEN,
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    pub async fn mock_upload(&mut self, encoded_file_name: &str, content_type: &str) -> Mock {
        self.server
            .mock("POST", UPLOAD_PATH)
            .match_header("authorization", UPLOAD_TOKEN)
            .match_header("x-bz-file-name", encoded_file_name)
            .match_header("content-type", content_type)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "fileId": "4_z4a48fe8875c6214145260818_f1",
                    "fileName": encoded_file_name,
                    "bucketId": BUCKET_ID,
                    "contentLength": 11,
                    "contentSha1": "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed",
                    "contentType": content_type,
                })
                .to_string(),
            )
            .create_async()
            .await
    }

    /// Mounts every step of a successful upload for a bucket-scoped key.
    ///
    /// The returned mocks must be kept alive for the duration of the test.
    pub async fn mock_scoped_happy_path(
        &mut self,
        encoded_file_name: &str,
        content_type: &str,
    ) -> Vec<Mock> {
        let body = self.authorize_body(Some(ACCOUNT_ID), Some(BUCKET_ID));
        vec![
            self.mock_authorize(&body).await,
            self.mock_get_upload_url().await,
            self.mock_upload(encoded_file_name, content_type).await,
        ]
    }
}
