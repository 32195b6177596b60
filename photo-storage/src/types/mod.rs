mod environment;

pub use environment::{Credentials, Environment, StorageEnv, DEFAULT_API_URL, DEFAULT_BUCKET_NAME};
