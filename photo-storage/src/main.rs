use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use photo_storage::{
    photo::upload_photo,
    types::{Environment, StorageEnv},
    validation::ImageFile,
};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

/// Upload a confession photo to Backblaze B2
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Slug of the confession the photo belongs to
    #[arg(long)]
    slug: String,

    /// Declared content type, derived from the file extension when omitted
    #[arg(long)]
    content_type: Option<String>,

    /// Image to upload
    path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let environment = Environment::from_env();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // JSON for staging/production, regular format for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let data = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let name = args
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content_type = args
        .content_type
        .unwrap_or_else(|| content_type_for(&args.path).to_string());

    let file = ImageFile::new(name, content_type, data);
    let outcome = upload_photo(&StorageEnv::from_env(), &file, &args.slug).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if !outcome.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

/// Content type implied by the file extension
fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
