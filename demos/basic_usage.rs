//! Basic usage example for the Binsta storage API
//!
//! This example demonstrates:
//! - Fetching the root folder
//! - Creating folders and files
//! - Uploading content through a signed URL
//! - Building media variant URLs
//! - Handling typed errors
//!
//! Run with: BINSTA_TOKEN=... cargo run --example basic_usage

use binsta_client::{
    BinstaClient, Config, CreateFilePayload, CreateFolderPayload, ErrorKind, ImageFormat,
    ImageQuality, ImageSize, ImageTransform, UploadBody,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let token = std::env::var("BINSTA_TOKEN").unwrap_or_else(|_| "your-token-here".to_string());
    let mut config = Config::new().with_token(token);
    if let Ok(api_url) = std::env::var("BINSTA_API_URL") {
        config = config.with_api_url(api_url);
    }
    let client = BinstaClient::new(config)?;

    // ==================== Folders ====================

    println!("Fetching root folder...");
    let root = client.folders().get_root().await?;
    println!("   root {} has {} children", root.id, root.children.len());

    println!("\nCreating folder 'photos'...");
    let photos = client
        .folders()
        .create(&CreateFolderPayload::new().with_name("photos"))
        .await?;
    println!("   created {} under {:?}", photos.id, photos.parent_id);

    // ==================== Files ====================

    println!("\nCreating file 'hello.txt' in 'photos'...");
    let file = client
        .files()
        .create(&CreateFilePayload::new().with_name("hello.txt").in_folder(&photos.id))
        .await?;

    let signed = client.files().create_signed_upload_url(&file.id).await?;
    client
        .files()
        .upload(
            &signed.signed_url,
            UploadBody::bytes("Hello, World! This is stored on Binsta.", "text/plain"),
        )
        .await?;
    println!("   uploaded to {}", signed.path);

    let file = client.files().get(&file.id).await?;
    println!(
        "   upload_complete={} size={:?}",
        file.upload_complete, file.content_size
    );

    // ==================== Variants ====================

    let url = client.files().variant_url(
        &file.id,
        &ImageTransform::new()
            .with_format(ImageFormat::Webp)
            .with_size(ImageSize::Sm)
            .with_quality(ImageQuality::Md),
    );
    println!("\nThumbnail URL: {}", url);

    // ==================== Errors ====================

    match client.files().get("does-not-exist").await {
        Ok(_) => println!("\nUnexpectedly found a file"),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => println!("\nMissing file reported as not found"),
            ErrorKind::Unauthenticated | ErrorKind::Forbidden => println!("\nAccess problem: {}", e),
            ErrorKind::Unknown => println!("\nUnexpected failure: {}", e),
        },
    }

    Ok(())
}
