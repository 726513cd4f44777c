//! # Binsta Client SDK
//!
//! A client SDK for the Binsta file storage API.
//!
//! ## Features
//!
//! - **Metadata**: fetch and create file and folder records
//! - **Signed uploads**: mint one-time upload URLs and push bytes, streams or blobs
//! - **Media variants**: build transform URLs for resized or re-encoded media
//! - **Typed errors**: every failure is one [`ErrorKind`] with the server's message
//!
//! ## Example
//!
//! ```rust,ignore
//! use binsta_client::{BinstaClient, Config, CreateFilePayload, UploadBody};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BinstaClient::new(Config::new().with_token("your-token"))?;
//!
//!     let root = client.folders().get_root().await?;
//!     let file = client
//!         .files()
//!         .create(&CreateFilePayload::new().with_name("hello.txt").in_folder(&root.id))
//!         .await?;
//!
//!     let url = client.files().create_signed_upload_url(&file.id).await?;
//!     client
//!         .files()
//!         .upload(&url.signed_url, UploadBody::bytes("Hello, World!", "text/plain"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod files;
mod folders;
mod transform;
mod transport;
mod types;
mod upload;

pub use client::BinstaClient;
pub use config::{Config, DEFAULT_ANON_KEY, DEFAULT_API_URL};
pub use error::{ClientError, ConfigError, ErrorKind, Result};
pub use files::Files;
pub use folders::Folders;
pub use transform::{
    variant_url, ImageFormat, ImageQuality, ImageSize, ImageTransform, Transform, UnknownOption,
    VideoFormat, VideoQuality, VideoSize, VideoTransform,
};
pub use types::*;
pub use upload::{UploadBody, UPLOAD_CACHE_SECONDS};
