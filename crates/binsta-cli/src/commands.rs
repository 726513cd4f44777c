//! Subcommands

use anyhow::Context;
use binsta_client::{
    BinstaClient, CreateFilePayload, CreateFolderPayload, ImageTransform, UploadBody,
    VideoTransform, ROOT_FOLDER_ID,
};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Folder operations
    #[command(subcommand)]
    Folder(FolderCommand),

    /// File operations
    #[command(subcommand)]
    File(FileCommand),
}

#[derive(Subcommand, Debug)]
pub enum FolderCommand {
    /// Show a folder and its children
    Get {
        /// Folder id
        #[arg(default_value = ROOT_FOLDER_ID)]
        id: String,
    },

    /// Create a folder
    Create {
        #[arg(long)]
        name: Option<String>,

        /// Parent folder id (root when omitted)
        #[arg(long)]
        parent: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FileCommand {
    /// Show a file record
    Get { id: String },

    /// Create an empty file record
    Create {
        #[arg(long)]
        name: Option<String>,

        /// Containing folder id (root when omitted)
        #[arg(long)]
        folder: Option<String>,
    },

    /// Create a file record and upload a local file into it
    Upload {
        path: PathBuf,

        /// Name of the record, defaults to the local file name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        folder: Option<String>,

        /// Override the content type guessed from the extension
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Print the URL of a transformed variant
    VariantUrl(VariantArgs),
}

#[derive(Args, Debug)]
pub struct VariantArgs {
    pub id: String,

    /// Use video options instead of image options
    #[arg(long)]
    pub video: bool,

    #[arg(long)]
    pub format: Option<String>,

    #[arg(long)]
    pub size: Option<String>,

    #[arg(long)]
    pub quality: Option<String>,
}

/// Run a command and return what should be printed
pub async fn run(client: &BinstaClient, command: Command) -> anyhow::Result<String> {
    match command {
        Command::Folder(FolderCommand::Get { id }) => {
            let folder = client
                .folders()
                .get(&id)
                .await
                .with_context(|| format!("fetching folder {}", id))?;
            to_json(&folder)
        }
        Command::Folder(FolderCommand::Create { name, parent }) => {
            let payload = CreateFolderPayload {
                name,
                folder_id: parent,
            };
            let folder = client
                .folders()
                .create(&payload)
                .await
                .context("creating folder")?;
            info!("Created folder {}", folder.id);
            to_json(&folder)
        }
        Command::File(FileCommand::Get { id }) => {
            let file = client
                .files()
                .get(&id)
                .await
                .with_context(|| format!("fetching file {}", id))?;
            to_json(&file)
        }
        Command::File(FileCommand::Create { name, folder }) => {
            let payload = CreateFilePayload {
                name,
                folder_id: folder,
            };
            let file = client.files().create(&payload).await.context("creating file")?;
            info!("Created file {}", file.id);
            to_json(&file)
        }
        Command::File(FileCommand::Upload {
            path,
            name,
            folder,
            content_type,
        }) => {
            let mut body = UploadBody::from_file(&path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            if let Some(ct) = content_type {
                body = body.with_content_type(ct);
            }

            let name = name.or_else(|| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            });
            let files = client.files();
            let file = files
                .create(&CreateFilePayload {
                    name,
                    folder_id: folder,
                })
                .await
                .context("creating file record")?;

            let signed = files
                .create_signed_upload_url(&file.id)
                .await
                .context("requesting upload URL")?;
            files
                .upload(&signed.signed_url, body)
                .await
                .with_context(|| format!("uploading {}", path.display()))?;
            info!("Uploaded {} as {}", path.display(), file.id);

            let file = files.get(&file.id).await.context("fetching uploaded file")?;
            to_json(&file)
        }
        Command::File(FileCommand::VariantUrl(args)) => variant_url(client, &args),
    }
}

fn variant_url(client: &BinstaClient, args: &VariantArgs) -> anyhow::Result<String> {
    let files = client.files();
    if args.video {
        let transform = VideoTransform {
            format: args.format.as_deref().map(str::parse).transpose()?,
            size: args.size.as_deref().map(str::parse).transpose()?,
            quality: args.quality.as_deref().map(str::parse).transpose()?,
        };
        Ok(files.variant_url(&args.id, &transform))
    } else {
        let transform = ImageTransform {
            format: args.format.as_deref().map(str::parse).transpose()?,
            size: args.size.as_deref().map(str::parse).transpose()?,
            quality: args.quality.as_deref().map(str::parse).transpose()?,
        };
        Ok(files.variant_url(&args.id, &transform))
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(video: bool, format: Option<&str>, size: Option<&str>, quality: Option<&str>) -> VariantArgs {
        VariantArgs {
            id: "dLedqBPG7b".to_string(),
            video,
            format: format.map(String::from),
            size: size.map(String::from),
            quality: quality.map(String::from),
        }
    }

    #[test]
    fn test_variant_url_command() {
        let client = BinstaClient::anonymous().unwrap();

        let url = variant_url(&client, &args(false, Some("jpg"), Some("md"), Some("hi"))).unwrap();
        assert_eq!(
            url,
            "https://binsta.dev/api/v1/files/dLedqBPG7b/transform?format=jpg&size=md&quality=hi"
        );

        let url = variant_url(&client, &args(true, Some("mp4"), None, Some("hi"))).unwrap();
        assert_eq!(url, "https://binsta.dev/api/v1/files/dLedqBPG7b/transform?format=mp4&quality=hi");
    }

    #[test]
    fn test_variant_url_rejects_image_values_for_video() {
        let client = BinstaClient::anonymous().unwrap();
        let err = variant_url(&client, &args(true, Some("jpg"), None, None)).unwrap_err();
        assert!(err.to_string().contains("not a valid VideoFormat"));

        assert!(variant_url(&client, &args(true, None, Some("2xs"), None)).is_err());
    }
}
