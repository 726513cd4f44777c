//! File operations

use crate::{
    transform::{self, Transform},
    transport::Transport,
    types::{CreateFilePayload, FileNode, NodeKind, SignedUploadUrlRequest, SignedUrl, Tagged},
    upload::UploadBody,
    ClientError, Result,
};
use tracing::instrument;

/// File operations, borrowed from a [`crate::BinstaClient`]
#[derive(Clone, Copy)]
pub struct Files<'a> {
    transport: &'a Transport,
}

impl<'a> Files<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Fetch a file record
    #[instrument(skip(self))]
    pub async fn get(&self, file_id: &str) -> Result<FileNode> {
        let tagged: Tagged<FileNode> = self.transport.get_json(&["meta", "files", file_id]).await?;
        expect_kind(tagged, NodeKind::File)
    }

    /// Create a file record. Unset payload fields fall back to server defaults.
    #[instrument(skip(self))]
    pub async fn create(&self, payload: &CreateFilePayload) -> Result<FileNode> {
        let tagged: Tagged<FileNode> = self.transport.post_json(&["meta", "files"], payload).await?;
        expect_kind(tagged, NodeKind::File)
    }

    /// Create an unnamed file record in the root folder
    pub async fn create_default(&self) -> Result<FileNode> {
        self.create(&CreateFilePayload::default()).await
    }

    /// Mint a one-time URL for uploading the file's content
    #[instrument(skip(self))]
    pub async fn create_signed_upload_url(&self, file_id: &str) -> Result<SignedUrl> {
        self.transport
            .post_json(&["meta", "signed-upload-urls"], &SignedUploadUrlRequest { file_id })
            .await
    }

    /// Upload content to a signed URL.
    ///
    /// Blob bodies go out as a multipart form, bytes and streams as the raw body
    /// with explicit `content-type` and `cache-control` headers.
    #[instrument(skip(self, signed_url, body), fields(multipart = body.is_multipart()))]
    pub async fn upload(&self, signed_url: &str, body: UploadBody) -> Result<()> {
        self.transport.put_upload(signed_url, body).await
    }

    /// URL of a transformed variant of the file. No request is made.
    pub fn variant_url(&self, file_id: &str, transform: &impl Transform) -> String {
        transform::variant_url(&self.transport.config().transform_url, file_id, transform)
    }
}

pub(crate) fn expect_kind<T>(tagged: Tagged<T>, expected: NodeKind) -> Result<T> {
    if tagged.kind != expected {
        return Err(ClientError::unknown(format!(
            "expected a {:?} record, got {:?}",
            expected, tagged.kind
        )));
    }
    Ok(tagged.node)
}
