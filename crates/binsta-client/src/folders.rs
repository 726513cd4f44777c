//! Folder operations

use crate::{
    files::expect_kind,
    transport::Transport,
    types::{CreateFolderPayload, FolderNode, NodeKind, Tagged, ROOT_FOLDER_ID},
    Result,
};
use tracing::instrument;

/// Folder operations, borrowed from a [`crate::BinstaClient`]
#[derive(Clone, Copy)]
pub struct Folders<'a> {
    transport: &'a Transport,
}

impl<'a> Folders<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Fetch a folder and its direct children. Pass [`ROOT_FOLDER_ID`] for the root.
    #[instrument(skip(self))]
    pub async fn get(&self, folder_id: &str) -> Result<FolderNode> {
        let tagged: Tagged<FolderNode> = self
            .transport
            .get_json(&["meta", "folders", folder_id])
            .await?;
        expect_kind(tagged, NodeKind::Folder)
    }

    /// Fetch the caller's root folder
    pub async fn get_root(&self) -> Result<FolderNode> {
        self.get(ROOT_FOLDER_ID).await
    }

    /// Create a folder, under root unless `folder_id` is set
    #[instrument(skip(self))]
    pub async fn create(&self, payload: &CreateFolderPayload) -> Result<FolderNode> {
        let tagged: Tagged<FolderNode> = self.transport.post_json(&["meta", "folders"], payload).await?;
        expect_kind(tagged, NodeKind::Folder)
    }

    /// Create an unnamed folder under root
    pub async fn create_default(&self) -> Result<FolderNode> {
        self.create(&CreateFolderPayload::default()).await
    }
}
