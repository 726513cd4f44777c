//! Records exchanged with the metadata API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Folder id addressing the caller's root folder
pub const ROOT_FOLDER_ID: &str = "root";

/// Wire value of a node's `type` field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// A file record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    /// Opaque file id
    pub id: String,
    pub name: Option<String>,
    pub owner_id: String,
    /// MIME type, known once an upload completed
    pub content_type: Option<String>,
    /// Size in bytes, known once an upload completed
    pub content_size: Option<u64>,
    /// Containing folder, `None` only for root
    pub parent_id: Option<String>,
    pub upload_complete: bool,
    pub created_at: DateTime<Utc>,
}

/// A folder as listed inside another folder, without its own children
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub id: String,
    pub name: Option<String>,
    pub owner_id: String,
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A folder record together with its direct children
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Opaque folder id
    pub id: String,
    pub name: Option<String>,
    pub owner_id: String,
    /// Containing folder, `None` only for root
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl FolderNode {
    /// Whether this is the account's root folder
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Files directly inside this folder
    pub fn files(&self) -> impl Iterator<Item = &FileNode> {
        self.children.iter().filter_map(|child| match child {
            Node::File(file) => Some(file),
            Node::Folder(_) => None,
        })
    }

    /// Sub-folders directly inside this folder
    pub fn folders(&self) -> impl Iterator<Item = &FolderEntry> {
        self.children.iter().filter_map(|child| match child {
            Node::Folder(folder) => Some(folder),
            Node::File(_) => None,
        })
    }
}

/// A child of a folder, tagged by its `type` field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File(FileNode),
    Folder(FolderEntry),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::File(file) => &file.id,
            Node::Folder(folder) => &folder.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::File(file) => file.name.as_deref(),
            Node::Folder(folder) => folder.name.as_deref(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Folder(_) => NodeKind::Folder,
        }
    }
}

/// Response envelope that checks the `type` field of a top level record
#[derive(Deserialize)]
pub(crate) struct Tagged<T> {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(flatten)]
    pub node: T,
}

/// One-time upload capability
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUrl {
    /// Storage path the upload will land at
    pub path: String,
    /// URL to PUT the content to
    #[serde(rename = "signedUrl")]
    pub signed_url: String,
    pub token: String,
}

/// Body of `POST /meta/files`
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateFilePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Target folder, root when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

impl CreateFilePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Create the file inside the given folder
    pub fn in_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }
}

/// Body of `POST /meta/folders`
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateFolderPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Parent folder, root when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

impl CreateFolderPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the folder name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Create the folder inside the given parent
    pub fn in_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }
}

/// Body of `POST /meta/signed-upload-urls`
#[derive(Debug, Serialize)]
pub(crate) struct SignedUploadUrlRequest<'a> {
    pub file_id: &'a str,
}
