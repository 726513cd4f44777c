//! Upload bodies for signed upload URLs

use crate::{ClientError, Result};
use bytes::Bytes;
use futures::TryStream;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tokio_util::io::ReaderStream;

/// Cache lifetime applied to every upload, in seconds (24 hours)
pub const UPLOAD_CACHE_SECONDS: u32 = 86_400;

/// Content to send to a signed upload URL
#[derive(Debug)]
pub enum UploadBody {
    /// In-memory bytes sent as the raw request body
    Bytes { data: Bytes, content_type: String },
    /// A byte stream sent as the raw request body
    Stream {
        body: reqwest::Body,
        content_type: String,
    },
    /// A blob-like object sent as a multipart form
    Blob {
        data: Bytes,
        file_name: Option<String>,
        content_type: Option<String>,
    },
}

/// What goes on the wire for a given body
pub(crate) enum Payload {
    Raw {
        body: reqwest::Body,
        content_type: String,
        cache_control: String,
    },
    Multipart(Form),
}

impl UploadBody {
    /// Raw bytes with an explicit content type
    pub fn bytes(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self::Bytes {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    /// A stream of byte chunks with an explicit content type
    pub fn stream<S>(stream: S, content_type: impl Into<String>) -> Self
    where
        S: TryStream + Send + 'static,
        S::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
        Bytes: From<S::Ok>,
    {
        Self::Stream {
            body: reqwest::Body::wrap_stream(stream),
            content_type: content_type.into(),
        }
    }

    /// Blob-like content, uploaded as a multipart form
    pub fn blob(data: impl Into<Bytes>) -> Self {
        Self::Blob {
            data: data.into(),
            file_name: None,
            content_type: None,
        }
    }

    /// Set the file name of a blob part. No effect on other bodies.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        if let Self::Blob { file_name, .. } = &mut self {
            *file_name = Some(name.into());
        }
        self
    }

    /// Override the content type
    pub fn with_content_type(mut self, ct: impl Into<String>) -> Self {
        match &mut self {
            Self::Bytes { content_type, .. } | Self::Stream { content_type, .. } => {
                *content_type = ct.into();
            }
            Self::Blob { content_type, .. } => *content_type = Some(ct.into()),
        }
        self
    }

    /// Stream a file from disk, guessing its content type from the extension
    pub async fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await?;
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self::stream(ReaderStream::new(file), content_type))
    }

    /// Content type that will be declared for this body
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Bytes { content_type, .. } | Self::Stream { content_type, .. } => {
                Some(content_type)
            }
            Self::Blob { content_type, .. } => content_type.as_deref(),
        }
    }

    /// Whether this body goes out as a multipart form
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Blob { .. })
    }

    pub(crate) fn into_payload(self) -> Result<Payload> {
        match self {
            Self::Bytes { data, content_type } => Ok(Payload::Raw {
                body: reqwest::Body::from(data),
                content_type,
                cache_control: format!("max-age={}", UPLOAD_CACHE_SECONDS),
            }),
            Self::Stream { body, content_type } => Ok(Payload::Raw {
                body,
                content_type,
                cache_control: format!("max-age={}", UPLOAD_CACHE_SECONDS),
            }),
            Self::Blob {
                data,
                file_name,
                content_type,
            } => {
                let mut part = Part::bytes(data.to_vec());
                if let Some(name) = file_name {
                    part = part.file_name(name);
                }
                if let Some(ct) = content_type {
                    part = part.mime_str(&ct).map_err(|_| {
                        ClientError::unknown(format!("invalid blob content type '{}'", ct))
                    })?;
                }

                let form = Form::new()
                    .text("cacheControl", UPLOAD_CACHE_SECONDS.to_string())
                    .part("", part);
                Ok(Payload::Multipart(form))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_raw_bodies_carry_cache_control() {
        let body = UploadBody::bytes(&b"png bytes"[..], "image/png");
        assert!(!body.is_multipart());

        match body.into_payload().unwrap() {
            Payload::Raw {
                content_type,
                cache_control,
                ..
            } => {
                assert_eq!(content_type, "image/png");
                assert_eq!(cache_control, "max-age=86400");
            }
            Payload::Multipart(_) => panic!("expected raw payload"),
        }
    }

    #[test]
    fn test_blob_becomes_multipart() {
        let body = UploadBody::blob(&b"data"[..])
            .with_file_name("photo.png")
            .with_content_type("image/png");
        assert!(body.is_multipart());
        assert_eq!(body.content_type(), Some("image/png"));
        assert!(matches!(body.into_payload().unwrap(), Payload::Multipart(_)));
    }

    #[test]
    fn test_invalid_blob_content_type() {
        let err = UploadBody::blob(&b"data"[..])
            .with_content_type("not a mime")
            .into_payload()
            .err()
            .unwrap();
        assert_eq!(err.kind(), crate::ErrorKind::Unknown);
    }

    #[test]
    fn test_stream_accepts_send_only_streams() {
        use futures::stream::{self, BoxStream, StreamExt};

        let chunks: BoxStream<'static, std::io::Result<Bytes>> = stream::iter(vec![
            Ok(Bytes::from_static(b"first ")),
            Ok(Bytes::from_static(b"second")),
        ])
        .boxed();

        let body = UploadBody::stream(chunks, "text/plain");
        assert_eq!(body.content_type(), Some("text/plain"));
        assert!(matches!(body.into_payload().unwrap(), Payload::Raw { .. }));
    }

    #[test]
    fn test_file_name_ignored_for_raw_bodies() {
        let body = UploadBody::bytes(&b"x"[..], "text/plain").with_file_name("x.txt");
        assert!(matches!(body, UploadBody::Bytes { .. }));
    }

    #[tokio::test]
    async fn test_from_file_guesses_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not really a png").unwrap();

        let body = UploadBody::from_file(&path).await.unwrap();
        assert!(matches!(body, UploadBody::Stream { .. }));
        assert_eq!(body.content_type(), Some("image/png"));

        let missing = UploadBody::from_file(dir.path().join("missing.bin")).await;
        assert!(missing.is_err());
    }
}
