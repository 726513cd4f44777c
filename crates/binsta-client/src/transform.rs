//! Media transform options and variant URL construction
//!
//! The service derives resized or re-encoded media from a stored file when a
//! variant URL is requested. Building the URL is purely local.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// All accepted values, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Query string value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(UnknownOption {
                        option: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

/// A string did not match any value of a transform option
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {option}")]
pub struct UnknownOption {
    pub option: &'static str,
    pub value: String,
}

wire_enum!(
    /// Output format for image variants
    ImageFormat { Jpg => "jpg", Webp => "webp" }
);

wire_enum!(
    /// Bounding size for image variants
    ImageSize {
        Xxs => "2xs",
        Xs => "xs",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
        Xxl => "2xl",
        Original => "original",
    }
);

wire_enum!(
    /// Encoding quality for image variants
    ImageQuality { Lo => "lo", Md => "md", Hi => "hi", Best => "best" }
);

wire_enum!(
    /// Output container for video variants
    VideoFormat { Mp4 => "mp4", Webm => "webm" }
);

wire_enum!(
    /// Bounding size for video variants
    VideoSize {
        Xs => "xs",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
        Original => "original",
    }
);

wire_enum!(
    /// Encoding quality for video variants
    VideoQuality { Lo => "lo", Md => "md", Hi => "hi", Best => "best" }
);

/// Options shared by image and video transforms.
///
/// Each accessor returns the query value, or `None` for the server default.
pub trait Transform {
    fn format(&self) -> Option<&'static str>;
    fn size(&self) -> Option<&'static str>;
    fn quality(&self) -> Option<&'static str>;
}

/// Image variant options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTransform {
    pub format: Option<ImageFormat>,
    pub size: Option<ImageSize>,
    pub quality: Option<ImageQuality>,
}

impl ImageTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = Some(quality);
        self
    }
}

impl Transform for ImageTransform {
    fn format(&self) -> Option<&'static str> {
        self.format.map(|v| v.as_str())
    }

    fn size(&self) -> Option<&'static str> {
        self.size.map(|v| v.as_str())
    }

    fn quality(&self) -> Option<&'static str> {
        self.quality.map(|v| v.as_str())
    }
}

/// Video variant options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoTransform {
    pub format: Option<VideoFormat>,
    pub size: Option<VideoSize>,
    pub quality: Option<VideoQuality>,
}

impl VideoTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: VideoFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_size(mut self, size: VideoSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_quality(mut self, quality: VideoQuality) -> Self {
        self.quality = Some(quality);
        self
    }
}

impl Transform for VideoTransform {
    fn format(&self) -> Option<&'static str> {
        self.format.map(|v| v.as_str())
    }

    fn size(&self) -> Option<&'static str> {
        self.size.map(|v| v.as_str())
    }

    fn quality(&self) -> Option<&'static str> {
        self.quality.map(|v| v.as_str())
    }
}

/// Build `{base}/files/{file_id}/transform?{query}`.
///
/// Parameters always appear as format, size, quality; the remote URL parser
/// depends on this order. Unset options are left out, and so is the `?` when
/// nothing is set.
pub fn variant_url(base: &str, file_id: &str, transform: &impl Transform) -> String {
    let query = [
        ("format", transform.format()),
        ("size", transform.size()),
        ("quality", transform.quality()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, v)))
    .collect::<Vec<_>>()
    .join("&");

    let mut url = format!("{}/files/{}/transform", base.trim_end_matches('/'), file_id);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://binsta.dev/api/v1";

    #[test]
    fn test_image_variant_urls() {
        let url = variant_url(BASE, "dLedqBPG7b", &ImageTransform::new().with_format(ImageFormat::Jpg));
        assert_eq!(url, "https://binsta.dev/api/v1/files/dLedqBPG7b/transform?format=jpg");

        let url = variant_url(
            BASE,
            "dLedqBPG7b",
            &ImageTransform::new()
                .with_format(ImageFormat::Jpg)
                .with_quality(ImageQuality::Hi),
        );
        assert_eq!(url, "https://binsta.dev/api/v1/files/dLedqBPG7b/transform?format=jpg&quality=hi");

        // Builder call order does not affect parameter order
        let url = variant_url(
            BASE,
            "dLedqBPG7b",
            &ImageTransform::new()
                .with_quality(ImageQuality::Hi)
                .with_format(ImageFormat::Jpg)
                .with_size(ImageSize::Md),
        );
        assert_eq!(
            url,
            "https://binsta.dev/api/v1/files/dLedqBPG7b/transform?format=jpg&size=md&quality=hi"
        );
    }

    #[test]
    fn test_video_variant_urls() {
        let url = variant_url(BASE, "dLedqBPG7b", &VideoTransform::new().with_format(VideoFormat::Mp4));
        assert_eq!(url, "https://binsta.dev/api/v1/files/dLedqBPG7b/transform?format=mp4");

        let url = variant_url(
            BASE,
            "dLedqBPG7b",
            &VideoTransform::new()
                .with_format(VideoFormat::Mp4)
                .with_quality(VideoQuality::Hi),
        );
        assert_eq!(url, "https://binsta.dev/api/v1/files/dLedqBPG7b/transform?format=mp4&quality=hi");

        let url = variant_url(
            BASE,
            "dLedqBPG7b",
            &VideoTransform {
                format: Some(VideoFormat::Mp4),
                size: Some(VideoSize::Md),
                quality: Some(VideoQuality::Hi),
            },
        );
        assert_eq!(
            url,
            "https://binsta.dev/api/v1/files/dLedqBPG7b/transform?format=mp4&size=md&quality=hi"
        );
    }

    #[test]
    fn test_skipped_options_leave_no_separators() {
        let url = variant_url(BASE, "abc", &ImageTransform::new().with_size(ImageSize::Xxl));
        assert_eq!(url, "https://binsta.dev/api/v1/files/abc/transform?size=2xl");

        let url = variant_url(BASE, "abc", &ImageTransform::new().with_quality(ImageQuality::Best));
        assert_eq!(url, "https://binsta.dev/api/v1/files/abc/transform?quality=best");

        let url = variant_url(BASE, "abc", &VideoTransform::new());
        assert_eq!(url, "https://binsta.dev/api/v1/files/abc/transform");
    }

    #[test]
    fn test_trailing_slash_on_base() {
        let url = variant_url("http://localhost:3000/api/v1/", "abc", &ImageTransform::new().with_format(ImageFormat::Webp));
        assert_eq!(url, "http://localhost:3000/api/v1/files/abc/transform?format=webp");
    }

    #[test]
    fn test_parse_option_values() {
        assert_eq!("2xs".parse::<ImageSize>().unwrap(), ImageSize::Xxs);
        assert_eq!("webm".parse::<VideoFormat>().unwrap(), VideoFormat::Webm);
        assert!("2xl".parse::<VideoSize>().is_err());

        let err = "gif".parse::<ImageFormat>().unwrap_err();
        assert_eq!(err.to_string(), "'gif' is not a valid ImageFormat");
    }

    #[test]
    fn test_serde_uses_wire_values() {
        let transform = ImageTransform::new().with_size(ImageSize::Xxs);
        let value = serde_json::to_value(transform).unwrap();
        assert_eq!(value["size"], "2xs");
        assert_eq!(ImageSize::ALL.len(), 8);
        assert_eq!(VideoSize::ALL.len(), 6);
    }
}
