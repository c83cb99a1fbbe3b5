//! In-memory reference image attachments.
//!
//! Attachments are validated on entry by sniffing the byte header, so
//! everything past this module can trust the format. Only the formats the
//! storage bucket serves publicly are accepted.

use std::fmt;

use image::ImageFormat;

use crate::error::CoreError;

/// Largest accepted reference image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Image kind
// ---------------------------------------------------------------------------

/// Accepted reference image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    WebP,
}

impl ImageKind {
    /// Sniff the format from the byte header.
    fn sniff(bytes: &[u8]) -> Result<Self, CoreError> {
        let format = image::guess_format(bytes).map_err(|_| {
            CoreError::Validation(
                "Unrecognized image data. Only PNG, JPEG and WebP reference images are accepted"
                    .to_string(),
            )
        })?;
        match format {
            ImageFormat::Png => Ok(Self::Png),
            ImageFormat::Jpeg => Ok(Self::Jpeg),
            ImageFormat::WebP => Ok(Self::WebP),
            other => Err(CoreError::Validation(format!(
                "Unsupported image format {other:?}. Only PNG, JPEG and WebP are accepted"
            ))),
        }
    }

    /// Canonical content type for the format.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// File extension used when naming stored objects.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }
}

// ---------------------------------------------------------------------------
// Attachment
// ---------------------------------------------------------------------------

/// A reference image held in the draft until submission uploads it.
///
/// The file name is display metadata only; stored objects are named by the
/// store from the sniffed extension.
#[derive(Clone)]
pub struct ImageAttachment {
    file_name: String,
    kind: ImageKind,
    bytes: Vec<u8>,
}

impl ImageAttachment {
    /// Build an attachment from raw upload bytes.
    ///
    /// Rejects payloads whose header is not a supported image format and
    /// payloads over [`MAX_IMAGE_BYTES`].
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, CoreError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(CoreError::Validation(format!(
                "Image is too large ({} bytes). The limit is {MAX_IMAGE_BYTES} bytes",
                bytes.len()
            )));
        }
        let kind = ImageKind::sniff(&bytes)?;
        Ok(Self {
            file_name: file_name.into(),
            kind,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// Canonical content type derived from the sniffed format, not from
    /// whatever the client declared.
    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }

    pub fn extension(&self) -> &'static str {
        self.kind.extension()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("kind", &self.kind)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// PNG byte header, enough for the sniffer. Shared by tests across the crate.
#[cfg(test)]
pub(crate) const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Smallest attachment that passes sniffing, for tests.
#[cfg(test)]
pub(crate) fn test_png(name: &str) -> ImageAttachment {
    ImageAttachment::from_bytes(name, PNG_HEADER.to_vec()).unwrap()
}
