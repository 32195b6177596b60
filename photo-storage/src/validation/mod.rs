//! Declared-type and size checks for user-submitted images

use thiserror::Error;

/// Largest accepted image, 5 MiB
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// `image/webp` has no constant in the `mime` crate
const IMAGE_WEBP: &str = "image/webp";

/// Whether a declared content type is one of the accepted image types
#[must_use]
pub fn is_allowed_content_type(content_type: &str) -> bool {
    [mime::IMAGE_JPEG, mime::IMAGE_PNG, mime::IMAGE_GIF]
        .iter()
        .any(|allowed| allowed.essence_str() == content_type)
        || content_type == IMAGE_WEBP
}

/// A file submitted by a user, held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name, including extension
    pub name: String,
    /// Content type as declared by the client
    pub content_type: String,
    /// Raw file content
    pub data: Vec<u8>,
}

impl ImageFile {
    /// Creates a new in-memory file
    #[must_use]
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Size of the file in bytes
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Reasons an image is rejected before upload
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageValidationError {
    /// Declared content type is not one of the accepted image types
    #[error("Only JPEG, PNG, GIF, and WebP images are allowed 📸")]
    UnsupportedType,

    /// File is larger than [`MAX_IMAGE_SIZE`]
    #[error("Image must be smaller than 5MB 💕")]
    TooLarge,
}

/// Checks a declared content type and byte size.
///
/// The type is trusted as declared; no content sniffing happens here.
///
/// # Errors
///
/// Returns `ImageValidationError::UnsupportedType` for any type outside JPEG, PNG, GIF and WebP.
/// Returns `ImageValidationError::TooLarge` when `size` exceeds [`MAX_IMAGE_SIZE`].
pub fn check_image(content_type: &str, size: u64) -> Result<(), ImageValidationError> {
    if !is_allowed_content_type(content_type) {
        return Err(ImageValidationError::UnsupportedType);
    }

    if size > MAX_IMAGE_SIZE {
        return Err(ImageValidationError::TooLarge);
    }

    Ok(())
}

/// Validates a submitted file before it is uploaded
///
/// # Errors
///
/// See [`check_image`].
pub fn validate_image(file: &ImageFile) -> Result<(), ImageValidationError> {
    check_image(&file.content_type, file.size())
}
