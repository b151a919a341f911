use thiserror::Error;

pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

pub const ACCEPTED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/webp",
];

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum UploadError {
    #[error("Unsupported file type \"{0}\". Use JPEG, PNG, GIF, BMP, or WebP.")]
    UnsupportedType(String),
    #[error("Image is {0} bytes; the limit is 10 MB.")]
    TooLarge(u64),
}

/// Gate applied before an image is retained for analysis. The backend
/// re-checks the content type; the size cap is enforced only here.
pub fn validate_image_upload(content_type: &str, size: u64) -> Result<(), UploadError> {
    if !ACCEPTED_IMAGE_TYPES.contains(&content_type) {
        return Err(UploadError::UnsupportedType(content_type.to_owned()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge(size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_listed_type_at_the_size_limit() {
        for content_type in ACCEPTED_IMAGE_TYPES {
            assert_eq!(validate_image_upload(content_type, MAX_IMAGE_BYTES), Ok(()));
        }
    }

    #[test]
    fn rejects_unlisted_types() {
        let err = validate_image_upload("image/tiff", 1024).unwrap_err();
        assert_eq!(err, UploadError::UnsupportedType("image/tiff".into()));

        let err = validate_image_upload("application/pdf", 1024).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType(_)));
    }

    #[test]
    fn rejects_oversize_images_of_accepted_types() {
        let fifteen_mb = 15 * 1024 * 1024;
        let err = validate_image_upload("image/jpeg", fifteen_mb).unwrap_err();
        assert_eq!(err, UploadError::TooLarge(fifteen_mb));
    }
}
