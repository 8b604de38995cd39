use crate::domain::SignatureImage;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sigcheck_errors::AppError;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff];

pub struct UploadValidator;

impl UploadValidator {
    /// Validates an uploaded file and converts it into a domain image.
    pub fn image_from_bytes(filename: &str, data: &[u8]) -> Result<SignatureImage, AppError> {
        let filename = filename.trim();

        if filename.is_empty() || data.is_empty() {
            return Err(AppError::MissingUpload);
        }

        if !Self::has_allowed_extension(filename) {
            return Err(AppError::InvalidUpload(format!(
                "'{}' is not a PNG or JPG file",
                filename
            )));
        }

        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::InvalidUpload(format!(
                "'{}' exceeds the {} MB upload limit",
                filename,
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        if !Self::matches_image_magic(data) {
            return Err(AppError::InvalidUpload(format!(
                "'{}' does not contain PNG or JPEG image data",
                filename
            )));
        }

        Ok(SignatureImage::new(
            filename.to_string(),
            STANDARD.encode(data),
        ))
    }

    /// Same validation for payloads that arrive already base64-encoded
    /// (the server-fn path).
    pub fn image_from_base64(filename: &str, b64: &str) -> Result<SignatureImage, AppError> {
        let data = STANDARD
            .decode(b64.trim())
            .map_err(|_| AppError::InvalidUpload(format!("'{}' is not valid base64", filename)))?;
        Self::image_from_bytes(filename, &data)
    }

    fn has_allowed_extension(filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    fn matches_image_magic(data: &[u8]) -> bool {
        data.starts_with(PNG_MAGIC) || data.starts_with(JPEG_MAGIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let mut data = PNG_MAGIC.to_vec();
        data.extend_from_slice(&[0u8; 16]);
        data
    }

    fn jpeg_bytes() -> Vec<u8> {
        let mut data = JPEG_MAGIC.to_vec();
        data.extend_from_slice(&[0xe0, 0x00, 0x10]);
        data
    }

    #[test]
    fn test_valid_uploads() {
        assert!(UploadValidator::image_from_bytes("sig.png", &png_bytes()).is_ok());
        assert!(UploadValidator::image_from_bytes("scan.JPG", &jpeg_bytes()).is_ok());
        assert!(UploadValidator::image_from_bytes("a.b.jpeg", &jpeg_bytes()).is_ok());
    }

    #[test]
    fn test_missing_filename_or_content() {
        assert!(matches!(
            UploadValidator::image_from_bytes("", &png_bytes()),
            Err(AppError::MissingUpload)
        ));
        assert!(matches!(
            UploadValidator::image_from_bytes("sig.png", &[]),
            Err(AppError::MissingUpload)
        ));
    }

    #[test]
    fn test_rejected_extensions() {
        assert!(UploadValidator::image_from_bytes("sig.gif", &png_bytes()).is_err());
        assert!(UploadValidator::image_from_bytes("sig.pdf", &png_bytes()).is_err());
        assert!(UploadValidator::image_from_bytes("noextension", &png_bytes()).is_err());
    }

    #[test]
    fn test_content_must_match_magic() {
        assert!(UploadValidator::image_from_bytes("sig.png", b"not an image").is_err());
    }

    #[test]
    fn test_oversized_upload() {
        let mut data = png_bytes();
        data.resize(MAX_UPLOAD_BYTES + 1, 0);
        assert!(UploadValidator::image_from_bytes("sig.png", &data).is_err());
    }

    #[test]
    fn test_base64_round_trip() {
        let encoded = STANDARD.encode(png_bytes());
        let image = UploadValidator::image_from_base64("sig.png", &encoded).unwrap();
        assert_eq!(image.base64_data, encoded);

        assert!(UploadValidator::image_from_base64("sig.png", "!!!").is_err());
    }
}
