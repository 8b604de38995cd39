use serde::{Deserialize, Serialize};

/// One uploaded signature image, held as a base64 payload so it can be
/// embedded directly in a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureImage {
    pub filename: String,
    pub base64_data: String,
}

impl SignatureImage {
    pub fn new(filename: String, base64_data: String) -> Self {
        Self {
            filename,
            base64_data,
        }
    }
}

/// The two signatures under comparison, in upload order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignaturePair {
    pub first: SignatureImage,
    pub second: SignatureImage,
}

impl SignaturePair {
    pub fn new(first: SignatureImage, second: SignatureImage) -> Self {
        Self { first, second }
    }
}
