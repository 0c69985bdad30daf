use serde::Serialize;

use crate::models::EncodedPart;

pub const RESPONSE_MODALITIES: [&str; 2] = ["IMAGE", "TEXT"];

/// One submit's worth of content: image parts in order, then the instruction.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model_id: String,
    pub images: Vec<EncodedPart>,
    pub instruction: String,
}

impl GenerationRequest {
    pub fn new(model_id: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            images: Vec::new(),
            instruction: instruction.into(),
        }
    }

    pub fn with_image(mut self, part: EncodedPart) -> Self {
        self.images.push(part);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String, // Base64 encoded
    #[serde(skip)]
    pub bytes: Vec<u8>,
}
