pub mod image_client;

use async_trait::async_trait;

use crate::{
    encoder::decode_image,
    error::{Result, StudioError},
    models::{wire::GenerateContentResponse, GeneratedImage, GenerationRequest},
};

pub use image_client::GeminiClient;

/// The hosted image model, as seen by the studio.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerateContentResponse>;
}

/// Takes the first inline image in response order. A response without one
/// is an error, carrying whatever text the model sent instead.
pub fn extract_image(response: &GenerateContentResponse) -> Result<GeneratedImage> {
    if let Some(text) = response.text() {
        log::debug!("Model text: {}", text);
    }

    match response.first_image() {
        Some(inline) => decode_image(&inline.data, &inline.mime_type),
        None => Err(StudioError::NoImageReturned(response.text())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_second_part() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Sure." },
                { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
            ] } }]
        }))
        .unwrap();
        let image = extract_image(&response).unwrap();
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_text_only_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I can't help with that." }] } }]
        }))
        .unwrap();
        match extract_image(&response) {
            Err(StudioError::NoImageReturned(Some(text))) => {
                assert_eq!(text, "I can't help with that.")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
