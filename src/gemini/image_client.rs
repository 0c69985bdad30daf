use crate::{
    config::GeminiConfig,
    error::{Result, StudioError},
    gemini::ImageGenerator,
    models::{
        wire::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
        GenerationRequest, RESPONSE_MODALITIES,
    },
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                StudioError::ConfigError("GEMINI_API_KEY (or GOOGLE_API_KEY) is required".into())
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| StudioError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn endpoint_for_model(&self, model: &str) -> String {
        let trimmed = model.trim();
        let model_path = if trimmed.starts_with("models/") {
            trimmed.to_string()
        } else {
            format!("models/{}", trimmed)
        };
        format!("{}/{}:generateContent", self.api_base, model_path)
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            self.api_key
                .parse()
                .map_err(|_| StudioError::ConfigError("API key is not a valid header".into()))?,
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerateContentResponse> {
        let payload = GenerateContentRequest::from_generation(request, &RESPONSE_MODALITIES);
        let url = self.endpoint_for_model(&request.model_id);

        log::info!(
            "Generating image with model: {} ({} image part(s))",
            request.model_id,
            request.images.len()
        );
        log::debug!("Instruction: {}", request.instruction);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini transport error: {:?}", e);
                StudioError::RequestError(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StudioError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .ok()
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| body.chars().take(300).collect());
            log::error!("Gemini service error {}: {}", status, message);
            return Err(StudioError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| StudioError::ResponseError(e.to_string()))
    }
}
