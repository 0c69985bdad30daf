use std::env;

use crate::models::ModelPreset;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model_id: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model_id: DEFAULT_IMAGE_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = non_empty_env("GEMINI_API_KEY").or_else(|| non_empty_env("GOOGLE_API_KEY"));
        let api_base = non_empty_env("GEMINI_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);
        let model_id = non_empty_env("GEMINI_IMAGE_MODEL").unwrap_or(defaults.model_id);
        let timeout_secs = non_empty_env("GEMINI_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_secs);

        GeminiConfig {
            api_key,
            api_base,
            model_id,
            timeout_secs,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub gemini: GeminiConfig,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub stroke_width: f32,
    pub default_realism: u8,
    pub default_preset: ModelPreset,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            gemini: GeminiConfig::default(),
            canvas_width: 512,
            canvas_height: 512,
            stroke_width: 3.0,
            default_realism: 50,
            default_preset: ModelPreset::default(),
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let canvas_width = non_empty_env("SKETCHGEN_CANVAS_WIDTH")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|w| *w > 0)
            .unwrap_or(defaults.canvas_width);
        let canvas_height = non_empty_env("SKETCHGEN_CANVAS_HEIGHT")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(defaults.canvas_height);
        let stroke_width = non_empty_env("SKETCHGEN_STROKE_WIDTH")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|w| *w > 0.0)
            .unwrap_or(defaults.stroke_width);
        let default_realism = non_empty_env("SKETCHGEN_REALISM")
            .and_then(|s| s.parse::<u8>().ok())
            .map(|r| r.min(100))
            .unwrap_or(defaults.default_realism);
        let default_preset = non_empty_env("SKETCHGEN_MODEL_PRESET")
            .and_then(|s| s.parse::<ModelPreset>().ok())
            .unwrap_or(defaults.default_preset);

        StudioConfig {
            gemini: GeminiConfig::from_env(),
            canvas_width,
            canvas_height,
            stroke_width,
            default_realism,
            default_preset,
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width.max(1);
        self.canvas_height = height.max(1);
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_realism(mut self, realism: u8) -> Self {
        self.default_realism = realism.min(100);
        self
    }

    pub fn with_preset(mut self, preset: ModelPreset) -> Self {
        self.default_preset = preset;
        self
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = StudioConfig::new()
            .with_canvas_size(0, 300)
            .with_realism(250)
            .with_preset(ModelPreset::Male)
            .with_gemini(GeminiConfig::new().with_api_base("http://localhost:9000/v1beta/"));

        assert_eq!(config.canvas_width, 1);
        assert_eq!(config.canvas_height, 300);
        assert_eq!(config.default_realism, 100);
        assert_eq!(config.default_preset, ModelPreset::Male);
        assert_eq!(config.gemini.api_base, "http://localhost:9000/v1beta");
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.default_realism, 50);
        assert_eq!(config.gemini.model_id, DEFAULT_IMAGE_MODEL);
    }
}
