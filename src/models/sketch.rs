use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::ImageFile;

pub const DEFAULT_DESCRIPTION: &str = "a stylish, modern outfit";
pub const DEFAULT_REALISM: u8 = 50;
pub const MAX_REALISM: u8 = 100;

/// The effective sketch for a generation. An uploaded file always wins
/// over a drawn path.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchSource<'a> {
    None,
    Uploaded(&'a ImageFile),
    Drawn,
}

impl SketchSource<'_> {
    pub fn is_present(&self) -> bool {
        !matches!(self, SketchSource::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelPreset {
    #[default]
    Female,
    Male,
    Kid,
}

impl ModelPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelPreset::Female => "female",
            ModelPreset::Male => "male",
            ModelPreset::Kid => "kid",
        }
    }

    /// Wording used when asking the model for a person of this kind.
    pub fn subject(&self) -> &'static str {
        match self {
            ModelPreset::Female => "a female fashion model",
            ModelPreset::Male => "a male fashion model",
            ModelPreset::Kid => "a child model",
        }
    }
}

impl fmt::Display for ModelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "woman" => Ok(ModelPreset::Female),
            "male" | "man" => Ok(ModelPreset::Male),
            "kid" | "child" => Ok(ModelPreset::Kid),
            other => Err(format!("unknown model preset: {}", other)),
        }
    }
}

/// Who wears the design: a preset category, or an uploaded photo that
/// overrides it.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReference<'a> {
    Preset(ModelPreset),
    Uploaded(&'a ImageFile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignParameters {
    pub description: String,
    realism: u8,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            description: String::new(),
            realism: DEFAULT_REALISM,
        }
    }
}

impl DesignParameters {
    pub fn new(description: impl Into<String>, realism: u8) -> Self {
        Self {
            description: description.into(),
            realism: realism.min(MAX_REALISM),
        }
    }

    pub fn realism(&self) -> u8 {
        self.realism
    }

    pub fn set_realism(&mut self, realism: u8) {
        self.realism = realism.min(MAX_REALISM);
    }

    /// The description to send, falling back to the default phrase when blank.
    pub fn effective_description(&self) -> &str {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            DEFAULT_DESCRIPTION
        } else {
            trimmed
        }
    }
}
