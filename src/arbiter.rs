//! Keeps the two input slots mutually exclusive: drawn vs uploaded sketch,
//! uploaded model photo vs preset selector.

use crate::models::{DesignParameters, ImageFile, ModelPreset, ModelReference, SketchSource};

#[derive(Debug, Clone, PartialEq)]
pub enum StudioEvent {
    SketchUploaded(ImageFile),
    SketchFileCleared,
    CanvasCleared,
    StrokeBegan,
    ModelUploaded(ImageFile),
    ModelFileCleared,
    PresetSelected(ModelPreset),
    DescriptionChanged(String),
    RealismChanged(u8),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudioState {
    pub sketch_file: Option<ImageFile>,
    pub has_drawn: bool,
    pub model_file: Option<ImageFile>,
    pub preset: ModelPreset,
    pub design: DesignParameters,
}

impl StudioState {
    pub fn new(preset: ModelPreset, realism: u8) -> Self {
        Self {
            preset,
            design: DesignParameters::new("", realism),
            ..Default::default()
        }
    }

    /// Uploaded file first, then the drawn path.
    pub fn sketch_source(&self) -> SketchSource<'_> {
        match (&self.sketch_file, self.has_drawn) {
            (Some(file), _) => SketchSource::Uploaded(file),
            (None, true) => SketchSource::Drawn,
            (None, false) => SketchSource::None,
        }
    }

    pub fn model_reference(&self) -> ModelReference<'_> {
        match &self.model_file {
            Some(file) => ModelReference::Uploaded(file),
            None => ModelReference::Preset(self.preset),
        }
    }

    pub fn has_sketch(&self) -> bool {
        self.sketch_source().is_present()
    }

    /// Rule 1: an uploaded sketch disables drawing.
    pub fn drawing_locked(&self) -> bool {
        self.sketch_file.is_some()
    }

    /// Rule 1: a drawn path disables the sketch upload control.
    pub fn sketch_upload_locked(&self) -> bool {
        self.has_drawn && self.sketch_file.is_none()
    }

    /// Rule 2: an uploaded model photo disables the preset selector.
    pub fn preset_locked(&self) -> bool {
        self.model_file.is_some()
    }
}

/// Pure transition. Raster side effects belong to the caller.
pub fn apply(mut state: StudioState, event: StudioEvent) -> StudioState {
    match event {
        StudioEvent::SketchUploaded(file) => {
            state.sketch_file = Some(file);
            state.has_drawn = false;
        }
        StudioEvent::SketchFileCleared => {
            state.sketch_file = None;
        }
        StudioEvent::CanvasCleared => {
            state.sketch_file = None;
            state.has_drawn = false;
        }
        StudioEvent::StrokeBegan => {
            if !state.drawing_locked() {
                state.has_drawn = true;
            }
        }
        StudioEvent::ModelUploaded(file) => {
            state.model_file = Some(file);
        }
        StudioEvent::ModelFileCleared => {
            state.model_file = None;
        }
        StudioEvent::PresetSelected(preset) => {
            state.preset = preset;
        }
        StudioEvent::DescriptionChanged(text) => {
            state.design.description = text;
        }
        StudioEvent::RealismChanged(value) => {
            state.design.set_realism(value);
        }
    }
    state
}
