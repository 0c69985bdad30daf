use serde::Serialize;

use crate::arbiter::StudioState;
use crate::models::GeneratedImage;

/// Enabled/visible flags for every input panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub canvas_enabled: bool,
    pub sketch_upload_enabled: bool,
    pub sketch_preview_visible: bool,
    pub clear_enabled: bool,
    pub preset_selector_enabled: bool,
    pub model_preview_visible: bool,
    pub realism_label: String,
}

/// Pure projection of input state onto panel flags. Re-run after every
/// mutation.
pub fn project(state: &StudioState) -> Affordances {
    Affordances {
        canvas_enabled: !state.drawing_locked(),
        sketch_upload_enabled: !state.sketch_upload_locked(),
        sketch_preview_visible: state.sketch_file.is_some(),
        clear_enabled: state.has_sketch(),
        preset_selector_enabled: !state.preset_locked(),
        model_preview_visible: state.model_file.is_some(),
        realism_label: format!("{}%", state.design.realism()),
    }
}

/// The output area: placeholder, progress indicator, result image or an
/// inline error, and the trigger control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPanel {
    pub placeholder_visible: bool,
    pub spinner_visible: bool,
    pub result_visible: bool,
    pub trigger_enabled: bool,
    pub error_message: Option<String>,
    pub notice: Option<String>,
    #[serde(skip)]
    pub image: Option<GeneratedImage>,
}

impl Default for ResultPanel {
    fn default() -> Self {
        Self::idle()
    }
}

impl ResultPanel {
    pub fn idle() -> Self {
        Self {
            placeholder_visible: true,
            spinner_visible: false,
            result_visible: false,
            trigger_enabled: true,
            error_message: None,
            notice: None,
            image: None,
        }
    }

    pub fn busy(&mut self) {
        self.placeholder_visible = false;
        self.result_visible = false;
        self.spinner_visible = true;
        self.trigger_enabled = false;
        self.error_message = None;
        self.notice = None;
        self.image = None;
    }

    pub fn show_result(&mut self, image: GeneratedImage) {
        self.placeholder_visible = false;
        self.result_visible = true;
        self.error_message = None;
        self.image = Some(image);
    }

    /// Error text takes the placeholder's spot; the result stays hidden.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.placeholder_visible = true;
        self.result_visible = false;
        self.error_message = Some(message.into());
        self.image = None;
    }

    /// A local validation notice replaces any error left by an earlier run.
    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.error_message = None;
        self.notice = Some(message.into());
    }

    pub fn settle(&mut self) {
        self.spinner_visible = false;
        self.trigger_enabled = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub affordances: Affordances,
    pub panel: ResultPanel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::{apply, StudioEvent};
    use crate::models::ImageFile;

    #[test]
    fn test_fresh_state_everything_enabled() {
        let flags = project(&StudioState::default());
        assert!(flags.canvas_enabled);
        assert!(flags.sketch_upload_enabled);
        assert!(flags.preset_selector_enabled);
        assert!(!flags.clear_enabled);
        assert!(!flags.sketch_preview_visible);
        assert_eq!(flags.realism_label, "50%");
    }

    #[test]
    fn test_projection_follows_rules() {
        let state = apply(StudioState::default(), StudioEvent::StrokeBegan);
        let flags = project(&state);
        assert!(flags.canvas_enabled);
        assert!(!flags.sketch_upload_enabled);
        assert!(flags.clear_enabled);

        let state = apply(
            StudioState::default(),
            StudioEvent::SketchUploaded(ImageFile::from_bytes("s.png", "image/png", vec![0])),
        );
        let state = apply(
            state,
            StudioEvent::ModelUploaded(ImageFile::from_bytes("m.jpg", "image/jpeg", vec![0])),
        );
        let flags = project(&state);
        assert!(!flags.canvas_enabled);
        assert!(flags.sketch_upload_enabled);
        assert!(flags.sketch_preview_visible);
        assert!(!flags.preset_selector_enabled);
        assert!(flags.model_preview_visible);
    }

    #[test]
    fn test_realism_label_boundaries() {
        for (value, label) in [(0, "0%"), (100, "100%"), (37, "37%")] {
            let state = apply(StudioState::default(), StudioEvent::RealismChanged(value));
            assert_eq!(project(&state).realism_label, label);
        }
    }

    #[test]
    fn test_projection_is_idempotent() {
        let state = apply(StudioState::default(), StudioEvent::StrokeBegan);
        assert_eq!(project(&state), project(&state));
    }

    #[test]
    fn test_panel_error_restores_placeholder() {
        let mut panel = ResultPanel::idle();
        panel.busy();
        assert!(!panel.placeholder_visible && panel.spinner_visible && !panel.trigger_enabled);

        panel.show_error("boom");
        panel.settle();
        assert!(panel.placeholder_visible);
        assert!(!panel.result_visible);
        assert!(!panel.spinner_visible);
        assert!(panel.trigger_enabled);
        assert_eq!(panel.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_notice_replaces_stale_error() {
        let mut panel = ResultPanel::idle();
        panel.busy();
        panel.show_error("Service error (503): overloaded");
        panel.settle();

        panel.show_notice("Please upload or draw a sketch first.");
        assert!(panel.error_message.is_none());
        assert_eq!(panel.notice.as_deref(), Some("Please upload or draw a sketch first."));
        assert!(panel.placeholder_visible);
    }
}
