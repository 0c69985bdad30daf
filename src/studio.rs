use crate::{
    arbiter::{apply, StudioEvent, StudioState},
    canvas::{DrawingSurface, PointerEvent, Raster, ScreenPoint, SurfaceEffect, Viewport},
    config::StudioConfig,
    encoder::{encode_file, encode_sketch},
    error::{Result, StudioError},
    gemini::{extract_image, GeminiClient, ImageGenerator},
    logger::GenerationSpan,
    models::{GeneratedImage, GenerationRequest, ImageFile, ModelPreset},
    prompt::build_instruction,
    reflector::{project, Affordances, ResultPanel, Snapshot},
};

/// Receives a fresh snapshot after every state change.
pub trait StudioView: Send {
    fn render(&mut self, snapshot: &Snapshot);
}

pub struct NullView;

impl StudioView for NullView {
    fn render(&mut self, _snapshot: &Snapshot) {}
}

impl<F> StudioView for F
where
    F: FnMut(&Snapshot) + Send,
{
    fn render(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Single controller instance owning all studio state.
pub struct Studio<G: ImageGenerator, V: StudioView = NullView> {
    config: StudioConfig,
    generator: G,
    view: V,
    state: StudioState,
    surface: DrawingSurface,
    viewport: Viewport,
    panel: ResultPanel,
}

impl Studio<GeminiClient, NullView> {
    pub fn from_config(config: StudioConfig) -> Result<Self> {
        let generator = GeminiClient::new(&config.gemini)?;
        Ok(Self::new(config, generator, NullView))
    }
}

impl<G: ImageGenerator, V: StudioView> Studio<G, V> {
    pub fn new(config: StudioConfig, generator: G, view: V) -> Self {
        let raster = Raster::new(
            config.canvas_width,
            config.canvas_height,
            config.stroke_width,
        );
        let viewport = Viewport::identity(&raster);
        let state = StudioState::new(config.default_preset, config.default_realism);

        let mut studio = Self {
            config,
            generator,
            view,
            state,
            surface: DrawingSurface::new(raster),
            viewport,
            panel: ResultPanel::idle(),
        };
        studio.refresh();
        studio
    }

    /// Swaps the view, rendering the current snapshot into it.
    pub fn with_view<W: StudioView>(self, view: W) -> Studio<G, W> {
        let mut studio = Studio {
            config: self.config,
            generator: self.generator,
            view,
            state: self.state,
            surface: self.surface,
            viewport: self.viewport,
            panel: self.panel,
        };
        studio.refresh();
        studio
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn state(&self) -> &StudioState {
        &self.state
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn panel(&self) -> &ResultPanel {
        &self.panel
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn affordances(&self) -> Affordances {
        project(&self.state)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            affordances: self.affordances(),
            panel: self.panel.clone(),
        }
    }

    /// Where the canvas currently sits on screen and at what size.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn dispatch(&mut self, event: StudioEvent) {
        let wipes_canvas = matches!(
            event,
            StudioEvent::SketchUploaded(_) | StudioEvent::CanvasCleared
        );
        log::debug!("Studio event: {:?}", event);

        self.state = apply(std::mem::take(&mut self.state), event);
        if wipes_canvas {
            self.surface.clear();
        }
        self.refresh();
    }

    pub fn pointer(&mut self, event: PointerEvent) -> SurfaceEffect {
        let locked = self.state.drawing_locked();
        let effect = self.surface.handle(event, &self.viewport, locked);
        if let SurfaceEffect::Began(_) = effect {
            self.dispatch(StudioEvent::StrokeBegan);
        }
        effect
    }

    pub fn upload_sketch(&mut self, file: ImageFile) {
        self.dispatch(StudioEvent::SketchUploaded(file));
    }

    pub fn remove_sketch_file(&mut self) {
        self.dispatch(StudioEvent::SketchFileCleared);
    }

    /// Clears the drawing and any uploaded sketch; they share one slot.
    pub fn clear_canvas(&mut self) {
        self.dispatch(StudioEvent::CanvasCleared);
    }

    pub fn upload_model(&mut self, file: ImageFile) {
        self.dispatch(StudioEvent::ModelUploaded(file));
    }

    pub fn remove_model_file(&mut self) {
        self.dispatch(StudioEvent::ModelFileCleared);
    }

    pub fn select_preset(&mut self, preset: ModelPreset) {
        self.dispatch(StudioEvent::PresetSelected(preset));
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.dispatch(StudioEvent::DescriptionChanged(text.into()));
    }

    pub fn set_realism(&mut self, value: u8) {
        self.dispatch(StudioEvent::RealismChanged(value));
    }

    /// Validate, go busy, encode, call the model, show the result or the
    /// error, then always settle back to an enabled trigger.
    pub async fn generate(&mut self) -> Result<GeneratedImage> {
        if !self.state.has_sketch() {
            log::warn!("Generate requested without a sketch");
            self.panel.show_notice(StudioError::MissingSketch.to_string());
            self.refresh();
            return Err(StudioError::MissingSketch);
        }
        if !self.panel.trigger_enabled {
            return Err(StudioError::Busy);
        }

        self.panel.busy();
        self.refresh();

        let span = GenerationSpan::start();
        let mut settle = SettleGuard {
            panel: &mut self.panel,
            view: &mut self.view,
            state: &self.state,
            finished: false,
        };
        let outcome = run_pipeline(
            &self.config,
            &self.generator,
            &self.state,
            self.surface.raster(),
        )
        .await;
        match &outcome {
            Ok(image) => {
                log::info!(
                    "Render received: {} ({} bytes)",
                    image.mime_type,
                    image.bytes.len()
                );
                settle.panel.show_result(image.clone());
            }
            Err(e) => {
                log::error!("Generation failed: {}", e);
                settle.panel.show_error(e.to_string());
            }
        }
        settle.finished = true;
        drop(settle);
        drop(span);

        outcome
    }

    /// Replays a polyline as one stroke: down on the first point, a move
    /// per following point, then up.
    pub fn trace(&mut self, points: &[ScreenPoint]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.pointer(PointerEvent::Down(*first));
        for point in rest {
            self.pointer(PointerEvent::Move(*point));
        }
        self.pointer(PointerEvent::Up);
    }

    fn refresh(&mut self) {
        let snapshot = self.snapshot();
        self.view.render(&snapshot);
    }
}

async fn run_pipeline<G: ImageGenerator>(
    config: &StudioConfig,
    generator: &G,
    state: &StudioState,
    raster: &Raster,
) -> Result<GeneratedImage> {
    let sketch = encode_sketch(&state.sketch_source(), raster).await?;

    let instruction = build_instruction(&state.model_reference(), &state.design);
    let mut request =
        GenerationRequest::new(config.gemini.model_id.clone(), instruction).with_image(sketch);

    if let Some(model) = &state.model_file {
        request = request.with_image(encode_file(model).await?);
    }

    let response = generator.generate(&request).await?;
    extract_image(&response)
}

/// Ends the busy state on drop, including when the generation future is
/// dropped before it completes.
struct SettleGuard<'a, V: StudioView> {
    panel: &'a mut ResultPanel,
    view: &'a mut V,
    state: &'a StudioState,
    finished: bool,
}

impl<V: StudioView> Drop for SettleGuard<'_, V> {
    fn drop(&mut self) {
        if !self.finished {
            log::warn!("Generation dropped before it settled");
            self.panel.placeholder_visible = true;
        }
        self.panel.settle();
        self.view.render(&Snapshot {
            affordances: project(self.state),
            panel: self.panel.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wire::GenerateContentResponse;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl ImageGenerator for Unreachable {
        async fn generate(&self, _request: &GenerationRequest) -> Result<GenerateContentResponse> {
            Err(StudioError::RequestError("offline".into()))
        }
    }

    fn studio() -> Studio<Unreachable> {
        Studio::new(
            StudioConfig::new().with_canvas_size(100, 100),
            Unreachable,
            NullView,
        )
    }

    #[test]
    fn test_upload_wipes_drawing() {
        let mut studio = studio();
        studio.pointer(PointerEvent::mouse_down(10.0, 10.0));
        studio.pointer(PointerEvent::mouse_move(80.0, 80.0));
        studio.pointer(PointerEvent::Up);
        assert!(!studio.surface().raster().is_blank());

        studio.upload_sketch(ImageFile::from_bytes("s.png", "image/png", vec![1]));
        assert!(studio.surface().raster().is_blank());
        assert!(!studio.state().has_drawn);
        assert!(!studio.affordances().canvas_enabled);
    }

    #[test]
    fn test_drawing_ignored_while_upload_active() {
        let mut studio = studio();
        studio.upload_sketch(ImageFile::from_bytes("s.png", "image/png", vec![1]));

        assert_eq!(
            studio.pointer(PointerEvent::mouse_down(10.0, 10.0)),
            SurfaceEffect::Ignored
        );
        studio.pointer(PointerEvent::mouse_move(80.0, 80.0));
        assert!(studio.surface().raster().is_blank());
        assert!(!studio.state().has_drawn);
    }

    #[test]
    fn test_viewport_scaling_applies() {
        let mut studio = studio();
        studio.set_viewport(Viewport::new(
            crate::canvas::ScreenPoint::new(0.0, 0.0),
            50.0,
            50.0,
        ));
        studio.pointer(PointerEvent::mouse_down(10.0, 10.0));
        assert_eq!(
            studio.surface().strokes()[0][0],
            crate::canvas::CanvasPoint::new(20.0, 20.0)
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_shown_inline() {
        let mut studio = studio();
        studio.pointer(PointerEvent::mouse_down(10.0, 10.0));
        studio.pointer(PointerEvent::mouse_move(50.0, 50.0));

        let err = studio.generate().await.unwrap_err();
        assert!(matches!(err, StudioError::RequestError(_)));

        let panel = studio.panel();
        assert_eq!(panel.error_message.as_deref(), Some("Request error: offline"));
        assert!(panel.placeholder_visible);
        assert!(!panel.result_visible);
        assert!(!panel.spinner_visible);
        assert!(panel.trigger_enabled);
    }

    #[tokio::test]
    async fn test_busy_trigger_rejects_generation() {
        let mut studio = studio();
        studio.trace(&[ScreenPoint::new(10.0, 10.0), ScreenPoint::new(50.0, 50.0)]);
        studio.panel.busy();
        let before = studio.panel().clone();

        let err = studio.generate().await.unwrap_err();

        assert!(matches!(err, StudioError::Busy));
        assert_eq!(studio.panel(), &before);
        assert!(studio.panel().spinner_visible);
    }

    #[test]
    fn test_trace_draws_one_stroke() {
        let mut studio = studio();
        studio.trace(&[
            ScreenPoint::new(10.0, 10.0),
            ScreenPoint::new(90.0, 10.0),
            ScreenPoint::new(90.0, 90.0),
        ]);
        assert_eq!(studio.surface().strokes().len(), 1);
        assert_eq!(studio.surface().strokes()[0].len(), 3);
        assert!(!studio.surface().is_drawing());
        assert!(studio.state().has_drawn);

        studio.trace(&[]);
        assert_eq!(studio.surface().strokes().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_sketch_shows_notice() {
        let mut studio = studio();
        let err = studio.generate().await.unwrap_err();
        assert!(matches!(err, StudioError::MissingSketch));
        assert_eq!(
            studio.panel().notice.as_deref(),
            Some("Please upload or draw a sketch first.")
        );
        assert!(studio.panel().trigger_enabled);
    }
}
