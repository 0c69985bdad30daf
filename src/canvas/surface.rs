use serde::{Deserialize, Serialize};

use super::raster::Raster;

/// A position in on-screen (displayed) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A position in canvas backing-store pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

impl CanvasPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where and how large the canvas is drawn on screen. The backing
/// resolution may differ from the displayed size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub origin: ScreenPoint,
    pub display_width: f32,
    pub display_height: f32,
}

impl Viewport {
    pub fn new(origin: ScreenPoint, display_width: f32, display_height: f32) -> Self {
        Self {
            origin,
            display_width,
            display_height,
        }
    }

    /// Displayed 1:1 at the screen origin.
    pub fn identity(raster: &Raster) -> Self {
        Self::new(
            ScreenPoint::new(0.0, 0.0),
            raster.width() as f32,
            raster.height() as f32,
        )
    }

    /// Maps a screen position into backing coordinates, scaling each axis
    /// by `backing / displayed` independently.
    pub fn correct(
        &self,
        raw: ScreenPoint,
        backing_width: u32,
        backing_height: u32,
    ) -> CanvasPoint {
        let scale_x = axis_scale(backing_width, self.display_width);
        let scale_y = axis_scale(backing_height, self.display_height);
        CanvasPoint::new(
            (raw.x - self.origin.x) * scale_x,
            (raw.y - self.origin.y) * scale_y,
        )
    }
}

fn axis_scale(backing: u32, displayed: f32) -> f32 {
    if displayed > 0.0 {
        backing as f32 / displayed
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(ScreenPoint),
    Move(ScreenPoint),
    Up,
    Leave,
}

impl PointerEvent {
    pub fn mouse_down(x: f32, y: f32) -> Self {
        PointerEvent::Down(ScreenPoint::new(x, y))
    }

    pub fn mouse_move(x: f32, y: f32) -> Self {
        PointerEvent::Move(ScreenPoint::new(x, y))
    }

    /// Touch input only ever follows the first touch point.
    pub fn touch_start(touches: &[ScreenPoint]) -> Option<Self> {
        touches.first().copied().map(PointerEvent::Down)
    }

    pub fn touch_move(touches: &[ScreenPoint]) -> Option<Self> {
        touches.first().copied().map(PointerEvent::Move)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing {
        last: CanvasPoint,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: CanvasPoint,
    pub to: CanvasPoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEffect {
    Ignored,
    Began(CanvasPoint),
    Stroked(Segment),
    Ended,
}

impl DrawState {
    /// Pure transition over an already-corrected position. `locked` is set
    /// while an uploaded sketch occupies the slot.
    pub fn next(
        self,
        event: PointerEvent,
        point: Option<CanvasPoint>,
        locked: bool,
    ) -> (DrawState, SurfaceEffect) {
        match (self, event, point) {
            (_, PointerEvent::Down(_), _) if locked => (self, SurfaceEffect::Ignored),
            (_, PointerEvent::Down(_), Some(p)) => {
                (DrawState::Drawing { last: p }, SurfaceEffect::Began(p))
            }
            (DrawState::Drawing { last }, PointerEvent::Move(_), Some(p)) => (
                DrawState::Drawing { last: p },
                SurfaceEffect::Stroked(Segment { from: last, to: p }),
            ),
            (DrawState::Drawing { .. }, PointerEvent::Up | PointerEvent::Leave, _) => {
                (DrawState::Idle, SurfaceEffect::Ended)
            }
            _ => (self, SurfaceEffect::Ignored),
        }
    }
}

/// Freehand drawing surface: pointer capture into a vector path, stroked
/// immediately onto the raster.
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    raster: Raster,
    state: DrawState,
    strokes: Vec<Vec<CanvasPoint>>,
    has_drawn: bool,
}

impl DrawingSurface {
    pub fn new(raster: Raster) -> Self {
        Self {
            raster,
            state: DrawState::Idle,
            strokes: Vec::new(),
            has_drawn: false,
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn strokes(&self) -> &[Vec<CanvasPoint>] {
        &self.strokes
    }

    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        viewport: &Viewport,
        locked: bool,
    ) -> SurfaceEffect {
        let point = match event {
            PointerEvent::Down(raw) | PointerEvent::Move(raw) => {
                Some(viewport.correct(raw, self.raster.width(), self.raster.height()))
            }
            PointerEvent::Up | PointerEvent::Leave => None,
        };

        let (state, effect) = self.state.next(event, point, locked);
        self.state = state;

        match effect {
            SurfaceEffect::Began(p) => {
                self.has_drawn = true;
                self.strokes.push(vec![p]);
            }
            SurfaceEffect::Stroked(segment) => {
                self.raster.stroke_segment(segment.from, segment.to);
                if let Some(stroke) = self.strokes.last_mut() {
                    stroke.push(segment.to);
                }
            }
            SurfaceEffect::Ended | SurfaceEffect::Ignored => {}
        }
        effect
    }

    /// Wipes the raster and forgets every stroke.
    pub fn clear(&mut self) {
        self.raster.clear();
        self.strokes.clear();
        self.state = DrawState::Idle;
        self.has_drawn = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> DrawingSurface {
        DrawingSurface::new(Raster::new(200, 100, 2.0))
    }

    #[test]
    fn test_correction_per_axis() {
        // 200x100 backing shown at 100x200 on screen, offset by (10, 20)
        let viewport = Viewport::new(ScreenPoint::new(10.0, 20.0), 100.0, 200.0);
        let p = viewport.correct(ScreenPoint::new(60.0, 120.0), 200, 100);
        assert_eq!(p, CanvasPoint::new(100.0, 50.0));
    }

    #[test]
    fn test_zero_display_size_does_not_divide() {
        let viewport = Viewport::new(ScreenPoint::new(0.0, 0.0), 0.0, 0.0);
        let p = viewport.correct(ScreenPoint::new(7.0, 9.0), 200, 100);
        assert_eq!(p, CanvasPoint::new(7.0, 9.0));
    }

    #[test]
    fn test_draw_stroke() {
        let mut surface = surface();
        let viewport = Viewport::identity(surface.raster());

        assert_eq!(
            surface.handle(PointerEvent::mouse_down(10.0, 10.0), &viewport, false),
            SurfaceEffect::Began(CanvasPoint::new(10.0, 10.0))
        );
        assert!(surface.has_drawn());
        assert!(surface.raster().is_blank());

        let effect = surface.handle(PointerEvent::mouse_move(60.0, 10.0), &viewport, false);
        assert!(matches!(effect, SurfaceEffect::Stroked(_)));
        assert!(!surface.raster().is_blank());

        assert_eq!(surface.handle(PointerEvent::Up, &viewport, false), SurfaceEffect::Ended);
        assert_eq!(surface.state(), DrawState::Idle);
        assert_eq!(surface.strokes().len(), 1);
        assert_eq!(surface.strokes()[0].len(), 2);
    }

    #[test]
    fn test_strokes_accumulate() {
        let mut surface = surface();
        let viewport = Viewport::identity(surface.raster());
        for y in [10.0, 50.0] {
            surface.handle(PointerEvent::mouse_down(10.0, y), &viewport, false);
            surface.handle(PointerEvent::mouse_move(90.0, y), &viewport, false);
            surface.handle(PointerEvent::Leave, &viewport, false);
        }
        assert_eq!(surface.strokes().len(), 2);
        assert_eq!(surface.raster().pixel(50, 10), Some([0, 0, 0, 255]));
        assert_eq!(surface.raster().pixel(50, 50), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut surface = surface();
        let viewport = Viewport::identity(surface.raster());
        assert_eq!(
            surface.handle(PointerEvent::mouse_move(20.0, 20.0), &viewport, false),
            SurfaceEffect::Ignored
        );
        assert!(!surface.has_drawn());
    }

    #[test]
    fn test_locked_surface_ignores_down() {
        let mut surface = surface();
        let viewport = Viewport::identity(surface.raster());
        assert_eq!(
            surface.handle(PointerEvent::mouse_down(10.0, 10.0), &viewport, true),
            SurfaceEffect::Ignored
        );
        surface.handle(PointerEvent::mouse_move(60.0, 60.0), &viewport, true);
        assert!(!surface.has_drawn());
        assert!(surface.raster().is_blank());
    }

    #[test]
    fn test_clear_resets() {
        let mut surface = surface();
        let viewport = Viewport::identity(surface.raster());
        surface.handle(PointerEvent::mouse_down(10.0, 10.0), &viewport, false);
        surface.handle(PointerEvent::mouse_move(60.0, 60.0), &viewport, false);
        surface.clear();
        assert!(!surface.has_drawn());
        assert!(!surface.is_drawing());
        assert!(surface.raster().is_blank());
        assert!(surface.strokes().is_empty());
    }

    #[test]
    fn test_touch_uses_first_point() {
        let touches = [ScreenPoint::new(3.0, 4.0), ScreenPoint::new(90.0, 90.0)];
        assert_eq!(
            PointerEvent::touch_start(&touches),
            Some(PointerEvent::Down(ScreenPoint::new(3.0, 4.0)))
        );
        assert_eq!(PointerEvent::touch_move(&[]), None);
    }
}
