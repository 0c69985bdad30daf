use super::surface::{ScreenPoint, Viewport};

/// T-shirt silhouette as one closed polyline, in a 256x256 design box.
pub const TSHIRT: &[(f32, f32)] = &[
    (88.0, 40.0),
    (40.0, 72.0),
    (60.0, 112.0),
    (84.0, 100.0),
    (84.0, 216.0),
    (172.0, 216.0),
    (172.0, 100.0),
    (196.0, 112.0),
    (216.0, 72.0),
    (168.0, 40.0),
    (148.0, 56.0),
    (108.0, 56.0),
    (88.0, 40.0),
];

const DESIGN_BOX: f32 = 256.0;

/// Places an outline inside the on-screen area described by `viewport`.
pub fn fit_to(outline: &[(f32, f32)], viewport: &Viewport) -> Vec<ScreenPoint> {
    let sx = viewport.display_width / DESIGN_BOX;
    let sy = viewport.display_height / DESIGN_BOX;
    outline
        .iter()
        .map(|(x, y)| ScreenPoint::new(viewport.origin.x + x * sx, viewport.origin.y + y * sy))
        .collect()
}
