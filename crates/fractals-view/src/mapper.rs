//! Screen-pixel to world-plane mapping.
//!
//! This is the single host-side copy of the mapping formula. The fragment
//! shader (`fractal.wgsl` in `fractals-engine`) evaluates the same expression
//! per pixel and must be kept in step with [`screen_to_world`] /
//! [`displayed_world`]; changing one side alone breaks cursor-anchored zoom.
//!
//! Screen points are in physical pixels, origin top-left, +Y down. Screen
//! sizes must be positive on both axes (see [`crate::ScreenGeometry::new`]).

use crate::geometry::center_offset;
use crate::vec2::DVec2;

/// Normalises a screen point by the shorter screen side: `p / s * 2 - 1`.
///
/// Both axes share the same scale so the fractal is never stretched; on a
/// non-square window the longer axis extends beyond `[-1, 1]`.
#[inline]
pub fn normalize(point: DVec2, screen_size: DVec2) -> DVec2 {
    let s = screen_size.min_element();
    DVec2::new(point.x / s * 2.0 - 1.0, point.y / s * 2.0 - 1.0)
}

/// Maps a screen point to the world plane: `ndc / zoom + pan + center_offset`.
#[inline]
pub fn screen_to_world(point: DVec2, zoom: f64, pan_offset: DVec2, screen_size: DVec2) -> DVec2 {
    normalize(point, screen_size) / zoom + pan_offset + center_offset(screen_size)
}

/// World point the rendering backend shades at `point`.
///
/// The backend's vertical axis points up, so its normalised y is the negation
/// of the screen one; every other term matches [`screen_to_world`]. This is the
/// point that stays fixed under the cursor during zoom.
///
/// The flip is applied to the normalised y rather than to the pixel row
/// (`(H - y) / s * 2 - 1`). The two agree on landscape and square windows; on
/// portrait windows the view sits `2 * (H / s - 1)` lower in world y.
#[inline]
pub fn displayed_world(point: DVec2, zoom: f64, pan_offset: DVec2, screen_size: DVec2) -> DVec2 {
    let ndc = normalize(point, screen_size);
    DVec2::new(ndc.x, -ndc.y) / zoom + pan_offset + center_offset(screen_size)
}
