use crate::geometry::ScreenGeometry;
use crate::state::ViewportState;
use crate::vec2::DVec2;
use crate::zoom::apply_zoom;

/// Factor applied to scroll and Julia nudges while the slow modifier is held.
pub const SLOW_FACTOR: f64 = 0.25;

/// Zoom-speed change per frame while an adjust key is held.
pub const ZOOM_SPEED_STEP: f64 = 0.01;

/// Platform-agnostic summary of one tick's input.
///
/// Held directions are `-1.0`, `0.0` or `1.0` per axis; flags are
/// edge-triggered (set only on the frame the key went down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Pan direction: x from left/right keys, y from down/up keys.
    pub pan: DVec2,

    /// Wheel delta in lines for this frame.
    pub scroll: f64,

    /// Pointer position in physical pixels, if over the window.
    pub cursor: Option<DVec2>,

    pub toggle_mode: bool,
    pub toggle_color: bool,
    pub reset_camera: bool,

    /// `+1` / `-1` while a zoom-speed key is held.
    pub zoom_speed_step: f64,

    /// Julia constant nudge direction: x for Re, y for Im.
    pub julia_nudge: DVec2,

    /// Slow modifier held.
    pub slow: bool,
}

/// What a tick changed, for logging and redraw decisions.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameReport {
    pub zoomed: bool,
    pub camera_reset: bool,
    pub mode_changed: bool,
    pub color_changed: bool,
}

/// Applies one frame of input to the viewport.
///
/// `frame_time` is the frame delta in seconds. Pan speed is derived from the
/// zoom at the start of the frame, so a zoom step and a held pan key in the
/// same frame do not interact.
pub fn apply_frame_input(
    state: &mut ViewportState,
    geometry: &ScreenGeometry,
    input: &FrameInput,
    frame_time: f64,
) -> FrameReport {
    let mut report = FrameReport::default();

    if input.reset_camera {
        state.reset_camera();
        report.camera_reset = true;
    }

    let pan_speed = 1.0 / state.zoom * frame_time;
    let mut julia_speed = frame_time;
    if input.slow {
        julia_speed *= SLOW_FACTOR;
    }

    if input.toggle_mode {
        state.toggle_mode();
        report.mode_changed = true;
    }
    if input.toggle_color {
        state.toggle_color_mode();
        report.color_changed = true;
    }

    state.julia_c += input.julia_nudge * julia_speed;
    state.pan_offset += input.pan * pan_speed;

    let mut scroll = input.scroll;
    if input.slow {
        scroll *= SLOW_FACTOR;
    }

    state.zoom_speed += ZOOM_SPEED_STEP * input.zoom_speed_step;

    let cursor = input.cursor.unwrap_or_else(|| geometry.center());
    report.zoomed = apply_zoom(state, geometry, scroll, cursor);

    report
}
