//! Per-frame hand-off of the viewport to the rendering backend.

use crate::geometry::ScreenGeometry;
use crate::state::ViewportState;
use crate::vec2::DVec2;

/// Backend parameter names. These are the wire contract with the shader.
pub mod param {
    pub const SCREEN_SIZE: &str = "screenSize";
    pub const CENTER_OFFSET: &str = "centerOffset";
    pub const MOVE_OFFSET: &str = "moveOffset";
    pub const ZOOM: &str = "zoom";
    pub const JULIA_C: &str = "juliaC";
    pub const MODE: &str = "mode";
    pub const COLOR_MODE: &str = "colorMode";

    /// Every parameter, in push order.
    pub const ALL: [&str; 7] = [
        SCREEN_SIZE,
        CENTER_OFFSET,
        MOVE_OFFSET,
        ZOOM,
        JULIA_C,
        MODE,
        COLOR_MODE,
    ];
}

/// Typed value for a backend parameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamValue {
    Double(f64),
    DVec2(DVec2),
    Int(i32),
}

/// Capability the viewport core needs from a renderer.
///
/// The parameter table is write-only from this side; there is no read-back.
pub trait RenderingBackend {
    fn set_parameter(&mut self, name: &str, value: ParamValue);
}

/// Pushes the complete parameter set for the current state and geometry.
///
/// Call once per frame after input has been applied, and again after shader
/// (re)initialisation or a resize. Pushing the same state twice is harmless.
pub fn push_viewport<B>(backend: &mut B, state: &ViewportState, geometry: &ScreenGeometry)
where
    B: RenderingBackend + ?Sized,
{
    backend.set_parameter(param::SCREEN_SIZE, ParamValue::DVec2(geometry.screen_size()));
    backend.set_parameter(param::CENTER_OFFSET, ParamValue::DVec2(geometry.center_offset()));
    backend.set_parameter(param::MOVE_OFFSET, ParamValue::DVec2(state.pan_offset));
    backend.set_parameter(param::ZOOM, ParamValue::Double(state.zoom));
    backend.set_parameter(param::JULIA_C, ParamValue::DVec2(state.julia_c));
    backend.set_parameter(param::MODE, ParamValue::Int(state.mode.as_int()));
    backend.set_parameter(param::COLOR_MODE, ParamValue::Int(state.color_mode.as_int()));
}
