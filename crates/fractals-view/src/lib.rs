//! Viewport core for the fractal explorer.
//!
//! Maps screen pixels to the fractal plane, zooms around the cursor and hands
//! the resulting parameters to a rendering backend once per frame. Everything
//! here is synchronous, single-threaded and free of platform types.

mod error;
mod geometry;
mod state;
mod vec2;

pub mod controls;
pub mod info;
pub mod mapper;
pub mod sync;
pub mod zoom;

pub use error::ViewError;
pub use geometry::{ScreenGeometry, center_offset};
pub use state::{
    ColorMode, FractalMode, JuliaAxis, RESET_ZOOM, ViewportState, ZOOM_MIN, parse_julia_constant,
    parse_number,
};
pub use vec2::DVec2;

pub use controls::{FrameInput, FrameReport, apply_frame_input};
pub use mapper::{displayed_world, screen_to_world};
pub use sync::{ParamValue, RenderingBackend, push_viewport};
pub use zoom::apply_zoom;
