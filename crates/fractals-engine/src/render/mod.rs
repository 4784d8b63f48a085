//! GPU rendering subsystem.
//!
//! Convention: pixel positions are physical, origin top-left, +Y down. The
//! fractal shader works in a y-up world plane (see `fractals_view::mapper`).

mod ctx;
mod fractal;

pub use ctx::{RenderCtx, RenderTarget};
pub use fractal::{FractalRenderer, ShaderSource};
