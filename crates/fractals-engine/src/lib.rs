//! Fractals engine crate.
//!
//! Platform and GPU runtime for the fractal viewer: window and event loop,
//! input translation, frame timing, the wgpu device and the fractal renderer.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
