//! Fractals: interactive Mandelbrot / Julia explorer.

mod app;
mod bindings;
mod config;
mod entry;

use anyhow::Result;
use clap::Parser;
use fractals_engine::logging::init_logging;
use fractals_engine::render::FractalRenderer;
use fractals_engine::window::Runtime;

use crate::app::FractalsApp;
use crate::config::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.logging_config());

    let runtime = args.runtime_config();
    let renderer = FractalRenderer::new(args.shader_source());
    log::info!("shader source: {:?}", renderer.source());

    let size = runtime.initial_size;
    let app = FractalsApp::new(
        args.initial_state(),
        renderer,
        (size.width, size.height),
        runtime.title.clone(),
    )?;

    Runtime::run(runtime, args.gpu_init(), app)
}
