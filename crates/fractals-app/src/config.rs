//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use fractals_engine::device::GpuInit;
use fractals_engine::logging::LoggingConfig;
use fractals_engine::render::ShaderSource;
use fractals_engine::window::RuntimeConfig;
use fractals_view::{DVec2, FractalMode, ViewportState, parse_julia_constant, parse_number};
use winit::dpi::PhysicalSize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    Mandelbrot,
    Julia,
}

impl From<ModeArg> for FractalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Mandelbrot => FractalMode::Mandelbrot,
            ModeArg::Julia => FractalMode::Julia,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fractals")]
#[command(about = "Interactive Mandelbrot / Julia explorer", version)]
pub struct Args {
    /// Initial window width in physical pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Initial window height in physical pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Start in borderless fullscreen
    #[arg(long)]
    pub fullscreen: bool,

    /// Frame-rate cap (0 = uncapped)
    #[arg(long, default_value_t = 120)]
    pub fps: u32,

    /// Wheel zoom multiplier
    #[arg(long, default_value_t = 0.5, value_parser = parse_number)]
    pub zoom_speed: f64,

    /// Julia constant as `re,im`, e.g. `-0.8,0.156`
    #[arg(long, value_parser = parse_julia_constant, allow_hyphen_values = true)]
    pub julia: Option<DVec2>,

    /// Fractal shown at startup
    #[arg(long, value_enum, default_value_t = ModeArg::Julia)]
    pub mode: ModeArg,

    /// WGSL shader file; reloaded from disk with R
    #[arg(long)]
    pub shader: Option<PathBuf>,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long = "log")]
    pub log_filter: Option<String>,

    /// Sync presentation to the display refresh (default)
    #[arg(long, overrides_with = "no_vsync")]
    pub vsync: bool,

    /// Present immediately; the frame-rate cap still applies
    #[arg(long, overrides_with = "vsync")]
    pub no_vsync: bool,
}

impl Args {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            initial_size: PhysicalSize::new(self.width.max(1), self.height.max(1)),
            fullscreen: self.fullscreen,
            target_fps: (self.fps > 0).then_some(self.fps),
            ..RuntimeConfig::default()
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        let present_mode = if self.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::AutoVsync
        };
        GpuInit { present_mode, ..GpuInit::default() }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_filter.clone(),
            ..LoggingConfig::default()
        }
    }

    pub fn shader_source(&self) -> ShaderSource {
        match &self.shader {
            Some(path) => ShaderSource::File(path.clone()),
            None => ShaderSource::Embedded,
        }
    }

    pub fn initial_state(&self) -> ViewportState {
        ViewportState {
            zoom_speed: self.zoom_speed,
            julia_c: self.julia.unwrap_or_default(),
            mode: self.mode.into(),
            ..ViewportState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("fractals").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_classic_window() {
        let args = parse(&[]);
        let rt = args.runtime_config();
        assert_eq!(rt.initial_size, PhysicalSize::new(1000, 800));
        assert_eq!(rt.target_fps, Some(120));
        assert_eq!(args.initial_state(), ViewportState::default());
        assert_eq!(args.shader_source(), ShaderSource::Embedded);
        assert_eq!(args.gpu_init().present_mode, wgpu::PresentMode::AutoVsync);
    }

    #[test]
    fn julia_constant_accepts_negative_parts() {
        let args = parse(&["--julia", "-0.8,0.156", "--mode", "julia"]);
        assert_eq!(args.initial_state().julia_c, DVec2::new(-0.8, 0.156));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let bad = |argv: &[&str]| {
            Args::try_parse_from(std::iter::once("fractals").chain(argv.iter().copied())).is_err()
        };
        assert!(bad(&["--julia", "0.3"]));
        assert!(bad(&["--julia", "abc,1"]));
        assert!(bad(&["--zoom-speed", "nan"]));
    }

    #[test]
    fn zero_fps_disables_the_cap() {
        let args = parse(&["--fps", "0", "--no-vsync", "--mode", "mandelbrot"]);
        assert_eq!(args.runtime_config().target_fps, None);
        assert_eq!(args.gpu_init().present_mode, wgpu::PresentMode::AutoNoVsync);
        assert_eq!(args.initial_state().mode, FractalMode::Mandelbrot);
    }

    #[test]
    fn last_vsync_flag_wins() {
        let args = parse(&["--no-vsync", "--vsync"]);
        assert!(!args.no_vsync);
    }
}
