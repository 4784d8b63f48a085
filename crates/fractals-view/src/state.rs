use crate::error::ViewError;
use crate::vec2::DVec2;

/// Lower bound for the zoom factor. Zoom steps clamp to this value so the
/// mapping never divides by zero or flips sign.
pub const ZOOM_MIN: f64 = 0.1;

/// Zoom applied by [`ViewportState::reset_camera`].
pub const RESET_ZOOM: f64 = 0.5;

/// Which member of the fractal family the shader evaluates.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FractalMode {
    Mandelbrot,
    #[default]
    Julia,
}

impl FractalMode {
    /// Shader-side selector (`0` = Mandelbrot, `1` = Julia).
    #[inline]
    pub const fn as_int(self) -> i32 {
        match self {
            FractalMode::Mandelbrot => 0,
            FractalMode::Julia => 1,
        }
    }

    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            FractalMode::Mandelbrot => FractalMode::Julia,
            FractalMode::Julia => FractalMode::Mandelbrot,
        }
    }
}

/// Colour scheme selector.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ColorMode {
    #[default]
    Scheme0,
    Scheme1,
}

impl ColorMode {
    #[inline]
    pub const fn as_int(self) -> i32 {
        match self {
            ColorMode::Scheme0 => 0,
            ColorMode::Scheme1 => 1,
        }
    }

    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            ColorMode::Scheme0 => ColorMode::Scheme1,
            ColorMode::Scheme1 => ColorMode::Scheme0,
        }
    }
}

/// Component of the Julia constant addressed by text entry.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum JuliaAxis {
    Re,
    Im,
}

/// Mutable viewport data shared by the mapper, zoom controller and sync.
///
/// Owned by the top-level frame loop and passed by reference to every
/// component; nothing here is global.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportState {
    /// Zoom factor; `>= ZOOM_MIN` once any zoom step has been applied.
    pub zoom: f64,

    /// Pan translation in world units.
    pub pan_offset: DVec2,

    /// User-tunable multiplier for wheel zoom.
    pub zoom_speed: f64,

    /// Julia-set constant; only meaningful in [`FractalMode::Julia`].
    pub julia_c: DVec2,

    pub mode: FractalMode,
    pub color_mode: ColorMode,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_offset: DVec2::zero(),
            zoom_speed: 0.5,
            julia_c: DVec2::zero(),
            mode: FractalMode::default(),
            color_mode: ColorMode::default(),
        }
    }
}

impl ViewportState {
    /// Returns the camera to its home position.
    ///
    /// Only zoom and pan are touched; mode, colours, zoom speed and the
    /// Julia constant survive a reset.
    pub fn reset_camera(&mut self) {
        self.zoom = RESET_ZOOM;
        self.pan_offset = DVec2::zero();
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn toggle_color_mode(&mut self) {
        self.color_mode = self.color_mode.toggled();
    }

    /// Commits a user-entered number to one component of the Julia constant.
    ///
    /// On error the state is left untouched.
    pub fn set_julia_component(&mut self, axis: JuliaAxis, text: &str) -> Result<f64, ViewError> {
        let value = parse_number(text)?;
        match axis {
            JuliaAxis::Re => self.julia_c.x = value,
            JuliaAxis::Im => self.julia_c.y = value,
        }
        Ok(value)
    }
}

/// Parses a Julia constant written as `re,im` (e.g. `-0.8,0.156`).
pub fn parse_julia_constant(text: &str) -> Result<DVec2, ViewError> {
    let Some((re, im)) = text.split_once(',') else {
        return Err(ViewError::InvalidNumber { text: text.to_string() });
    };
    Ok(DVec2::new(parse_number(re)?, parse_number(im)?))
}

/// Parses one finite number; surrounding whitespace is ignored.
pub fn parse_number(text: &str) -> Result<f64, ViewError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ViewError::InvalidNumber { text: text.to_string() })
}
