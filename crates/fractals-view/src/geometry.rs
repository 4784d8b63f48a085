use crate::error::ViewError;
use crate::vec2::DVec2;

/// Screen-derived constants, recomputed whenever the window is resized.
///
/// Construction rejects zero, negative and non-finite sizes, so every
/// `ScreenGeometry` in circulation is safe to hand to the mapper.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenGeometry {
    screen_size: DVec2,
    center_offset: DVec2,
}

impl ScreenGeometry {
    pub fn new(width: f64, height: f64) -> Result<Self, ViewError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ViewError::DegenerateScreen { width, height });
        }

        let screen_size = DVec2::new(width, height);
        Ok(Self {
            screen_size,
            center_offset: center_offset(screen_size),
        })
    }

    /// Convenience constructor from integer pixel dimensions.
    pub fn from_pixels(width: u32, height: u32) -> Result<Self, ViewError> {
        Self::new(width as f64, height as f64)
    }

    /// Current window size in pixels.
    #[inline]
    pub fn screen_size(&self) -> DVec2 {
        self.screen_size
    }

    /// Recentering term pushed to the shader as `centerOffset`.
    #[inline]
    pub fn center_offset(&self) -> DVec2 {
        self.center_offset
    }

    /// Centre of the screen in pixels.
    #[inline]
    pub fn center(&self) -> DVec2 {
        self.screen_size * 0.5
    }

    /// Recomputes the geometry for a new window size.
    ///
    /// Returns `Ok(true)` when the geometry changed. A degenerate size
    /// (e.g. a minimised window) is rejected and the previous geometry kept.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<bool, ViewError> {
        let next = Self::new(width, height)?;
        let changed = next != *self;
        *self = next;
        Ok(changed)
    }
}

/// `1 - ndc` of the full screen size, per axis.
///
/// Both axes are normalised by the shorter side, so on a non-square window the
/// longer axis overshoots `[-1, 1]`; this term pulls the plane back.
pub fn center_offset(screen_size: DVec2) -> DVec2 {
    let s = screen_size.min_element();
    DVec2::new(
        1.0 - (screen_size.x / s * 2.0 - 1.0),
        1.0 - (screen_size.y / s * 2.0 - 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_center_offset() {
        let g = ScreenGeometry::new(800.0, 600.0).unwrap();
        assert_eq!(g.center_offset().x, 1.0 - (800.0 / 600.0 * 2.0 - 1.0));
        assert_eq!(g.center_offset().y, 1.0);
    }

    #[test]
    fn portrait_center_offset() {
        let g = ScreenGeometry::new(600.0, 900.0).unwrap();
        assert_eq!(g.center_offset().x, 1.0);
        assert_eq!(g.center_offset().y, 1.0 - (900.0 / 600.0 * 2.0 - 1.0));
    }

    #[test]
    fn square_center_offset_follows_formula() {
        // 800/800*2-1 == 1, so the offset is 0 on both axes (not 1).
        let g = ScreenGeometry::new(800.0, 800.0).unwrap();
        assert_eq!(g.center_offset(), DVec2::zero());
    }

    #[test]
    fn degenerate_sizes_rejected() {
        assert!(ScreenGeometry::new(0.0, 600.0).is_err());
        assert!(ScreenGeometry::new(800.0, 0.0).is_err());
        assert!(ScreenGeometry::new(-1.0, 600.0).is_err());
        assert!(ScreenGeometry::new(f64::NAN, 600.0).is_err());
        assert!(ScreenGeometry::from_pixels(0, 0).is_err());
    }

    #[test]
    fn resize_reports_change_and_keeps_previous_on_error() {
        let mut g = ScreenGeometry::new(1000.0, 800.0).unwrap();
        assert_eq!(g.resize(1000.0, 800.0), Ok(false));
        assert_eq!(g.resize(800.0, 600.0), Ok(true));
        assert_eq!(g.screen_size(), DVec2::new(800.0, 600.0));

        let before = g;
        assert!(g.resize(0.0, 0.0).is_err());
        assert_eq!(g, before);
    }

    #[test]
    fn center_is_half_the_size() {
        let g = ScreenGeometry::from_pixels(1000, 800).unwrap();
        assert_eq!(g.center(), DVec2::new(500.0, 400.0));
    }
}
