use core::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// 2D vector in double precision.
///
/// Used for screen positions (physical pixels) and world-plane positions alike;
/// the meaning comes from the function consuming it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DVec2 {
    pub x: f64,
    pub y: f64,
}

impl DVec2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn min_element(self) -> f64 {
        self.x.min(self.y)
    }
}

impl Add for DVec2 {
    type Output = DVec2;
    #[inline]
    fn add(self, rhs: DVec2) -> DVec2 {
        DVec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for DVec2 {
    #[inline]
    fn add_assign(&mut self, rhs: DVec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for DVec2 {
    type Output = DVec2;
    #[inline]
    fn sub(self, rhs: DVec2) -> DVec2 {
        DVec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for DVec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: DVec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for DVec2 {
    type Output = DVec2;
    #[inline]
    fn mul(self, rhs: f64) -> DVec2 {
        DVec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for DVec2 {
    type Output = DVec2;
    #[inline]
    fn div(self, rhs: f64) -> DVec2 {
        DVec2::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for DVec2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
