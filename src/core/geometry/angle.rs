use std::f64::consts::PI;

/// Provides calculation of angles.
#[derive(Debug, Clone, Copy)]
pub struct Angle(f64);

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Angle {}

impl Angle {
    /// Create an angle from the radian.
    pub fn new(radian: f64) -> Self {
        Self(radian).normalize()
    }

    /// Get the radian.
    pub fn radian(&self) -> f64 {
        self.0
    }

    /// Normalize to the range of (-PI, PI].
    fn normalize(&self) -> Self {
        let radian = self.0.rem_euclid(2.0 * PI);
        let radian = if radian > PI {
            radian - 2.0 * PI
        } else {
            radian
        };
        Self(radian)
    }

    /// Rotate counterclockwise by the radian.
    pub fn rotated(&self, radian: f64) -> Self {
        Self::new(self.0 + radian)
    }
}
