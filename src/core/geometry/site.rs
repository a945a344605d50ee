use super::angle::Angle;

/// Representation of a 2D site on the ground plane.
///
/// `x` is the world x axis and `y` is the world z axis.
#[derive(Debug, Default, Copy, Clone)]
pub struct Site {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Site {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Site {
    /// Create a site from x and y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Get the coordinate on the given axis (0: x, 1: y).
    pub fn axis(&self, axis: usize) -> f64 {
        if axis == 0 {
            self.x
        } else {
            self.y
        }
    }

    /// Calculate the euclidean distance to the other site.
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// Calculate the squared euclidean distance to the other site.
    pub fn distance_2(&self, other: &Self) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    /// Dot product with the other site treated as a vector.
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Calculate the site moved by the angle and distance.
    pub fn extend(&self, angle: Angle, distance: f64) -> Self {
        let x = self.x + angle.radian().cos() * distance;
        let y = self.y + angle.radian().sin() * distance;
        Self::new(x, y)
    }

    /// Component-wise floor.
    pub fn floor(&self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Component-wise fractional part, always in `[0, 1)`.
    pub fn fract(&self) -> Self {
        Self::new(self.x - self.x.floor(), self.y - self.y.floor())
    }
}

impl std::ops::Add for Site {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Site {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f64> for Site {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}
