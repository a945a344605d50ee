use rstar::RTreeObject;

use super::site::Site;

/// Representation of an axis-aligned rectangle on the ground plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// Create a rectangle from x, y, width, and height.
    fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two sites.
    pub fn from_sites(start: &Site, end: &Site) -> Self {
        let x = start.x.min(end.x);
        let y = start.y.min(end.y);
        let width = start.x.max(end.x) - x;
        let height = start.y.max(end.y) - y;
        Self::new(x, y, width, height)
    }
}

impl RTreeObject for Rect {
    type Envelope = rstar::AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        rstar::AABB::from_corners(
            [self.x, self.y],
            [self.x + self.width, self.y + self.height],
        )
    }
}
