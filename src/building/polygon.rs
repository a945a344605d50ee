use std::f64::consts::PI;

use glam::Vec4;

use crate::core::geometry::{angle::Angle, site::Site};

/// Length of every edge of a floor plan.
const EDGE_LENGTH: f64 = 1.0;

/// A flat, regular floor plan at a fixed height.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    sides: u32,
    height: f64,
    center: Site,
    vertices: Vec<Site>,
}

impl Polygon {
    /// Create a regular polygon with unit edges around the center.
    ///
    /// The first vertex lies on the positive x side of the center and the
    /// rest follow counterclockwise. At least three sides are always used.
    pub fn new(sides: u32, height: f64, center: Site) -> Self {
        let sides = sides.max(3);
        let n = sides as f64;
        let radius = EDGE_LENGTH / (2.0 * (PI / n).sin());
        let interior_angle = PI * (n - 2.0) / n;
        let exterior_angle = PI - interior_angle;

        let mut vertices = Vec::with_capacity(sides as usize);
        let mut vertex = Site::new(center.x + radius, center.y);
        let mut heading = Angle::new(PI - interior_angle * 0.5);
        for _ in 0..sides {
            vertices.push(vertex);
            vertex = vertex.extend(heading, EDGE_LENGTH);
            heading = heading.rotated(exterior_angle);
        }

        Self {
            sides,
            height,
            center,
            vertices,
        }
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> Site {
        self.center
    }

    pub fn vertices(&self) -> &[Site] {
        &self.vertices
    }

    /// Buffers for drawing the floor as a closed triangle fan.
    pub fn geometry(&self) -> FloorGeometry {
        let height = self.height as f32;
        let positions = self
            .vertices
            .iter()
            .map(|vertex| Vec4::new(vertex.x as f32, height, vertex.y as f32, 1.0))
            .collect::<Vec<_>>();
        let normals = vec![Vec4::new(0.0, 1.0, 0.0, 0.0); positions.len()];
        let indices = (0..self.sides)
            .flat_map(|i| [0, i, (i + 1) % self.sides])
            .collect();
        FloorGeometry {
            positions,
            normals,
            indices,
        }
    }
}

/// Render buffers of one floor.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorGeometry {
    /// Homogeneous positions `(x, height, z, 1)`.
    pub positions: Vec<Vec4>,
    /// Upward normal of every vertex.
    pub normals: Vec<Vec4>,
    /// Triangle list; every triangle starts at vertex 0.
    pub indices: Vec<u32>,
}

impl FloorGeometry {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
