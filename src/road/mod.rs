//! Fixed lattice of roads crossing the play area.

use glam::{DVec3, Mat4, Quat, Vec3};

use crate::core::geometry::site::Site;

pub mod index;

/// Half of the side length of the square play area centered on the origin.
pub const PLAY_AREA_HALF_EXTENT: f64 = 50.0;

/// Distance between two neighboring parallel roads.
pub const ROAD_SPACING: f64 = 6.0;

pub const HORIZONTAL_ROAD_COUNT: usize = 10;
pub const VERTICAL_ROAD_COUNT: usize = 14;

/// Extra clearance added to the road thickness when excluding cells.
pub const ROAD_CLEARANCE: f64 = 0.005;

/// Half of the length of the stub stored as a road's start and end.
const ROAD_STUB_HALF_LENGTH: f64 = 0.1;

/// Height of the box rendered for a road.
const ROAD_BOX_HEIGHT: f32 = 0.05;

/// A straight road crossing the whole play area.
///
/// `start` and `end` only describe a short stub on the centerline;
/// the road itself always spans the full play area along its direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Road {
    pub start: Site,
    pub end: Site,
    pub is_horizontal: bool,
}

impl Road {
    /// A road running along the x axis at the given z.
    pub fn horizontal(z: f64) -> Self {
        Self {
            start: Site::new(-ROAD_STUB_HALF_LENGTH, z),
            end: Site::new(ROAD_STUB_HALF_LENGTH, z),
            is_horizontal: true,
        }
    }

    /// A road running along the z axis at the given x.
    pub fn vertical(x: f64) -> Self {
        Self {
            start: Site::new(x, -ROAD_STUB_HALF_LENGTH),
            end: Site::new(x, ROAD_STUB_HALF_LENGTH),
            is_horizontal: false,
        }
    }

    /// The axis across the road (0: x, 1: z).
    pub fn perpendicular_axis(&self) -> usize {
        if self.is_horizontal {
            1
        } else {
            0
        }
    }

    /// Coordinate of the centerline on the perpendicular axis.
    pub fn centerline(&self) -> f64 {
        self.start.axis(self.perpendicular_axis())
    }

    /// Distance from the site to the centerline, measured across the road.
    pub fn perpendicular_distance(&self, site: &Site) -> f64 {
        (site.axis(self.perpendicular_axis()) - self.centerline()).abs()
    }

    /// Whether the site is too close to the road to build on.
    pub fn excludes(&self, site: &Site, road_thickness: f64) -> bool {
        self.perpendicular_distance(site) < road_thickness + ROAD_CLEARANCE
    }

    pub fn direction(&self) -> Site {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Unit vector on the ground plane, normal to the road.
    ///
    /// Negate it for the other side.
    pub fn in_plane_normal(&self) -> Site {
        let direction = self.direction();
        let normal = DVec3::Y
            .cross(DVec3::new(direction.x, 0.0, direction.y))
            .normalize_or_zero();
        Site::new(normal.x, normal.z)
    }

    /// Transform placing a unit box over the road.
    pub fn transform(&self, road_thickness: f64) -> RoadTransform {
        let centerline = self.centerline() as f32;
        let scale = Vec3::new(
            (2.0 * PLAY_AREA_HALF_EXTENT) as f32,
            ROAD_BOX_HEIGHT,
            (2.0 * road_thickness) as f32,
        );
        if self.is_horizontal {
            RoadTransform {
                translation: Vec3::new(0.0, 0.0, centerline),
                rotation: 0.0,
                scale,
            }
        } else {
            RoadTransform {
                translation: Vec3::new(centerline, 0.0, 0.0),
                rotation: std::f32::consts::FRAC_PI_2,
                scale,
            }
        }
    }
}

/// Placement of one road box for instanced rendering.
///
/// The box is a unit cube centered on the origin; `rotation` is about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadTransform {
    pub translation: Vec3,
    pub rotation: f32,
    pub scale: Vec3,
}

impl RoadTransform {
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_y(self.rotation),
            self.translation,
        )
    }

    /// Flat instance attributes: translation, rotation, scale.
    pub fn to_instance_data(&self) -> [f32; 7] {
        [
            self.translation.x,
            self.translation.y,
            self.translation.z,
            self.rotation,
            self.scale.x,
            self.scale.y,
            self.scale.z,
        ]
    }
}

/// The lattice of roads together with their render transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadNetwork {
    roads: Vec<Road>,
    transforms: Vec<RoadTransform>,
}

impl RoadNetwork {
    /// Lay out the horizontal roads first, then the vertical ones.
    pub fn build(road_thickness: f64) -> Self {
        let roads = lattice_offsets(HORIZONTAL_ROAD_COUNT)
            .map(Road::horizontal)
            .chain(lattice_offsets(VERTICAL_ROAD_COUNT).map(Road::vertical))
            .collect::<Vec<_>>();
        let transforms = roads
            .iter()
            .map(|road| road.transform(road_thickness))
            .collect();
        Self { roads, transforms }
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn transforms(&self) -> &[RoadTransform] {
        &self.transforms
    }

    pub fn into_parts(self) -> (Vec<Road>, Vec<RoadTransform>) {
        (self.roads, self.transforms)
    }
}

/// Offsets of `count` parallel roads, centered on the origin.
fn lattice_offsets(count: usize) -> impl Iterator<Item = f64> {
    let first = -(count as f64 - 1.0) * 0.5 * ROAD_SPACING;
    (0..count).map(move |i| first + i as f64 * ROAD_SPACING)
}
