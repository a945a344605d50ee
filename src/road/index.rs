use rstar::{RTree, RTreeObject, AABB};

use crate::core::geometry::{rect::Rect, site::Site};

use super::{Road, PLAY_AREA_HALF_EXTENT, ROAD_CLEARANCE};

/// Margin added around each band so that rounding never hides a road from a query.
const BAND_MARGIN: f64 = 1e-9;

/// The area around a road in which no cell is buildable.
#[derive(Debug, Clone)]
struct RoadBand {
    rect: Rect,
    road: Road,
}

impl RTreeObject for RoadBand {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.rect.envelope()
    }
}

/// Spatial index over the exclusion bands of roads.
///
/// Answers the same question as scanning every road, but only tests the
/// roads whose band contains the queried site.
pub struct RoadIndex {
    tree: RTree<RoadBand>,
    road_thickness: f64,
}

impl RoadIndex {
    pub fn new(roads: &[Road], road_thickness: f64) -> Self {
        let half_width = road_thickness + ROAD_CLEARANCE + BAND_MARGIN;
        // Long enough to cover every position the validity grid can produce.
        let reach = PLAY_AREA_HALF_EXTENT * 4.0;
        let bands = roads
            .iter()
            .map(|road| {
                let center = road.centerline();
                let rect = if road.is_horizontal {
                    Rect::from_sites(
                        &Site::new(-reach, center - half_width),
                        &Site::new(reach, center + half_width),
                    )
                } else {
                    Rect::from_sites(
                        &Site::new(center - half_width, -reach),
                        &Site::new(center + half_width, reach),
                    )
                };
                RoadBand { rect, road: *road }
            })
            .collect();
        Self {
            tree: RTree::bulk_load(bands),
            road_thickness,
        }
    }

    /// Whether any road excludes the site.
    pub fn excludes(&self, site: &Site) -> bool {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([site.x, site.y]))
            .any(|band| band.road.excludes(site, self.road_thickness))
    }
}
