//! Dense map of buildable land.
//!
//! Cells are addressed by `(i_idx, j_idx)` in `[0, width)`, flattened as
//! `i_idx + width * j_idx`. The cell `(i_idx, j_idx)` sits at world position
//! `((i_min + i_idx) * cell_size, (i_min + j_idx) * cell_size)`, where
//! `i_min = -floor(50 / cell_size)`.

use tracing::debug;

use crate::{
    core::geometry::site::Site,
    error::CityError,
    road::{index::RoadIndex, Road, PLAY_AREA_HALF_EXTENT},
    traits::TerrainProvider,
};

/// Largest number of cells a grid may hold.
///
/// Cell sizes down to about 0.006 stay below this cap.
pub const MAX_GRID_CELLS: usize = 1 << 28;

/// Number of cells along one side of the grid.
pub fn grid_width(cell_size: f64) -> Result<usize, CityError> {
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(CityError::InvalidConfiguration(format!(
            "cell size must be a positive finite number, got {cell_size}"
        )));
    }
    let cells_per_side = (2.0 * PLAY_AREA_HALF_EXTENT / cell_size).floor();
    let too_small = || {
        CityError::InvalidConfiguration(format!(
            "cell size {cell_size} needs more than {MAX_GRID_CELLS} grid cells"
        ))
    };
    // Checked in f64 first so the cast below cannot saturate.
    if cells_per_side + 1.0 > (MAX_GRID_CELLS as f64).sqrt() {
        return Err(too_small());
    }
    let width = cells_per_side as usize + 1;
    match width.checked_mul(width) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok(width),
        _ => Err(too_small()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidityGrid {
    cell_size: f64,
    width: usize,
    i_min: i64,
    cells: Vec<bool>,
}

impl ValidityGrid {
    /// Build the grid by testing every cell against every road.
    pub fn build<T: TerrainProvider>(
        cell_size: f64,
        road_thickness: f64,
        roads: &[Road],
        terrain: &T,
    ) -> Result<Self, CityError> {
        Self::build_with(cell_size, terrain, |site| {
            roads
                .iter()
                .any(|road| road.excludes(site, road_thickness))
        })
    }

    /// Build the grid, looking roads up through a [`RoadIndex`].
    ///
    /// Produces the same grid as [`ValidityGrid::build`], which scans every
    /// road per cell; prefer this one for very fine cell sizes.
    pub fn build_indexed<T: TerrainProvider>(
        cell_size: f64,
        road_thickness: f64,
        roads: &[Road],
        terrain: &T,
    ) -> Result<Self, CityError> {
        let index = RoadIndex::new(roads, road_thickness);
        Self::build_with(cell_size, terrain, |site| index.excludes(site))
    }

    fn build_with<T, F>(cell_size: f64, terrain: &T, near_road: F) -> Result<Self, CityError>
    where
        T: TerrainProvider,
        F: Fn(&Site) -> bool,
    {
        let width = grid_width(cell_size)?;
        let i_min = -(PLAY_AREA_HALF_EXTENT / cell_size).floor() as i64;
        let mut grid = Self {
            cell_size,
            width,
            i_min,
            cells: Vec::with_capacity(width * width),
        };

        for j_idx in 0..width {
            for i_idx in 0..width {
                let site = grid.world_position(i_idx, j_idx);
                let valid = !near_road(&site) && !terrain.is_water(&site);
                grid.cells.push(valid);
            }
        }

        debug!(
            width,
            valid = grid.valid_count(),
            "built validity grid with cell size {}",
            cell_size
        );
        Ok(grid)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of cells along one side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of buildable cells.
    pub fn valid_count(&self) -> usize {
        self.cells.iter().filter(|valid| **valid).count()
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn flatten(&self, i_idx: usize, j_idx: usize) -> usize {
        i_idx + self.width * j_idx
    }

    /// Inverse of [`ValidityGrid::flatten`].
    pub fn unflatten(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Whether the cell is buildable.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside `[0, width)`.
    pub fn valid_at(&self, i_idx: usize, j_idx: usize) -> bool {
        assert!(
            i_idx < self.width && j_idx < self.width,
            "cell ({i_idx}, {j_idx}) is outside a grid of width {}",
            self.width
        );
        self.cells[self.flatten(i_idx, j_idx)]
    }

    /// Like [`ValidityGrid::valid_at`], but returns `None` outside the grid.
    pub fn get(&self, i_idx: usize, j_idx: usize) -> Option<bool> {
        if i_idx < self.width && j_idx < self.width {
            Some(self.cells[self.flatten(i_idx, j_idx)])
        } else {
            None
        }
    }

    /// World position of the cell's origin corner.
    pub fn world_position(&self, i_idx: usize, j_idx: usize) -> Site {
        Site::new(
            (self.i_min + i_idx as i64) as f64 * self.cell_size,
            (self.i_min + j_idx as i64) as f64 * self.cell_size,
        )
    }

    /// The cell whose footprint `[origin, origin + cell_size)` contains the site.
    pub fn cell_of(&self, site: &Site) -> Option<(usize, usize)> {
        let to_index = |coordinate: f64| {
            let index = (coordinate / self.cell_size).floor() as i64 - self.i_min;
            usize::try_from(index).ok().filter(|index| *index < self.width)
        };
        Some((to_index(site.x)?, to_index(site.y)?))
    }

    /// Flattened indices of the buildable cells, in ascending order.
    pub fn valid_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, valid)| valid.then_some(index))
    }
}

#[cfg(test)]
mod tests {
    use crate::road::RoadNetwork;
    use crate::terrain::ValueNoiseTerrain;
    use crate::traits::{MockFlatTerrain, MockWaterTerrain};

    use super::*;

    #[test]
    fn test_grid_size() {
        for (cell_size, width) in [(0.25, 401), (0.5, 201), (1.0, 101), (2.0, 51)] {
            let grid = ValidityGrid::build(cell_size, 0.2, &[], &MockFlatTerrain).unwrap();
            assert_eq!(grid.width(), width);
            assert_eq!(grid.len(), width * width);
        }
    }

    #[test]
    fn test_grid_width_cap() {
        // 16384 cells per side is the largest width under the cap.
        assert_eq!(grid_width(100.0 / 16383.0).unwrap(), 16384);
        assert!(matches!(
            grid_width(100.0 / 16384.0),
            Err(CityError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_grid_is_centered() {
        let grid = ValidityGrid::build(0.5, 0.2, &[], &MockFlatTerrain).unwrap();
        assert_eq!(grid.world_position(0, 0), Site::new(-50.0, -50.0));
        assert_eq!(grid.world_position(100, 100), Site::new(0.0, 0.0));
        assert_eq!(grid.world_position(200, 200), Site::new(50.0, 50.0));
    }

    #[test]
    fn test_invalid_cell_size() {
        for cell_size in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e-300, 2.5e-8, 0.001] {
            assert!(matches!(
                ValidityGrid::build(cell_size, 0.2, &[], &MockFlatTerrain),
                Err(CityError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_road_exclusion() {
        let roads = [Road::horizontal(0.0)];
        let grid = ValidityGrid::build(0.1, 0.2, &roads, &MockFlatTerrain).unwrap();
        for j_idx in 0..grid.width() {
            for i_idx in (0..grid.width()).step_by(37) {
                let site = grid.world_position(i_idx, j_idx);
                assert_eq!(grid.valid_at(i_idx, j_idx), site.y.abs() >= 0.205);
            }
        }
        // z = -0.2, -0.1, 0.0, 0.1, 0.2 are covered by the road.
        let (i_idx, _) = grid.cell_of(&Site::new(0.0, 0.0)).unwrap();
        let blocked = (0..grid.width())
            .filter(|j_idx| !grid.valid_at(i_idx, *j_idx))
            .count();
        assert_eq!(blocked, 5);
    }

    #[test]
    fn test_water_exclusion() {
        let grid = ValidityGrid::build(1.0, 0.2, &[], &MockWaterTerrain).unwrap();
        assert_eq!(grid.valid_count(), 0);
        assert_eq!(grid.valid_indices().count(), 0);
    }

    #[test]
    fn test_flatten_round_trip() {
        let grid = ValidityGrid::build(2.0, 0.2, &[], &MockFlatTerrain).unwrap();
        for j_idx in 0..grid.width() {
            for i_idx in 0..grid.width() {
                let index = grid.flatten(i_idx, j_idx);
                assert!(index < grid.len());
                assert_eq!(grid.unflatten(index), (i_idx, j_idx));
            }
        }
    }

    #[test]
    fn test_cell_of() {
        let grid = ValidityGrid::build(0.5, 0.2, &[], &MockFlatTerrain).unwrap();
        assert_eq!(grid.cell_of(&Site::new(-50.0, -50.0)), Some((0, 0)));
        assert_eq!(grid.cell_of(&Site::new(0.3, 0.7)), Some((100, 101)));
        assert_eq!(grid.cell_of(&Site::new(-50.1, 0.0)), None);
        assert_eq!(grid.cell_of(&Site::new(0.0, 50.6)), None);
    }

    #[test]
    fn test_get_outside() {
        let grid = ValidityGrid::build(2.0, 0.2, &[], &MockFlatTerrain).unwrap();
        assert_eq!(grid.get(0, 0), Some(true));
        assert_eq!(grid.get(grid.width(), 0), None);
    }

    #[test]
    #[should_panic]
    fn test_valid_at_outside() {
        let grid = ValidityGrid::build(2.0, 0.2, &[], &MockFlatTerrain).unwrap();
        grid.valid_at(0, grid.width());
    }

    #[test]
    fn test_indexed_matches_linear_scan() {
        let road_thickness = 0.2;
        let network = RoadNetwork::build(road_thickness);
        let terrain = ValueNoiseTerrain::new();
        for cell_size in [0.5, 1.0, 0.3] {
            let linear =
                ValidityGrid::build(cell_size, road_thickness, network.roads(), &terrain).unwrap();
            let indexed =
                ValidityGrid::build_indexed(cell_size, road_thickness, network.roads(), &terrain)
                    .unwrap();
            assert_eq!(linear, indexed);
        }
    }
}
