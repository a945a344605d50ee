use tracing::{debug, info};

use crate::{
    building::Building,
    core::geometry::site::Site,
    error::CityError,
    grid::{grid_width, ValidityGrid},
    random::RandomF64,
    road::{Road, RoadNetwork, RoadTransform},
    sampler,
    traits::{RandomF64Provider, TerrainProvider},
};

/// Highest roof a building may get.
pub const MAX_BUILDING_HEIGHT: f64 = 1000.0;

/// Parameters of a generated city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityConfig {
    /// Side length of one validity grid cell. Smaller is finer.
    pub cell_size: f64,

    /// Half of the width of a road.
    pub road_thickness: f64,

    /// Number of sites to put buildings on.
    pub n_buildings: usize,

    /// Seed of the random stream. The stream is seeded from the system when `None`.
    pub rng_seed: Option<u64>,

    /// Lowest possible height of a building's roof.
    pub building_height_min: f64,

    /// Roof heights are drawn below this value.
    pub building_height_max: f64,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            cell_size: 0.5,
            road_thickness: 0.2,
            n_buildings: 20,
            rng_seed: None,
            building_height_min: 4.0,
            building_height_max: 16.0,
        }
    }
}

impl CityConfig {
    /// Set the side length of one validity grid cell.
    pub fn cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set half of the width of a road.
    pub fn road_thickness(mut self, road_thickness: f64) -> Self {
        self.road_thickness = road_thickness;
        self
    }

    /// Set the number of sites to put buildings on.
    pub fn n_buildings(mut self, n_buildings: usize) -> Self {
        self.n_buildings = n_buildings;
        self
    }

    /// Set the seed of the random stream.
    pub fn rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    /// Set the range the roof heights are drawn from.
    pub fn building_height_range(mut self, min: f64, max: f64) -> Self {
        self.building_height_min = min;
        self.building_height_max = max;
        self
    }

    /// Check the configuration before generating anything.
    pub fn validate(&self) -> Result<(), CityError> {
        grid_width(self.cell_size)?;
        if !self.road_thickness.is_finite() || self.road_thickness < 0.0 {
            return Err(CityError::InvalidConfiguration(format!(
                "road thickness must be a non-negative finite number, got {}",
                self.road_thickness
            )));
        }
        let (min, max) = (self.building_height_min, self.building_height_max);
        if !(0.0..=MAX_BUILDING_HEIGHT).contains(&min)
            || !(min..=MAX_BUILDING_HEIGHT).contains(&max)
        {
            return Err(CityError::InvalidConfiguration(format!(
                "building heights must satisfy 0 <= min <= max <= {MAX_BUILDING_HEIGHT}, \
                 got [{min}, {max})"
            )));
        }
        Ok(())
    }
}

/// A fully generated city.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    config: CityConfig,
    roads: Vec<Road>,
    road_transforms: Vec<RoadTransform>,
    validity_grid: ValidityGrid,
    candidate_points: Vec<Site>,
    selected_sites: Vec<Site>,
    buildings: Vec<Building>,
}

impl City {
    /// Generate a city with a random stream made from the configured seed.
    pub fn from_config<T: TerrainProvider>(
        config: CityConfig,
        terrain: &T,
    ) -> Result<Self, CityError> {
        match config.rng_seed {
            Some(seed) => Self::generate(config, terrain, &mut RandomF64::seeded(seed)),
            None => Self::generate(config, terrain, &mut RandomF64::from_entropy()),
        }
    }

    /// Generate a city, drawing every random value from `rng`.
    pub fn generate<T, R>(config: CityConfig, terrain: &T, rng: &mut R) -> Result<Self, CityError>
    where
        T: TerrainProvider,
        R: RandomF64Provider,
    {
        config.validate()?;

        let (roads, road_transforms) = RoadNetwork::build(config.road_thickness).into_parts();
        debug!("laid out {} roads", roads.len());

        let validity_grid =
            ValidityGrid::build(config.cell_size, config.road_thickness, &roads, terrain)?;
        let candidate_points = sampler::candidates(&validity_grid, rng);
        let selected_sites = sampler::select(&candidate_points, config.n_buildings, rng)?;

        let buildings = selected_sites
            .iter()
            .map(|site| {
                let top_height =
                    rng.gen_range_f64(config.building_height_min, config.building_height_max);
                Building::generate(*site, top_height, rng)
            })
            .collect::<Vec<_>>();

        info!(
            roads = roads.len(),
            valid_cells = validity_grid.valid_count(),
            buildings = buildings.len(),
            "generated city"
        );

        Ok(Self {
            config,
            roads,
            road_transforms,
            validity_grid,
            candidate_points,
            selected_sites,
            buildings,
        })
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Instance transforms of the road boxes, in the same order as [`City::roads`].
    pub fn road_transforms(&self) -> &[RoadTransform] {
        &self.road_transforms
    }

    pub fn validity_grid(&self) -> &ValidityGrid {
        &self.validity_grid
    }

    pub fn candidate_points(&self) -> &[Site] {
        &self.candidate_points
    }

    /// Sites the buildings stand on. May contain the same site more than once.
    pub fn selected_sites(&self) -> &[Site] {
        &self.selected_sites
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }
}
