//! Buildings made of stacked floor plans.
//!
//! A building starts with its roof at the top height. Every following floor
//! is centered on a random corner of the floor above it and sits lower by a
//! random step, until a floor reaches the ground.

use tracing::{debug, warn};

use crate::{core::geometry::site::Site, traits::RandomF64Provider};

pub use polygon::{FloorGeometry, Polygon};

mod polygon;

/// Number of distinct side counts a floor can get (3 to 9 sides).
pub const SIDE_COUNT_RANGE: u32 = 7;

/// Range of the height difference drawn for every floor.
pub const FLOOR_STEP_MIN: f64 = 1.0;
pub const FLOOR_STEP_MAX: f64 = 5.0;

/// Floors allowed beyond the top height before generation is cut short.
const FLOOR_LIMIT_MARGIN: usize = 10;

/// Hard limit on the floors of one building, whatever its top height.
pub const MAX_FLOORS: usize = 10_000;

/// Draw a side count in `[3, max_value + 2]`.
pub fn random_ngon<R: RandomF64Provider>(rng: &mut R, max_value: u32) -> u32 {
    (rng.gen_f64() * max_value as f64).floor() as u32 + 3
}

#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    site: Site,
    top_height: f64,
    floors: Vec<Polygon>,
}

impl Building {
    /// Generate a building at the site.
    pub fn generate<R: RandomF64Provider>(site: Site, top_height: f64, rng: &mut R) -> Self {
        BuildingGenerator::new(site, top_height)
            .iterate_until_finished(rng)
            .build()
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn top_height(&self) -> f64 {
        self.top_height
    }

    /// Floors from the roof down to the ground.
    pub fn floors(&self) -> &[Polygon] {
        &self.floors
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Render buffers of every floor, roof first.
    pub fn geometries(&self) -> Vec<FloorGeometry> {
        self.floors.iter().map(Polygon::geometry).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FloorState {
    /// The next floor is the roof.
    Roof,
    /// The next floor is the `n`-th counted from the roof.
    Stack { n: usize },
    /// A floor has reached the ground.
    Finished,
}

/// Step-by-step construction of a [`Building`].
#[derive(Debug, Clone)]
pub struct BuildingGenerator {
    site: Site,
    top_height: f64,
    floors: Vec<Polygon>,
    state: FloorState,
    floor_limit: usize,
}

impl BuildingGenerator {
    pub fn new(site: Site, top_height: f64) -> Self {
        // Every step lowers the floor by at least FLOOR_STEP_MIN, so the ground
        // is reached well before this limit unless MAX_FLOORS cuts it short.
        let floor_limit = ((top_height.max(0.0) / FLOOR_STEP_MIN).ceil() as usize)
            .saturating_add(FLOOR_LIMIT_MARGIN)
            .min(MAX_FLOORS);
        Self {
            site,
            top_height,
            floors: Vec::new(),
            state: FloorState::Roof,
            floor_limit,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == FloorState::Finished
    }

    pub fn floors(&self) -> &[Polygon] {
        &self.floors
    }

    /// Add one floor.
    pub fn iterate<R: RandomF64Provider>(mut self, rng: &mut R) -> Self {
        self.state = match self.state {
            FloorState::Roof => {
                let sides = random_ngon(rng, SIDE_COUNT_RANGE);
                self.floors
                    .push(Polygon::new(sides, self.top_height, self.site));
                if self.top_height > 0.0 {
                    FloorState::Stack { n: 1 }
                } else {
                    FloorState::Finished
                }
            }
            FloorState::Stack { n } => {
                let floor_step = rng.gen_range_f64(FLOOR_STEP_MIN, FLOOR_STEP_MAX);
                let mut height = (self.top_height - n as f64 * floor_step).max(0.0);
                if n >= self.floor_limit && height > 0.0 {
                    warn!(
                        "building at ({}, {}) reached {} floors; closing it at the ground",
                        self.site.x, self.site.y, n
                    );
                    height = 0.0;
                }

                let center = match self.floors.last() {
                    Some(above) => above.vertices()[rng.gen_index(above.vertices().len())],
                    None => self.site,
                };
                let sides = random_ngon(rng, SIDE_COUNT_RANGE);
                self.floors.push(Polygon::new(sides, height, center));

                if height == 0.0 {
                    FloorState::Finished
                } else {
                    FloorState::Stack { n: n + 1 }
                }
            }
            FloorState::Finished => FloorState::Finished,
        };
        self
    }

    pub fn iterate_until_finished<R: RandomF64Provider>(mut self, rng: &mut R) -> Self {
        while !self.is_finished() {
            self = self.iterate(rng);
        }
        self
    }

    pub fn build(self) -> Building {
        debug!(
            floors = self.floors.len(),
            "generated building at ({}, {})",
            self.site.x,
            self.site.y
        );
        Building {
            site: self.site,
            top_height: self.top_height,
            floors: self.floors,
        }
    }
}
