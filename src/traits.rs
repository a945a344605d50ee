use crate::core::geometry::site::Site;

/// Height below which the terrain is treated as water.
pub const WATER_LEVEL: f64 = 0.57;

/// Provider of terrain.
pub trait TerrainProvider {
    /// Height of the terrain at the site, in `[0, 1]`.
    fn height(&self, site: &Site) -> f64;

    /// Whether the site is covered by water.
    fn is_water(&self, site: &Site) -> bool {
        self.height(site) < WATER_LEVEL
    }
}

/// Provider of random f64 values.
///
/// The value must be in the range of `[0, 1)`.
pub trait RandomF64Provider {
    fn gen_f64(&mut self) -> f64;

    /// Draw a value uniformly from `[min, max)`.
    fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.gen_f64() * (max - min)
    }

    /// Draw an index uniformly from `[0, len)`.
    ///
    /// `len` must not be zero.
    fn gen_index(&mut self, len: usize) -> usize {
        ((self.gen_f64() * len as f64).floor() as usize).min(len - 1)
    }
}

/// Terrain provider that provides dry land everywhere.
///
/// This is used only for testing purposes.
#[cfg(test)]
pub(crate) struct MockFlatTerrain;

#[cfg(test)]
impl TerrainProvider for MockFlatTerrain {
    fn height(&self, _site: &Site) -> f64 {
        1.0
    }
}

/// Terrain provider that is covered by water everywhere.
///
/// This is used only for testing purposes.
#[cfg(test)]
pub(crate) struct MockWaterTerrain;

#[cfg(test)]
impl TerrainProvider for MockWaterTerrain {
    fn height(&self, _site: &Site) -> f64 {
        0.0
    }
}

/// Random provider that cycles through predefined values.
///
/// This is used only for testing purposes.
#[cfg(test)]
pub(crate) struct MockSequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl MockSequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomF64Provider for MockSequenceRandom {
    fn gen_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_level() {
        assert!(MockWaterTerrain.is_water(&Site::new(0.0, 0.0)));
        assert!(!MockFlatTerrain.is_water(&Site::new(0.0, 0.0)));
    }

    #[test]
    fn test_gen_index() {
        let mut rng = MockSequenceRandom::new(vec![0.0, 0.5, 0.999_999]);
        assert_eq!(rng.gen_index(4), 0);
        assert_eq!(rng.gen_index(4), 2);
        assert_eq!(rng.gen_index(4), 3);
    }

    #[test]
    fn test_gen_range_f64() {
        let mut rng = MockSequenceRandom::new(vec![0.0, 0.5]);
        assert_eq!(rng.gen_range_f64(1.0, 5.0), 1.0);
        assert_eq!(rng.gen_range_f64(1.0, 5.0), 3.0);
    }
}
