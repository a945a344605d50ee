//! Value-noise terrain.
//!
//! The height field is a domain-warped fractal Brownian motion over a
//! hash-based value noise: two fbm samples at fixed offsets displace the
//! site before the final fbm sample. Everything here is pure: the same site always
//! yields the same height.

use crate::{core::geometry::site::Site, traits::TerrainProvider};

const HASH_DIRECTION: Site = Site {
    x: 123.4031,
    y: 46.5244876,
};
const HASH_FREQUENCY: f64 = 7.13;
const HASH_SCALE: f64 = 268573.103291;

const FBM_OCTAVES: usize = 3;

const WARP_OFFSET_X: Site = Site { x: 1.7, y: 9.2 };
const WARP_OFFSET_Y: Site = Site { x: 8.3, y: 2.8 };

fn fract(value: f64) -> f64 {
    value - value.floor()
}

fn mix(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Pseudo-random value in `[0, 1)` for the site.
pub fn hash2d(site: &Site) -> f64 {
    fract((site.dot(&HASH_DIRECTION) * HASH_FREQUENCY).sin() * HASH_SCALE)
}

/// Value noise interpolated from the four surrounding lattice corners.
///
/// Both blend passes are weighted by the x fraction, which gives the
/// terrain its slight directional grain.
pub fn value_noise(site: &Site) -> f64 {
    let corner = site.floor();
    let t = site.fract().x;

    let a = hash2d(&corner);
    let b = hash2d(&(corner + Site::new(1.0, 0.0)));
    let c = hash2d(&(corner + Site::new(0.0, 1.0)));
    let d = hash2d(&(corner + Site::new(1.0, 1.0)));

    mix(mix(a, b, t), mix(c, d, t), t)
}

/// Fractal Brownian motion over [`value_noise`].
pub fn fbm(site: &Site) -> f64 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;

    for _ in 0..FBM_OCTAVES {
        value += value_noise(&(*site * frequency)) * amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    value
}

/// Terrain whose height is given by domain-warped value noise.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueNoiseTerrain;

impl ValueNoiseTerrain {
    pub fn new() -> Self {
        Self
    }
}

impl TerrainProvider for ValueNoiseTerrain {
    fn height(&self, site: &Site) -> f64 {
        let warp = Site::new(
            fbm(&(*site + WARP_OFFSET_X)),
            fbm(&(*site + WARP_OFFSET_Y)),
        );
        (2.0 * fbm(&(*site + warp)) - 0.3).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash2d_range() {
        for i in -20..20 {
            for j in -20..20 {
                let value = hash2d(&Site::new(i as f64 * 0.37, j as f64 * 1.91));
                assert!((0.0..1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_hash2d_formula() {
        let site = Site::new(1.0, 2.0);
        let dot = 123.4031 + 2.0 * 46.5244876;
        let raw = (dot * 7.13_f64).sin() * 268573.103291;
        assert_eq!(hash2d(&site), raw - raw.floor());
    }

    #[test]
    fn test_value_noise_on_lattice() {
        // On a lattice corner the fraction is zero, so the corner hash is returned as is.
        for i in -5..5 {
            let site = Site::new(i as f64, (i * 3) as f64);
            assert_eq!(value_noise(&site), hash2d(&site));
        }
    }

    #[test]
    fn test_value_noise_uses_x_fraction_only() {
        // Moving along y inside one lattice cell does not change the blend weights.
        let a = value_noise(&Site::new(3.25, 7.1));
        let b = value_noise(&Site::new(3.25, 7.9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fbm_range() {
        for i in -30..30 {
            let value = fbm(&Site::new(i as f64 * 0.77, i as f64 * -1.3));
            assert!((0.0..0.875).contains(&value));
        }
    }

    #[test]
    fn test_height_is_stable_and_clamped() {
        let terrain = ValueNoiseTerrain::new();
        for i in -25..25 {
            for j in -25..25 {
                let site = Site::new(i as f64 * 2.0, j as f64 * 2.0);
                let height = terrain.height(&site);
                assert!((0.0..=1.0).contains(&height));
                assert_eq!(height, terrain.height(&site));
                assert_eq!(terrain.is_water(&site), height < 0.57);
            }
        }
    }

    #[test]
    fn test_play_area_has_land_and_water() {
        let terrain = ValueNoiseTerrain::new();
        let (mut land, mut water) = (0, 0);
        for i in -50..=50 {
            for j in -50..=50 {
                if terrain.is_water(&Site::new(i as f64, j as f64)) {
                    water += 1;
                } else {
                    land += 1;
                }
            }
        }
        assert!(land > 1000);
        assert!(water > 1000);
    }
}
