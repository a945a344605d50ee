//! Procedural generation of a small gridded city.
//!
//! A [`City`] is generated in one pass: a fixed lattice of roads, a
//! validity grid marking land that is neither road nor water, random
//! building sites on that land, and a building of stacked floor plans on
//! every site.

pub mod building;
pub mod city;
pub mod core;
pub mod error;
pub mod grid;
pub mod random;
pub mod road;
pub mod sampler;
pub mod terrain;
pub mod traits;

pub use city::{City, CityConfig};
pub use error::CityError;
