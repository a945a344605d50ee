use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::traits::RandomF64Provider;

/// Adapter from any [`rand::Rng`] into a [`RandomF64Provider`].
#[derive(Debug, Clone)]
pub struct RandomF64<R> {
    rng: R,
}

impl<R: Rng> RandomF64<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomF64Provider for RandomF64<R> {
    fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }
}

impl RandomF64<StdRng> {
    /// Create a reproducible random stream.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Create a random stream seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}
