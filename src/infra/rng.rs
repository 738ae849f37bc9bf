use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::engine::RandomSource;

/// Боевой RNG: `thread_rng`, без возможности задать seed.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же партии при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

/// RNG сервиса: системный или с seed (dev-CLI `--seed`).
#[derive(Clone, Debug)]
pub enum AnyRng {
    System(SystemRng),
    Seeded(DeterministicRng),
}

impl AnyRng {
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => AnyRng::Seeded(DeterministicRng::from_seed(seed)),
            None => AnyRng::System(SystemRng),
        }
    }
}

impl RandomSource for AnyRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            AnyRng::System(rng) => rng.shuffle(slice),
            AnyRng::Seeded(rng) => rng.shuffle(slice),
        }
    }
}
