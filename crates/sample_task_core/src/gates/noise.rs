use crate::error::AppError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Lowest simulated reading (inclusive).
pub const NOISE_FLOOR_DB: u32 = 25;
/// Highest simulated reading (exclusive).
pub const NOISE_CEILING_DB: u32 = 55;
pub const NOISE_PASS_BELOW_DB: u32 = 40;

const PASS_MESSAGE: &str = "Good to proceed!";

/// Source of ambient-noise readings in decibels.
///
/// Stands in for a microphone level meter; tests and scripted sessions
/// supply [`ScriptedNoiseSource`].
pub trait NoiseSource {
    fn sample_db(&mut self) -> u32;
}

pub struct RandomNoiseSource {
    rng: StdRng,
}

impl RandomNoiseSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl NoiseSource for RandomNoiseSource {
    fn sample_db(&mut self) -> u32 {
        self.rng.gen_range(NOISE_FLOOR_DB..NOISE_CEILING_DB)
    }
}

/// Replays fixed readings in order, then keeps repeating the last one.
pub struct ScriptedNoiseSource {
    pending: VecDeque<u32>,
    last: u32,
}

impl ScriptedNoiseSource {
    pub fn new<I: IntoIterator<Item = u32>>(readings: I) -> Self {
        Self {
            pending: readings.into_iter().collect(),
            last: NOISE_FLOOR_DB,
        }
    }

    pub fn constant(reading_db: u32) -> Self {
        Self::new([reading_db])
    }
}

impl NoiseSource for ScriptedNoiseSource {
    fn sample_db(&mut self) -> u32 {
        if let Some(next) = self.pending.pop_front() {
            self.last = next;
        }
        self.last
    }
}

pub struct NoiseGate {
    source: Box<dyn NoiseSource>,
    last_reading_db: Option<u32>,
    message: Option<String>,
}

impl NoiseGate {
    pub fn new(source: Box<dyn NoiseSource>) -> Self {
        Self {
            source,
            last_reading_db: None,
            message: None,
        }
    }

    /// Takes one reading. `Ok` carries the reading when it is quiet enough.
    pub fn run_test(&mut self) -> Result<u32, AppError> {
        let raw = self.source.sample_db();
        let reading_db = raw.clamp(NOISE_FLOOR_DB, NOISE_CEILING_DB - 1);
        if reading_db != raw {
            warn!(raw, reading_db, "noise reading outside simulated range, clamped");
        }
        debug!(reading_db, "noise sampled");

        self.last_reading_db = Some(reading_db);
        if reading_db < NOISE_PASS_BELOW_DB {
            self.message = Some(PASS_MESSAGE.to_string());
            info!(reading_db, "noise test passed");
            Ok(reading_db)
        } else {
            let err = AppError::NoiseTooHigh { reading_db };
            self.message = Some(err.message());
            info!(reading_db, "noise test failed");
            Err(err)
        }
    }

    pub fn last_reading_db(&self) -> Option<u32> {
        self.last_reading_db
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
