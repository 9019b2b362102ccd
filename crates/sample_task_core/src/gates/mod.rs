//! Validation steps that must pass before the session may move on.

mod noise;
mod recording;

pub use noise::{
    NOISE_CEILING_DB, NOISE_FLOOR_DB, NOISE_PASS_BELOW_DB, NoiseGate, NoiseSource,
    RandomNoiseSource, ScriptedNoiseSource,
};
pub use recording::{MAX_RECORDING_SECS, MIN_RECORDING_SECS, RecordingGate};
