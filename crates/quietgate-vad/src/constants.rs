//! Scoring constants for the silence-detection pipeline

/// Reference sample rate the energy score is normalized against (Hz).
/// The scoring divisor is `actual_rate / REFERENCE_SAMPLE_RATE_HZ`.
pub const REFERENCE_SAMPLE_RATE_HZ: u32 = 8_000;

/// Scores at or above this value classify the frame as garbage/clipping.
/// Fixed by design; unlike the silence threshold it is not configurable.
pub const BAD_FRAME_SCORE: u32 = 5_000;

/// Default score cutoff separating voiced frames from silence.
pub const DEFAULT_SILENCE_THRESHOLD: u32 = 256;

/// Default number of consecutive silence frames required to complete.
pub const DEFAULT_SILENCE_HITS: u32 = 100;

/// Default number of voiced frames required before silence counting is honored.
pub const DEFAULT_LISTEN_HITS: u32 = 15;

/// Default hard time budget in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u32 = 60_000;
