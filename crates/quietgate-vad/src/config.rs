use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_LISTEN_HITS, DEFAULT_SILENCE_HITS, DEFAULT_SILENCE_THRESHOLD, DEFAULT_TIMEOUT_MS,
};

/// Per-stream detection configuration. Loaded once at `start`; never
/// mutated while the detector is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Score cutoff separating Voiced from Silence.
    pub silence_threshold: u32,

    /// Consecutive qualifying silence frames required to complete.
    pub silence_hits: u32,

    /// Voiced frames required before silence counting is honored.
    pub listen_hits: u32,

    /// Hard time budget. Zero disables the timeout entirely.
    pub timeout_ms: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            silence_hits: DEFAULT_SILENCE_HITS,
            listen_hits: DEFAULT_LISTEN_HITS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl DetectorConfig {
    /// Total sample budget before the timeout elapses, sized from the
    /// stream's actual rate.
    pub fn sample_budget(&self, sample_rate_hz: u32) -> i64 {
        (sample_rate_hz as i64 / 1000) * self.timeout_ms as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = DetectorConfig::default();
        assert_eq!(cfg.silence_threshold, 256);
        assert_eq!(cfg.silence_hits, 100);
        assert_eq!(cfg.listen_hits, 15);
        assert_eq!(cfg.timeout_ms, 60_000);
    }

    #[test]
    fn sample_budget_scales_with_rate() {
        let cfg = DetectorConfig {
            timeout_ms: 1_000,
            ..Default::default()
        };
        assert_eq!(cfg.sample_budget(8_000), 8_000);
        assert_eq!(cfg.sample_budget(16_000), 16_000);
        assert_eq!(cfg.sample_budget(48_000), 48_000);
    }

    #[test]
    fn zero_timeout_gives_zero_budget() {
        let cfg = DetectorConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(cfg.sample_budget(8_000), 0);
    }
}
