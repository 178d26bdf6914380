use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Silence,
    Voiced,
    BadFrame,
}

/// Result of scoring one frame. `score` drives classification; `decibels`
/// is diagnostic only and is `None` when the frame RMS is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAnalysis {
    pub kind: FrameKind,
    pub score: u32,
    pub energy: f64,
    pub decibels: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    SilenceDetected,
    TimedOut,
}

impl Default for Outcome {
    fn default() -> Self {
        Self::Pending
    }
}

/// Final counters reported with a completed detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionInfo {
    pub silence_detected: bool,
    pub timed_out: bool,
    pub listening: u32,
    pub silence_hits_remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedResult {
    Continue,
    Complete(CompletionInfo),
}

/// One-time codec descriptor for a stream's read side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFormat {
    pub sample_rate_hz: u32,
    pub channels: u32,
    pub samples_per_packet: u32,
}

impl StreamFormat {
    pub fn packet_duration_ms(&self) -> f32 {
        (self.samples_per_packet as f32 * 1000.0) / self.sample_rate_hz as f32
    }
}

/// Borrowed view over one packet of interleaved 16-bit PCM. `sample_count`
/// is the logical (per-channel) sample count, not the buffer length.
/// Nothing here is retained past the classification call.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub samples: &'a [i16],
    pub sample_count: u32,
}

impl<'a> Frame<'a> {
    pub fn new(samples: &'a [i16], sample_count: u32) -> Self {
        Self {
            samples,
            sample_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}
