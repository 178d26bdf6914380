use crate::classifier::analyze_frame;
use crate::config::DetectorConfig;
use crate::state::DetectionStateMachine;
use crate::types::{FeedResult, Frame, FrameAnalysis, Outcome, StreamFormat};

/// One classifier configuration plus one state machine, bound to a single
/// stream's format for the lifetime of a detection.
pub struct DetectionEngine {
    config: DetectorConfig,
    format: StreamFormat,
    state: DetectionStateMachine,
    frames_processed: u64,
    last_analysis: Option<FrameAnalysis>,
}

impl DetectionEngine {
    pub fn new(config: DetectorConfig, format: StreamFormat) -> Self {
        Self {
            state: DetectionStateMachine::new(&config, &format),
            config,
            format,
            frames_processed: 0,
            last_analysis: None,
        }
    }

    /// Process one non-empty frame. Callers must filter zero-sample frames
    /// before this point.
    pub fn process(&mut self, frame: &Frame<'_>) -> FeedResult {
        debug_assert!(!frame.is_empty());

        self.frames_processed += 1;

        let config = self.config;
        let format = self.format;
        let last_analysis = &mut self.last_analysis;

        self.state.feed_with(|| {
            let analysis = analyze_frame(frame, &format, config.silence_threshold);
            *last_analysis = Some(analysis);
            analysis.kind
        })
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn state(&self) -> &DetectionStateMachine {
        &self.state
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn format(&self) -> &StreamFormat {
        &self.format
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Analysis of the most recent frame that reached the classifier.
    /// Frames swallowed by the timeout path leave this untouched.
    pub fn last_analysis(&self) -> Option<FrameAnalysis> {
        self.last_analysis
    }
}
