use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use quietgate_vad::{DetectionEngine, DetectorConfig, FeedResult, Frame, StreamFormat};

/// Per-stream detector instance: one engine plus the one-shot completion
/// latch that settles the race between natural completion and `stop`.
pub struct StreamDetector {
    id: String,
    engine: Mutex<DetectionEngine>,
    completed: AtomicBool,
}

impl StreamDetector {
    pub(crate) fn new(id: String, config: DetectorConfig, format: StreamFormat) -> Self {
        Self {
            id,
            engine: Mutex::new(DetectionEngine::new(config, format)),
            completed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    /// Check-and-set the completion latch. Exactly one caller wins;
    /// everything after the winner becomes a no-op.
    pub(crate) fn try_complete(&self) -> bool {
        self.completed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn process(&self, frame: &Frame<'_>) -> FeedResult {
        self.engine.lock().process(frame)
    }

    pub fn frames_processed(&self) -> u64 {
        self.engine.lock().frames_processed()
    }
}
