use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::Sender;
use parking_lot::RwLock;
use quietgate_vad::{DetectorConfig, FeedResult, Frame};
use tracing::{debug, info, warn};

use crate::detector::StreamDetector;
use crate::error::StartError;
use crate::events::CompletionEvent;
use crate::source::SharedSource;

/// Result of a `start` request. `AlreadyActive` is a caller-visible
/// warning: the existing detector keeps running unchanged.
pub enum StartOutcome {
    Started(DetectorHandle),
    AlreadyActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    /// No detector was active for the stream. Benign.
    NotFound,
}

/// Whether the host should keep delivering frames through a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Active,
    Detached,
}

struct RegistryInner {
    streams: RwLock<HashMap<String, Arc<StreamDetector>>>,
    events: Sender<CompletionEvent>,
}

impl RegistryInner {
    fn remove(&self, id: &str) -> Option<Arc<StreamDetector>> {
        self.streams.write().remove(id)
    }
}

/// Owns the stream-id → detector map, with insertion on `start` and
/// removal on `stop` or natural completion.
#[derive(Clone)]
pub struct DetectorRegistry {
    inner: Arc<RegistryInner>,
}

impl DetectorRegistry {
    pub fn new(events: Sender<CompletionEvent>) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                streams: RwLock::new(HashMap::new()),
                events,
            }),
        }
    }

    /// Install a detector on a located stream. The source is coerced to
    /// linear 16-bit before any frame is accepted; on any failure no
    /// detector is installed.
    pub fn start(
        &self,
        id: &str,
        config: DetectorConfig,
        source: &SharedSource,
    ) -> Result<StartOutcome, StartError> {
        let mut streams = self.inner.streams.write();

        if let Some(existing) = streams.get(id) {
            if !existing.is_completed() {
                warn!(stream = %id, "silence detector already active; leaving it running");
                return Ok(StartOutcome::AlreadyActive);
            }
            // Completed leftover; replace it below.
        }

        let format = {
            let mut src = source.lock();
            let format = src
                .format()
                .ok_or_else(|| StartError::SourceUnavailable(id.to_string()))?;
            src.ensure_linear16()?;
            format
        };

        let detector = Arc::new(StreamDetector::new(id.to_string(), config, format));
        streams.insert(id.to_string(), Arc::clone(&detector));

        info!(
            stream = %id,
            silence_threshold = config.silence_threshold,
            silence_hits = config.silence_hits,
            listen_hits = config.listen_hits,
            timeout_ms = config.timeout_ms,
            sample_rate = format.sample_rate_hz,
            "silence detection initialized"
        );

        Ok(StartOutcome::Started(DetectorHandle {
            inner: Arc::clone(&self.inner),
            detector,
        }))
    }

    /// Best-effort detach. Stopping before natural completion suppresses
    /// the completion event.
    pub fn stop(&self, id: &str) -> StopOutcome {
        match self.inner.remove(id) {
            Some(detector) => {
                if detector.try_complete() {
                    debug!(stream = %id, "detector stopped before completion; event suppressed");
                } else {
                    debug!(stream = %id, "detector already completed at stop");
                }
                StopOutcome::Stopped
            }
            None => {
                debug!(stream = %id, "stop: no detector active");
                StopOutcome::NotFound
            }
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.inner
            .streams
            .read()
            .get(id)
            .is_some_and(|d| !d.is_completed())
    }

    pub fn handle(&self, id: &str) -> Option<DetectorHandle> {
        let detector = self.inner.streams.read().get(id).cloned()?;
        Some(DetectorHandle {
            inner: Arc::clone(&self.inner),
            detector,
        })
    }
}

/// Frame-delivery subscription for one stream. The host keeps calling
/// `feed` until it returns `Detached`; detachment is explicit rather than
/// a magic return value buried in a callback.
#[derive(Clone)]
pub struct DetectorHandle {
    inner: Arc<RegistryInner>,
    detector: Arc<StreamDetector>,
}

impl DetectorHandle {
    pub fn stream_id(&self) -> &str {
        self.detector.id()
    }

    pub fn detector(&self) -> &StreamDetector {
        &self.detector
    }

    /// Push one frame from the host's media path. Zero-sample frames are
    /// logged and change nothing. Runs to completion without blocking I/O.
    pub fn feed(&self, frame: &Frame<'_>) -> FeedStatus {
        if self.detector.is_completed() {
            return FeedStatus::Detached;
        }

        if frame.is_empty() {
            debug!(stream = %self.detector.id(), "frame contains no samples");
            return FeedStatus::Active;
        }

        match self.detector.process(frame) {
            FeedResult::Continue => FeedStatus::Active,
            FeedResult::Complete(completion) => {
                if self.detector.try_complete() {
                    if completion.silence_detected {
                        info!(stream = %self.detector.id(), "SILENCE DETECTED");
                    } else {
                        debug!(
                            stream = %self.detector.id(),
                            listening = completion.listening,
                            silence_hits_remaining = completion.silence_hits_remaining,
                            "TIMEOUT"
                        );
                    }

                    let event = CompletionEvent::new(self.detector.id(), completion);
                    if self.inner.events.send(event).is_err() {
                        debug!(stream = %self.detector.id(), "no completion event subscribers");
                    }

                    self.inner.remove(self.detector.id());
                }
                FeedStatus::Detached
            }
        }
    }
}
