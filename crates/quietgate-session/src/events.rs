use crossbeam_channel::{Receiver, Sender};
use quietgate_vad::CompletionInfo;

/// Completion notification, delivered at most once per started detector.
/// Diagnostic counters ride on both outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub stream_id: String,
    pub silence_detected: bool,
    pub timed_out: bool,
    pub listening: u32,
    pub silence_hits_remaining: u32,
}

impl CompletionEvent {
    pub fn new(stream_id: impl Into<String>, info: CompletionInfo) -> Self {
        Self {
            stream_id: stream_id.into(),
            silence_detected: info.silence_detected,
            timed_out: info.timed_out,
            listening: info.listening,
            silence_hits_remaining: info.silence_hits_remaining,
        }
    }
}

/// Fan-out channel for completion events. Senders are cloned into each
/// detector; receivers can be cloned for multiple consumers.
pub struct EventBus {
    tx: Sender<CompletionEvent>,
    rx: Receiver<CompletionEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<CompletionEvent> {
        self.tx.clone()
    }

    pub fn subscribe(&self) -> Receiver<CompletionEvent> {
        self.rx.clone()
    }
}
