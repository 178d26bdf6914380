use crate::config::DetectorConfig;
use crate::types::{CompletionInfo, FeedResult, FrameKind, Outcome, StreamFormat};

/// Hysteresis engine deciding, frame by frame, whether detection has
/// completed and with what outcome.
pub struct DetectionStateMachine {
    listening: u32,

    silence_hits_remaining: u32,

    silence_hits: u32,

    listen_hits: u32,

    samples_per_packet: i64,

    sample_budget: i64,

    outcome: Outcome,
}

impl DetectionStateMachine {
    pub fn new(config: &DetectorConfig, format: &StreamFormat) -> Self {
        Self {
            listening: 0,
            silence_hits_remaining: config.silence_hits,
            silence_hits: config.silence_hits,
            listen_hits: config.listen_hits,
            samples_per_packet: format.samples_per_packet as i64,
            sample_budget: config.sample_budget(format.sample_rate_hz),
            outcome: Outcome::Pending,
        }
    }

    /// Advance the machine by one non-empty frame, classifying it lazily.
    ///
    /// Budget accounting runs before the classifier is consulted, so a
    /// frame that exhausts the budget never pays for scoring. The budget is
    /// charged at the nominal packet size, not the delivered frame's size.
    /// Terminal states are sticky; feeding after completion returns the
    /// same outcome without touching any counter.
    pub fn feed_with(&mut self, classify: impl FnOnce() -> FrameKind) -> FeedResult {
        if self.outcome != Outcome::Pending {
            return FeedResult::Complete(self.completion());
        }

        // An initial budget of zero disables the timeout entirely.
        if self.sample_budget > 0 {
            self.sample_budget -= self.samples_per_packet;

            if self.sample_budget <= 0 {
                self.outcome = Outcome::TimedOut;
                return FeedResult::Complete(self.completion());
            }
        }

        let kind = classify();

        if kind == FrameKind::Voiced {
            self.listening += 1;
        }

        if self.listening > self.listen_hits && kind == FrameKind::Silence {
            self.silence_hits_remaining = self.silence_hits_remaining.saturating_sub(1);

            if self.silence_hits_remaining == 0 {
                self.outcome = Outcome::SilenceDetected;
                return FeedResult::Complete(self.completion());
            }
        } else {
            // Any interruption restarts the countdown: a voiced frame, a
            // bad frame, or not yet having listened enough.
            self.silence_hits_remaining = self.silence_hits;
        }

        FeedResult::Continue
    }

    pub fn feed(&mut self, kind: FrameKind) -> FeedResult {
        self.feed_with(|| kind)
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_complete(&self) -> bool {
        self.outcome != Outcome::Pending
    }

    pub fn listening(&self) -> u32 {
        self.listening
    }

    pub fn silence_hits_remaining(&self) -> u32 {
        self.silence_hits_remaining
    }

    pub fn sample_budget(&self) -> i64 {
        self.sample_budget
    }

    pub fn completion(&self) -> CompletionInfo {
        CompletionInfo {
            silence_detected: self.outcome == Outcome::SilenceDetected,
            timed_out: self.outcome == Outcome::TimedOut,
            listening: self.listening,
            silence_hits_remaining: self.silence_hits_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT: StreamFormat = StreamFormat {
        sample_rate_hz: 8_000,
        channels: 1,
        samples_per_packet: 160,
    };

    fn machine(silence_hits: u32, listen_hits: u32, timeout_ms: u32) -> DetectionStateMachine {
        let config = DetectorConfig {
            silence_threshold: 256,
            silence_hits,
            listen_hits,
            timeout_ms,
        };
        DetectionStateMachine::new(&config, &FORMAT)
    }

    #[test]
    fn silence_only_never_detects() {
        let mut m = machine(3, 2, 60_000);
        for _ in 0..500 {
            assert_eq!(m.feed(FrameKind::Silence), FeedResult::Continue);
        }
        assert_eq!(m.outcome(), Outcome::Pending);
        // Countdown is reset every frame while unprimed.
        assert_eq!(m.silence_hits_remaining(), 3);
    }

    #[test]
    fn sustained_silence_after_priming_detects() {
        let mut m = machine(3, 2, 60_000);
        for _ in 0..3 {
            assert_eq!(m.feed(FrameKind::Voiced), FeedResult::Continue);
        }
        assert_eq!(m.feed(FrameKind::Silence), FeedResult::Continue);
        assert_eq!(m.feed(FrameKind::Silence), FeedResult::Continue);

        match m.feed(FrameKind::Silence) {
            FeedResult::Complete(info) => {
                assert!(info.silence_detected);
                assert!(!info.timed_out);
                assert_eq!(info.listening, 3);
                assert_eq!(info.silence_hits_remaining, 0);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn voiced_interruption_restarts_countdown() {
        let mut m = machine(3, 2, 60_000);
        for _ in 0..3 {
            m.feed(FrameKind::Voiced);
        }
        m.feed(FrameKind::Silence);
        m.feed(FrameKind::Silence);
        assert_eq!(m.feed(FrameKind::Voiced), FeedResult::Continue);
        assert_eq!(m.silence_hits_remaining(), 3);

        assert_eq!(m.feed(FrameKind::Silence), FeedResult::Continue);
        assert_eq!(m.feed(FrameKind::Silence), FeedResult::Continue);
        assert!(matches!(m.feed(FrameKind::Silence), FeedResult::Complete(_)));
    }

    #[test]
    fn bad_frame_restarts_countdown_like_voiced() {
        let mut m = machine(3, 2, 60_000);
        for _ in 0..3 {
            m.feed(FrameKind::Voiced);
        }
        m.feed(FrameKind::Silence);
        m.feed(FrameKind::Silence);
        m.feed(FrameKind::BadFrame);
        assert_eq!(m.silence_hits_remaining(), 3);
        // A bad frame does not count as listening either.
        assert_eq!(m.listening(), 3);
    }

    #[test]
    fn timeout_latches_before_classification() {
        // 40 ms budget at 8 kHz = 320 samples = two nominal packets.
        let mut m = machine(100, 15, 40);
        assert_eq!(m.feed(FrameKind::Voiced), FeedResult::Continue);

        match m.feed(FrameKind::Voiced) {
            FeedResult::Complete(info) => {
                assert!(info.timed_out);
                assert!(!info.silence_detected);
                // The timed-out frame is never classified, so listening
                // still reflects only the first frame.
                assert_eq!(info.listening, 1);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn timeout_wins_over_pending_silence_run() {
        // Budget allows 3 frames; silence needs 4 qualifying hits.
        let mut m = machine(4, 0, 60);
        m.feed(FrameKind::Voiced);
        m.feed(FrameKind::Silence);
        match m.feed(FrameKind::Silence) {
            FeedResult::Complete(info) => assert!(info.timed_out),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn zero_timeout_disables_budget() {
        let mut m = machine(3, 0, 0);
        m.feed(FrameKind::Voiced);
        for _ in 0..10_000 {
            if let FeedResult::Complete(info) = m.feed(FrameKind::Voiced) {
                panic!("unexpected completion: {:?}", info);
            }
        }
        assert_eq!(m.sample_budget(), 0);
    }

    #[test]
    fn terminal_state_is_sticky() {
        let mut m = machine(1, 0, 60_000);
        m.feed(FrameKind::Voiced);
        let first = m.feed(FrameKind::Silence);
        assert!(matches!(first, FeedResult::Complete(_)));

        let listening = m.listening();
        let budget = m.sample_budget();
        for _ in 0..5 {
            assert_eq!(m.feed(FrameKind::Voiced), first);
        }
        assert_eq!(m.listening(), listening);
        assert_eq!(m.sample_budget(), budget);
    }

    #[test]
    fn classification_is_skipped_once_terminal() {
        let mut m = machine(1, 0, 60_000);
        m.feed(FrameKind::Voiced);
        m.feed(FrameKind::Silence);
        assert!(m.is_complete());

        let result = m.feed_with(|| panic!("classifier must not run after completion"));
        assert!(matches!(result, FeedResult::Complete(_)));
    }
}
