pub mod classifier;
pub mod config;
pub mod constants;
pub mod engine;
pub mod state;
pub mod types;

// Core exports - grouped and sorted alphabetically
pub use classifier::analyze_frame;
pub use config::DetectorConfig;
pub use constants::{BAD_FRAME_SCORE, REFERENCE_SAMPLE_RATE_HZ};
pub use engine::DetectionEngine;
pub use state::DetectionStateMachine;
pub use types::{
    CompletionInfo, FeedResult, Frame, FrameAnalysis, FrameKind, Outcome, StreamFormat,
};
