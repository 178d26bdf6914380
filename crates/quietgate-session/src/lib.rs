pub mod command;
pub mod detector;
pub mod error;
pub mod events;
pub mod registry;
pub mod settings;
pub mod source;

// Core exports - grouped and sorted alphabetically
pub use command::{parse_command, Command, ControlReply, ControlSurface, SYNTAX};
pub use detector::StreamDetector;
pub use error::{ControlError, FormatError, StartError, UsageError};
pub use events::{CompletionEvent, EventBus};
pub use registry::{DetectorHandle, DetectorRegistry, FeedStatus, StartOutcome, StopOutcome};
pub use settings::{Settings, SettingsError};
pub use source::{AudioSource, SharedSource, StreamDirectory};
