use std::fmt;

use quietgate_vad::DetectorConfig;
use tracing::debug;

use crate::error::{ControlError, UsageError};
use crate::registry::{DetectorRegistry, StartOutcome, StopOutcome};
use crate::source::StreamDirectory;

pub const SYNTAX: &str =
    "<stream-id> <start|stop> [<silence_threshold>] [<silence_hits>] [<listen_hits>] [<timeout_ms>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start {
        id: String,
        /// Numeric overrides are all-or-nothing: either every threshold is
        /// given on the command line, or process defaults apply.
        config: Option<DetectorConfig>,
    },
    Stop {
        id: String,
    },
}

/// Parse one control line. Verbs match case-insensitively by prefix, the
/// way switch consoles resolve them.
pub fn parse_command(line: &str) -> Result<Command, UsageError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() != 2 && tokens.len() != 6 {
        return Err(UsageError::BadArgumentCount { got: tokens.len() });
    }

    let id = tokens[0].to_string();
    let verb = tokens[1];

    if verb_is(verb, "start") {
        let config = if tokens.len() == 6 {
            Some(DetectorConfig {
                silence_threshold: parse_number(tokens[2], "silence_threshold")?,
                silence_hits: parse_number(tokens[3], "silence_hits")?,
                listen_hits: parse_number(tokens[4], "listen_hits")?,
                timeout_ms: parse_number(tokens[5], "timeout_ms")?,
            })
        } else {
            None
        };
        Ok(Command::Start { id, config })
    } else if verb_is(verb, "stop") {
        Ok(Command::Stop { id })
    } else {
        Err(UsageError::UnknownCommand(verb.to_string()))
    }
}

fn verb_is(verb: &str, name: &str) -> bool {
    verb.get(..name.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name))
}

fn parse_number(token: &str, arg: &'static str) -> Result<u32, UsageError> {
    token.parse().map_err(|_| UsageError::InvalidNumber {
        arg,
        value: token.to_string(),
    })
}

/// Reply text for a successfully handled command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlReply {
    Started,
    AlreadyActive,
    Stopped,
    StopNotFound,
}

impl fmt::Display for ControlReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlReply::Started | ControlReply::Stopped => write!(f, "+OK"),
            ControlReply::AlreadyActive => write!(f, "-WARN already active"),
            ControlReply::StopNotFound => write!(f, "+OK no detector was active"),
        }
    }
}

/// Control surface binding the command parser to a registry and the
/// host's stream lookup. One instance serves every stream.
pub struct ControlSurface<D: StreamDirectory> {
    registry: DetectorRegistry,
    directory: D,
    defaults: DetectorConfig,
}

impl<D: StreamDirectory> ControlSurface<D> {
    pub fn new(registry: DetectorRegistry, directory: D, defaults: DetectorConfig) -> Self {
        Self {
            registry,
            directory,
            defaults,
        }
    }

    pub fn registry(&self) -> &DetectorRegistry {
        &self.registry
    }

    pub fn execute(&self, line: &str) -> Result<ControlReply, ControlError> {
        match parse_command(line)? {
            Command::Start { id, config } => {
                let source = self
                    .directory
                    .locate(&id)
                    .ok_or_else(|| UsageError::UnknownStream(id.clone()))?;
                let config = config.unwrap_or(self.defaults);
                debug!(stream = %id, ?config, "control: start");

                match self.registry.start(&id, config, &source)? {
                    StartOutcome::Started(_) => Ok(ControlReply::Started),
                    StartOutcome::AlreadyActive => Ok(ControlReply::AlreadyActive),
                }
            }
            Command::Stop { id } => {
                debug!(stream = %id, "control: stop");
                match self.registry.stop(&id) {
                    StopOutcome::Stopped => Ok(ControlReply::Stopped),
                    StopOutcome::NotFound => Ok(ControlReply::StopNotFound),
                }
            }
        }
    }
}
