use std::sync::Arc;

use parking_lot::Mutex;
use quietgate_vad::StreamFormat;

use crate::error::FormatError;

/// Host-side media stream the detector attaches to.
///
/// `format` returns the read-side codec descriptor, or `None` when the
/// read side is not negotiated yet. `ensure_linear16` asks the host to
/// deliver raw 16-bit samples when the native codec is something else,
/// standing in for installing a raw read codec on the stream.
pub trait AudioSource: Send {
    fn format(&self) -> Option<StreamFormat>;

    fn ensure_linear16(&mut self) -> Result<(), FormatError>;
}

/// Sources are shared between the control path and the host's media path.
pub type SharedSource = Arc<Mutex<dyn AudioSource>>;

/// Resolves a stream identifier to its media stream. Session lookup is
/// host glue; the registry only consumes the result.
pub trait StreamDirectory {
    fn locate(&self, id: &str) -> Option<SharedSource>;
}
