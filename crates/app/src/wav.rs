use std::path::Path;

use anyhow::{Context, Result};
use hound::WavReader;
use quietgate_session::{AudioSource, FormatError};
use quietgate_vad::StreamFormat;
use tracing::info;

/// Telephony-style packet tick: 50 packets per second = 20 ms.
const PACKETS_PER_SECOND: u32 = 50;

/// WAV file standing in for a live media stream: interleaved i16 samples
/// delivered one nominal packet at a time.
pub struct WavStream {
    samples: Vec<i16>,
    format: StreamFormat,
    cursor: usize,
}

impl WavStream {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader =
            WavReader::open(path).with_context(|| format!("open {}", path.display()))?;
        let spec = reader.spec();

        info!(
            "Loading WAV: {} Hz, {} channels, {} bits",
            spec.sample_rate, spec.channels, spec.bits_per_sample
        );

        let samples: Vec<i16> = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("WAV must be 16-bit integer PCM")?;

        let format = StreamFormat {
            sample_rate_hz: spec.sample_rate,
            channels: spec.channels as u32,
            samples_per_packet: (spec.sample_rate / PACKETS_PER_SECOND).max(1),
        };

        info!(
            "WAV loaded: {} interleaved samples, {} per packet",
            samples.len(),
            format.samples_per_packet
        );

        Ok(Self {
            samples,
            format,
            cursor: 0,
        })
    }

    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Copy the next packet into `buf` and return its logical (per-channel)
    /// sample count, or `None` at end of stream. The final packet may be
    /// short.
    pub fn next_packet_into(&mut self, buf: &mut Vec<i16>) -> Option<u32> {
        if self.cursor >= self.samples.len() {
            return None;
        }

        let stride = (self.format.samples_per_packet * self.format.channels) as usize;
        let end = (self.cursor + stride).min(self.samples.len());
        buf.clear();
        buf.extend_from_slice(&self.samples[self.cursor..end]);

        let taken = end - self.cursor;
        self.cursor = end;
        Some((taken as u32) / self.format.channels)
    }
}

impl AudioSource for WavStream {
    fn format(&self) -> Option<StreamFormat> {
        Some(self.format)
    }

    fn ensure_linear16(&mut self) -> Result<(), FormatError> {
        // hound already rejected anything but 16-bit integer PCM at load.
        Ok(())
    }
}
