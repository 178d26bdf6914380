use crate::constants::{BAD_FRAME_SCORE, REFERENCE_SAMPLE_RATE_HZ};
use crate::types::{Frame, FrameAnalysis, FrameKind, StreamFormat};

/// Score one frame and classify it as Silence, Voiced, or BadFrame.
///
/// The walk keeps the original detector's cursor arithmetic: per logical
/// sample the RMS accumulator reads the cursor position, the energy
/// accumulator reads the next position, then the cursor skips past the
/// interleaved channels. Net stride is `2 + channels`, so the two
/// accumulators see different samples. `score` (from the energy
/// accumulator) is the authoritative classification signal; `decibels` is
/// diagnostic. Positions past the delivered buffer contribute zero.
pub fn analyze_frame(
    frame: &Frame<'_>,
    format: &StreamFormat,
    silence_threshold: u32,
) -> FrameAnalysis {
    if frame.is_empty() {
        return FrameAnalysis {
            kind: FrameKind::Silence,
            score: 0,
            energy: 0.0,
            decibels: None,
        };
    }

    let divisor = format.sample_rate_hz / REFERENCE_SAMPLE_RATE_HZ;

    let mut energy = 0.0f64;
    let mut sum_squares = 0.0f64;
    let mut j = 0usize;

    for _ in 0..frame.sample_count {
        let sample = sample_at(frame.samples, j);
        j += 1;

        let amplitude = sample as f64 / 32768.0;
        sum_squares += amplitude * amplitude;

        energy += f64::from(sample_at(frame.samples, j).unsigned_abs());
        j += 1;

        j += format.channels as usize;
    }

    let rms = (sum_squares / frame.sample_count as f64).sqrt();
    let decibels = if rms != 0.0 {
        Some(20.0 * rms.log10())
    } else {
        None
    };

    let score = ((energy * divisor as f64) / frame.sample_count as f64) as u32;

    let kind = if score >= BAD_FRAME_SCORE {
        FrameKind::BadFrame
    } else if score >= silence_threshold {
        FrameKind::Voiced
    } else {
        FrameKind::Silence
    };

    FrameAnalysis {
        kind,
        score,
        energy,
        decibels,
    }
}

#[inline]
fn sample_at(samples: &[i16], idx: usize) -> i16 {
    samples.get(idx).copied().unwrap_or(0)
}
