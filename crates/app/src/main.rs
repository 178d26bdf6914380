mod wav;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use parking_lot::Mutex;
use quietgate_session::{
    ControlSurface, DetectorRegistry, EventBus, FeedStatus, Settings, SharedSource,
    StreamDirectory,
};
use quietgate_vad::Frame;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::wav::WavStream;

#[derive(Parser, Debug)]
#[command(
    name = "quietgate",
    about = "Wait for a speaker to stop talking on a WAV-backed stream"
)]
struct Cli {
    /// WAV file standing in for the live media stream (16-bit PCM)
    wav: PathBuf,

    /// Stream identifier used on the control surface
    #[arg(long, default_value = "wav-stream-1")]
    stream_id: String,

    /// Settings file with process-wide detector defaults
    #[arg(long, default_value = "quietgate.toml")]
    settings: PathBuf,

    /// Positional threshold overrides, all four or none:
    /// silence_threshold silence_hits listen_hits timeout_ms
    #[arg(
        long,
        num_args = 4,
        value_names = ["SILENCE_THRESHOLD", "SILENCE_HITS", "LISTEN_HITS", "TIMEOUT_MS"]
    )]
    thresholds: Option<Vec<u32>>,
}

/// Directory with exactly one stream: the WAV file.
struct SingleStream {
    id: String,
    source: SharedSource,
}

impl StreamDirectory for SingleStream {
    fn locate(&self, id: &str) -> Option<SharedSource> {
        (id == self.id).then(|| Arc::clone(&self.source))
    }
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "quietgate.log");
    let (non_blocking_file, _guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();
    std::mem::forget(_guard);
    Ok(())
}

fn main() -> Result<()> {
    init_logging().map_err(|e| anyhow!("logging init failed: {e}"))?;

    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings)?;

    let wav = Arc::new(Mutex::new(WavStream::open(&cli.wav)?));
    let source: SharedSource = wav.clone();
    let directory = SingleStream {
        id: cli.stream_id.clone(),
        source,
    };

    let bus = EventBus::new();
    let events = bus.subscribe();
    let registry = DetectorRegistry::new(bus.sender());
    let surface = ControlSurface::new(registry, directory, settings.detector);

    let start_line = match &cli.thresholds {
        Some(t) => format!(
            "{} start {} {} {} {}",
            cli.stream_id, t[0], t[1], t[2], t[3]
        ),
        None => format!("{} start", cli.stream_id),
    };

    match surface.execute(&start_line) {
        Ok(reply) => println!("{reply}"),
        Err(e) => {
            eprintln!("-ERR {e}");
            std::process::exit(1);
        }
    }

    let handle = surface
        .registry()
        .handle(&cli.stream_id)
        .ok_or_else(|| anyhow!("detector vanished before any frame was fed"))?;

    let mut buf = Vec::new();
    let mut frames = 0u64;
    let mut detached = false;

    loop {
        let count = match wav.lock().next_packet_into(&mut buf) {
            Some(count) => count,
            None => break,
        };

        frames += 1;
        if handle.feed(&Frame::new(&buf, count)) == FeedStatus::Detached {
            detached = true;
            break;
        }

        if frames % 500 == 0 {
            tracing::debug!(frames, "still feeding");
        }
    }

    if !detached {
        tracing::info!(frames, "stream ended before detection completed");
        let reply = surface
            .execute(&format!("{} stop", cli.stream_id))
            .map_err(|e| anyhow!("stop failed: {e}"))?;
        println!("{reply}");
    }

    match events.try_recv() {
        Ok(event) => {
            println!(
                "stream={} silence_detected={} timed_out={} listening={} silence_hits_remaining={}",
                event.stream_id,
                event.silence_detected,
                event.timed_out,
                event.listening,
                event.silence_hits_remaining
            );
        }
        Err(_) => {
            println!("no completion event (stream ended or stopped first)");
        }
    }

    Ok(())
}
