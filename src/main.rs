use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use humscan::{plot_spectrum, read_wav_file, PlotView, Spectrum};

/// Plot the spectrum of a recording to spot interference tones.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// WAV file to analyse.
    #[arg(default_value = "audio3_16_bit_high_pass_filtered.wav")]
    path: PathBuf,

    /// Upper bound of the plotted frequency range in Hz.
    #[arg(long, default_value_t = 1000.0)]
    max_freq: f32,

    /// Analyse a single channel instead of the mono mix.
    #[arg(long)]
    channel: Option<usize>,

    /// Number of strongest peaks to log.
    #[arg(long, default_value_t = 5)]
    peaks: usize,
}

// cargo run -r -- recording.wav
fn main() -> anyhow::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let cli = Cli::parse();

    let signal = read_wav_file(&cli.path)
        .with_context(|| format!("failed to load {}", cli.path.display()))?;
    info!(
        "{}: {} channel(s), {} Hz, {:.2} s",
        cli.path.display(),
        signal.num_channels(),
        signal.sample_rate(),
        signal.duration_secs()
    );

    let samples = match cli.channel {
        Some(index) => signal.channel(index)?.to_vec(),
        None => signal.mono(),
    };
    let spectrum = Spectrum::compute(&samples, signal.sample_rate() as f32)?;
    info!(
        "{} bins, {:.4} Hz per bin",
        spectrum.len(),
        spectrum.bin_width()
    );

    for peak in spectrum.top_peaks(cli.max_freq, cli.peaks) {
        info!(
            "peak at {:.2} Hz (bin {}), magnitude {:.3}",
            peak.frequency, peak.bin, peak.magnitude
        );
    }

    let view = PlotView {
        max_freq: cli.max_freq,
        ..Default::default()
    };
    plot_spectrum(&spectrum, view).map_err(|e| anyhow::anyhow!("plot window failed: {e}"))
}
