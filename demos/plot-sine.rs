use humscan::*;

// cargo run -r --example plot-sine
// Writes 2 s of a 440 Hz tone with 50 Hz hum and 150 Hz harmonic, then plots it.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let path = std::env::temp_dir().join("humscan-sine440.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec)?;
    for n in 0..2 * spec.sample_rate {
        let t = n as f32 / spec.sample_rate as f32;
        let tau = 2.0 * std::f32::consts::PI;
        let s = 0.5 * (tau * 440.0 * t).sin()
            + 0.1 * (tau * 50.0 * t).sin()
            + 0.05 * (tau * 150.0 * t).sin();
        writer.write_sample((s * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;

    let signal = read_wav_file(&path)?;
    let spectrum = Spectrum::compute(&signal.mono(), signal.sample_rate() as f32)?;
    plot_spectrum(&spectrum, PlotView::default())
        .map_err(|e| anyhow::anyhow!("plot window failed: {e}"))
}
