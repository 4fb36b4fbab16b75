use hound::{SampleFormat, WavReader};
use smallvec::{smallvec as svec, SmallVec};
use std::path::Path;

use crate::Error;

/// Per-channel samples, normalised to [-1, 1).
pub type AudioData = SmallVec<[Vec<f32>; 2]>;

/// A decoded recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    channels: AudioData,
    sample_rate: u32,
}

impl Signal {
    pub fn new(channels: AudioData, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel).
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    pub fn channels(&self) -> &AudioData {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Result<&[f32], Error> {
        self.channels
            .get(index)
            .map(Vec::as_slice)
            .ok_or(Error::ChannelOutOfRange {
                index,
                channels: self.channels.len(),
            })
    }

    /// Mono view of the signal. Multi-channel frames are averaged.
    pub fn mono(&self) -> Vec<f32> {
        match self.channels.len() {
            0 => Vec::new(),
            1 => self.channels[0].clone(),
            n => {
                let scale = 1.0 / n as f32;
                (0..self.len())
                    .map(|i| self.channels.iter().map(|c| c[i]).sum::<f32>() * scale)
                    .collect()
            }
        }
    }
}

/// Reads a WAV file into per-channel samples plus its sample rate.
///
/// Integer PCM is scaled by `2^(bits - 1)`; 32-bit float is passed through.
pub fn read_wav_file<P: AsRef<Path>>(path: P) -> Result<Signal, Error> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    log::debug!("wav spec: {:?}", spec);

    let num_channels = spec.channels as usize;
    if num_channels == 0 {
        return Err(Error::Wav(hound::Error::Unsupported));
    }
    let mut data: AudioData = svec![];
    for _ in 0..num_channels {
        data.push(Vec::with_capacity(reader.duration() as usize));
    }

    match spec.sample_format {
        SampleFormat::Int => {
            if !(8..=32).contains(&spec.bits_per_sample) {
                return Err(Error::Wav(hound::Error::Unsupported));
            }
            let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f64;
            deinterleave(
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|s| (s as f64 * scale) as f32)),
                &mut data,
            )?;
        }
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(Error::Wav(hound::Error::Unsupported));
            }
            deinterleave(reader.into_samples::<f32>(), &mut data)?;
        }
    }

    Ok(Signal::new(data, spec.sample_rate))
}

fn deinterleave<I>(samples: I, data: &mut AudioData) -> Result<(), Error>
where
    I: Iterator<Item = Result<f32, hound::Error>>,
{
    let num_channels = data.len();
    for (sample_count, result) in samples.enumerate() {
        data[sample_count % num_channels].push(result?);
    }
    // drop a trailing partial frame so every channel has the same length
    let frames = data.iter().map(Vec::len).min().unwrap_or(0);
    for channel in data.iter_mut() {
        channel.truncate(frames);
    }
    Ok(())
}
