use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read WAV: {0}")]
    Wav(#[from] hound::Error),

    #[error("signal has no samples")]
    EmptySignal,

    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    #[error("channel {index} out of range, file has {channels} channel(s)")]
    ChannelOutOfRange { index: usize, channels: usize },
}
