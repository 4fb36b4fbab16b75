//! Whole-recording spectrum plots for spotting interference tones
//! (mains hum, filter artifacts) in processed audio.

mod error;
pub mod plot;
pub mod spectrum;
pub mod wav;

pub use error::Error;
pub use plot::{plot_spectrum, PlotView};
pub use spectrum::{Peak, Spectrum};
pub use wav::{read_wav_file, AudioData, Signal};
