use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::FftPlanner;

use crate::Error;

/// Magnitude spectrum of a whole signal, non-negative frequencies only.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    frequencies: Vec<f32>,
    magnitudes: Vec<f32>,
    bin_width: f32,
}

/// One strong bin of a spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub bin: usize,
    pub frequency: f32,
    pub magnitude: f32,
}

/// Bin centre frequencies of a real-input DFT of length `n`: `k * fs / n`
/// for `k` in `0..=n/2`.
pub fn rfft_frequencies(n: usize, sample_rate: f32) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }
    let step = sample_rate as f64 / n as f64;
    (0..=n / 2).map(|k| (k as f64 * step) as f32).collect()
}

impl Spectrum {
    /// Transforms the full signal with a rectangular window and keeps the
    /// modulus of bins `0..=n/2`.
    pub fn compute(samples: &[f32], sample_rate: f32) -> Result<Self, Error> {
        if samples.is_empty() {
            return Err(Error::EmptySignal);
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(Error::InvalidSampleRate(sample_rate));
        }

        let n = samples.len();
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(n);

        let mut buffer: Vec<Complex<f32>> = samples
            .iter()
            .map(|&sample| Complex::new(sample, 0.0))
            .collect();
        let mut scratch = vec![Complex::zero(); fft.get_inplace_scratch_len()];
        fft.process_with_scratch(&mut buffer, &mut scratch);

        let magnitudes: Vec<f32> = buffer[..=n / 2].iter().map(|c| c.norm()).collect();
        let frequencies = rfft_frequencies(n, sample_rate);
        debug_assert_eq!(frequencies.len(), magnitudes.len());

        Ok(Self {
            frequencies,
            magnitudes,
            bin_width: sample_rate / n as f32,
        })
    }

    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Spacing between adjacent bins in Hz.
    pub fn bin_width(&self) -> f32 {
        self.bin_width
    }

    /// Number of leading bins at or below `max_hz`.
    fn bins_up_to(&self, max_hz: f32) -> usize {
        self.frequencies.partition_point(|&f| f <= max_hz)
    }

    /// The part of the spectrum at or below `max_hz`.
    pub fn window(&self, max_hz: f32) -> Spectrum {
        let end = self.bins_up_to(max_hz);
        Spectrum {
            frequencies: self.frequencies[..end].to_vec(),
            magnitudes: self.magnitudes[..end].to_vec(),
            bin_width: self.bin_width,
        }
    }

    fn peak_of(&self, bin: usize) -> Peak {
        Peak {
            bin,
            frequency: self.frequencies[bin],
            magnitude: self.magnitudes[bin],
        }
    }

    pub fn peak(&self) -> Option<Peak> {
        self.peak_within(f32::INFINITY)
    }

    /// Strongest bin at or below `max_hz`.
    pub fn peak_within(&self, max_hz: f32) -> Option<Peak> {
        let end = self.bins_up_to(max_hz);
        self.magnitudes[..end]
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(bin, _)| self.peak_of(bin))
    }

    /// The `count` strongest local maxima at or below `max_hz`, strongest first.
    pub fn top_peaks(&self, max_hz: f32, count: usize) -> Vec<Peak> {
        let mags = &self.magnitudes[..self.bins_up_to(max_hz)];
        let mut peaks: Vec<Peak> = (0..mags.len())
            .filter(|&k| {
                let left = k.checked_sub(1).map_or(f32::NEG_INFINITY, |i| mags[i]);
                let right = mags.get(k + 1).copied().unwrap_or(f32::NEG_INFINITY);
                mags[k] > left && mags[k] >= right
            })
            .map(|k| self.peak_of(k))
            .collect();
        peaks.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
        peaks.truncate(count);
        peaks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, sample_rate: f64, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (2.0 * PI * freq * n as f64 / sample_rate).sin() as f32)
            .collect()
    }

    #[test]
    fn test_sine_peak_on_bin() {
        let spectrum = Spectrum::compute(&sine(440.0, 8000.0, 8000), 8000.0).unwrap();
        let peak = spectrum.peak().unwrap();
        assert_eq!(peak.bin, 440);
        assert!((peak.frequency - 440.0).abs() < 1e-3);
        // a full-scale sine carries N/2 in its bin
        assert!((peak.magnitude - 4000.0).abs() < 10.0);
    }

    #[test]
    fn test_sine_peak_between_bins() {
        // bin width is 2 Hz, so 50.3 Hz lands nearest the 50 Hz bin
        let spectrum = Spectrum::compute(&sine(50.3, 8000.0, 4000), 8000.0).unwrap();
        assert!((spectrum.bin_width() - 2.0).abs() < 1e-6);
        let peak = spectrum.peak().unwrap();
        assert_eq!(peak.bin, 25);
        assert!((peak.frequency - 50.3).abs() <= spectrum.bin_width());
    }

    #[test]
    fn test_bin_count() {
        for n in [1, 2, 7, 8, 1000, 1023] {
            let spectrum = Spectrum::compute(&vec![0.1; n], 1000.0).unwrap();
            assert_eq!(spectrum.len(), n / 2 + 1);
            assert_eq!(spectrum.magnitudes().len(), spectrum.frequencies().len());
        }
    }

    #[test]
    fn test_frequencies_monotonic_from_zero() {
        let freqs = rfft_frequencies(1024, 48000.0);
        assert_eq!(freqs.len(), 513);
        assert_eq!(freqs[0], 0.0);
        assert!(freqs.windows(2).all(|w| w[0] <= w[1]));
        assert!((freqs[512] - 24000.0).abs() < 1e-3);

        // odd length stops short of Nyquist
        let freqs = rfft_frequencies(5, 10.0);
        assert_eq!(freqs, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_magnitudes_non_negative() {
        let samples: Vec<f32> = (0..777).map(|n| ((n * 37) % 11) as f32 - 5.0).collect();
        let spectrum = Spectrum::compute(&samples, 16000.0).unwrap();
        assert!(spectrum.magnitudes().iter().all(|&m| m >= 0.0));
    }

    #[test]
    fn test_zero_signal() {
        let spectrum = Spectrum::compute(&[0.0; 512], 16000.0).unwrap();
        assert!(spectrum.magnitudes().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_dc_signal() {
        let spectrum = Spectrum::compute(&[1.0; 100], 100.0).unwrap();
        assert!((spectrum.magnitudes()[0] - 100.0).abs() < 1e-3);
        assert!(spectrum.magnitudes()[1..].iter().all(|&m| m < 1e-3));
    }

    #[test]
    fn test_rejects_empty_and_bad_rate() {
        assert!(matches!(
            Spectrum::compute(&[], 8000.0),
            Err(Error::EmptySignal)
        ));
        assert!(matches!(
            Spectrum::compute(&[0.0; 4], 0.0),
            Err(Error::InvalidSampleRate(_))
        ));
        assert!(matches!(
            Spectrum::compute(&[0.0; 4], f32::NAN),
            Err(Error::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn test_window_clips_to_max() {
        let spectrum = Spectrum::compute(&sine(440.0, 8000.0, 8000), 8000.0).unwrap();
        let window = spectrum.window(1000.0);
        assert_eq!(window.len(), 1001);
        assert_eq!(*window.frequencies().last().unwrap(), 1000.0);
        assert_eq!(window.bin_width(), spectrum.bin_width());
        assert!(spectrum.window(-1.0).is_empty());
    }

    #[test]
    fn test_peak_within_ignores_out_of_window() {
        let samples: Vec<f32> = sine(60.0, 8000.0, 8000)
            .iter()
            .zip(sine(2000.0, 8000.0, 8000))
            .map(|(a, b)| 0.2 * a + b)
            .collect();
        let spectrum = Spectrum::compute(&samples, 8000.0).unwrap();
        assert_eq!(spectrum.peak().unwrap().bin, 2000);
        assert_eq!(spectrum.peak_within(1000.0).unwrap().bin, 60);
        assert!(spectrum.peak_within(-1.0).is_none());
    }

    #[test]
    fn test_top_peaks_strongest_first() {
        // mains hum and its third harmonic
        let samples: Vec<f32> = sine(50.0, 8000.0, 8000)
            .iter()
            .zip(sine(150.0, 8000.0, 8000))
            .zip(sine(3000.0, 8000.0, 8000))
            .map(|((a, b), c)| 0.5 * a + b + c)
            .collect();
        let spectrum = Spectrum::compute(&samples, 8000.0).unwrap();
        let peaks = spectrum.top_peaks(1000.0, 2);
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].bin, 150);
        assert_eq!(peaks[1].bin, 50);
        assert!(peaks[0].magnitude > peaks[1].magnitude);
    }
}
