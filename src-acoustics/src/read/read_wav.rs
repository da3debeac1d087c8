//! Multi-channel WAV files as multi-band signals

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};
use ndarray::Array2;

use crate::error::{AcousticsError, Result};
use crate::signal::MultiBandSignal;

/// Load a WAV file as a multi-band signal, one band per channel.
///
/// Channel `c` becomes band `c`, so an octave-band energy time curve stored
/// as an 8-channel file keeps its band order. Integer samples are scaled to
/// [-1, 1); float samples are used as-is. 8-bit files are rejected.
///
/// # Arguments
/// * `path` - Path to the WAV file
pub fn load_wav_bands(path: &Path) -> Result<MultiBandSignal> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_format == SampleFormat::Int && spec.bits_per_sample <= 8 {
        return Err(AcousticsError::UnsupportedBitDepth {
            path: path.to_path_buf(),
            bits: spec.bits_per_sample,
        });
    }

    let channels = spec.channels as usize;
    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let max_val = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let frames = interleaved.len() / channels;
    let mut bands = Array2::<f64>::zeros((channels, frames));
    for (frame_idx, frame) in interleaved.chunks_exact(channels).enumerate() {
        for (band, &value) in frame.iter().enumerate() {
            bands[[band, frame_idx]] = value;
        }
    }

    log::debug!(
        "Loaded {}: {} band(s) x {} samples at {} Hz",
        path.display(),
        channels,
        frames,
        spec.sample_rate
    );

    MultiBandSignal::new(bands, spec.sample_rate)
}

/// Load several WAV files, in order.
pub fn load_wav_files(paths: &[PathBuf]) -> Result<Vec<MultiBandSignal>> {
    paths.iter().map(|p| load_wav_bands(p)).collect()
}
