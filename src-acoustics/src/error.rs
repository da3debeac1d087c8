//! Error type shared by every room-acoustics computation
//!
//! Copyright (C) 2025 Pierre Aubert pierre(at)spinorama(dot)org
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fmt;
use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AcousticsError>;

/// Failures reported by the analysis functions.
///
/// Every failure is scoped to a single band or a single call; nothing is
/// retried or suppressed inside the library.
#[derive(Debug, thiserror::Error)]
pub enum AcousticsError {
    /// The weighted aggregator needs exactly one value or band per octave.
    #[error(
        "For A-weighted sound pressure level, full spectrum data is needed: expected {expected} octave bands, found {found}"
    )]
    SpectrumLengthMismatch { expected: usize, found: usize },

    /// The energy at index 0 of a decay curve is not strictly positive.
    #[error("decay curve reference energy must be positive, got {0}")]
    DegenerateReference(f64),

    /// No reverberation time can be extrapolated for the requested span.
    #[error("{shortfall}: {required_db:.2} dB required, curve reaches {reached_db:.2} dB")]
    InsufficientDecayRange {
        required_db: f64,
        reached_db: f64,
        shortfall: DecayShortfall,
    },

    /// An octave band index past the last weighted band.
    #[error("octave band {band} out of range, only {bands} bands are weighted")]
    BandIndexOutOfRange { band: usize, bands: usize },

    /// Bands of a multi-band signal do not share one length.
    #[error("band {band} has {found} samples, expected {expected}")]
    RaggedBands {
        band: usize,
        expected: usize,
        found: usize,
    },

    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(u32),

    #[error("{path}: {bits}-bit audio is not supported, a minimum bit depth of 16 is required")]
    UnsupportedBitDepth { path: PathBuf, bits: u16 },

    #[error("invalid spectrum: {0}")]
    InvalidSpectrum(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a decay curve could not be fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayShortfall {
    /// The curve never drops to -(X+5) dB.
    DepthNotReached,
    /// The regression window holds fewer than two finite levels.
    TooFewPoints(usize),
    /// The fitted line is flat or rising.
    NonDecayingSlope,
}

impl fmt::Display for DecayShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecayShortfall::DepthNotReached => write!(f, "decay curve never reaches the span"),
            DecayShortfall::TooFewPoints(n) => {
                write!(f, "regression window holds {} usable point(s), 2 needed", n)
            }
            DecayShortfall::NonDecayingSlope => write!(f, "fitted decay line does not fall"),
        }
    }
}
