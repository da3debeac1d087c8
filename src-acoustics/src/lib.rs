//! room-acoustics - decay and loudness metrics for octave-band energy time curves
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
//!
//! - Schroeder backward integration of per-band energy
//! - T_X reverberation time by regression on the decay curve
//! - A-weighted sound pressure level over 8 octave bands

/// Per-band reverberation over whole signals
pub mod analysis;
/// Configuration shared by the binaries
pub mod config;
/// Decay-rate estimation (T_X)
pub mod decay;
pub mod error;
/// WAV and spectrum input
pub mod read;
/// Schroeder integral
pub mod schroeder;
pub mod signal;
/// A-weighted level aggregation
pub mod spl;
/// Octave-band A-weighting table
pub mod weighting;
/// CSV export
pub mod write;

// Re-export commonly used items
pub use analysis::{
    band_decay_fit, reverberation_fits, reverberation_times, reverberation_times_strict,
    reverberation_times_with,
};
pub use config::{AnalysisConfig, AnalysisConfigBuilder};
pub use decay::{DEFAULT_DECAY_SPAN_DB, DecayFit, fit_decay, t_x};
pub use error::{AcousticsError, DecayShortfall, Result};
pub use schroeder::{schroeder_integral, schroeder_integral_db, schroeder_integral_slice};
pub use signal::MultiBandSignal;
pub use spl::{
    IntensityAccumulator, LevelInput, REFERENCE_INTENSITY, signals_level_a,
    sound_pressure_level_a, weighted_level,
};
pub use weighting::{A_WEIGHTING_DB, OCTAVE_BANDS, a_weighting_factors};
