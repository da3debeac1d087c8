//! A-weighted sound pressure level from octave-band data
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

use serde::{Deserialize, Serialize};

use crate::error::{AcousticsError, Result};
use crate::signal::MultiBandSignal;
use crate::weighting::{A_WEIGHTING_DB, OCTAVE_BANDS, a_weighting_factors, db_to_intensity_factor};

/// Reference intensity for SPL, in W/m².
pub const REFERENCE_INTENSITY: f64 = 1e-12;

/// The two accepted shapes of level data.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelInput {
    /// One level in dB per octave band, band 0 first.
    Spectrum(Vec<f64>),
    /// Energy time curves with one band per octave.
    Signals(Vec<MultiBandSignal>),
}

/// Convert an intensity to a level in dB re `reference`.
///
/// Zero intensity gives `f64::NEG_INFINITY`.
#[inline]
pub fn intensity_to_spl(intensity: f64, reference: f64) -> f64 {
    10.0 * (intensity / reference).log10()
}

fn check_band_count(found: usize) -> Result<()> {
    if found != OCTAVE_BANDS {
        return Err(AcousticsError::SpectrumLengthMismatch {
            expected: OCTAVE_BANDS,
            found,
        });
    }
    Ok(())
}

/// A-weighted level of an octave-band spectrum given in dB.
///
/// `10·log10(Σ 10^((L_i + A_i) / 10))`
pub fn sound_pressure_level_a(levels: &[f64]) -> Result<f64> {
    check_band_count(levels.len())?;
    let sum: f64 = levels
        .iter()
        .zip(A_WEIGHTING_DB.iter())
        .map(|(l, a)| db_to_intensity_factor(l + a))
        .sum();
    Ok(10.0 * sum.log10())
}

/// Running total of A-weighted intensity.
///
/// `level_db` may be read after every addition for a running value; the
/// aggregate functions below only read it once at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntensityAccumulator {
    total: f64,
}

impl IntensityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an already weighted intensity.
    pub fn add(&mut self, intensity: f64) {
        self.total += intensity;
    }

    /// Weight the energy of octave band `band` and add it.
    pub fn add_weighted_band(&mut self, band: usize, energy: f64) -> Result<()> {
        let factor = a_weighting_factors()
            .get(band)
            .copied()
            .ok_or(AcousticsError::BandIndexOutOfRange {
                band,
                bands: OCTAVE_BANDS,
            })?;
        self.add(energy * factor);
        Ok(())
    }

    /// Add every band of an 8-band signal, each summed over time.
    pub fn add_signal(&mut self, signal: &MultiBandSignal) -> Result<()> {
        check_band_count(signal.n_bands())?;
        for (band, energy) in signal.band_energies().iter().enumerate() {
            self.add_weighted_band(band, *energy)?;
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn level_db(&self, reference: f64) -> f64 {
        intensity_to_spl(self.total, reference)
    }
}

/// A-weighted level of a set of 8-band energy time curves.
///
/// Band energies of every signal are weighted and summed into one total
/// intensity, which is converted to dB once.
pub fn signals_level_a(signals: &[MultiBandSignal], reference: f64) -> Result<f64> {
    let mut acc = IntensityAccumulator::new();
    for signal in signals {
        acc.add_signal(signal)?;
    }
    log::debug!(
        "A-weighted intensity over {} signal(s): {:.6e}",
        signals.len(),
        acc.total()
    );
    Ok(acc.level_db(reference))
}

/// A-weighted level for either input shape.
pub fn weighted_level(input: &LevelInput, reference: f64) -> Result<f64> {
    match input {
        LevelInput::Spectrum(levels) => sound_pressure_level_a(levels),
        LevelInput::Signals(signals) => signals_level_a(signals, reference),
    }
}
