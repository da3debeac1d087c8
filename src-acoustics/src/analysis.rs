//! Per-band reverberation time for a whole multi-band signal
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

use ndarray::ArrayView1;
use rayon::prelude::*;

use crate::config::AnalysisConfig;
use crate::decay::{DecayFit, fit_decay};
use crate::error::Result;
use crate::schroeder::schroeder_integral;
use crate::signal::MultiBandSignal;

/// Schroeder-integrate one band and fit its decay.
pub fn band_decay_fit(
    band: ArrayView1<'_, f64>,
    span_db: u32,
    sample_rate: u32,
) -> Result<DecayFit> {
    let curve = schroeder_integral(band);
    fit_decay(curve.view(), span_db, sample_rate)
}

/// Decay fits for every band, in band order.
///
/// A band that cannot be fitted gets its own error; the other bands are
/// still computed. With `config.parallel` the bands are spread over the
/// rayon pool.
pub fn reverberation_fits(
    signal: &MultiBandSignal,
    config: &AnalysisConfig,
) -> Vec<Result<DecayFit>> {
    let span = config.decay_span_db;
    let fs = signal.sample_rate();
    let fits: Vec<Result<DecayFit>> = if config.parallel {
        let bands = signal.bands();
        (0..signal.n_bands())
            .into_par_iter()
            .map(|i| band_decay_fit(bands.row(i), span, fs))
            .collect()
    } else {
        signal
            .iter_bands()
            .map(|band| band_decay_fit(band, span, fs))
            .collect()
    };

    let failed = fits.iter().filter(|f| f.is_err()).count();
    log::debug!(
        "T{} over {} band(s): {} failed",
        span,
        signal.n_bands(),
        failed
    );
    fits
}

/// Reverberation time in seconds for every band, in band order.
pub fn reverberation_times(signal: &MultiBandSignal, span_db: u32) -> Vec<Result<f64>> {
    let config = AnalysisConfig {
        decay_span_db: span_db,
        ..AnalysisConfig::default()
    };
    reverberation_times_with(signal, &config)
}

pub fn reverberation_times_with(
    signal: &MultiBandSignal,
    config: &AnalysisConfig,
) -> Vec<Result<f64>> {
    reverberation_fits(signal, config)
        .into_iter()
        .map(|fit| fit.map(|f| f.rt_seconds))
        .collect()
}

/// Like [`reverberation_times`] but fails on the first band that cannot be
/// fitted.
pub fn reverberation_times_strict(signal: &MultiBandSignal, span_db: u32) -> Result<Vec<f64>> {
    reverberation_times(signal, span_db).into_iter().collect()
}
