//! Reverberation time from a Schroeder decay curve (T_X)
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
//! A line is fitted to the decay curve between -5 dB and -(X+5) dB and
//! extrapolated to a 60 dB decay. The 5 dB head room skips the direct sound;
//! the limited span keeps the fit above the noise floor.

use ndarray::ArrayView1;
use serde::Serialize;

use crate::error::{AcousticsError, DecayShortfall, Result};
use crate::schroeder::decay_curve_db;

/// Default regression span in dB (T30).
pub const DEFAULT_DECAY_SPAN_DB: u32 = 30;
/// Level below the reference at which the regression window opens.
pub const DECAY_HEAD_ROOM_DB: f64 = 5.0;
/// Decay the fitted slope is extrapolated to.
pub const EXTRAPOLATED_DECAY_DB: f64 = 60.0;

/// Linear fit of one decay curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayFit {
    /// First sample of the regression window (first level at or below -5 dB)
    pub start: usize,
    /// Last sample of the regression window (first level at or below -(X+5) dB)
    pub end: usize,
    pub slope_db_per_sample: f64,
    pub intercept_db: f64,
    /// Decay rate in dB per second (negative for a decaying curve)
    pub decay_rate_db_per_sec: f64,
    /// Time to decay by 60 dB at the fitted rate
    pub rt_seconds: f64,
}

/// Fit the decay line for a span of `span_db` dB and extrapolate to 60 dB.
///
/// # Arguments
/// * `curve` - Schroeder decay curve in linear energy units
/// * `span_db` - Decay span X in dB (30 for T30, 20 for T20, ...)
/// * `sample_rate` - Sample rate of the curve in Hz
///
/// # Errors
/// * `DegenerateReference` if `curve[0] <= 0`
/// * `InsufficientDecayRange` if the curve never drops to -(X+5) dB, or the
///   window holds fewer than two usable points, or the fitted line does not
///   decay
pub fn fit_decay(
    curve: ArrayView1<'_, f64>,
    span_db: u32,
    sample_rate: u32,
) -> Result<DecayFit> {
    if sample_rate == 0 {
        return Err(AcousticsError::InvalidSampleRate(sample_rate));
    }
    let levels = decay_curve_db(curve)?;

    let upper = -DECAY_HEAD_ROOM_DB;
    let lower = -(span_db as f64 + DECAY_HEAD_ROOM_DB);
    let reached_db = levels.iter().copied().fold(0.0_f64, f64::min);
    let insufficient = |shortfall| AcousticsError::InsufficientDecayRange {
        required_db: lower,
        reached_db,
        shortfall,
    };

    let (Some(start), Some(end)) = (
        levels.iter().position(|&l| l <= upper),
        levels.iter().position(|&l| l <= lower),
    ) else {
        return Err(insufficient(DecayShortfall::DepthNotReached));
    };

    // A tail of exact zeros maps to -inf dB and cannot take part in the fit.
    let points: Vec<(f64, f64)> = (start..=end)
        .map(|i| (i as f64, levels[i]))
        .filter(|(_, l)| l.is_finite())
        .collect();
    let (slope, intercept) = least_squares_line(&points)
        .ok_or_else(|| insufficient(DecayShortfall::TooFewPoints(points.len())))?;
    if !(slope < 0.0) {
        return Err(insufficient(DecayShortfall::NonDecayingSlope));
    }

    let decay_rate_db_per_sec = slope * sample_rate as f64;
    let rt_seconds = EXTRAPOLATED_DECAY_DB / -decay_rate_db_per_sec;

    log::trace!(
        "T{}: window {}..={} slope {:.5} dB/sample, rt {:.4} s",
        span_db,
        start,
        end,
        slope,
        rt_seconds
    );

    Ok(DecayFit {
        start,
        end,
        slope_db_per_sample: slope,
        intercept_db: intercept,
        decay_rate_db_per_sec,
        rt_seconds,
    })
}

/// Reverberation time in seconds for a span of `span_db` dB.
///
/// See [`fit_decay`] for the errors.
pub fn t_x(curve: ArrayView1<'_, f64>, span_db: u32, sample_rate: u32) -> Result<f64> {
    fit_decay(curve, span_db, sample_rate).map(|fit| fit.rt_seconds)
}

/// Ordinary least squares fit `y = slope * x + intercept`.
///
/// Returns `None` with fewer than two points or when all x are equal.
fn least_squares_line(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mx = points.iter().map(|p| p.0).sum::<f64>() / n;
    let my = points.iter().map(|p| p.1).sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for &(x, y) in points {
        let dx = x - mx;
        sxy += dx * (y - my);
        sxx += dx * dx;
    }
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, my - slope * mx))
}
