//! Schroeder backward integration of octave-band energy
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
//! The instantaneous energy of an impulse response is too noisy to fit a
//! decay line to. Integrating it backwards from the end gives, at each
//! sample, the total energy still to come, which decays smoothly.

use ndarray::{Array1, ArrayView1};

use crate::error::{AcousticsError, Result};

/// Backward cumulative sum: `d[i] = s[i] + s[i+1] + ... + s[N-1]`.
///
/// Input values are expected to be non-negative energies; they are not
/// clamped. An empty input gives an empty curve.
pub fn schroeder_integral(energy: ArrayView1<'_, f64>) -> Array1<f64> {
    let mut curve = Array1::<f64>::zeros(energy.len());
    let mut acc = 0.0;
    for (d, &s) in curve.iter_mut().zip(energy.iter()).rev() {
        acc += s;
        *d = acc;
    }
    curve
}

/// Same as [`schroeder_integral`] for a plain slice.
pub fn schroeder_integral_slice(energy: &[f64]) -> Array1<f64> {
    schroeder_integral(ArrayView1::from(energy))
}

/// Decay curve in dB relative to its first sample.
///
/// # Errors
/// `DegenerateReference` if `curve[0]` is zero, negative or missing.
pub fn decay_curve_db(curve: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
    let reference = curve.first().copied().unwrap_or(0.0);
    if !(reference > 0.0) {
        return Err(AcousticsError::DegenerateReference(reference));
    }
    Ok(curve.mapv(|v| 10.0 * (v / reference).log10()))
}

/// Integrate `energy` and return the curve in dB relative to the total energy.
pub fn schroeder_integral_db(energy: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
    decay_curve_db(schroeder_integral(energy).view())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_sum() {
        let s = [100.0, 80.0, 60.0, 40.0, 20.0, 10.0, 5.0, 2.0, 1.0];
        let d = schroeder_integral_slice(&s);
        assert_eq!(
            d.to_vec(),
            vec![318.0, 218.0, 138.0, 78.0, 38.0, 18.0, 8.0, 3.0, 1.0]
        );
    }

    #[test]
    fn test_recurrence_holds() {
        let s: Vec<f64> = (0..64).map(|i| ((i * 7919) % 13) as f64 * 0.25).collect();
        let d = schroeder_integral_slice(&s);
        let n = s.len();
        assert_eq!(d[n - 1], s[n - 1]);
        for i in 0..n - 1 {
            assert!((d[i] - (s[i] + d[i + 1])).abs() < 1e-9, "mismatch at {}", i);
            assert!(d[i] >= d[i + 1], "curve increases at {}", i);
        }
    }

    #[test]
    fn test_zero_and_empty_input() {
        let zeros = schroeder_integral_slice(&[0.0; 16]);
        assert!(zeros.iter().all(|&v| v == 0.0));
        assert_eq!(schroeder_integral_slice(&[]).len(), 0);
    }

    #[test]
    fn test_negative_values_are_not_clamped() {
        let d = schroeder_integral_slice(&[1.0, -2.0, 3.0]);
        assert_eq!(d.to_vec(), vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_db_curve_starts_at_zero() {
        let db = schroeder_integral_db(ArrayView1::from(&[2.0, 1.0, 1.0][..])).unwrap();
        assert_eq!(db[0], 0.0);
        assert!((db[1] - 10.0 * 0.5_f64.log10()).abs() < 1e-12);
    }

    #[test]
    fn test_db_curve_degenerate_reference() {
        assert!(matches!(
            schroeder_integral_db(ArrayView1::from(&[0.0, 0.0][..])),
            Err(AcousticsError::DegenerateReference(_))
        ));
        assert!(matches!(
            decay_curve_db(ArrayView1::from(&[][..])),
            Err(AcousticsError::DegenerateReference(_))
        ));
    }
}
