//! Octave-band A-weighting
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

/// Number of octave bands the weighting covers (63 Hz .. 8 kHz).
pub const OCTAVE_BANDS: usize = 8;

/// Nominal octave centre frequencies in Hz, band 0 first.
pub const OCTAVE_CENTERS_HZ: [f64; OCTAVE_BANDS] =
    [63.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0];

/// A-weighting correction per octave band in dB.
pub const A_WEIGHTING_DB: [f64; OCTAVE_BANDS] = [-26.2, -16.1, -8.6, -3.2, 0.0, 1.2, 1.0, -1.1];

/// Convert a dB correction to a linear intensity factor.
#[inline]
pub fn db_to_intensity_factor(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

/// Linear intensity multipliers `10^(A_i / 10)` for each octave band.
///
/// These are applied to intensities before summation, since intensities
/// only add in the linear domain.
pub fn a_weighting_factors() -> [f64; OCTAVE_BANDS] {
    A_WEIGHTING_DB.map(db_to_intensity_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_match_offsets() {
        let factors = a_weighting_factors();
        assert_eq!(factors[4], 1.0);
        assert!((factors[0] - 0.002_398_832_919_019_49).abs() < 1e-15);
        assert!((factors[5] - 1.318_256_738_556_407).abs() < 1e-12);
        for (f, db) in factors.iter().zip(A_WEIGHTING_DB.iter()) {
            assert!((10.0 * f.log10() - db).abs() < 1e-12);
        }
    }

    #[test]
    fn test_factors_peak_in_mid_bands() {
        let factors = a_weighting_factors();
        let (argmax, _) = factors
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, &f)| if f > acc.1 { (i, f) } else { acc });
        assert_eq!(OCTAVE_CENTERS_HZ[argmax], 2000.0);
        assert!(factors[0] < factors[1] && factors[7] < factors[6]);
    }
}
