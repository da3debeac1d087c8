//! Multi-band energy time curves
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

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{AcousticsError, Result};

/// A set of equal-length energy sequences, one per octave band, sharing a
/// sample rate.
///
/// Row `i` of the underlying array is band `i` (index 0 is the lowest
/// octave). The signal is read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiBandSignal {
    bands: Array2<f64>,
    sample_rate: u32,
}

impl MultiBandSignal {
    /// Wrap a `(n_bands, n_samples)` array.
    pub fn new(bands: Array2<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AcousticsError::InvalidSampleRate(sample_rate));
        }
        Ok(Self { bands, sample_rate })
    }

    /// Build a signal from one vector per band.
    ///
    /// # Errors
    /// `RaggedBands` if the bands differ in length, `InvalidSampleRate` if
    /// `sample_rate` is zero.
    pub fn from_bands(bands: Vec<Vec<f64>>, sample_rate: u32) -> Result<Self> {
        let len = bands.first().map_or(0, Vec::len);
        if let Some((band, found)) = bands
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, n)| n != len)
        {
            return Err(AcousticsError::RaggedBands {
                band,
                expected: len,
                found,
            });
        }

        let mut array = Array2::<f64>::zeros((bands.len(), len));
        for (mut row, band) in array.axis_iter_mut(Axis(0)).zip(bands.iter()) {
            row.assign(&ArrayView1::from(band.as_slice()));
        }
        Self::new(array, sample_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn n_bands(&self) -> usize {
        self.bands.nrows()
    }

    /// Number of samples in each band.
    pub fn len(&self) -> usize {
        self.bands.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the signal in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    pub fn band(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.n_bands()).then(|| self.bands.row(index))
    }

    pub fn bands(&self) -> ArrayView2<'_, f64> {
        self.bands.view()
    }

    /// Iterate over the bands in order.
    pub fn iter_bands(&self) -> impl ExactSizeIterator<Item = ArrayView1<'_, f64>> {
        self.bands.axis_iter(Axis(0))
    }

    /// Energy of each band summed over time.
    pub fn band_energies(&self) -> Array1<f64> {
        self.bands.sum_axis(Axis(1))
    }
}
