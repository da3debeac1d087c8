//! Export of per-band results
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

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::decay::DecayFit;
use crate::error::Result;

/// One CSV row per band. Failed bands keep their index and carry the
/// error message instead of numbers.
#[derive(Debug, Serialize)]
struct ReverberationRow {
    band: usize,
    rt_seconds: Option<f64>,
    start_index: Option<usize>,
    end_index: Option<usize>,
    slope_db_per_sample: Option<f64>,
    error: Option<String>,
}

impl ReverberationRow {
    fn new(band: usize, fit: &Result<DecayFit>) -> Self {
        match fit {
            Ok(f) => Self {
                band,
                rt_seconds: Some(f.rt_seconds),
                start_index: Some(f.start),
                end_index: Some(f.end),
                slope_db_per_sample: Some(f.slope_db_per_sample),
                error: None,
            },
            Err(e) => Self {
                band,
                rt_seconds: None,
                start_index: None,
                end_index: None,
                slope_db_per_sample: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Write per-band decay fits as CSV to any writer.
pub fn write_reverberation<W: Write>(writer: W, fits: &[Result<DecayFit>]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (band, fit) in fits.iter().enumerate() {
        wtr.serialize(ReverberationRow::new(band, fit))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write per-band decay fits to a CSV file.
///
/// Columns: `band,rt_seconds,start_index,end_index,slope_db_per_sample,error`
pub fn write_reverberation_csv(path: &Path, fits: &[Result<DecayFit>]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_reverberation(file, fits)?;
    log::info!("Wrote {} band(s) to {}", fits.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AcousticsError;

    #[test]
    fn test_rows() {
        let fits = vec![
            Ok(DecayFit {
                start: 3,
                end: 7,
                slope_db_per_sample: -0.5,
                intercept_db: -3.0,
                decay_rate_db_per_sec: -500.0,
                rt_seconds: 0.12,
            }),
            Err(AcousticsError::DegenerateReference(0.0)),
        ];
        let mut out = Vec::new();
        write_reverberation(&mut out, &fits).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "band,rt_seconds,start_index,end_index,slope_db_per_sample,error"
        );
        assert_eq!(lines[1], "0,0.12,3,7,-0.5,");
        assert!(lines[2].starts_with("1,,,,,"));
        assert!(lines[2].contains("reference energy must be positive"));
    }
}
