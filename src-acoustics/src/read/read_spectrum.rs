//! Octave-band spectra given as text

use crate::error::{AcousticsError, Result};

/// Parse a list of band levels in dB.
///
/// Values may be separated by commas, semicolons or whitespace. The number
/// of values is not checked here; the level functions do that.
pub fn parse_spectrum(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|e| AcousticsError::InvalidSpectrum(format!("'{}': {}", s, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_separators() {
        let levels = parse_spectrum("60, 62.5;58 -3\t0,1,2,3").unwrap();
        assert_eq!(levels, vec![60.0, 62.5, 58.0, -3.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_bad_value() {
        assert!(matches!(
            parse_spectrum("1,2,x"),
            Err(AcousticsError::InvalidSpectrum(_))
        ));
    }

    #[test]
    fn test_empty() {
        assert!(parse_spectrum("  ").unwrap().is_empty());
    }
}
