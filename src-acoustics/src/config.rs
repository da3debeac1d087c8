//! Analysis configuration
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
//! Defaults can be overridden from a YAML (or JSON) file, either given
//! explicitly or named by the `ROOM_ACOUSTICS_CONFIG` environment variable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::decay::DEFAULT_DECAY_SPAN_DB;
use crate::error::{AcousticsError, Result};
use crate::spl::REFERENCE_INTENSITY;

/// Largest accepted regression span, in dB.
pub const MAX_DECAY_SPAN_DB: u32 = 100;

/// Settings shared by the reverberation and level computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Regression span X in dB for T_X
    pub decay_span_db: u32,
    /// Reference intensity for SPL in W/m²
    pub reference_intensity: f64,
    /// Evaluate bands on the rayon thread pool
    pub parallel: bool,
    /// Size of the global rayon pool (None keeps the rayon default)
    pub num_threads: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            decay_span_db: DEFAULT_DECAY_SPAN_DB,
            reference_intensity: REFERENCE_INTENSITY,
            parallel: false,
            num_threads: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_DECAY_SPAN_DB).contains(&self.decay_span_db) {
            return Err(AcousticsError::Config(format!(
                "decay_span_db out of range (1..{}): {}",
                MAX_DECAY_SPAN_DB, self.decay_span_db
            )));
        }
        if !(self.reference_intensity.is_finite() && self.reference_intensity > 0.0) {
            return Err(AcousticsError::Config(format!(
                "reference_intensity must be positive: {}",
                self.reference_intensity
            )));
        }
        if self.num_threads == Some(0) {
            return Err(AcousticsError::Config(
                "num_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a YAML document; missing keys keep their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|e| AcousticsError::Config(format!("YAML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| AcousticsError::Config(format!("JSON parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. Files ending in `.json` are read as JSON,
    /// anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        log::debug!("Loading analysis config from {}", path.display());
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Load the file named by `ROOM_ACOUSTICS_CONFIG`, or the defaults when
    /// the variable is not set.
    pub fn from_env() -> Result<Self> {
        match room_acoustics_env::get_config_path()
            .map_err(|e| AcousticsError::Config(e.to_string()))?
        {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Size the global rayon pool if `num_threads` is set.
    ///
    /// The global pool can only be built once; later calls are ignored.
    pub fn apply_thread_pool(&self) {
        if let Some(n) = self.num_threads
            && rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build_global()
                .is_err()
        {
            log::debug!("rayon global pool already initialised, keeping it");
        }
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfigBuilder {
    cfg: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn decay_span_db(mut self, v: u32) -> Self {
        self.cfg.decay_span_db = v;
        self
    }
    pub fn reference_intensity(mut self, v: f64) -> Self {
        self.cfg.reference_intensity = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn num_threads(mut self, v: usize) -> Self {
        self.cfg.num_threads = Some(v);
        self
    }
    pub fn build(self) -> Result<AnalysisConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.decay_span_db, 30);
        assert_eq!(cfg.reference_intensity, 1e-12);
        assert!(!cfg.parallel);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_override() {
        let cfg = AnalysisConfig::from_yaml_str("decay_span_db: 20\nparallel: true\n").unwrap();
        assert_eq!(cfg.decay_span_db, 20);
        assert!(cfg.parallel);
        assert_eq!(cfg.reference_intensity, REFERENCE_INTENSITY);
    }

    #[test]
    fn test_json_override() {
        let cfg = AnalysisConfig::from_json_str(r#"{"reference_intensity": 2e-5}"#).unwrap();
        assert_eq!(cfg.reference_intensity, 2e-5);
        assert_eq!(cfg.decay_span_db, DEFAULT_DECAY_SPAN_DB);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AnalysisConfig::from_yaml_str("decay_span_db: 0").is_err());
        assert!(AnalysisConfig::from_yaml_str("reference_intensity: -1.0").is_err());
        assert!(AnalysisConfig::from_yaml_str("num_threads: 0").is_err());
        assert!(AnalysisConfig::from_yaml_str("decay_span_db: [1, 2]").is_err());
    }

    #[test]
    fn test_builder() {
        let cfg = AnalysisConfigBuilder::new()
            .decay_span_db(20)
            .parallel(true)
            .num_threads(2)
            .build()
            .unwrap();
        assert_eq!(cfg.decay_span_db, 20);
        assert_eq!(cfg.num_threads, Some(2));
        assert!(
            AnalysisConfigBuilder::new()
                .reference_intensity(0.0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_thread_pool_applied_twice() {
        let cfg = AnalysisConfigBuilder::new().num_threads(2).build().unwrap();
        // The second call finds the global pool already built and keeps it.
        cfg.apply_thread_pool();
        cfg.apply_thread_pool();
        AnalysisConfig::default().apply_thread_pool();
        assert!(rayon::current_num_threads() >= 1);
    }
}
