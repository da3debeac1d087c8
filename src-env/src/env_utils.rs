//! Environment variable utilities for room-acoustics
//!
//! This module resolves the optional configuration file and the output
//! directory used by the command line tools.

use crate::constants::{CONFIG_ENV_VAR, DATA_GENERATED, OUTPUT_DIR_ENV_VAR};
use std::env;
use std::path::PathBuf;

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("ROOM_ACOUSTICS_CONFIG points to a non-existent file: {0}")]
    ConfigNotFound(PathBuf),

    #[error("ROOM_ACOUSTICS_OUTPUT_DIR points to a path that is not a directory: {0}")]
    OutputDirNotADirectory(PathBuf),

    #[error("Failed to create output directory: {0}")]
    OutputDirCreationFailed(std::io::Error),
}

/// Get the configuration file named by `ROOM_ACOUSTICS_CONFIG`
///
/// # Returns
///
/// `Ok(None)` when the variable is unset or empty, otherwise the path.
///
/// # Errors
///
/// Returns an error if the variable names a file that does not exist.
///
/// # Example
///
/// ```no_run
/// use room_acoustics_env::env_utils::get_config_path;
///
/// if let Some(path) = get_config_path()? {
///     println!("Using config: {}", path.display());
/// }
/// # Ok::<(), room_acoustics_env::env_utils::EnvError>(())
/// ```
pub fn get_config_path() -> Result<Option<PathBuf>, EnvError> {
    resolve_config_path(env::var(CONFIG_ENV_VAR).ok())
}

fn resolve_config_path(value: Option<String>) -> Result<Option<PathBuf>, EnvError> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    let path = PathBuf::from(value);
    if !path.is_file() {
        return Err(EnvError::ConfigNotFound(path));
    }
    Ok(Some(path))
}

/// Get the directory result files are written to, creating it if necessary
///
/// This function:
/// 1. Reads `ROOM_ACOUSTICS_OUTPUT_DIR`, falling back to `./data_generated`
/// 2. Creates the directory if it doesn't exist
///
/// # Errors
///
/// Returns an error if the path exists but is not a directory, or if the
/// directory cannot be created.
pub fn get_output_dir() -> Result<PathBuf, EnvError> {
    resolve_output_dir(env::var(OUTPUT_DIR_ENV_VAR).ok())
}

fn resolve_output_dir(value: Option<String>) -> Result<PathBuf, EnvError> {
    let path = value
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DATA_GENERATED));

    if path.exists() && !path.is_dir() {
        return Err(EnvError::OutputDirNotADirectory(path));
    }

    if !path.exists() {
        std::fs::create_dir_all(&path).map_err(EnvError::OutputDirCreationFailed)?;
    }

    Ok(path)
}

/// Configuration file and output directory the tools will use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvReport {
    /// `None` when `ROOM_ACOUSTICS_CONFIG` is unset and defaults apply
    pub config_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

/// Check that the environment is usable and report what will be used
///
/// The output directory is created if it does not exist yet.
///
/// # Example
///
/// ```no_run
/// use room_acoustics_env::env_utils::check_env;
///
/// match check_env() {
///     Ok(report) => println!("Output directory: {}", report.output_dir.display()),
///     Err(e) => {
///         eprintln!("Environment setup error: {}", e);
///         std::process::exit(1);
///     }
/// }
/// ```
pub fn check_env() -> Result<EnvReport, EnvError> {
    resolve_env(
        env::var(CONFIG_ENV_VAR).ok(),
        env::var(OUTPUT_DIR_ENV_VAR).ok(),
    )
}

fn resolve_env(config: Option<String>, output: Option<String>) -> Result<EnvReport, EnvError> {
    Ok(EnvReport {
        config_path: resolve_config_path(config)?,
        output_dir: resolve_output_dir(output)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_unset() {
        assert!(matches!(resolve_config_path(None), Ok(None)));
        assert!(matches!(resolve_config_path(Some("  ".into())), Ok(None)));
    }

    #[test]
    fn test_config_path_nonexistent() {
        let result = resolve_config_path(Some("/this/path/should/not/exist.yaml".into()));
        assert!(matches!(result, Err(EnvError::ConfigNotFound(_))));
    }

    #[test]
    fn test_config_path_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let value = file.path().to_string_lossy().to_string();
        let result = resolve_config_path(Some(value)).unwrap();
        assert_eq!(result.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_output_dir_is_created() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("nested").join("out");
        let result = resolve_output_dir(Some(target.to_string_lossy().to_string())).unwrap();
        assert_eq!(result, target);
        assert!(target.is_dir());
    }

    #[test]
    fn test_output_dir_rejects_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = resolve_output_dir(Some(file.path().to_string_lossy().to_string()));
        assert!(matches!(result, Err(EnvError::OutputDirNotADirectory(_))));
    }

    #[test]
    fn test_env_report() {
        let root = tempfile::tempdir().unwrap();
        let config = root.path().join("analysis.yaml");
        std::fs::write(&config, "decay_span_db: 20\n").unwrap();
        let out = root.path().join("out");

        let report = resolve_env(
            Some(config.to_string_lossy().to_string()),
            Some(out.to_string_lossy().to_string()),
        )
        .unwrap();
        assert_eq!(report.config_path.as_deref(), Some(config.as_path()));
        assert_eq!(report.output_dir, out);
        assert!(out.is_dir());

        let report = resolve_env(None, Some(out.to_string_lossy().to_string())).unwrap();
        assert_eq!(report.config_path, None);
    }

    #[test]
    fn test_env_report_missing_config() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("missing.yaml");
        let result = resolve_env(
            Some(missing.to_string_lossy().to_string()),
            Some(root.path().to_string_lossy().to_string()),
        );
        assert!(matches!(result, Err(EnvError::ConfigNotFound(p)) if p == missing));
    }
}
