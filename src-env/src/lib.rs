//! Environment variables and shared constants for the room-acoustics tools.

pub mod constants;
pub mod env_utils;

pub use constants::*;
pub use env_utils::{EnvError, EnvReport, check_env, get_config_path, get_output_dir};
