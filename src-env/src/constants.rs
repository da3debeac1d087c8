/// Environment variable naming a YAML analysis configuration file.
pub const CONFIG_ENV_VAR: &str = "ROOM_ACOUSTICS_CONFIG";

/// Environment variable naming the directory where result files are written.
pub const OUTPUT_DIR_ENV_VAR: &str = "ROOM_ACOUSTICS_OUTPUT_DIR";

/// Default output directory, relative to the working directory.
pub const DATA_GENERATED: &str = "data_generated";
