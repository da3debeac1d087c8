//! room_acoustics - command line front end
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

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use room_acoustics::read::{load_wav_bands, load_wav_files, parse_spectrum};
use room_acoustics::weighting::OCTAVE_CENTERS_HZ;
use room_acoustics::write::write_reverberation_csv;
use room_acoustics::{AnalysisConfig, LevelInput, reverberation_fits, weighted_level};
use room_acoustics_env::{CONFIG_ENV_VAR, EnvReport};

/// Reverberation time and A-weighted level from octave-band energy time curves
#[derive(Parser, Debug)]
#[command(name = "room_acoustics")]
#[command(about = "Reverberation time and A-weighted SPL from octave-band energy time curves")]
#[command(long_about = "Energy time curves are read from WAV files with one channel per \
octave band (channel 0 = lowest octave). Samples must already be energies.\n\n\
Defaults can be overridden with --config or the ROOM_ACOUSTICS_CONFIG environment variable.")]
struct Cli {
    /// YAML or JSON analysis configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reverberation time per band (T_X)
    Rt {
        /// Energy time curve WAV file
        input: PathBuf,

        /// Regression span X in dB (the fit runs from -5 dB to -(X+5) dB)
        #[arg(short = 'x', long)]
        span: Option<u32>,

        /// Write per-band results to this CSV file. A bare file name is
        /// placed in the output directory (ROOM_ACOUSTICS_OUTPUT_DIR).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compute bands in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// A-weighted sound pressure level over 8 octave bands
    Spla {
        /// Energy time curve WAV files with 8 channels each
        #[arg(required_unless_present = "spectrum", conflicts_with = "spectrum")]
        inputs: Vec<PathBuf>,

        /// 8 octave-band levels in dB, e.g. "60,62,65,63,60,58,55,50"
        #[arg(long)]
        spectrum: Option<String>,
    },
    /// Show the configuration file and output directory that will be used
    Env,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Rt {
            input,
            span,
            output,
            parallel,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(span) = span {
                config.decay_span_db = span;
            }
            config.parallel |= parallel;
            config.validate().map_err(|e| e.to_string())?;
            config.apply_thread_pool();
            run_rt(&input, output.as_deref(), &config)
        }
        Command::Spla { inputs, spectrum } => {
            let config = load_config(cli.config.as_deref())?;
            run_spla(&inputs, spectrum.as_deref(), &config)
        }
        Command::Env => {
            let report = room_acoustics_env::check_env().map_err(|e| e.to_string())?;
            print!("{}", format_env_report(&report, cli.config.as_deref()));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, String> {
    match path {
        Some(path) => AnalysisConfig::load(path),
        None => AnalysisConfig::from_env(),
    }
    .map_err(|e| e.to_string())
}

fn run_rt(input: &Path, output: Option<&Path>, config: &AnalysisConfig) -> Result<(), String> {
    let signal = load_wav_bands(input).map_err(|e| e.to_string())?;
    log::info!(
        "{}: {} band(s), {:.3} s at {} Hz",
        input.display(),
        signal.n_bands(),
        signal.duration_secs(),
        signal.sample_rate()
    );

    let fits = reverberation_fits(&signal, config);
    let label_bands = signal.n_bands() == OCTAVE_CENTERS_HZ.len();

    println!("band,T{}_s", config.decay_span_db);
    for (band, fit) in fits.iter().enumerate() {
        let label = if label_bands {
            format!("{} ({} Hz)", band, OCTAVE_CENTERS_HZ[band])
        } else {
            band.to_string()
        };
        match fit {
            Ok(f) => println!("{},{:.3}", label, f.rt_seconds),
            Err(e) => {
                log::warn!("band {}: {}", band, e);
                println!("{},n/a", label);
            }
        }
    }

    if let Some(output) = output {
        let path = resolve_output_path(output)?;
        write_reverberation_csv(&path, &fits).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn run_spla(
    inputs: &[PathBuf],
    spectrum: Option<&str>,
    config: &AnalysisConfig,
) -> Result<(), String> {
    let input = match spectrum {
        Some(text) => LevelInput::Spectrum(parse_spectrum(text).map_err(|e| e.to_string())?),
        None => LevelInput::Signals(load_wav_files(inputs).map_err(|e| e.to_string())?),
    };
    let level = weighted_level(&input, config.reference_intensity).map_err(|e| e.to_string())?;
    println!("{:.2} dB(A)", level);
    Ok(())
}

/// `--config` takes precedence over the environment variable.
fn format_env_report(report: &EnvReport, cli_config: Option<&Path>) -> String {
    let config = match (cli_config, &report.config_path) {
        (Some(path), _) => format!("{} (--config)", path.display()),
        (None, Some(path)) => format!("{} ({})", path.display(), CONFIG_ENV_VAR),
        (None, None) => "defaults".to_string(),
    };
    format!(
        "config: {}\noutput directory: {}\n",
        config,
        report.output_dir.display()
    )
}

/// Bare file names go to the output directory; anything with a directory
/// component is used as given.
fn resolve_output_path(output: &Path) -> Result<PathBuf, String> {
    let has_dir = output
        .parent()
        .is_some_and(|p| !p.as_os_str().is_empty());
    if output.is_absolute() || has_dir {
        return Ok(output.to_path_buf());
    }
    let dir = room_acoustics_env::get_output_dir().map_err(|e| e.to_string())?;
    Ok(dir.join(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_report_format() {
        let report = EnvReport {
            config_path: Some(PathBuf::from("room.yaml")),
            output_dir: PathBuf::from("data_generated"),
        };
        assert_eq!(
            format_env_report(&report, None),
            "config: room.yaml (ROOM_ACOUSTICS_CONFIG)\noutput directory: data_generated\n"
        );
        assert!(
            format_env_report(&report, Some(Path::new("cli.json")))
                .starts_with("config: cli.json (--config)\n")
        );

        let report = EnvReport {
            config_path: None,
            output_dir: PathBuf::from("out"),
        };
        assert_eq!(
            format_env_report(&report, None),
            "config: defaults\noutput directory: out\n"
        );
    }

    #[test]
    fn test_env_subcommand_parses() {
        let cli = Cli::try_parse_from(["room_acoustics", "env"]).unwrap();
        assert!(matches!(cli.command, Command::Env));
    }

    #[test]
    fn test_output_path_with_directory_kept() {
        let path = PathBuf::from("/tmp/rt.csv");
        assert_eq!(resolve_output_path(&path).unwrap(), path);
        let path = PathBuf::from("results/rt.csv");
        assert_eq!(resolve_output_path(&path).unwrap(), path);
    }
}
