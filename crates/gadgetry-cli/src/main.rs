//! Gadgetry Command-Line Interface
//!
//! Synthesizes pairs of Pauli gadgets described in YAML or JSON job files.
//!
//! ```text
//! gadgetry synth  -i job.yaml --cx-config tree --output circuit.json
//! gadgetry verify -i job.yaml
//! gadgetry strategies
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{strategies, synth, verify, version};

/// Gadgetry - Pauli gadget pair synthesis by Clifford conjugation
#[derive(Debug, Parser)]
#[command(name = "gadgetry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Synthesize the gadget pair of a job file
    Synth {
        /// Job file (YAML or JSON)
        #[arg(short, long)]
        input: String,

        /// Reduction strategy (snake, star, tree, multiqgate)
        #[arg(long)]
        cx_config: Option<String>,

        /// Pair encoding (conjugation, boxed, sequential)
        #[arg(long)]
        encoding: Option<String>,

        /// Write primitive gates instead of composites
        #[arg(long)]
        expand: bool,

        /// Output file for the instruction list (JSON)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check a job's synthesis against the direct product of exponentials
    Verify {
        /// Job file (YAML or JSON)
        #[arg(short, long)]
        input: String,

        /// Reduction strategy (snake, star, tree, multiqgate)
        #[arg(long)]
        cx_config: Option<String>,

        /// Pair encoding (conjugation, boxed, sequential)
        #[arg(long)]
        encoding: Option<String>,

        /// Entrywise tolerance
        #[arg(long, default_value = "1e-9")]
        tolerance: f64,
    },

    /// List reduction strategies and pair encodings
    Strategies,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Synth {
            input,
            cx_config,
            encoding,
            expand,
            output,
        } => synth::execute(
            &input,
            cx_config.as_deref(),
            encoding.as_deref(),
            expand,
            output.as_deref(),
        ),

        Commands::Verify {
            input,
            cx_config,
            encoding,
            tolerance,
        } => verify::execute(&input, cx_config.as_deref(), encoding.as_deref(), tolerance),

        Commands::Strategies => {
            strategies::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_synth_minimal() {
        let cli = Cli::try_parse_from(["gadgetry", "synth", "-i", "job.yaml"]).unwrap();
        match cli.command {
            Commands::Synth {
                input,
                cx_config,
                encoding,
                expand,
                output,
            } => {
                assert_eq!(input, "job.yaml");
                assert!(cx_config.is_none());
                assert!(encoding.is_none());
                assert!(!expand);
                assert!(output.is_none());
            }
            other => panic!("Expected Synth, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_synth_all_args() {
        let cli = Cli::try_parse_from([
            "gadgetry",
            "-vv",
            "synth",
            "--input",
            "job.json",
            "--cx-config",
            "tree",
            "--encoding",
            "boxed",
            "--expand",
            "-o",
            "out.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Synth {
                cx_config,
                encoding,
                expand,
                output,
                ..
            } => {
                assert_eq!(cx_config.as_deref(), Some("tree"));
                assert_eq!(encoding.as_deref(), Some("boxed"));
                assert!(expand);
                assert_eq!(output.as_deref(), Some("out.json"));
            }
            other => panic!("Expected Synth, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_verify_default_tolerance() {
        let cli = Cli::try_parse_from(["gadgetry", "verify", "-i", "job.yaml"]).unwrap();
        match cli.command {
            Commands::Verify { tolerance, .. } => assert!((tolerance - 1e-9).abs() < 1e-15),
            other => panic!("Expected Verify, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_input() {
        assert!(Cli::try_parse_from(["gadgetry", "synth"]).is_err());
    }

    #[test]
    fn test_parse_strategies() {
        let cli = Cli::try_parse_from(["gadgetry", "strategies"]).unwrap();
        assert!(matches!(cli.command, Commands::Strategies));
    }
}
