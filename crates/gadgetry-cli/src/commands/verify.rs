//! Verify command implementation.

use anyhow::{Context, Result};
use console::style;
use gadgetry_synth::verify::{circuit_unitary, equal_up_to_global_phase, gadget_sequence_unitary};

use super::common::{load_job, order, resolve_config};
use super::synth::build;

/// Execute the verify command.
///
/// Compares the synthesized circuit with the direct product of the two
/// exponentials and fails if they differ beyond `tolerance`.
pub fn execute(
    input: &str,
    cx_config: Option<&str>,
    encoding: Option<&str>,
    tolerance: f64,
) -> Result<()> {
    let job = load_job(input)?;
    let config = resolve_config(&job, cx_config, encoding)?;

    println!(
        "{} Verifying {} ({} / {})",
        style("→").cyan().bold(),
        style(input).green(),
        style(config.cx_config).yellow(),
        style(config.encoding).yellow()
    );

    let circuit = build(&job, &config)?;
    let qubits = order(&circuit);
    let actual = circuit_unitary(&circuit, &qubits).context("Failed to simulate circuit")?;
    let expected = gadget_sequence_unitary(&job.gadgets(), &qubits)
        .context("Failed to build reference unitary")?;

    if !equal_up_to_global_phase(&actual, &expected, tolerance) {
        anyhow::bail!(
            "Synthesized circuit differs from exp(-i a1/2 P1) exp(-i a0/2 P0) (tolerance {tolerance:e})"
        );
    }

    println!(
        "{} Equivalent up to global phase on {} qubits",
        style("✓").green().bold(),
        qubits.len()
    );
    Ok(())
}
