//! Synth command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;
use gadgetry_ir::{Circuit, Instruction, QubitId};
use gadgetry_synth::{SynthesisConfig, expand_composites, synthesize_pair};
use serde::Serialize;
use tracing::info;

use super::common::{JobFile, load_job, resolve_config};

/// Serialized form of a synthesized circuit.
#[derive(Debug, Serialize)]
pub struct CircuitDocument<'a> {
    /// Circuit name
    pub name: &'a str,
    /// Declared qubits
    pub qubits: &'a [QubitId],
    /// Top-level instructions in order
    pub instructions: Vec<&'a Instruction>,
}

impl<'a> From<&'a Circuit> for CircuitDocument<'a> {
    fn from(circuit: &'a Circuit) -> Self {
        Self {
            name: circuit.name(),
            qubits: circuit.qubits(),
            instructions: circuit.instructions().collect(),
        }
    }
}

/// Synthesize a job's gadget pair into a fresh circuit.
pub fn build(job: &JobFile, config: &SynthesisConfig) -> Result<Circuit> {
    let mut circuit = job.circuit();
    let [(p0, a0), (p1, a1)] = job.gadgets();
    synthesize_pair(config, &mut circuit, &p0, &a0, &p1, &a1)
        .with_context(|| format!("Failed to synthesize job '{}'", job.name))?;
    Ok(circuit)
}

/// Execute the synth command.
pub fn execute(
    input: &str,
    cx_config: Option<&str>,
    encoding: Option<&str>,
    expand: bool,
    output: Option<&str>,
) -> Result<()> {
    let job = load_job(input)?;
    let config = resolve_config(&job, cx_config, encoding)?;

    println!(
        "{} Synthesizing {} ({} / {})",
        style("→").cyan().bold(),
        style(input).green(),
        style(config.cx_config).yellow(),
        style(config.encoding).yellow()
    );
    println!("  gadget0: {}", job.gadget0.pauli);
    println!("  gadget1: {}", job.gadget1.pauli);

    let circuit = build(&job, &config)?;
    let expanded = expand_composites(&circuit)?;
    info!(
        top_level = circuit.num_ops(),
        primitive = expanded.num_ops(),
        "synthesis finished"
    );

    println!("{} Synthesis complete", style("✓").green().bold());
    println!("  Qubits:      {}", circuit.num_qubits());
    println!("  Operations:  {}", circuit.num_ops());
    println!("  Gates:       {}", expanded.num_ops());
    println!("  Depth:       {}", expanded.depth());
    println!("  CX count:    {}", style(expanded.count_ops("cx")).yellow());
    let xx = expanded.count_ops("xxphase3");
    if xx > 0 {
        println!("  XXPhase3:    {}", style(xx).yellow());
    }

    if let Some(path) = output {
        let written = if expand { &expanded } else { &circuit };
        let json = serde_json::to_string_pretty(&CircuitDocument::from(written))
            .context("Failed to serialize circuit")?;
        fs::write(path, json).with_context(|| format!("Failed to write file: {path}"))?;
        println!("  Output: {}", style(path).green());
    }

    Ok(())
}
