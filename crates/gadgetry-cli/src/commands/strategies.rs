//! Strategies command implementation.

use console::style;
use gadgetry_ir::CxConfig;
use gadgetry_synth::PairEncoding;

/// One-line summary of a reduction strategy.
pub fn describe(cx_config: CxConfig) -> &'static str {
    match cx_config {
        CxConfig::Snake => "CX chain from the greatest qubit down; the least survives",
        CxConfig::Star => "every qubit targets the greatest one",
        CxConfig::Tree => "pairwise halving, logarithmic depth",
        CxConfig::MultiQGate => "two qubits per XXPhase3, one CX for an odd remainder",
    }
}

/// Execute the strategies command.
pub fn execute() {
    println!("{} Reduction strategies:\n", style("Gadgetry").cyan().bold());
    for cx_config in CxConfig::ALL {
        let marker = if cx_config == CxConfig::default() {
            style("●").green()
        } else {
            style("○").dim()
        };
        println!(
            "  {} {:<12} {}",
            marker,
            style(cx_config.as_str()).bold(),
            describe(cx_config)
        );
    }

    println!("\n{} Pair encodings:\n", style("Gadgetry").cyan().bold());
    for encoding in PairEncoding::ALL {
        let marker = if encoding == PairEncoding::default() {
            style("●").green()
        } else {
            style("○").dim()
        };
        println!("  {} {}", marker, style(encoding.as_str()).bold());
    }
}
