//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Pauli gadget synthesis",
        style("Gadgetry").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  gadgetry-ir     Circuit and Pauli-operator representation");
    println!("  gadgetry-synth  Gadget and gadget-pair synthesis");
    println!("  gadgetry-cli    Command-line interface");
    println!();
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
