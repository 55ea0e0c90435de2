//! Error types for the synth crate.

use gadgetry_ir::UnknownCxConfig;
use num_complex::Complex64;
use thiserror::Error;

/// Errors produced by Pauli gadget synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// A gadget's coefficient is neither +1 nor −1.
    #[error("Pauli coefficient must be +/- 1, got {coeff}")]
    MalformedOperator {
        /// The offending coefficient.
        coeff: Complex64,
    },

    /// A strategy tag names no known reduction strategy.
    #[error("Unsupported configuration: {0}")]
    UnsupportedConfiguration(#[from] UnknownCxConfig),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] gadgetry_ir::IrError),

    /// An invariant of the synthesis procedure does not hold.
    #[error("Internal synthesis error: {0}")]
    Internal(String),

    /// A dense check was requested on too many qubits.
    #[error("Dense verification supports at most {max} qubits, got {qubits}")]
    VerificationTooWide {
        /// Requested width.
        qubits: usize,
        /// Largest supported width.
        max: usize,
    },

    /// A configuration document could not be read.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
