//! Clifford table taking a mismatched label pair to (Z, X).

use gadgetry_ir::{Circuit, Pauli, QubitId, StandardGate};
use tracing::trace;

use crate::error::{SynthError, SynthResult};

/// Single-qubit Cliffords used by the mismatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchGate {
    /// Hadamard.
    H,
    /// S.
    S,
    /// S-dagger.
    Sdg,
    /// V, sqrt(X).
    V,
    /// V-dagger.
    Vdg,
}

impl MismatchGate {
    /// The primitive gate this stands for.
    pub fn to_standard(self) -> StandardGate {
        match self {
            MismatchGate::H => StandardGate::H,
            MismatchGate::S => StandardGate::S,
            MismatchGate::Sdg => StandardGate::Sdg,
            MismatchGate::V => StandardGate::SX,
            MismatchGate::Vdg => StandardGate::SXdg,
        }
    }
}

/// Gates, in application order, rotating `(label0, label1)` to `(Z, X)`.
///
/// Returns `None` for pairs that are not a mismatch: equal labels or an
/// identity on either side.
pub fn mismatch_sequence(label0: Pauli, label1: Pauli) -> Option<&'static [MismatchGate]> {
    use MismatchGate::{H, S, Sdg, V, Vdg};
    let sequence: &'static [MismatchGate] = match (label0, label1) {
        (Pauli::X, Pauli::Y) => &[Sdg, Vdg],
        (Pauli::X, Pauli::Z) => &[H],
        (Pauli::Y, Pauli::X) => &[V],
        (Pauli::Y, Pauli::Z) => &[V, S],
        (Pauli::Z, Pauli::Y) => &[Sdg],
        (Pauli::Z, Pauli::X) => &[],
        _ => return None,
    };
    Some(sequence)
}

/// Emit the table entry for `(label0, label1)` on `qubit`.
pub fn resolve_mismatch(
    circuit: &mut Circuit,
    qubit: QubitId,
    label0: Pauli,
    label1: Pauli,
) -> SynthResult<()> {
    let sequence = mismatch_sequence(label0, label1).ok_or_else(|| {
        SynthError::Internal(format!(
            "qubit {qubit} classified as mismatch but carries ({label0}, {label1})"
        ))
    })?;
    trace!(%qubit, %label0, %label1, gates = sequence.len(), "resolving mismatch");
    for gate in sequence {
        circuit.gate(gate.to_standard(), [qubit])?;
    }
    Ok(())
}
