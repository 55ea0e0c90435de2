//! Circuit instructions combining operations with operands.

use serde::{Deserialize, Serialize};

use crate::composite::CompositeOp;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A primitive gate.
    Gate(StandardGate),
    /// An opaque composite operation.
    Composite(CompositeOp),
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on, in operand order.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a composite instruction. `qubits[i]` receives slot `i`.
    pub fn composite(op: CompositeOp, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Composite(op),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Number of operands the operation expects.
    pub fn arity(&self) -> u32 {
        match &self.kind {
            InstructionKind::Gate(g) => g.num_qubits(),
            InstructionKind::Composite(op) => op.num_qubits(),
        }
    }

    /// Check that the operand count matches the operation's arity.
    #[allow(clippy::cast_possible_truncation)]
    pub fn validate_arity(&self) -> IrResult<()> {
        let expected = self.arity();
        let got = self.qubits.len() as u32;
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: self.name().to_string(),
                expected,
                got,
            });
        }
        Ok(())
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a composite instruction.
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, InstructionKind::Composite(_))
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            InstructionKind::Composite(_) => None,
        }
    }

    /// Get the composite operation, if any.
    pub fn as_composite(&self) -> Option<&CompositeOp> {
        match &self.kind {
            InstructionKind::Composite(op) => Some(op),
            InstructionKind::Gate(_) => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Composite(op) => op.name(),
        }
    }

    /// A copy with every operand sent through `map`.
    pub fn remapped(&self, mut map: impl FnMut(QubitId) -> QubitId) -> Self {
        Self {
            kind: self.kind.clone(),
            qubits: self.qubits.iter().map(|&q| map(q)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Angle;
    use crate::pauli::Pauli;
    use crate::composite::CxConfig;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
        assert!(inst.validate_arity().is_ok());
    }

    #[test]
    fn test_composite_instruction_arity() {
        let op = CompositeOp::PauliExp {
            paulis: vec![Pauli::X, Pauli::Z],
            angle: Angle::constant(0.5),
            cx_config: CxConfig::Snake,
        };
        let inst = Instruction::composite(op, [QubitId(4)]);
        assert!(inst.is_composite());
        assert_eq!(inst.name(), "pauli_exp");
        assert!(matches!(
            inst.validate_arity(),
            Err(IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_remapped() {
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1));
        let moved = inst.remapped(|q| QubitId(q.0 + 10));
        assert_eq!(moved.qubits, vec![QubitId(10), QubitId(11)]);
        assert_eq!(moved.kind, inst.kind);
    }
}
