//! Inversion of gates, instructions and composite operations.

use crate::angle::Angle;
use crate::composite::CompositeOp;
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};

/// Compute the inverse of a primitive gate.
///
/// - H, X, Y, Z, CX, CZ are self-inverse
/// - S† = Sdg, SX† = SXdg
/// - Rotations negate their angle
pub fn inverse_gate(gate: &StandardGate) -> StandardGate {
    match gate {
        StandardGate::X => StandardGate::X,
        StandardGate::Y => StandardGate::Y,
        StandardGate::Z => StandardGate::Z,
        StandardGate::H => StandardGate::H,
        StandardGate::CX => StandardGate::CX,
        StandardGate::CZ => StandardGate::CZ,

        StandardGate::S => StandardGate::Sdg,
        StandardGate::Sdg => StandardGate::S,
        StandardGate::SX => StandardGate::SXdg,
        StandardGate::SXdg => StandardGate::SX,

        StandardGate::Rx(theta) => StandardGate::Rx(negate_angle(theta)),
        StandardGate::Ry(theta) => StandardGate::Ry(negate_angle(theta)),
        StandardGate::Rz(theta) => StandardGate::Rz(negate_angle(theta)),
        StandardGate::XXPhase3(theta) => StandardGate::XXPhase3(negate_angle(theta)),
    }
}

fn negate_angle(angle: &Angle) -> Angle {
    (-angle.clone()).simplify()
}

/// Compute the inverse of a composite operation.
///
/// A conjugation keeps its forward box and inverts the payload. A gadget
/// pair swaps its gadgets and negates both angles.
pub fn inverse_composite(op: &CompositeOp) -> CompositeOp {
    match op {
        CompositeOp::Conjugation { forward, payload } => CompositeOp::Conjugation {
            forward: forward.clone(),
            payload: payload.inverse(),
        },
        CompositeOp::PauliExp {
            paulis,
            angle,
            cx_config,
        } => CompositeOp::PauliExp {
            paulis: paulis.clone(),
            angle: negate_angle(angle),
            cx_config: *cx_config,
        },
        CompositeOp::PauliExpPair {
            paulis0,
            angle0,
            paulis1,
            angle1,
            cx_config,
        } => CompositeOp::PauliExpPair {
            paulis0: paulis1.clone(),
            angle0: negate_angle(angle1),
            paulis1: paulis0.clone(),
            angle1: negate_angle(angle0),
            cx_config: *cx_config,
        },
        CompositeOp::PauliExpCommutingSet { gadgets, cx_config } => {
            CompositeOp::PauliExpCommutingSet {
                gadgets: gadgets
                    .iter()
                    .rev()
                    .map(|(paulis, angle)| (paulis.clone(), negate_angle(angle)))
                    .collect(),
                cx_config: *cx_config,
            }
        }
    }
}

/// Compute the inverse of an instruction on the same operands.
pub fn inverse_instruction(instruction: &Instruction) -> Instruction {
    let kind = match &instruction.kind {
        InstructionKind::Gate(gate) => InstructionKind::Gate(inverse_gate(gate)),
        InstructionKind::Composite(op) => InstructionKind::Composite(inverse_composite(op)),
    };
    Instruction {
        kind,
        qubits: instruction.qubits.clone(),
    }
}
