//! Primitive gate vocabulary.

use serde::{Deserialize, Serialize};

use crate::angle::Angle;

/// Primitive gates with known semantics.
///
/// Rotation gates follow the `R_P(θ) = exp(-i θ/2 P)` convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// V gate, sqrt(X).
    SX,
    /// V-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(Angle),
    /// Rotation around Y axis.
    Ry(Angle),
    /// Rotation around Z axis.
    Rz(Angle),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate, control first.
    CX,
    /// Controlled-Z gate.
    CZ,

    // Three-qubit gates
    /// `exp(-i θ/2 (XXI + XIX + IXX))`.
    XXPhase3(Angle),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::XXPhase3(_) => "xxphase3",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_) => 1,

            StandardGate::CX | StandardGate::CZ => 2,

            StandardGate::XXPhase3(_) => 3,
        }
    }

    /// The rotation angle, for parametrized gates.
    pub fn angle(&self) -> Option<&Angle> {
        match self {
            StandardGate::Rx(a)
            | StandardGate::Ry(a)
            | StandardGate::Rz(a)
            | StandardGate::XXPhase3(a) => Some(a),
            _ => None,
        }
    }

    /// Check if this gate carries an unbound symbolic angle.
    pub fn is_parameterized(&self) -> bool {
        self.angle().is_some_and(Angle::is_symbolic)
    }

    /// Check if this gate is in the Clifford group.
    ///
    /// Rotations are treated as non-Clifford regardless of their angle.
    pub fn is_clifford(&self) -> bool {
        self.angle().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::XXPhase3(Angle::constant(PI / 2.0)).num_qubits(), 3);

        assert!(!StandardGate::H.is_parameterized());
        assert!(!StandardGate::Rz(Angle::constant(PI)).is_parameterized());
        assert!(StandardGate::Rz(Angle::symbol("theta")).is_parameterized());
    }

    #[test]
    fn test_clifford_classification() {
        assert!(StandardGate::SXdg.is_clifford());
        assert!(StandardGate::CX.is_clifford());
        assert!(!StandardGate::Rz(Angle::constant(0.1)).is_clifford());
        assert_eq!(StandardGate::SX.name(), "sx");
    }
}
