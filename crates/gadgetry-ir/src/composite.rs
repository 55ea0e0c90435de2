//! Composite operations: opaque boxes that expand into primitive gates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::angle::Angle;
use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::pauli::Pauli;

/// Entangling-gate reduction strategy used when synthesizing Pauli gadgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CxConfig {
    /// Linear CX chain; the smallest qubit survives.
    #[default]
    Snake,
    /// Every qubit targets the greatest one.
    Star,
    /// Pairwise halving, logarithmic depth.
    Tree,
    /// Pairs of qubits eliminated at once with `XXPhase3`.
    MultiQGate,
}

impl CxConfig {
    /// Every strategy, in declaration order.
    pub const ALL: [CxConfig; 4] = [
        CxConfig::Snake,
        CxConfig::Star,
        CxConfig::Tree,
        CxConfig::MultiQGate,
    ];

    /// The canonical textual tag.
    pub fn as_str(self) -> &'static str {
        match self {
            CxConfig::Snake => "snake",
            CxConfig::Star => "star",
            CxConfig::Tree => "tree",
            CxConfig::MultiQGate => "multiqgate",
        }
    }
}

impl fmt::Display for CxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strategy tag that names no known [`CxConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown CX reduction strategy '{0}' (expected one of: snake, star, tree, multiqgate)")]
pub struct UnknownCxConfig(pub String);

impl FromStr for CxConfig {
    type Err = UnknownCxConfig;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "snake" => Ok(CxConfig::Snake),
            "star" => Ok(CxConfig::Star),
            "tree" => Ok(CxConfig::Tree),
            "multiqgate" => Ok(CxConfig::MultiQGate),
            _ => Err(UnknownCxConfig(s.to_string())),
        }
    }
}

impl TryFrom<String> for CxConfig {
    type Error = UnknownCxConfig;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CxConfig> for String {
    fn from(c: CxConfig) -> Self {
        c.as_str().to_string()
    }
}

/// A self-contained circuit over anonymous qubit slots `0..num_qubits`.
///
/// Boxes are what composite operations carry; the owning instruction maps
/// slot `i` to its `i`-th qubit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CircuitBox {
    /// Number of slots.
    pub num_qubits: u32,
    /// Instructions in application order, addressed by slot.
    pub instructions: Vec<Instruction>,
}

impl CircuitBox {
    /// Create an empty box of the given width.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            instructions: vec![],
        }
    }

    /// Append an instruction, checking its slots and arity.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<()> {
        instruction.validate_arity()?;
        for &slot in &instruction.qubits {
            if slot.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit: slot,
                    gate_name: Some(instruction.name().to_string()),
                });
            }
        }
        self.instructions.push(instruction);
        Ok(())
    }

    /// Number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the box holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The box realizing the inverse unitary.
    pub fn inverse(&self) -> CircuitBox {
        CircuitBox {
            num_qubits: self.num_qubits,
            instructions: self
                .instructions
                .iter()
                .rev()
                .map(crate::inverse::inverse_instruction)
                .collect(),
        }
    }
}

/// Opaque multi-qubit operations.
///
/// Pauli label lists are indexed by slot; entry `i` acts on the `i`-th qubit
/// the owning instruction is applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompositeOp {
    /// Apply `forward`, then `payload`, then `forward⁻¹`.
    Conjugation {
        /// The conjugating Clifford circuit.
        forward: CircuitBox,
        /// The conjugated circuit.
        payload: CircuitBox,
    },
    /// `exp(-i angle/2 · P)`.
    PauliExp {
        /// Labels per slot.
        paulis: Vec<Pauli>,
        /// Rotation angle.
        angle: Angle,
        /// Strategy used when expanding.
        cx_config: CxConfig,
    },
    /// `exp(-i angle1/2 · P1) · exp(-i angle0/2 · P0)`: gadget 0 applied first.
    PauliExpPair {
        /// Labels of the first gadget.
        paulis0: Vec<Pauli>,
        /// Angle of the first gadget.
        angle0: Angle,
        /// Labels of the second gadget.
        paulis1: Vec<Pauli>,
        /// Angle of the second gadget.
        angle1: Angle,
        /// Strategy used when expanding.
        cx_config: CxConfig,
    },
    /// A product of mutually commuting gadgets.
    PauliExpCommutingSet {
        /// `(labels, angle)` per gadget.
        gadgets: Vec<(Vec<Pauli>, Angle)>,
        /// Strategy used when expanding.
        cx_config: CxConfig,
    },
}

impl CompositeOp {
    /// Build a conjugation, rejecting boxes of different widths.
    pub fn conjugation(forward: CircuitBox, payload: CircuitBox) -> IrResult<Self> {
        if forward.num_qubits != payload.num_qubits {
            return Err(IrError::WidthMismatch {
                expected: forward.num_qubits,
                got: payload.num_qubits,
            });
        }
        Ok(CompositeOp::Conjugation { forward, payload })
    }

    /// Build a gadget pair, padding the shorter label list with identities.
    pub fn pauli_exp_pair(
        mut paulis0: Vec<Pauli>,
        angle0: Angle,
        mut paulis1: Vec<Pauli>,
        angle1: Angle,
        cx_config: CxConfig,
    ) -> Self {
        let width = paulis0.len().max(paulis1.len());
        paulis0.resize(width, Pauli::I);
        paulis1.resize(width, Pauli::I);
        CompositeOp::PauliExpPair {
            paulis0,
            angle0,
            paulis1,
            angle1,
            cx_config,
        }
    }

    /// Build a commuting set, padding every label list to the shared width.
    pub fn pauli_exp_commuting_set(
        mut gadgets: Vec<(Vec<Pauli>, Angle)>,
        cx_config: CxConfig,
    ) -> Self {
        let width = gadgets.iter().map(|(p, _)| p.len()).max().unwrap_or(0);
        for (paulis, _) in &mut gadgets {
            paulis.resize(width, Pauli::I);
        }
        CompositeOp::PauliExpCommutingSet { gadgets, cx_config }
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            CompositeOp::Conjugation { .. } => "conjugation",
            CompositeOp::PauliExp { .. } => "pauli_exp",
            CompositeOp::PauliExpPair { .. } => "pauli_exp_pair",
            CompositeOp::PauliExpCommutingSet { .. } => "pauli_exp_commuting_set",
        }
    }

    /// Number of qubits the operation spans.
    pub fn num_qubits(&self) -> u32 {
        let width = match self {
            CompositeOp::Conjugation { forward, .. } => return forward.num_qubits,
            CompositeOp::PauliExp { paulis, .. } => paulis.len(),
            CompositeOp::PauliExpPair { paulis0, .. } => paulis0.len(),
            CompositeOp::PauliExpCommutingSet { gadgets, .. } => {
                gadgets.first().map_or(0, |(p, _)| p.len())
            }
        };
        u32::try_from(width).unwrap_or(u32::MAX)
    }

    /// The strategy recorded on gadget boxes.
    pub fn cx_config(&self) -> Option<CxConfig> {
        match self {
            CompositeOp::Conjugation { .. } => None,
            CompositeOp::PauliExp { cx_config, .. }
            | CompositeOp::PauliExpPair { cx_config, .. }
            | CompositeOp::PauliExpCommutingSet { cx_config, .. } => Some(*cx_config),
        }
    }
}
