//! Gadgetry circuit and Pauli-operator intermediate representation.
//!
//! This crate provides the data structures the gadget synthesizers read and
//! write: Pauli strings over ordered qubits, a DAG-backed circuit with
//! declared qubits, primitive gates and opaque composite operations.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], totally ordered
//! - **Angles**: [`Angle`], numeric or symbolic rotation angles
//! - **Gates**: [`StandardGate`], the primitive vocabulary
//! - **Pauli algebra**: [`Pauli`], [`PauliString`], [`PauliTensor`]
//! - **Composites**: [`CompositeOp`] over [`CircuitBox`] slots, with the
//!   [`CxConfig`] strategy tag
//! - **Circuit**: [`Circuit`] builder over a [`CircuitDag`]
//!
//! # Example
//!
//! ```rust
//! use gadgetry_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//!
//! let inverse = circuit.inverse().unwrap();
//! assert_eq!(inverse.instructions().next().unwrap().name(), "cx");
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `SX`, `SXdg` | 1 | V and V-dagger gates |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `CX`, `CZ` | 2 | Controlled-X and Controlled-Z |
//! | `XXPhase3` | 3 | Symmetric three-qubit XX rotation |

pub mod angle;
pub mod circuit;
pub mod composite;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod inverse;
pub mod pauli;
pub mod qubit;

pub use angle::Angle;
pub use circuit::Circuit;
pub use composite::{CircuitBox, CompositeOp, CxConfig, UnknownCxConfig};
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use inverse::{inverse_composite, inverse_gate, inverse_instruction};
pub use pauli::{Pauli, PauliString, PauliTensor};
pub use qubit::QubitId;
