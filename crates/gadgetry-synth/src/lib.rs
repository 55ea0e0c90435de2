//! `gadgetry-synth`: Pauli gadget synthesis.
//!
//! A Pauli gadget is the rotation `exp(-i θ/2 · P)` for a Pauli string `P`.
//! This crate turns gadgets into `gadgetry_ir::Circuit` operations:
//!
//! - **Single gadgets**: basis alignment, CX reduction, one `Rz`
//! - **Gadget pairs**: a Clifford conjugation U that shrinks the overlap of
//!   the two strings to at most one qubit, so the payload V is cheap
//! - **Boxed encodings**: opaque composites re-expanded on demand
//!
//! Four entangling-gate reduction strategies are available through
//! [`CxConfig`]: `Snake`, `Star`, `Tree` and `MultiQGate`.
//!
//! # Quick start
//!
//! ```rust
//! use gadgetry_ir::{Angle, Circuit, CxConfig, PauliTensor};
//! use gadgetry_synth::append_pauli_gadget_pair;
//!
//! let mut circuit = Circuit::with_size("pair", 3);
//! append_pauli_gadget_pair(
//!     &mut circuit,
//!     &PauliTensor::positive("X0 Y1 Z2".parse().unwrap()),
//!     &Angle::constant(0.3),
//!     &PauliTensor::positive("Y0 Y1 X2".parse().unwrap()),
//!     &Angle::constant(0.7),
//!     CxConfig::Tree,
//! )
//! .unwrap();
//!
//! assert_eq!(circuit.num_ops(), 1);
//! assert_eq!(circuit.count_ops("conjugation"), 1);
//! ```

pub mod angle;
pub mod boxes;
pub mod config;
pub mod error;
pub mod expand;
pub mod gadget;
pub mod mismatch;
pub mod pair;
pub mod partition;
pub mod reduce;
pub mod verify;

pub use angle::convert_angle;
pub use boxes::{
    append_commuting_pauli_gadget_set_as_box, append_pauli_gadget_pair_as_box,
    append_single_pauli_gadget_as_box,
};
pub use config::{ConfigDocument, PairEncoding, SynthesisConfig, synthesize_pair};
pub use error::{SynthError, SynthResult};
pub use expand::expand_composites;
pub use gadget::{append_pauli_gadget, append_single_pauli_gadget};
pub use gadgetry_ir::CxConfig;
pub use pair::{PairConjugation, append_pauli_gadget_pair, conjugate_pair};
pub use partition::QubitPartition;
