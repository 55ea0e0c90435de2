//! Opaque box encodings of gadgets.
//!
//! Instead of emitting gates, these append a single [`CompositeOp`] that
//! records the gadgets symbolically; [`crate::expand::expand_composites`]
//! turns them into gates later.

use std::collections::BTreeSet;

use gadgetry_ir::{Angle, Circuit, CompositeOp, CxConfig, Pauli, PauliTensor, QubitId};
use tracing::debug;

use crate::angle::convert_angle;
use crate::error::SynthResult;

/// Append one gadget as a `PauliExp` box over the string's qubits, in
/// qubit order. Identity entries are kept as slots.
pub fn append_single_pauli_gadget_as_box(
    circuit: &mut Circuit,
    pauli: &PauliTensor,
    angle: &Angle,
    cx_config: CxConfig,
) -> SynthResult<()> {
    let angle = convert_angle(pauli.coeff, angle)?;
    let (mapping, paulis): (Vec<QubitId>, Vec<Pauli>) = pauli.string.iter().unzip();
    circuit.add_composite(
        CompositeOp::PauliExp {
            paulis,
            angle,
            cx_config,
        },
        mapping,
    )?;
    Ok(())
}

/// Append two gadgets as one `PauliExpPair` box.
///
/// Slots are the qubits of the first compressed string in order, then the
/// remaining qubits of the second; each label list is padded with I.
pub fn append_pauli_gadget_pair_as_box(
    circuit: &mut Circuit,
    pauli0: &PauliTensor,
    angle0: &Angle,
    pauli1: &PauliTensor,
    angle1: &Angle,
    cx_config: CxConfig,
) -> SynthResult<()> {
    let angle0 = convert_angle(pauli0.coeff, angle0)?;
    let angle1 = convert_angle(pauli1.coeff, angle1)?;

    let string0 = pauli0.string.compressed();
    let mut string1 = pauli1.string.compressed();

    let mut mapping = Vec::with_capacity(string0.len() + string1.len());
    let mut paulis0 = Vec::with_capacity(mapping.capacity());
    let mut paulis1 = Vec::with_capacity(mapping.capacity());
    for (q, p) in string0.iter() {
        mapping.push(q);
        paulis0.push(p);
        paulis1.push(string1.remove(q).unwrap_or(Pauli::I));
    }
    for (q, p) in string1.iter() {
        mapping.push(q);
        paulis0.push(Pauli::I);
        paulis1.push(p);
    }

    debug!(width = mapping.len(), strategy = %cx_config, "boxing gadget pair");
    circuit.add_composite(
        CompositeOp::pauli_exp_pair(paulis0, angle0, paulis1, angle1, cx_config),
        mapping,
    )?;
    Ok(())
}

/// Append mutually commuting gadgets as one `PauliExpCommutingSet` box over
/// the sorted union of their qubits.
///
/// Commutation is not checked; the box re-expands into the gadgets in the
/// given order.
pub fn append_commuting_pauli_gadget_set_as_box(
    circuit: &mut Circuit,
    gadgets: &[(PauliTensor, Angle)],
    cx_config: CxConfig,
) -> SynthResult<()> {
    let mapping: Vec<QubitId> = gadgets
        .iter()
        .flat_map(|(p, _)| p.string.qubits())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut boxed = Vec::with_capacity(gadgets.len());
    for (pauli, angle) in gadgets {
        let angle = convert_angle(pauli.coeff, angle)?;
        boxed.push((pauli.string.labels_on(&mapping), angle));
    }

    debug!(
        gadgets = boxed.len(),
        width = mapping.len(),
        strategy = %cx_config,
        "boxing commuting gadget set"
    );
    circuit.add_composite(
        CompositeOp::pauli_exp_commuting_set(boxed, cx_config),
        mapping,
    )?;
    Ok(())
}
