//! Joint synthesis of two Pauli gadgets by Clifford conjugation.
//!
//! Cowtan, Dilkes, Duncan, Simmons, Sivarajah, *Phase Gadget Synthesis for
//! Shallow Circuits*, Lemma 4.9: for Pauli strings s, t there is a Clifford
//! U with
//!
//!   P(a, s) · P(b, t) = U · P(a, s') · P(b, t') · U†
//!
//! where s' and t' overlap on at most one qubit. The procedure below builds
//! U gate by gate while rewriting both strings, then synthesizes s' and t'
//! separately into the payload V.
//!
//! 1. Classify the joint support into just0, just1, match and mismatch.
//! 2. Rotate matches to Z and reduce them to one with the chosen strategy.
//! 3. Rotate every mismatch to (Z, X).
//! 4. Fold the last match into the greatest mismatch, if there is one.
//! 5. Pair up mismatches with one CX per pair.
//! 6. Synthesize the two reduced gadgets into V.

use gadgetry_ir::{Angle, Circuit, CompositeOp, CxConfig, Pauli, PauliString, PauliTensor, QubitId};
use tracing::{debug, trace};

use crate::angle::convert_angle;
use crate::error::{SynthError, SynthResult};
use crate::gadget::append_pauli_gadget;
use crate::mismatch::resolve_mismatch;
use crate::partition::QubitPartition;
use crate::reduce::{ReductionContext, align_to_z, reduce};

/// The conjugating circuit U and payload V of a gadget pair.
///
/// Both circuits declare the same qubits in the same order. Applying U,
/// then V, then U⁻¹ realizes gadget 0 followed by gadget 1.
#[derive(Debug, Clone)]
pub struct PairConjugation {
    /// The Clifford U.
    pub forward: Circuit,
    /// The reduced gadgets V.
    pub payload: Circuit,
}

impl PairConjugation {
    /// Declared qubits: just0, just1, match, mismatch as first classified.
    pub fn qubits(&self) -> &[QubitId] {
        self.forward.qubits()
    }

    /// Package the two circuits as a conjugation over slots.
    pub fn to_composite(&self) -> SynthResult<CompositeOp> {
        Ok(CompositeOp::conjugation(
            self.forward.to_box(),
            self.payload.to_box(),
        )?)
    }

    /// Append U, V, U⁻¹ to `circuit` as primitive gates.
    pub fn append_expanded(&self, circuit: &mut Circuit) -> SynthResult<()> {
        circuit
            .append(&self.forward)?
            .append(&self.payload)?
            .append(&self.forward.inverse()?)?;
        Ok(())
    }
}

/// Append `exp(-i angle1/2 · P1) · exp(-i angle0/2 · P0)` to `circuit` as
/// one conjugation composite over the union of both supports.
///
/// Both coefficients are checked before anything is built, so a malformed
/// operator leaves `circuit` untouched.
pub fn append_pauli_gadget_pair(
    circuit: &mut Circuit,
    pauli0: &PauliTensor,
    angle0: &Angle,
    pauli1: &PauliTensor,
    angle1: &Angle,
    cx_config: CxConfig,
) -> SynthResult<()> {
    let angle0 = convert_angle(pauli0.coeff, angle0)?;
    let angle1 = convert_angle(pauli1.coeff, angle1)?;

    let pair = conjugate_pair(&pauli0.string, &angle0, &pauli1.string, &angle1, cx_config)?;
    if pair.qubits().is_empty() {
        trace!("both gadgets are identities, nothing to emit");
        return Ok(());
    }
    let qubits = pair.qubits().to_vec();
    circuit.add_composite(pair.to_composite()?, qubits)?;
    Ok(())
}

/// Build U and V for two gadgets whose angles already carry their signs.
pub fn conjugate_pair(
    string0: &PauliString,
    angle0: &Angle,
    string1: &PauliString,
    angle1: &Angle,
    cx_config: CxConfig,
) -> SynthResult<PairConjugation> {
    let mut strings = [string0.compressed(), string1.compressed()];
    let mut partition = QubitPartition::classify(&strings[0], &strings[1]);
    partition.verify(&strings[0], &strings[1])?;

    debug!(
        just0 = partition.just0.len(),
        just1 = partition.just1.len(),
        matched = partition.matched.len(),
        mismatched = partition.mismatched.len(),
        strategy = %cx_config,
        "co-synthesising gadget pair"
    );

    let declared = partition.declared_order();
    let mut forward = Circuit::with_qubits("conjugation_forward", declared.iter().copied())?;
    let mut payload = Circuit::with_qubits("conjugation_payload", declared.iter().copied())?;

    align_to_z(&mut forward, &partition.matched, &mut strings)?;
    {
        let mut ctx = ReductionContext::new(&mut forward, &mut partition.matched, &mut strings);
        reduce(&mut ctx, cx_config)?;
    }
    partition.verify(&strings[0], &strings[1])?;

    for &q in &partition.mismatched {
        resolve_mismatch(&mut forward, q, strings[0].get(q), strings[1].get(q))?;
        strings[0].set(q, Pauli::Z);
        strings[1].set(q, Pauli::X);
    }

    merge_leftover_match(&mut forward, &mut partition, &mut strings)?;
    pair_mismatches(&mut forward, &mut partition, &mut strings)?;

    let shared = strings[0]
        .support()
        .intersection(&strings[1].support())
        .count();
    if shared > 1 {
        return Err(SynthError::Internal(format!(
            "reduced gadgets still share {shared} qubits"
        )));
    }

    let [reduced0, reduced1] = &strings;
    append_pauli_gadget(&mut payload, reduced0, angle0, cx_config)?;
    append_pauli_gadget(&mut payload, reduced1, angle1, cx_config)?;

    debug!(
        forward_ops = forward.num_ops(),
        forward_cx = forward.count_ops("cx"),
        payload_ops = payload.num_ops(),
        "gadget pair conjugation built"
    );

    Ok(PairConjugation { forward, payload })
}

/// Fold the least remaining match into the greatest mismatch:
/// S, CX(match → mismatch), Sdg maps Z_m Z_u to Z_u and Z_m X_u to X_u.
/// Without a mismatch the match stays with both gadgets.
fn merge_leftover_match(
    forward: &mut Circuit,
    partition: &mut QubitPartition,
    strings: &mut [PauliString; 2],
) -> SynthResult<()> {
    let Some(last_match) = partition.matched.pop_first() else {
        return Ok(());
    };
    match partition.mismatched.last().copied() {
        Some(mismatch_used) => {
            trace!(%last_match, %mismatch_used, "merging leftover match");
            forward
                .s(mismatch_used)?
                .cx(last_match, mismatch_used)?
                .sdg(mismatch_used)?;
            for s in strings.iter_mut() {
                s.remove(last_match);
            }
        }
        None => {
            partition.just0.insert(last_match);
            partition.just1.insert(last_match);
        }
    }
    Ok(())
}

/// Walk the mismatches in ascending pairs (z, x): CX(x → z) leaves Z only on
/// z in gadget 0 and X only on x in gadget 1. An odd one out stays with both.
fn pair_mismatches(
    forward: &mut Circuit,
    partition: &mut QubitPartition,
    strings: &mut [PauliString; 2],
) -> SynthResult<()> {
    let mismatched: Vec<QubitId> = partition.mismatched.iter().copied().collect();
    for chunk in mismatched.chunks(2) {
        match *chunk {
            [z_in_0, x_in_1] => {
                trace!(%z_in_0, %x_in_1, "pairing mismatches");
                forward.cx(x_in_1, z_in_0)?;
                strings[0].remove(x_in_1);
                strings[1].remove(z_in_0);
                partition.just0.insert(z_in_0);
                partition.just1.insert(x_in_1);
            }
            [z_in_0] => {
                partition.just0.insert(z_in_0);
                partition.just1.insert(z_in_0);
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> PauliString {
        text.parse().unwrap()
    }

    fn names(circuit: &Circuit) -> Vec<&str> {
        circuit.instructions().map(|i| i.name()).collect()
    }

    #[test]
    fn test_merge_step_gates() {
        // One match (Z on q0 after alignment) and one mismatch on q1.
        let pair = conjugate_pair(
            &s("Z0 Z1"),
            &Angle::constant(0.1),
            &s("Z0 X1"),
            &Angle::constant(0.2),
            CxConfig::Snake,
        )
        .unwrap();
        assert_eq!(names(&pair.forward), vec!["s", "cx", "sdg"]);
        let cx = pair.forward.instructions().nth(1).unwrap();
        assert_eq!(cx.qubits, vec![QubitId(0), QubitId(1)]);
        // Each reduced gadget is a lone rotation on q1.
        assert_eq!(names(&pair.payload), vec!["rz", "h", "rz", "h"]);
    }

    #[test]
    fn test_mismatch_pairing() {
        let pair = conjugate_pair(
            &s("Z0 Z1"),
            &Angle::constant(0.1),
            &s("X0 X1"),
            &Angle::constant(0.2),
            CxConfig::Snake,
        )
        .unwrap();
        assert_eq!(names(&pair.forward), vec!["cx"]);
        let cx = pair.forward.instructions().next().unwrap();
        assert_eq!(cx.qubits, vec![QubitId(1), QubitId(0)]);
    }

    #[test]
    fn test_declared_order() {
        let pair = conjugate_pair(
            &s("Y5 X1 Z2"),
            &Angle::constant(0.1),
            &s("Z0 X1 X2"),
            &Angle::constant(0.2),
            CxConfig::Tree,
        )
        .unwrap();
        assert_eq!(
            pair.qubits(),
            &[QubitId(5), QubitId(0), QubitId(1), QubitId(2)]
        );
        assert_eq!(pair.payload.qubits(), pair.qubits());
    }

    #[test]
    fn test_identities_emit_nothing() {
        let mut circuit = Circuit::with_size("c", 2);
        append_pauli_gadget_pair(
            &mut circuit,
            &PauliTensor::positive(s("I0")),
            &Angle::constant(0.3),
            &PauliTensor::positive(s("")),
            &Angle::constant(0.4),
            CxConfig::Star,
        )
        .unwrap();
        assert_eq!(circuit.num_ops(), 0);
    }
}
