//! Re-expansion of composite operations into primitive gates.

use gadgetry_ir::{
    Circuit, CircuitBox, CompositeOp, Instruction, InstructionKind, PauliString,
};
use tracing::debug;

use crate::error::SynthResult;
use crate::gadget::append_pauli_gadget;
use crate::pair::conjugate_pair;

/// Rebuild `circuit` with every composite replaced by primitive gates.
///
/// The result declares the same qubits in the same order. Nested composites
/// inside boxes are expanded recursively.
pub fn expand_composites(circuit: &Circuit) -> SynthResult<Circuit> {
    let mut out = Circuit::with_qubits(circuit.name(), circuit.qubits().iter().copied())?;
    let mut composites = 0usize;
    for inst in circuit.instructions() {
        if inst.is_composite() {
            composites += 1;
        }
        expand_instruction(&mut out, inst)?;
    }
    debug!(
        composites,
        ops_before = circuit.num_ops(),
        ops_after = out.num_ops(),
        "expanded composites"
    );
    Ok(out)
}

fn expand_instruction(out: &mut Circuit, inst: &Instruction) -> SynthResult<()> {
    match &inst.kind {
        InstructionKind::Gate(_) => {
            out.apply(inst.clone())?;
        }
        InstructionKind::Composite(op) => {
            let body = expand_op(op)?;
            out.append_box(&body.to_box(), &inst.qubits)?;
        }
    }
    Ok(())
}

/// Primitive-gate circuit for `op` over slot qubits `0..width`.
fn expand_op(op: &CompositeOp) -> SynthResult<Circuit> {
    let mut body = Circuit::with_size(op.name(), op.num_qubits());
    match op {
        CompositeOp::Conjugation { forward, payload } => {
            let forward = expand_box(forward)?;
            let payload = expand_box(payload)?;
            body.append(&forward)?
                .append(&payload)?
                .append(&forward.inverse()?)?;
        }
        CompositeOp::PauliExp {
            paulis,
            angle,
            cx_config,
        } => {
            append_pauli_gadget(&mut body, &PauliString::from_dense(paulis), angle, *cx_config)?;
        }
        CompositeOp::PauliExpPair {
            paulis0,
            angle0,
            paulis1,
            angle1,
            cx_config,
        } => {
            let pair = conjugate_pair(
                &PauliString::from_dense(paulis0),
                angle0,
                &PauliString::from_dense(paulis1),
                angle1,
                *cx_config,
            )?;
            pair.append_expanded(&mut body)?;
        }
        CompositeOp::PauliExpCommutingSet { gadgets, cx_config } => {
            for (paulis, angle) in gadgets {
                append_pauli_gadget(&mut body, &PauliString::from_dense(paulis), angle, *cx_config)?;
            }
        }
    }
    Ok(body)
}

fn expand_box(boxed: &CircuitBox) -> SynthResult<Circuit> {
    expand_composites(&Circuit::from_box("box", boxed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gadgetry_ir::{Angle, CxConfig, PauliTensor, QubitId};

    use crate::boxes::append_single_pauli_gadget_as_box;
    use crate::pair::append_pauli_gadget_pair;

    #[test]
    fn test_gates_pass_through() {
        let mut circuit = Circuit::with_qubits("c", [QubitId(4), QubitId(2)]).unwrap();
        circuit.h(QubitId(2)).unwrap().cx(QubitId(2), QubitId(4)).unwrap();

        let out = expand_composites(&circuit).unwrap();
        assert_eq!(out.qubits(), circuit.qubits());
        assert_eq!(out.num_ops(), 2);
    }

    #[test]
    fn test_single_box_expands_on_mapped_qubits() {
        let mut circuit = Circuit::with_size("c", 3);
        append_single_pauli_gadget_as_box(
            &mut circuit,
            &PauliTensor::positive("Z1 Z2".parse().unwrap()),
            &Angle::constant(0.3),
            CxConfig::Snake,
        )
        .unwrap();

        let out = expand_composites(&circuit).unwrap();
        let ops: Vec<_> = out
            .instructions()
            .map(|i| (i.name().to_string(), i.qubits.clone()))
            .collect();
        assert_eq!(
            ops,
            vec![
                ("cx".to_string(), vec![QubitId(2), QubitId(1)]),
                ("rz".to_string(), vec![QubitId(1)]),
                ("cx".to_string(), vec![QubitId(2), QubitId(1)]),
            ]
        );
    }

    #[test]
    fn test_conjugation_has_no_composites_left() {
        let mut circuit = Circuit::with_size("c", 3);
        append_pauli_gadget_pair(
            &mut circuit,
            &PauliTensor::positive("X0 Y1 Z2".parse().unwrap()),
            &Angle::constant(0.3),
            &PauliTensor::positive("Y0 Y1 X2".parse().unwrap()),
            &Angle::constant(0.7),
            CxConfig::MultiQGate,
        )
        .unwrap();
        assert_eq!(circuit.num_ops(), 1);

        let out = expand_composites(&circuit).unwrap();
        assert!(out.instructions().all(Instruction::is_gate));
        assert!(out.num_ops() > 1);
    }
}
