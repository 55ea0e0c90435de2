//! Single Pauli gadget synthesis.
//!
//! Implements
//!
//!   exp(-i θ/2 · P) = C⁻¹ · Rz(θ) · C
//!
//! where the Clifford C first rotates every factor of P to Z (X by H, Y by
//! V) and then folds the Z parity onto one qubit with the selected
//! reduction strategy. The emitted gate order is C, Rz(θ), C⁻¹.

use gadgetry_ir::{Angle, Circuit, CxConfig, IrError, PauliString, PauliTensor};
use tracing::trace;

use crate::angle::convert_angle;
use crate::error::{SynthError, SynthResult};
use crate::reduce::{ReductionContext, align_to_z, reduce};

/// Append the gates for `exp(-i angle/2 · string)` to `circuit`.
///
/// Every qubit of the string must already be declared on `circuit`. An
/// identity string is a global phase and emits nothing.
pub fn append_pauli_gadget(
    circuit: &mut Circuit,
    string: &PauliString,
    angle: &Angle,
    cx_config: CxConfig,
) -> SynthResult<()> {
    let string = string.compressed();
    if string.is_empty() {
        trace!("identity gadget, nothing to emit");
        return Ok(());
    }

    check_declared(circuit, &string)?;

    let mut support = string.support();
    let mut compute = Circuit::with_qubits("gadget_compute", support.iter().copied())?;
    let mut strings = [string];
    align_to_z(&mut compute, &support, &mut strings)?;
    let survivor = {
        let mut ctx = ReductionContext::new(&mut compute, &mut support, &mut strings);
        reduce(&mut ctx, cx_config)?
    }
    .ok_or_else(|| SynthError::Internal("reduction of a non-empty gadget left no qubit".into()))?;

    trace!(
        %survivor,
        strategy = %cx_config,
        compute_ops = compute.num_ops(),
        "synthesising gadget"
    );

    circuit.append(&compute)?;
    circuit.rz(angle.clone(), survivor)?;
    circuit.append(&compute.inverse()?)?;
    Ok(())
}

/// Fail if any qubit `string` acts on is missing from `circuit`.
pub(crate) fn check_declared(circuit: &Circuit, string: &PauliString) -> SynthResult<()> {
    match string.support().into_iter().find(|&q| !circuit.contains_qubit(q)) {
        Some(qubit) => Err(IrError::QubitNotFound {
            qubit,
            gate_name: None,
        }
        .into()),
        None => Ok(()),
    }
}

/// Check the tensor's coefficient, fold it into `angle`, then append the
/// gadget.
pub fn append_single_pauli_gadget(
    circuit: &mut Circuit,
    pauli: &PauliTensor,
    angle: &Angle,
    cx_config: CxConfig,
) -> SynthResult<()> {
    let angle = convert_angle(pauli.coeff, angle)?;
    append_pauli_gadget(circuit, &pauli.string, &angle, cx_config)
}
