//! Dense unitary checks for small circuits.
//!
//! Qubit `order[k]` is bit `k` of the basis-state index. Composites are
//! expanded before simulation; symbolic angles are rejected.

use std::f64::consts::FRAC_1_SQRT_2;

use gadgetry_ir::{Angle, Circuit, IrError, Pauli, PauliString, PauliTensor, QubitId, StandardGate};
use ndarray::Array2;
use num_complex::Complex64;
use rustc_hash::FxHashMap;

use crate::angle::convert_angle;
use crate::error::{SynthError, SynthResult};
use crate::expand::expand_composites;

/// Widest register the dense checks accept.
pub const MAX_VERIFY_QUBITS: usize = 12;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

type Matrix2 = [[Complex64; 2]; 2];

const H_MATRIX: Matrix2 = [
    [Complex64::new(FRAC_1_SQRT_2, 0.0), Complex64::new(FRAC_1_SQRT_2, 0.0)],
    [Complex64::new(FRAC_1_SQRT_2, 0.0), Complex64::new(-FRAC_1_SQRT_2, 0.0)],
];
const S_MATRIX: Matrix2 = [[ONE, ZERO], [ZERO, I]];
const SDG_MATRIX: Matrix2 = [[ONE, ZERO], [ZERO, Complex64::new(0.0, -1.0)]];
const SX_MATRIX: Matrix2 = [
    [Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5)],
    [Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5)],
];
const SXDG_MATRIX: Matrix2 = [
    [Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5)],
    [Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5)],
];

/// Dense unitary of `circuit` with respect to `order`.
///
/// Every qubit the circuit touches must appear in `order`.
pub fn circuit_unitary(circuit: &Circuit, order: &[QubitId]) -> SynthResult<Array2<Complex64>> {
    check_width(order.len())?;
    let expanded = expand_composites(circuit)?;
    let position = positions(order);

    let mut steps = Vec::with_capacity(expanded.num_ops());
    for inst in expanded.instructions() {
        let Some(gate) = inst.as_gate() else {
            return Err(SynthError::Internal(format!(
                "composite '{}' survived expansion",
                inst.name()
            )));
        };
        let bits = inst
            .qubits
            .iter()
            .map(|&q| {
                position.get(&q).copied().ok_or(IrError::QubitNotFound {
                    qubit: q,
                    gate_name: Some(gate.name().to_string()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        steps.push((gate, bits));
    }

    let dim = 1usize << order.len();
    let mut unitary = Array2::<Complex64>::zeros((dim, dim));
    let mut state = vec![ZERO; dim];
    for column in 0..dim {
        state.fill(ZERO);
        state[column] = ONE;
        for (gate, bits) in &steps {
            apply_gate(&mut state, gate, bits)?;
        }
        for (row, amp) in state.iter().enumerate() {
            unitary[[row, column]] = *amp;
        }
    }
    Ok(unitary)
}

/// Dense `exp(-i theta/2 · string)`:
///
///   cos(θ/2) · I − i · sin(θ/2) · P
pub fn pauli_exp_unitary(
    string: &PauliString,
    theta: f64,
    order: &[QubitId],
) -> SynthResult<Array2<Complex64>> {
    check_width(order.len())?;
    let position = positions(order);
    let factors = string
        .iter()
        .filter(|(_, p)| !p.is_identity())
        .map(|(q, p)| {
            position
                .get(&q)
                .map(|&bit| (bit, p))
                .ok_or(IrError::QubitNotFound {
                    qubit: q,
                    gate_name: None,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let dim = 1usize << order.len();
    let mut unitary = Array2::<Complex64>::zeros((dim, dim));
    let mut state = vec![ZERO; dim];
    for column in 0..dim {
        state.fill(ZERO);
        state[column] = ONE;
        rotate(&mut state, &factors, theta);
        for (row, amp) in state.iter().enumerate() {
            unitary[[row, column]] = *amp;
        }
    }
    Ok(unitary)
}

/// Dense unitary of the gadgets applied in sequence, first element first.
///
/// Coefficients are folded into the angles as the synthesizers do.
pub fn gadget_sequence_unitary(
    gadgets: &[(PauliTensor, Angle)],
    order: &[QubitId],
) -> SynthResult<Array2<Complex64>> {
    check_width(order.len())?;
    let dim = 1usize << order.len();
    let mut total = Array2::<Complex64>::eye(dim);
    for (pauli, angle) in gadgets {
        let angle = convert_angle(pauli.coeff, angle)?;
        let theta = numeric(&angle)?;
        total = pauli_exp_unitary(&pauli.string, theta, order)?.dot(&total);
    }
    Ok(total)
}

/// Check `a = e^{iφ} · b` for some global phase φ, entrywise within `tol`.
pub fn equal_up_to_global_phase(a: &Array2<Complex64>, b: &Array2<Complex64>, tol: f64) -> bool {
    if a.shape() != b.shape() {
        return false;
    }
    let Some((index, pivot)) = b
        .indexed_iter()
        .max_by(|(_, x), (_, y)| x.norm_sqr().total_cmp(&y.norm_sqr()))
    else {
        return true;
    };
    if pivot.norm() < tol {
        return a.iter().all(|x| x.norm() < tol);
    }
    let phase = a[index] / pivot;
    if (phase.norm() - 1.0).abs() > tol {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (x - phase * y).norm() < tol)
}

fn check_width(qubits: usize) -> SynthResult<()> {
    if qubits > MAX_VERIFY_QUBITS {
        return Err(SynthError::VerificationTooWide {
            qubits,
            max: MAX_VERIFY_QUBITS,
        });
    }
    Ok(())
}

fn positions(order: &[QubitId]) -> FxHashMap<QubitId, usize> {
    order.iter().enumerate().map(|(i, &q)| (q, i)).collect()
}

fn numeric(angle: &Angle) -> SynthResult<f64> {
    angle
        .as_f64()
        .ok_or_else(|| IrError::UnboundParameter(angle.to_string()).into())
}

// =========================================================================
// State-vector kernels
// =========================================================================

fn apply_gate(state: &mut [Complex64], gate: &StandardGate, bits: &[usize]) -> SynthResult<()> {
    match (gate, bits) {
        (StandardGate::X, &[q]) => apply_pauli_in_place(state, &[(q, Pauli::X)]),
        (StandardGate::Y, &[q]) => apply_pauli_in_place(state, &[(q, Pauli::Y)]),
        (StandardGate::Z, &[q]) => apply_pauli_in_place(state, &[(q, Pauli::Z)]),
        (StandardGate::H, &[q]) => apply_single(state, q, &H_MATRIX),
        (StandardGate::S, &[q]) => apply_single(state, q, &S_MATRIX),
        (StandardGate::Sdg, &[q]) => apply_single(state, q, &SDG_MATRIX),
        (StandardGate::SX, &[q]) => apply_single(state, q, &SX_MATRIX),
        (StandardGate::SXdg, &[q]) => apply_single(state, q, &SXDG_MATRIX),
        (StandardGate::Rx(a), &[q]) => rotate(state, &[(q, Pauli::X)], numeric(a)?),
        (StandardGate::Ry(a), &[q]) => rotate(state, &[(q, Pauli::Y)], numeric(a)?),
        (StandardGate::Rz(a), &[q]) => rotate(state, &[(q, Pauli::Z)], numeric(a)?),
        (StandardGate::CX, &[control, target]) => {
            let (cm, tm) = (1 << control, 1 << target);
            for i in 0..state.len() {
                if i & cm != 0 && i & tm == 0 {
                    state.swap(i, i | tm);
                }
            }
        }
        (StandardGate::CZ, &[a, b]) => {
            let mask = (1 << a) | (1 << b);
            for (i, amp) in state.iter_mut().enumerate() {
                if i & mask == mask {
                    *amp = -*amp;
                }
            }
        }
        (StandardGate::XXPhase3(a), &[q0, q1, q2]) => {
            // The three XX terms commute.
            let theta = numeric(a)?;
            for (x, y) in [(q0, q1), (q0, q2), (q1, q2)] {
                rotate(state, &[(x, Pauli::X), (y, Pauli::X)], theta);
            }
        }
        _ => {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: u32::try_from(bits.len()).unwrap_or(u32::MAX),
            }
            .into());
        }
    }
    Ok(())
}

fn apply_single(state: &mut [Complex64], qubit: usize, m: &Matrix2) {
    let mask = 1 << qubit;
    for i in 0..state.len() {
        if i & mask == 0 {
            let j = i | mask;
            let a = state[i];
            let b = state[j];
            state[i] = m[0][0] * a + m[0][1] * b;
            state[j] = m[1][0] * a + m[1][1] * b;
        }
    }
}

/// `P · state` for a Pauli product given as `(bit, label)` factors.
fn pauli_image(state: &[Complex64], factors: &[(usize, Pauli)]) -> Vec<Complex64> {
    let mut out = vec![ZERO; state.len()];
    for (b, &amp) in state.iter().enumerate() {
        let mut target = b;
        let mut phase = ONE;
        for &(bit, label) in factors {
            let set = b & (1 << bit) != 0;
            match label {
                Pauli::I => {}
                Pauli::X => target ^= 1 << bit,
                Pauli::Y => {
                    target ^= 1 << bit;
                    // Y|0⟩ = i|1⟩, Y|1⟩ = −i|0⟩
                    phase *= if set { -I } else { I };
                }
                Pauli::Z => {
                    if set {
                        phase = -phase;
                    }
                }
            }
        }
        out[target] += phase * amp;
    }
    out
}

fn apply_pauli_in_place(state: &mut [Complex64], factors: &[(usize, Pauli)]) {
    let image = pauli_image(state, factors);
    state.copy_from_slice(&image);
}

/// `exp(-i theta/2 · P) · state`.
fn rotate(state: &mut [Complex64], factors: &[(usize, Pauli)], theta: f64) {
    let image = pauli_image(state, factors);
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    for (amp, p) in state.iter_mut().zip(image) {
        *amp = c * *amp + s * p;
    }
}
