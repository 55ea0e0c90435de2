//! Entangling-gate reduction of a set of Z-aligned qubits.
//!
//! Every strategy takes a set of qubits on which all tracked Pauli strings
//! carry Z and emits gates that fold the parity of the set onto a single
//! survivor:
//!
//!   CX(c, t) · Z_c Z_t · CX(c, t) = Z_t
//!
//! Each eliminated qubit is dropped from the set and from every string, so
//! the set and the strings stay in lockstep. All strategies eliminate
//! exactly `|set| − 1` qubits.

use std::collections::BTreeSet;
use std::f64::consts::FRAC_PI_2;

use gadgetry_ir::{Circuit, CxConfig, Pauli, PauliString, QubitId};
use tracing::trace;

use crate::error::{SynthError, SynthResult};

/// Mutable state shared by the reduction strategies.
pub struct ReductionContext<'a> {
    /// Circuit receiving the emitted gates.
    pub circuit: &'a mut Circuit,
    /// Qubits still to be reduced.
    pub qubits: &'a mut BTreeSet<QubitId>,
    /// Strings updated alongside the set.
    pub strings: &'a mut [PauliString],
}

impl<'a> ReductionContext<'a> {
    /// Bundle the pieces a strategy mutates.
    pub fn new(
        circuit: &'a mut Circuit,
        qubits: &'a mut BTreeSet<QubitId>,
        strings: &'a mut [PauliString],
    ) -> Self {
        Self {
            circuit,
            qubits,
            strings,
        }
    }

    fn strip(&mut self, qubit: QubitId) {
        self.qubits.remove(&qubit);
        for s in self.strings.iter_mut() {
            s.remove(qubit);
        }
    }

    fn cx_eliminate(&mut self, control: QubitId, target: QubitId) -> SynthResult<()> {
        trace!(%control, %target, "eliminating by CX");
        self.circuit.cx(control, target)?;
        self.strip(control);
        Ok(())
    }
}

/// Rotate every qubit of `qubits` to Z on all strings: X by H, Y by V.
///
/// All strings must carry the same non-identity label on each qubit.
pub fn align_to_z(
    circuit: &mut Circuit,
    qubits: &BTreeSet<QubitId>,
    strings: &mut [PauliString],
) -> SynthResult<()> {
    for &q in qubits {
        let label = strings.first().map_or(Pauli::I, |s| s.get(q));
        if label.is_identity() || strings.iter().any(|s| s.get(q) != label) {
            return Err(SynthError::Internal(format!(
                "cannot align {q} to Z: labels differ or are identity"
            )));
        }
        match label {
            Pauli::X => {
                circuit.h(q)?;
            }
            Pauli::Y => {
                circuit.sx(q)?;
            }
            Pauli::Z | Pauli::I => {}
        }
        for s in strings.iter_mut() {
            s.set(q, Pauli::Z);
        }
    }
    Ok(())
}

/// Reduce the context's qubit set to at most one qubit with the given
/// strategy. Returns the survivor, if the set was non-empty.
pub fn reduce(ctx: &mut ReductionContext<'_>, cx_config: CxConfig) -> SynthResult<Option<QubitId>> {
    trace!(strategy = %cx_config, size = ctx.qubits.len(), "reducing qubit set");
    match cx_config {
        CxConfig::Snake => reduce_snake(ctx)?,
        CxConfig::Star => reduce_star(ctx)?,
        CxConfig::Tree => reduce_tree(ctx)?,
        CxConfig::MultiQGate => reduce_multiqgate(ctx)?,
    }
    Ok(ctx.qubits.first().copied())
}

/// Chain from the top down: CX(greatest → next greatest).
fn reduce_snake(ctx: &mut ReductionContext<'_>) -> SynthResult<()> {
    while ctx.qubits.len() > 1 {
        let mut top = ctx.qubits.iter().rev();
        let (Some(&to_eliminate), Some(&helper)) = (top.next(), top.next()) else {
            break;
        };
        ctx.cx_eliminate(to_eliminate, helper)?;
    }
    Ok(())
}

/// Everything targets the greatest qubit, smallest first.
fn reduce_star(ctx: &mut ReductionContext<'_>) -> SynthResult<()> {
    let Some(&target) = ctx.qubits.last() else {
        return Ok(());
    };
    while ctx.qubits.len() > 1 {
        let Some(&to_eliminate) = ctx.qubits.first() else {
            break;
        };
        ctx.cx_eliminate(to_eliminate, target)?;
    }
    Ok(())
}

/// Pairwise halving: in each round the second of every ascending pair
/// folds onto the first.
fn reduce_tree(ctx: &mut ReductionContext<'_>) -> SynthResult<()> {
    while ctx.qubits.len() > 1 {
        let round: Vec<QubitId> = ctx.qubits.iter().copied().collect();
        for pair in round.chunks(2) {
            if let [maintained, to_eliminate] = *pair {
                ctx.cx_eliminate(to_eliminate, maintained)?;
            }
        }
    }
    Ok(())
}

/// Two qubits at a time onto the greatest with `XXPhase3`, then one CX
/// when exactly two remain.
///
/// H⊗H maps Z_a Z_b Z_t to X_a X_b Z_t, and
/// X_t · XXPhase3(π/2) maps X_a X_b Z_t to Z_t.
fn reduce_multiqgate(ctx: &mut ReductionContext<'_>) -> SynthResult<()> {
    let Some(&target) = ctx.qubits.last() else {
        return Ok(());
    };
    while ctx.qubits.len() > 1 {
        if ctx.qubits.len() == 2 {
            let Some(&to_eliminate) = ctx.qubits.first() else {
                break;
            };
            ctx.cx_eliminate(to_eliminate, target)?;
        } else {
            let (Some(e1), Some(e2)) = (ctx.qubits.pop_first(), ctx.qubits.pop_first()) else {
                break;
            };
            trace!(%e1, %e2, %target, "eliminating by XXPhase3");
            ctx.circuit
                .h(e1)?
                .h(e2)?
                .xxphase3(FRAC_PI_2, e1, e2, target)?
                .x(target)?;
            ctx.strip(e1);
            ctx.strip(e2);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z_string(ids: &[u32]) -> PauliString {
        PauliString::from_labels(ids.iter().map(|&i| (QubitId(i), Pauli::Z)))
    }

    fn run(cx_config: CxConfig, ids: &[u32]) -> (Circuit, BTreeSet<QubitId>, PauliString, Option<QubitId>) {
        let mut circuit = Circuit::with_qubits("u", ids.iter().copied().map(QubitId)).unwrap();
        let mut qubits: BTreeSet<QubitId> = ids.iter().copied().map(QubitId).collect();
        let mut strings = [z_string(ids)];
        let survivor = {
            let mut ctx = ReductionContext::new(&mut circuit, &mut qubits, &mut strings);
            reduce(&mut ctx, cx_config).unwrap()
        };
        let [s] = strings;
        (circuit, qubits, s, survivor)
    }

    fn cx_pairs(circuit: &Circuit) -> Vec<(u32, u32)> {
        circuit
            .instructions()
            .filter(|i| i.name() == "cx")
            .map(|i| (i.qubits[0].0, i.qubits[1].0))
            .collect()
    }

    #[test]
    fn test_snake_chain() {
        let (circuit, qubits, s, survivor) = run(CxConfig::Snake, &[1, 3, 4, 7]);
        assert_eq!(cx_pairs(&circuit), vec![(7, 4), (4, 3), (3, 1)]);
        assert_eq!(survivor, Some(QubitId(1)));
        assert_eq!(qubits.len(), 1);
        assert_eq!(s.to_string(), "Z1");
    }

    #[test]
    fn test_star_targets_greatest() {
        let (circuit, _, s, survivor) = run(CxConfig::Star, &[0, 2, 5]);
        assert_eq!(cx_pairs(&circuit), vec![(0, 5), (2, 5)]);
        assert_eq!(survivor, Some(QubitId(5)));
        assert_eq!(s.to_string(), "Z5");
    }

    #[test]
    fn test_tree_rounds() {
        let (circuit, _, _, survivor) = run(CxConfig::Tree, &[0, 1, 2, 3, 4]);
        assert_eq!(
            cx_pairs(&circuit),
            vec![(1, 0), (3, 2), (2, 0), (4, 0)]
        );
        assert_eq!(survivor, Some(QubitId(0)));
    }

    #[test]
    fn test_multiqgate_counts() {
        let (circuit, _, s, survivor) = run(CxConfig::MultiQGate, &[0, 1, 2, 3]);
        // 3 eliminations: one XXPhase3 pair, then one CX.
        assert_eq!(circuit.count_ops("xxphase3"), 1);
        assert_eq!(cx_pairs(&circuit), vec![(2, 3)]);
        assert_eq!(survivor, Some(QubitId(3)));
        assert_eq!(s.to_string(), "Z3");

        let (circuit, _, _, _) = run(CxConfig::MultiQGate, &[0, 1, 2, 3, 4]);
        assert_eq!(circuit.count_ops("xxphase3"), 2);
        assert_eq!(circuit.count_ops("cx"), 0);
    }

    #[test]
    fn test_trivial_sets() {
        for cx_config in CxConfig::ALL {
            let (circuit, _, _, survivor) = run(cx_config, &[6]);
            assert_eq!(circuit.num_ops(), 0);
            assert_eq!(survivor, Some(QubitId(6)));

            let (circuit, _, _, survivor) = run(cx_config, &[]);
            assert_eq!(circuit.num_ops(), 0);
            assert_eq!(survivor, None);
        }
    }

    #[test]
    fn test_align_to_z() {
        let mut circuit = Circuit::with_size("u", 3);
        let mut strings = [
            "X0 Y1 Z2".parse::<PauliString>().unwrap(),
            "X0 Y1 Z2".parse::<PauliString>().unwrap(),
        ];
        let qubits: BTreeSet<QubitId> = [QubitId(0), QubitId(1), QubitId(2)].into();
        align_to_z(&mut circuit, &qubits, &mut strings).unwrap();

        let names: Vec<_> = circuit.instructions().map(|i| i.name()).collect();
        assert_eq!(names, vec!["h", "sx"]);
        assert_eq!(strings[1].to_string(), "Z0 Z1 Z2");
    }

    #[test]
    fn test_align_rejects_disagreeing_labels() {
        let mut circuit = Circuit::with_size("u", 1);
        let mut strings = [
            "X0".parse::<PauliString>().unwrap(),
            "Z0".parse::<PauliString>().unwrap(),
        ];
        let qubits: BTreeSet<QubitId> = [QubitId(0)].into();
        assert!(matches!(
            align_to_z(&mut circuit, &qubits, &mut strings),
            Err(SynthError::Internal(_))
        ));
    }
}
