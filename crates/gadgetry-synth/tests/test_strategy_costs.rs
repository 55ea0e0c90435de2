//! Gate-count and depth properties of the reduction strategies.

use std::collections::BTreeSet;

use gadgetry_ir::{Angle, CxConfig, Pauli, PauliString, QubitId};
use gadgetry_synth::{QubitPartition, conjugate_pair};
use proptest::prelude::*;

/// Helper: both strings carry the same labels on `0..n`.
fn matched_pair(n: u32) -> (PauliString, PauliString) {
    let labels = [Pauli::X, Pauli::Y, Pauli::Z];
    let s = PauliString::from_labels((0..n).map(|i| (QubitId(i), labels[i as usize % 3])));
    (s.clone(), s)
}

fn forward_counts(n: u32, cx_config: CxConfig) -> (usize, usize, usize) {
    let (s0, s1) = matched_pair(n);
    let pair = conjugate_pair(&s0, &Angle::constant(0.1), &s1, &Angle::constant(0.2), cx_config).unwrap();
    (
        pair.forward.count_ops("cx"),
        pair.forward.count_ops("xxphase3"),
        pair.forward.depth(),
    )
}

#[test]
fn test_cx_strategies_emit_one_cx_per_eliminated_match() {
    for n in 1..=9 {
        for cx_config in [CxConfig::Snake, CxConfig::Star, CxConfig::Tree] {
            let (cx, xx, _) = forward_counts(n, cx_config);
            assert_eq!(cx, n as usize - 1, "{cx_config} on {n} matches");
            assert_eq!(xx, 0);
        }
    }
}

#[test]
fn test_multiqgate_counts() {
    for n in 1..=9u32 {
        let eliminated = n as usize - 1;
        let (cx, xx, _) = forward_counts(n, CxConfig::MultiQGate);
        assert_eq!(xx, eliminated / 2, "{n} matches");
        assert_eq!(cx, eliminated % 2, "{n} matches");
    }
}

#[test]
fn test_tree_is_shallower_than_snake() {
    for n in [8, 16, 32] {
        let (_, _, snake) = forward_counts(n, CxConfig::Snake);
        let (_, _, tree) = forward_counts(n, CxConfig::Tree);
        assert!(tree <= snake, "tree {tree} vs snake {snake} on {n} matches");
    }
    // 16 matches: a 15-gate chain against 4 halving rounds, plus alignment.
    let (_, _, tree) = forward_counts(16, CxConfig::Tree);
    assert!(tree <= 5);
}

#[test]
fn test_mismatch_only_cost() {
    // Every qubit mismatched: no reduction, one CX per pair.
    let s0: PauliString = "Z0 Z1 Z2 Z3 Z4".parse().unwrap();
    let s1: PauliString = "X0 X1 X2 X3 X4".parse().unwrap();
    for cx_config in CxConfig::ALL {
        let pair = conjugate_pair(&s0, &Angle::constant(0.1), &s1, &Angle::constant(0.2), cx_config).unwrap();
        assert_eq!(pair.forward.count_ops("cx"), 2);
        assert_eq!(pair.forward.num_ops(), 2);
    }
}

fn labels() -> impl Strategy<Value = Vec<Pauli>> {
    prop::collection::vec(
        prop::sample::select(vec![Pauli::I, Pauli::X, Pauli::Y, Pauli::Z]),
        0..10,
    )
}

proptest! {
    #[test]
    fn prop_partition_is_disjoint_and_covering(l0 in labels(), l1 in labels()) {
        let s0 = PauliString::from_dense(&l0);
        let s1 = PauliString::from_dense(&l1);
        let partition = QubitPartition::classify(&s0, &s1);
        prop_assert!(partition.verify(&s0, &s1).is_ok());

        let sets = [&partition.just0, &partition.just1, &partition.matched, &partition.mismatched];
        let total: usize = sets.iter().map(|s| s.len()).sum();
        let union: BTreeSet<QubitId> = sets.iter().flat_map(|s| s.iter().copied()).collect();
        prop_assert_eq!(total, union.len());
        prop_assert_eq!(partition.declared_order().len(), total);
    }

    #[test]
    fn prop_forward_cost_formula(
        l0 in labels(),
        l1 in labels(),
        cx_config in prop::sample::select(CxConfig::ALL.to_vec()),
    ) {
        let s0 = PauliString::from_dense(&l0);
        let s1 = PauliString::from_dense(&l1);
        let partition = QubitPartition::classify(&s0, &s1);
        let m = partition.matched.len();
        let k = partition.mismatched.len();

        let pair = conjugate_pair(&s0, &Angle::constant(0.1), &s1, &Angle::constant(0.2), cx_config).unwrap();
        let eliminated = m.saturating_sub(1);
        let reduction_cx = match cx_config {
            CxConfig::MultiQGate => eliminated % 2,
            _ => eliminated,
        };
        let merge_cx = usize::from(m > 0 && k > 0);
        prop_assert_eq!(pair.forward.count_ops("cx"), reduction_cx + merge_cx + k / 2);
        if cx_config == CxConfig::MultiQGate {
            prop_assert_eq!(pair.forward.count_ops("xxphase3"), eliminated / 2);
        }
    }
}
