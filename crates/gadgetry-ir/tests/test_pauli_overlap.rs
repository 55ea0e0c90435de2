//! Property tests for Pauli-string overlap classification.

use std::collections::BTreeSet;

use gadgetry_ir::{Pauli, PauliString, QubitId};
use proptest::prelude::*;

fn pauli() -> impl Strategy<Value = Pauli> {
    prop_oneof![Just(Pauli::I), Just(Pauli::X), Just(Pauli::Y), Just(Pauli::Z)]
}

fn pauli_string(width: usize) -> impl Strategy<Value = PauliString> {
    prop::collection::vec(pauli(), 0..=width).prop_map(|labels| PauliString::from_dense(&labels))
}

proptest! {
    #[test]
    fn classification_partitions_the_union(a in pauli_string(8), b in pauli_string(8)) {
        let just_a = a.own_qubits(&b);
        let just_b = b.own_qubits(&a);
        let common = a.common_qubits(&b);
        let conflict = a.conflicting_qubits(&b);

        let union: BTreeSet<QubitId> = a.support().union(&b.support()).copied().collect();
        let mut covered = BTreeSet::new();
        for set in [&just_a, &just_b, &common, &conflict] {
            for q in set {
                prop_assert!(covered.insert(*q), "qubit {} classified twice", q);
            }
        }
        prop_assert_eq!(covered, union);
    }

    #[test]
    fn classification_is_symmetric(a in pauli_string(6), b in pauli_string(6)) {
        prop_assert_eq!(a.common_qubits(&b), b.common_qubits(&a));
        prop_assert_eq!(a.conflicting_qubits(&b), b.conflicting_qubits(&a));
        prop_assert_eq!(a.commutes_with(&b), b.commutes_with(&a));
    }

    #[test]
    fn text_form_is_stable(a in pauli_string(10)) {
        let compressed = a.compressed();
        let parsed: PauliString = compressed.to_string().parse().unwrap();
        prop_assert_eq!(parsed, compressed);
    }
}

#[test]
fn identity_only_strings_have_empty_support() {
    let s = PauliString::from_dense(&[Pauli::I, Pauli::I]);
    assert!(s.is_identity());
    assert!(s.support().is_empty());
    assert!(s.compressed().is_empty());
}
