//! Four-way classification of the qubits two Pauli strings act on.

use std::collections::BTreeSet;

use gadgetry_ir::{PauliString, QubitId};

use crate::error::{SynthError, SynthResult};

/// Split of the joint support of two Pauli strings.
///
/// The four sets are pairwise disjoint and their union is every qubit on
/// which either string is non-identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QubitPartition {
    /// Non-identity only in the first string.
    pub just0: BTreeSet<QubitId>,
    /// Non-identity only in the second string.
    pub just1: BTreeSet<QubitId>,
    /// Same non-identity label in both.
    pub matched: BTreeSet<QubitId>,
    /// Different non-identity labels.
    pub mismatched: BTreeSet<QubitId>,
}

impl QubitPartition {
    /// Classify the qubits of two strings. Identity entries are ignored.
    pub fn classify(string0: &PauliString, string1: &PauliString) -> Self {
        Self {
            just0: string0.own_qubits(string1),
            just1: string1.own_qubits(string0),
            matched: string0.common_qubits(string1),
            mismatched: string0.conflicting_qubits(string1),
        }
    }

    /// Qubits in the order a conjugation declares them: `just0`, `just1`,
    /// `matched`, then `mismatched`.
    pub fn declared_order(&self) -> Vec<QubitId> {
        self.just0
            .iter()
            .chain(&self.just1)
            .chain(&self.matched)
            .chain(&self.mismatched)
            .copied()
            .collect()
    }

    /// Total number of classified qubits.
    pub fn len(&self) -> usize {
        self.just0.len() + self.just1.len() + self.matched.len() + self.mismatched.len()
    }

    /// Check if no qubit is classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that the sets are disjoint and cover exactly the joint support
    /// of the two strings.
    pub fn verify(&self, string0: &PauliString, string1: &PauliString) -> SynthResult<()> {
        let mut seen = BTreeSet::new();
        for (name, set) in [
            ("just0", &self.just0),
            ("just1", &self.just1),
            ("match", &self.matched),
            ("mismatch", &self.mismatched),
        ] {
            for &q in set {
                if !seen.insert(q) {
                    return Err(SynthError::Internal(format!(
                        "qubit {q} appears in more than one partition set (again in {name})"
                    )));
                }
            }
        }

        let support: BTreeSet<QubitId> = string0.support().union(&string1.support()).copied().collect();
        if seen != support {
            return Err(SynthError::Internal(format!(
                "partition covers {} qubits but the strings act on {}",
                seen.len(),
                support.len()
            )));
        }
        Ok(())
    }
}
