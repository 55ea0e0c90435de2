//! Pauli operators over ordered qubits.
//!
//! A [`PauliString`] maps qubits to single-qubit Pauli labels:
//!
//!   P = ⊗_q  σ_q ,   σ_q ∈ {I, X, Y, Z}
//!
//! Entries are kept in a `BTreeMap` so that iteration and every "least" or
//! "greatest" qubit query follow the [`QubitId`] order. Identity entries may
//! be present until [`PauliString::compress`] removes them.
//!
//! # Example
//!
//! ```rust
//! use gadgetry_ir::{Pauli, PauliString, QubitId};
//!
//! let s: PauliString = "X0 Z1 Y3".parse().unwrap();
//! assert_eq!(s.get(QubitId(1)), Pauli::Z);
//! assert_eq!(s.get(QubitId(2)), Pauli::I);
//! assert_eq!(s.to_string(), "X0 Z1 Y3");
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;
use crate::qubit::QubitId;

/// Single-qubit Pauli label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    #[default]
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// The label as a single character.
    pub fn as_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    /// Check if this is the identity label.
    #[inline]
    pub fn is_identity(self) -> bool {
        self == Pauli::I
    }
}

impl TryFrom<char> for Pauli {
    type Error = IrError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'I' => Ok(Pauli::I),
            'X' => Ok(Pauli::X),
            'Y' => Ok(Pauli::Y),
            'Z' => Ok(Pauli::Z),
            _ => Err(IrError::InvalidPauli(c.to_string())),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A tensor product of Pauli labels on named qubits.
///
/// Serialized in the textual form accepted by [`FromStr`]: whitespace
/// separated `<label><index>` tokens such as `"X0 Z2"`. The empty string
/// and `"I"` both denote the identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PauliString {
    labels: BTreeMap<QubitId, Pauli>,
}

impl PauliString {
    /// Create an empty (identity) string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a string from `(qubit, label)` pairs. Later pairs overwrite
    /// earlier ones on the same qubit; identity labels are kept.
    pub fn from_labels(labels: impl IntoIterator<Item = (QubitId, Pauli)>) -> Self {
        Self {
            labels: labels.into_iter().collect(),
        }
    }

    /// Build a string from a dense label list, the i-th label acting on
    /// qubit `i`.
    pub fn from_dense(labels: &[Pauli]) -> Self {
        Self::from_labels(
            labels
                .iter()
                .enumerate()
                .map(|(i, &p)| (QubitId(i as u32), p)),
        )
    }

    /// The label on `qubit`; absent qubits carry the identity.
    #[inline]
    pub fn get(&self, qubit: QubitId) -> Pauli {
        self.labels.get(&qubit).copied().unwrap_or_default()
    }

    /// Set the label on `qubit`.
    pub fn set(&mut self, qubit: QubitId, pauli: Pauli) {
        self.labels.insert(qubit, pauli);
    }

    /// Remove `qubit` from the string, returning its previous label.
    pub fn remove(&mut self, qubit: QubitId) -> Option<Pauli> {
        self.labels.remove(&qubit)
    }

    /// Drop every identity entry.
    pub fn compress(&mut self) {
        self.labels.retain(|_, p| !p.is_identity());
    }

    /// A compressed copy.
    pub fn compressed(&self) -> Self {
        let mut out = self.clone();
        out.compress();
        out
    }

    /// Number of stored entries, identities included.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Check if every label is the identity.
    pub fn is_identity(&self) -> bool {
        self.labels.values().all(|p| p.is_identity())
    }

    /// Iterate over `(qubit, label)` in qubit order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (QubitId, Pauli)> + '_ {
        self.labels.iter().map(|(&q, &p)| (q, p))
    }

    /// Iterate over the stored qubits in order.
    pub fn qubits(&self) -> impl DoubleEndedIterator<Item = QubitId> + '_ {
        self.labels.keys().copied()
    }

    /// Qubits carrying a non-identity label.
    pub fn support(&self) -> BTreeSet<QubitId> {
        self.iter()
            .filter(|(_, p)| !p.is_identity())
            .map(|(q, _)| q)
            .collect()
    }

    /// Non-identity qubits of `self` on which `other` acts trivially.
    pub fn own_qubits(&self, other: &PauliString) -> BTreeSet<QubitId> {
        self.iter()
            .filter(|&(q, p)| !p.is_identity() && other.get(q).is_identity())
            .map(|(q, _)| q)
            .collect()
    }

    /// Qubits where both strings carry the same non-identity label.
    pub fn common_qubits(&self, other: &PauliString) -> BTreeSet<QubitId> {
        self.iter()
            .filter(|&(q, p)| !p.is_identity() && other.get(q) == p)
            .map(|(q, _)| q)
            .collect()
    }

    /// Qubits where both strings are non-identity but disagree.
    pub fn conflicting_qubits(&self, other: &PauliString) -> BTreeSet<QubitId> {
        self.iter()
            .filter(|&(q, p)| {
                let o = other.get(q);
                !p.is_identity() && !o.is_identity() && o != p
            })
            .map(|(q, _)| q)
            .collect()
    }

    /// Check if the two strings commute as operators.
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        self.conflicting_qubits(other).len() % 2 == 0
    }

    /// Labels on `qubits` in the given order, identity where absent.
    pub fn labels_on(&self, qubits: &[QubitId]) -> Vec<Pauli> {
        qubits.iter().map(|&q| self.get(q)).collect()
    }
}

impl FromIterator<(QubitId, Pauli)> for PauliString {
    fn from_iter<T: IntoIterator<Item = (QubitId, Pauli)>>(iter: T) -> Self {
        Self::from_labels(iter)
    }
}

impl FromStr for PauliString {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut labels = BTreeMap::new();
        for token in s.split_whitespace() {
            let mut chars = token.chars();
            let Some(head) = chars.next() else {
                continue;
            };
            let pauli = Pauli::try_from(head)?;
            let rest = chars.as_str();
            if rest.is_empty() {
                if pauli.is_identity() {
                    continue;
                }
                return Err(IrError::InvalidPauli(token.to_string()));
            }
            let index: u32 = rest
                .parse()
                .map_err(|_| IrError::InvalidPauli(token.to_string()))?;
            if labels.insert(QubitId(index), pauli).is_some() {
                return Err(IrError::DuplicateQubit {
                    qubit: QubitId(index),
                    gate_name: None,
                });
            }
        }
        Ok(Self { labels })
    }
}

impl TryFrom<String> for PauliString {
    type Error = IrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PauliString> for String {
    fn from(s: PauliString) -> Self {
        s.to_string()
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (q, p) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{p}{}", q.0)?;
            first = false;
        }
        Ok(())
    }
}

/// A Pauli string with a complex coefficient, `coeff · P`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTensor {
    /// The operator.
    pub string: PauliString,
    /// The scalar prefactor.
    pub coeff: Complex64,
}

impl PauliTensor {
    /// Create a tensor with an explicit coefficient.
    pub fn new(string: PauliString, coeff: Complex64) -> Self {
        Self { string, coeff }
    }

    /// Create a tensor with coefficient +1.
    pub fn positive(string: PauliString) -> Self {
        Self::new(string, Complex64::new(1.0, 0.0))
    }

    /// Create a tensor with coefficient −1.
    pub fn negative(string: PauliString) -> Self {
        Self::new(string, Complex64::new(-1.0, 0.0))
    }

    /// Drop identity entries of the string.
    pub fn compress(&mut self) {
        self.string.compress();
    }
}

impl From<PauliString> for PauliTensor {
    fn from(string: PauliString) -> Self {
        Self::positive(string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_parse_and_display() {
        let s: PauliString = "Z2 x0 Y5".parse().unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.get(q(0)), Pauli::X);
        assert_eq!(s.to_string(), "X0 Z2 Y5");

        let id: PauliString = "I".parse().unwrap();
        assert!(id.is_empty());
        assert!("".parse::<PauliString>().unwrap().is_identity());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "W0".parse::<PauliString>(),
            Err(IrError::InvalidPauli(_))
        ));
        assert!(matches!(
            "X".parse::<PauliString>(),
            Err(IrError::InvalidPauli(_))
        ));
        assert!(matches!(
            "X0 Z0".parse::<PauliString>(),
            Err(IrError::DuplicateQubit { .. })
        ));
    }

    #[test]
    fn test_compress_drops_identities() {
        let mut s = PauliString::from_dense(&[Pauli::I, Pauli::X, Pauli::I, Pauli::Z]);
        assert_eq!(s.len(), 4);
        assert_eq!(s.support(), [q(1), q(3)].into_iter().collect());

        s.compress();
        assert_eq!(s.len(), 2);
        assert_eq!(s.qubits().collect::<Vec<_>>(), vec![q(1), q(3)]);
    }

    #[test]
    fn test_overlap_classification() {
        let a: PauliString = "X0 Y1 Z2 X3".parse().unwrap();
        let b: PauliString = "Z1 Z2 X3 Y4".parse().unwrap();

        assert_eq!(a.own_qubits(&b), [q(0)].into_iter().collect());
        assert_eq!(b.own_qubits(&a), [q(4)].into_iter().collect());
        assert_eq!(a.common_qubits(&b), [q(2), q(3)].into_iter().collect());
        assert_eq!(a.conflicting_qubits(&b), [q(1)].into_iter().collect());
        assert!(!a.commutes_with(&b));
    }

    #[test]
    fn test_labels_on_pads_with_identity() {
        let s: PauliString = "X1".parse().unwrap();
        assert_eq!(
            s.labels_on(&[q(0), q(1), q(7)]),
            vec![Pauli::I, Pauli::X, Pauli::I]
        );
    }

    #[test]
    fn test_serde_uses_text_form() {
        let t = PauliTensor::negative("Y0 Z3".parse().unwrap());
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"Y0 Z3\""));
        let back: PauliTensor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
