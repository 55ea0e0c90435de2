//! High-level circuit builder API.

use rustc_hash::FxHashMap;

use crate::angle::Angle;
use crate::composite::{CircuitBox, CompositeOp};
use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A quantum circuit over an ordered set of declared qubits.
///
/// Qubits keep their declaration order; [`Circuit::to_box`] maps the `i`-th
/// declared qubit to slot `i`.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Declared qubits, in declaration order.
    qubits: Vec<QubitId>,
    /// The underlying DAG representation.
    dag: CircuitDag,
    /// Next identifier handed out by [`Circuit::add_qubit`].
    next_qubit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            dag: CircuitDag::new(),
            next_qubit_id: 0,
        }
    }

    /// Create a circuit with qubits `0..num_qubits`.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        for i in 0..num_qubits {
            circuit.dag.add_qubit(QubitId(i));
            circuit.qubits.push(QubitId(i));
        }
        circuit.next_qubit_id = num_qubits;
        circuit
    }

    /// Create a circuit declaring `qubits` in the given order.
    pub fn with_qubits(
        name: impl Into<String>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<Self> {
        let mut circuit = Self::new(name);
        for q in qubits {
            circuit.declare_qubit(q)?;
        }
        Ok(circuit)
    }

    /// Allocate a fresh qubit, greater than every qubit declared so far.
    ///
    /// Fails once the identifier space above the largest declared qubit is
    /// used up.
    pub fn add_qubit(&mut self) -> IrResult<QubitId> {
        let id = QubitId(self.next_qubit_id);
        if !self.dag.add_qubit(id) {
            return Err(IrError::QubitIdsExhausted);
        }
        self.qubits.push(id);
        self.next_qubit_id = id.0.saturating_add(1);
        Ok(id)
    }

    /// Declare a specific qubit. Fails if it is already declared.
    pub fn declare_qubit(&mut self, qubit: QubitId) -> IrResult<()> {
        if !self.dag.add_qubit(qubit) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: None,
            });
        }
        self.qubits.push(qubit);
        self.next_qubit_id = self.next_qubit_id.max(qubit.0.saturating_add(1));
        Ok(())
    }

    /// Check whether `qubit` is declared.
    pub fn contains_qubit(&self, qubit: QubitId) -> bool {
        self.dag.contains_qubit(qubit)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Z, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::S, [qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Sdg, [qubit])
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::SX, [qubit])
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::SXdg, [qubit])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Rx(theta.into()), [qubit])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Ry(theta.into()), [qubit])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Rz(theta.into()), [qubit])
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CZ, [q1, q2])
    }

    /// Apply the three-qubit XX phase gate.
    pub fn xxphase3(
        &mut self,
        theta: impl Into<Angle>,
        q0: QubitId,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.gate(StandardGate::XXPhase3(theta.into()), [q0, q1, q2])
    }

    /// Apply any primitive gate.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Apply a prepared instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    /// Apply a composite operation; `qubits[i]` receives slot `i`.
    pub fn add_composite(
        &mut self,
        op: CompositeOp,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::composite(op, qubits))?;
        Ok(self)
    }

    /// Append every instruction of `other` on the same qubit identifiers.
    ///
    /// Nothing is applied unless every instruction fits this circuit.
    pub fn append(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        for inst in other.instructions() {
            self.dag.check(inst)?;
        }
        for inst in other.instructions() {
            self.dag.apply(inst.clone())?;
        }
        Ok(self)
    }

    /// Append the contents of a box, sending slot `i` to `mapping[i]`.
    ///
    /// Nothing is applied unless every remapped instruction fits this circuit.
    #[allow(clippy::cast_possible_truncation)]
    pub fn append_box(&mut self, boxed: &CircuitBox, mapping: &[QubitId]) -> IrResult<&mut Self> {
        if mapping.len() != boxed.num_qubits as usize {
            return Err(IrError::WidthMismatch {
                expected: boxed.num_qubits,
                got: mapping.len() as u32,
            });
        }
        let mut remapped = Vec::with_capacity(boxed.instructions.len());
        for inst in &boxed.instructions {
            if let Some(&slot) = inst.qubits.iter().find(|s| s.0 >= boxed.num_qubits) {
                return Err(IrError::QubitNotFound {
                    qubit: slot,
                    gate_name: Some(inst.name().to_string()),
                });
            }
            let inst = inst.remapped(|slot| mapping[slot.0 as usize]);
            self.dag.check(&inst)?;
            remapped.push(inst);
        }
        for inst in remapped {
            self.dag.apply(inst)?;
        }
        Ok(self)
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    /// Relabel the declared qubits to slots in declaration order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_box(&self) -> CircuitBox {
        let slot_of: FxHashMap<QubitId, QubitId> = self
            .qubits
            .iter()
            .enumerate()
            .map(|(i, &q)| (q, QubitId(i as u32)))
            .collect();
        CircuitBox {
            num_qubits: self.qubits.len() as u32,
            instructions: self
                .instructions()
                .map(|inst| inst.remapped(|q| slot_of[&q]))
                .collect(),
        }
    }

    /// Build a circuit over qubits `0..num_qubits` from a box.
    pub fn from_box(name: impl Into<String>, boxed: &CircuitBox) -> IrResult<Self> {
        let mut circuit = Self::with_size(name, boxed.num_qubits);
        for inst in &boxed.instructions {
            circuit.dag.apply(inst.clone())?;
        }
        Ok(circuit)
    }

    /// The circuit realizing the inverse unitary on the same qubits.
    pub fn inverse(&self) -> IrResult<Self> {
        let mut inv = Self::with_qubits(format!("{}_dg", self.name), self.qubits.iter().copied())?;
        let ops: Vec<&Instruction> = self.instructions().collect();
        for inst in ops.into_iter().rev() {
            inv.dag.apply(crate::inverse::inverse_instruction(inst))?;
        }
        Ok(inv)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Declared qubits in declaration order.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Get the number of top-level operations.
    pub fn num_ops(&self) -> usize {
        self.dag.num_ops()
    }

    /// Count operations with the given name.
    pub fn count_ops(&self, name: &str) -> usize {
        self.instructions().filter(|inst| inst.name() == name).count()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Iterate over instructions in application order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.dag.ops().map(|(_, inst)| inst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pauli::Pauli;
    use crate::composite::CxConfig;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
    }

    #[test]
    fn test_declare_keeps_order() {
        let mut circuit = Circuit::new("test");
        circuit.declare_qubit(QubitId(5)).unwrap();
        circuit.declare_qubit(QubitId(2)).unwrap();
        assert_eq!(circuit.qubits(), &[QubitId(5), QubitId(2)]);

        assert!(matches!(
            circuit.declare_qubit(QubitId(5)),
            Err(IrError::DuplicateQubit { .. })
        ));

        // Allocation continues past the largest declared id.
        assert_eq!(circuit.add_qubit().unwrap(), QubitId(6));
        assert!(circuit.contains_qubit(QubitId(2)));
        assert_eq!(circuit.num_qubits(), 3);
    }

    #[test]
    fn test_add_qubit_after_largest_id() {
        let mut circuit = Circuit::new("test");
        circuit.declare_qubit(QubitId(u32::MAX)).unwrap();
        assert!(matches!(
            circuit.add_qubit(),
            Err(IrError::QubitIdsExhausted)
        ));
        assert_eq!(circuit.qubits(), &[QubitId(u32::MAX)]);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .xxphase3(PI / 2.0, QubitId(0), QubitId(1), QubitId(2))
            .unwrap();

        assert_eq!(circuit.num_ops(), 3);
        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.count_ops("cx"), 1);
    }

    #[test]
    fn test_append_box_maps_slots() {
        let mut b = CircuitBox::new(2);
        b.push(Instruction::two_qubit_gate(
            StandardGate::CX,
            QubitId(0),
            QubitId(1),
        ))
        .unwrap();

        let mut circuit = Circuit::with_qubits("t", [QubitId(3), QubitId(8)]).unwrap();
        circuit.append_box(&b, &[QubitId(8), QubitId(3)]).unwrap();
        let inst = circuit.instructions().next().unwrap();
        assert_eq!(inst.qubits, vec![QubitId(8), QubitId(3)]);

        assert!(matches!(
            circuit.append_box(&b, &[QubitId(3)]),
            Err(IrError::WidthMismatch { .. })
        ));
    }

    #[test]
    fn test_append_is_all_or_nothing() {
        let mut b = CircuitBox::new(2);
        b.push(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        b.push(Instruction::single_qubit_gate(StandardGate::S, QubitId(1)))
            .unwrap();

        let mut circuit = Circuit::with_size("t", 1);
        assert!(matches!(
            circuit.append_box(&b, &[QubitId(0), QubitId(7)]),
            Err(IrError::QubitNotFound { .. })
        ));
        assert_eq!(circuit.num_ops(), 0);

        let wide = Circuit::from_box("wide", &b).unwrap();
        assert!(circuit.append(&wide).is_err());
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_to_box_and_back() {
        let mut circuit = Circuit::with_qubits("t", [QubitId(4), QubitId(1)]).unwrap();
        circuit.s(QubitId(1)).unwrap().cx(QubitId(4), QubitId(1)).unwrap();

        let b = circuit.to_box();
        assert_eq!(b.num_qubits, 2);
        assert_eq!(b.instructions[0].qubits, vec![QubitId(1)]);
        assert_eq!(b.instructions[1].qubits, vec![QubitId(0), QubitId(1)]);

        let back = Circuit::from_box("b", &b).unwrap();
        assert_eq!(back.num_ops(), 2);
        assert_eq!(back.qubits(), &[QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_inverse_reverses_order() {
        let mut circuit = Circuit::with_size("t", 2);
        circuit
            .s(QubitId(0))
            .unwrap()
            .rz(0.25, QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        let inv = circuit.inverse().unwrap();
        let names: Vec<_> = inv.instructions().map(Instruction::name).collect();
        assert_eq!(names, vec!["cx", "rz", "sdg"]);
        let rz = inv.instructions().nth(1).unwrap().as_gate().unwrap();
        assert_eq!(rz.angle().and_then(Angle::as_f64), Some(-0.25));
    }

    #[test]
    fn test_composite_append() {
        let mut circuit = Circuit::with_size("t", 3);
        let op = CompositeOp::PauliExp {
            paulis: vec![Pauli::Z, Pauli::X],
            angle: Angle::symbol("a"),
            cx_config: CxConfig::Tree,
        };
        circuit
            .add_composite(op.clone(), [QubitId(2), QubitId(0)])
            .unwrap();
        assert_eq!(circuit.count_ops("pauli_exp"), 1);

        assert!(
            circuit
                .add_composite(op, [QubitId(2), QubitId(2)])
                .is_err()
        );
    }
}
