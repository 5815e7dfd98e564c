//! High-level circuit builder API.
//!
//! Instructions are held as a strictly sequential list: append order is the
//! execution order, and consumers (gate counting, simulation) see exactly the
//! order the builder produced. Encoders rely on this — their conformance
//! properties are stated in terms of emission order.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};
use crate::register::{ClassicalRegister, QuantumRegister};

/// A quantum circuit.
///
/// Provides a fluent API for register allocation and gate construction.
/// Registers remember their declaration order; measurement-result formatting
/// downstream depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Quantum registers in declaration order.
    qregs: Vec<QuantumRegister>,
    /// Classical registers in declaration order.
    cregs: Vec<ClassicalRegister>,
    /// The instruction sequence, in append order.
    instructions: Vec<Instruction>,
    /// Counter for generating qubit IDs.
    next_qubit_id: u32,
    /// Counter for generating classical bit IDs.
    next_clbit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qregs: vec![],
            cregs: vec![],
            instructions: vec![],
            next_qubit_id: 0,
            next_clbit_id: 0,
        }
    }

    /// Add a quantum register with multiple qubits.
    ///
    /// Qubit ids are assigned contiguously in declaration order: the first
    /// declared register occupies the lowest ids.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> QuantumRegister {
        let mut ids = Vec::with_capacity(size as usize);
        for _ in 0..size {
            ids.push(QubitId(self.next_qubit_id));
            self.next_qubit_id += 1;
        }
        let reg = QuantumRegister::new(name, ids);
        self.qregs.push(reg.clone());
        reg
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> ClassicalRegister {
        let mut ids = Vec::with_capacity(size as usize);
        for _ in 0..size {
            ids.push(ClbitId(self.next_clbit_id));
            self.next_clbit_id += 1;
        }
        let reg = ClassicalRegister::new(name, ids);
        self.cregs.push(reg.clone());
        reg
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit)?;
        self.instructions
            .push(Instruction::single_qubit_gate(StandardGate::H, qubit));
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit)?;
        self.instructions
            .push(Instruction::single_qubit_gate(StandardGate::X, qubit));
        Ok(self)
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.check_operands(StandardGate::CX.name(), &[control, target])?;
        self.instructions
            .push(Instruction::gate(StandardGate::CX, [control, target]));
        Ok(self)
    }

    /// Apply a multi-controlled X gate.
    ///
    /// The gate flips `target` exactly when every control qubit is |1⟩.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        if controls.is_empty() {
            return Err(IrError::MissingControls("mcx"));
        }
        let mut operands = controls.to_vec();
        operands.push(target);
        self.check_operands("mcx", &operands)?;
        self.instructions
            .push(Instruction::gate(StandardGate::Mcx, operands));
        Ok(self)
    }

    /// Apply a multi-controlled Ry rotation.
    ///
    /// Rotates `target` by `theta` around Y exactly when every control qubit
    /// is |1⟩.
    pub fn mcry(&mut self, theta: f64, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        if controls.is_empty() {
            return Err(IrError::MissingControls("mcry"));
        }
        let mut operands = controls.to_vec();
        operands.push(target);
        self.check_operands("mcry", &operands)?;
        self.instructions
            .push(Instruction::gate(StandardGate::MCRy(theta), operands));
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit)?;
        self.check_clbit(clbit)?;
        self.instructions.push(Instruction::measure(qubit, clbit));
        Ok(self)
    }

    /// Measure a quantum register into a classical register, bit by bit.
    ///
    /// Emits one measure instruction per bit pair, register order.
    pub fn measure_register(
        &mut self,
        qreg: &QuantumRegister,
        creg: &ClassicalRegister,
    ) -> IrResult<&mut Self> {
        if qreg.len() != creg.len() {
            return Err(IrError::RegisterWidthMismatch {
                qubits: qreg.len(),
                clbits: creg.len(),
            });
        }
        for (qubit, clbit) in qreg.iter().zip(creg.iter()) {
            self.measure(qubit, clbit)?;
        }
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        for &qubit in &qubits {
            self.check_qubit(qubit)?;
        }
        self.instructions.push(Instruction::barrier(qubits));
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = (0..self.next_qubit_id).map(QubitId).collect();
        self.instructions.push(Instruction::barrier(qubits));
        Ok(self)
    }

    /// Initialize the given qubits to an exact amplitude vector.
    ///
    /// `amplitudes.len()` must be `2^k` for `k` operand qubits. The first
    /// operand is the least significant bit of the amplitude index.
    pub fn initialize(
        &mut self,
        amplitudes: Vec<Complex64>,
        qubits: &[QubitId],
    ) -> IrResult<&mut Self> {
        self.check_operands("initialize", qubits)?;
        let expected = 1usize
            .checked_shl(qubits.len() as u32)
            .ok_or_else(|| IrError::InvalidInitialize("too many qubits".into()))?;
        if amplitudes.len() != expected {
            return Err(IrError::InvalidInitialize(format!(
                "amplitude vector of length {} does not match {} qubits (expected {})",
                amplitudes.len(),
                qubits.len(),
                expected,
            )));
        }
        self.instructions
            .push(Instruction::initialize(amplitudes, qubits.iter().copied()));
        Ok(self)
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
        self.next_qubit_id as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.next_clbit_id as usize
    }

    /// The quantum registers in declaration order.
    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    /// The classical registers in declaration order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// The instruction sequence in append order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Count instructions by name.
    ///
    /// Keys are the instruction mnemonics ("h", "x", "mcx", "measure",
    /// "barrier", ...). Conformance tests assert exact counts against these.
    pub fn count_ops(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    // =========================================================================
    // Validation helpers
    // =========================================================================

    fn check_qubit(&self, qubit: QubitId) -> IrResult<()> {
        if qubit.0 >= self.next_qubit_id {
            return Err(IrError::QubitNotFound { qubit });
        }
        Ok(())
    }

    fn check_clbit(&self, clbit: ClbitId) -> IrResult<()> {
        if clbit.0 >= self.next_clbit_id {
            return Err(IrError::ClbitNotFound { clbit });
        }
        Ok(())
    }

    fn check_operands(&self, gate_name: &str, qubits: &[QubitId]) -> IrResult<()> {
        for (i, &qubit) in qubits.iter().enumerate() {
            self.check_qubit(qubit)?;
            if qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 4);
        let creg = circuit.add_creg("c", 4);

        assert_eq!(qreg.len(), 4);
        assert_eq!(creg.len(), 4);
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_clbits(), 4);
        assert_eq!(circuit.qregs().len(), 1);
    }

    #[test]
    fn test_register_id_assignment_is_declaration_order() {
        let mut circuit = Circuit::new("test");
        let intensity = circuit.add_qreg("intensity", 8);
        let index = circuit.add_qreg("pixels_indexes", 2);

        assert_eq!(intensity[0], QubitId(0));
        assert_eq!(intensity[7], QubitId(7));
        assert_eq!(index[0], QubitId(8));
        assert_eq!(index[1], QubitId(9));
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 2);
        let creg = circuit.add_creg("c", 2);

        circuit
            .h(qreg[0])
            .unwrap()
            .cx(qreg[0], qreg[1])
            .unwrap()
            .measure(qreg[0], creg[0])
            .unwrap()
            .measure(qreg[1], creg[1])
            .unwrap();

        assert_eq!(circuit.instructions().len(), 4);
    }

    #[test]
    fn test_mcx_rejects_duplicate_operand() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 3);

        let err = circuit.mcx(&[qreg[0], qreg[1]], qreg[0]).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_mcx_requires_controls() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 1);

        let err = circuit.mcx(&[], qreg[0]).unwrap_err();
        assert!(matches!(err, IrError::MissingControls("mcx")));
    }

    #[test]
    fn test_unknown_qubit_rejected() {
        let mut circuit = Circuit::new("test");
        circuit.add_qreg("q", 1);

        let err = circuit.h(QubitId(5)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { .. }));
    }

    #[test]
    fn test_count_ops() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 3);
        let creg = circuit.add_creg("c", 3);

        circuit.h(qreg[0]).unwrap();
        circuit.h(qreg[1]).unwrap();
        circuit.mcry(PI / 2.0, &[qreg[0], qreg[1]], qreg[2]).unwrap();
        circuit.barrier_all().unwrap();
        circuit.measure_register(&qreg, &creg).unwrap();

        let counts = circuit.count_ops();
        assert_eq!(counts.get("h"), Some(&2));
        assert_eq!(counts.get("mcry"), Some(&1));
        assert_eq!(counts.get("barrier"), Some(&1));
        assert_eq!(counts.get("measure"), Some(&3));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut circuit = Circuit::new("roundtrip");
        let qreg = circuit.add_qreg("q", 2);
        circuit.h(qreg[0]).unwrap();
        circuit.mcry(PI / 4.0, &[qreg[0]], qreg[1]).unwrap();

        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(circuit, back);
    }

    #[test]
    fn test_measure_register_width_mismatch() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 3);
        let creg = circuit.add_creg("c", 2);

        let err = circuit.measure_register(&qreg, &creg).unwrap_err();
        assert!(matches!(err, IrError::RegisterWidthMismatch { .. }));
    }

    #[test]
    fn test_initialize_length_check() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 2);

        let amps = vec![Complex64::new(1.0, 0.0); 3];
        let err = circuit.initialize(amps, qreg.bits()).unwrap_err();
        assert!(matches!(err, IrError::InvalidInitialize(_)));

        let amps = vec![
            Complex64::new(0.5, 0.0),
            Complex64::new(0.5, 0.0),
            Complex64::new(0.5, 0.0),
            Complex64::new(0.5, 0.0),
        ];
        circuit.initialize(amps, qreg.bits()).unwrap();
        assert_eq!(circuit.count_ops().get("initialize"), Some(&1));
    }
}
