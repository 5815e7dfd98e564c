//! Statevector simulation engine.

use num_complex::Complex64;

use alsvid_ir::{Instruction, InstructionKind, QubitId, StandardGate};

/// A statevector representing a quantum state.
///
/// Basis indices follow qubit ids: bit `i` of a basis index is the state of
/// `QubitId(i)`.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitude vector, ordered by computational basis index.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the statevector and return the amplitude vector.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements and barriers do not modify the state.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.0 as usize).collect();
                self.apply_gate(gate, &qubits);
            }
            InstructionKind::Initialize(amplitudes) => {
                self.apply_initialize(amplitudes, &instruction.qubits);
            }
            InstructionKind::Measure | InstructionKind::Barrier => {}
        }
    }

    /// Apply a standard gate to specific qubits.
    fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::CX => self.apply_controlled_x(1 << qubits[0], qubits[1]),
            StandardGate::Mcx => {
                let (target, controls) = split_target(qubits);
                self.apply_controlled_x(control_mask(controls), target);
            }
            StandardGate::MCRy(theta) => {
                let (target, controls) = split_target(qubits);
                self.apply_controlled_ry(control_mask(controls), target, *theta);
            }
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        self.apply_controlled_x(0, qubit);
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    // =========================================================================
    // Controlled-gate implementations
    //
    // Uncontrolled gates pass an empty control mask; the same loop covers
    // X/CX/MCX uniformly, and the Ry loop serves MCRy at any control count.
    // =========================================================================

    fn apply_controlled_x(&mut self, ctrl_mask: usize, target: usize) {
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_controlled_ry(&mut self, ctrl_mask: usize, target: usize, theta: f64) {
        let tgt_mask = 1 << target;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    // =========================================================================
    // Amplitude initialization
    // =========================================================================

    /// Distribute an amplitude vector over the target qubits.
    ///
    /// Bit `m` of an amplitude index maps to `targets[m]`. All non-target
    /// qubits are assumed |0⟩ (the instruction replaces the global state).
    fn apply_initialize(&mut self, amplitudes: &[Complex64], targets: &[QubitId]) {
        let mut new_vec = vec![Complex64::new(0.0, 0.0); self.amplitudes.len()];
        for (index, &amp) in amplitudes.iter().enumerate() {
            let mut basis = 0usize;
            for (m, target) in targets.iter().enumerate() {
                if index >> m & 1 == 1 {
                    basis |= 1 << target.0 as usize;
                }
            }
            new_vec[basis] = amp;
        }
        self.amplitudes = new_vec;
    }

    // =========================================================================
    // Sampling
    // =========================================================================

    /// Per-basis-state measurement probabilities.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|amp| amp.norm_sqr()).collect()
    }

    /// Sample a measurement outcome.
    pub fn sample<R: rand::Rng>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Fallback (shouldn't happen with normalized states)
        self.amplitudes.len() - 1
    }
}

/// Split a multi-controlled operand list into (target, controls).
fn split_target(qubits: &[usize]) -> (usize, &[usize]) {
    let (target, controls) = qubits.split_last().expect("operand list is non-empty");
    (*target, controls)
}

/// Combine control qubit positions into a single bitmask.
fn control_mask(controls: &[usize]) -> usize {
    controls.iter().fold(0usize, |mask, &q| mask | (1 << q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::Instruction;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_h(0);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_controlled_x(1 << 0, 1);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_mcx_truth_table() {
        // MCX fires only when every control is |1⟩.
        let mut sv = Statevector::new(3);
        sv.apply_x(0);
        sv.apply(&Instruction::gate(
            StandardGate::Mcx,
            [QubitId(0), QubitId(1), QubitId(2)],
        ));
        // Control q1 is |0⟩: target untouched, state stays |001⟩.
        assert!(approx_eq(sv.amplitudes[0b001], Complex64::new(1.0, 0.0)));

        sv.apply_x(1);
        sv.apply(&Instruction::gate(
            StandardGate::Mcx,
            [QubitId(0), QubitId(1), QubitId(2)],
        ));
        // Both controls |1⟩: target flips, state is |111⟩.
        assert!(approx_eq(sv.amplitudes[0b111], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_mcry_full_rotation() {
        // MCRy(π) maps a target |0⟩ to |1⟩ when the controls are satisfied.
        let mut sv = Statevector::new(2);
        sv.apply_x(0);
        sv.apply(&Instruction::gate(
            StandardGate::MCRy(PI),
            [QubitId(0), QubitId(1)],
        ));
        assert!(approx_eq(sv.amplitudes[0b11], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_ry_half_rotation() {
        let mut sv = Statevector::new(1);
        sv.apply_controlled_ry(0, 0, PI / 2.0);

        let expected = (PI / 4.0).cos();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(expected, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(expected, 0.0)));
    }

    #[test]
    fn test_initialize() {
        let mut sv = Statevector::new(2);
        let amps = vec![
            Complex64::new(0.5, 0.0),
            Complex64::new(0.5, 0.0),
            Complex64::new(0.5, 0.0),
            Complex64::new(0.5, 0.0),
        ];
        sv.apply(&Instruction::initialize(amps, [QubitId(0), QubitId(1)]));

        for i in 0..4 {
            assert!(approx_eq(sv.amplitudes[i], Complex64::new(0.5, 0.0)));
        }
    }

    #[test]
    fn test_bell_probabilities() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_controlled_x(1 << 0, 1);

        let probs = sv.probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-10);
        assert!(probs[1].abs() < 1e-10);
        assert!(probs[2].abs() < 1e-10);
        assert!((probs[3] - 0.5).abs() < 1e-10);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_sample_deterministic() {
        // |1⟩ state should always sample to 1
        let mut sv = Statevector::new(1);
        sv.apply_x(0);

        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            assert_eq!(sv.sample(&mut rng), 1);
        }
    }
}
