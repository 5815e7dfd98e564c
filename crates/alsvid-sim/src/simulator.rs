//! Synchronous circuit execution.

use num_complex::Complex64;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, instrument};

use alsvid_ir::{Circuit, ClbitId, QubitId};

use crate::error::{SimError, SimResult};
use crate::result::{Counts, ExecutionResult};
use crate::statevector::Statevector;

/// Local statevector simulator.
///
/// Executes a circuit as a single blocking call: the statevector is evolved
/// once through the instruction sequence and measurement outcomes are sampled
/// from the final state. Measurements must therefore be terminal; a gate
/// after a measure is rejected up front.
pub struct Simulator {
    /// Maximum number of qubits supported.
    max_qubits: u32,
}

impl Simulator {
    /// Create a new simulator with default settings.
    pub fn new() -> Self {
        Self { max_qubits: 24 }
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self { max_qubits }
    }

    /// Run a circuit for a number of shots and count measurement outcomes.
    ///
    /// Outcome keys list the classical registers in reverse declaration order
    /// (most significant register first), space-separated, each register
    /// rendered most significant bit first. Unmeasured classical bits read 0.
    pub fn run(&self, circuit: &Circuit, shots: u32) -> SimResult<ExecutionResult> {
        self.run_with_rng(circuit, shots, &mut rand::thread_rng())
    }

    /// Run with a caller-supplied random source.
    ///
    /// Passing a seeded RNG makes the sampled counts reproducible.
    #[instrument(skip(self, circuit, rng))]
    pub fn run_with_rng<R: Rng>(
        &self,
        circuit: &Circuit,
        shots: u32,
        rng: &mut R,
    ) -> SimResult<ExecutionResult> {
        let start = Instant::now();

        let sv = self.evolve(circuit)?;
        let measured = measured_qubits(circuit);

        debug!(
            "Sampling {} shots over {} qubits, {} measured bits",
            shots,
            circuit.num_qubits(),
            measured.len()
        );

        let mut counts = Counts::new();
        for _ in 0..shots {
            let outcome = sv.sample(rng);
            counts.insert(format_outcome(circuit, outcome, &measured), 1);
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }

    /// Evolve a circuit and return the exact final statevector.
    ///
    /// Measurements and barriers are ignored; amplitudes are ordered by
    /// computational basis index.
    #[instrument(skip(self, circuit))]
    pub fn statevector(&self, circuit: &Circuit) -> SimResult<Vec<Complex64>> {
        Ok(self.evolve(circuit)?.into_amplitudes())
    }

    fn evolve(&self, circuit: &Circuit) -> SimResult<Statevector> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(SimError::CircuitTooLarge(format!(
                "circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }

        // Measurements must be terminal for single-pass evolution.
        let mut seen_measure = false;
        for inst in circuit.instructions() {
            if inst.is_measure() {
                seen_measure = true;
            } else if seen_measure && !inst.is_barrier() {
                return Err(SimError::MidCircuitMeasurement {
                    instruction: inst.name(),
                });
            }
        }

        debug!(
            "Evolving {} instructions over {} qubits",
            circuit.instructions().len(),
            circuit.num_qubits()
        );

        let mut sv = Statevector::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            sv.apply(inst);
        }
        Ok(sv)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Map each measured classical bit to its source qubit.
fn measured_qubits(circuit: &Circuit) -> FxHashMap<ClbitId, QubitId> {
    let mut map = FxHashMap::default();
    for inst in circuit.instructions() {
        if inst.is_measure() {
            for (&qubit, &clbit) in inst.qubits.iter().zip(inst.clbits.iter()) {
                map.insert(clbit, qubit);
            }
        }
    }
    map
}

/// Format a sampled basis index as an outcome key.
fn format_outcome(
    circuit: &Circuit,
    outcome: usize,
    measured: &FxHashMap<ClbitId, QubitId>,
) -> String {
    if circuit.cregs().is_empty() {
        // No classical registers: fall back to the raw qubit bitstring.
        return format!("{:0width$b}", outcome, width = circuit.num_qubits().max(1));
    }

    let fields: Vec<String> = circuit
        .cregs()
        .iter()
        .rev()
        .map(|creg| {
            // MSB first within a register: highest register index leftmost.
            creg.bits()
                .iter()
                .rev()
                .map(|clbit| match measured.get(clbit) {
                    Some(qubit) => {
                        if outcome >> (qubit.0 as usize) & 1 == 1 {
                            '1'
                        } else {
                            '0'
                        }
                    }
                    None => '0',
                })
                .collect()
        })
        .collect();
    fields.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bell_circuit() -> Circuit {
        let mut circuit = Circuit::new("bell");
        let qreg = circuit.add_qreg("q", 2);
        let creg = circuit.add_creg("c", 2);
        circuit.h(qreg[0]).unwrap();
        circuit.cx(qreg[0], qreg[1]).unwrap();
        circuit.measure_register(&qreg, &creg).unwrap();
        circuit
    }

    #[test]
    fn test_bell_state_counts() {
        let simulator = Simulator::new();
        let result = simulator.run(&bell_circuit(), 1000).unwrap();

        assert_eq!(result.shots, 1000);
        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[test]
    fn test_ghz_state_counts() {
        let mut circuit = Circuit::new("ghz");
        let qreg = circuit.add_qreg("q", 3);
        let creg = circuit.add_creg("c", 3);
        circuit.h(qreg[0]).unwrap();
        circuit.cx(qreg[0], qreg[1]).unwrap();
        circuit.cx(qreg[1], qreg[2]).unwrap();
        circuit.measure_register(&qreg, &creg).unwrap();

        let simulator = Simulator::new();
        let result = simulator.run(&circuit, 1000).unwrap();

        let counts = &result.counts;
        assert_eq!(counts.get("000") + counts.get("111"), 1000);
        assert!(counts.get("000") > 0 && counts.get("111") > 0);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let circuit = bell_circuit();
        let simulator = Simulator::new();

        let first = simulator
            .run_with_rng(&circuit, 256, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let second = simulator
            .run_with_rng(&circuit, 256, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(first.counts, second.counts);
    }

    #[test]
    fn test_multi_register_key_format() {
        // Registers appear in reverse declaration order, space-separated.
        let mut circuit = Circuit::new("two_regs");
        let first = circuit.add_qreg("first", 1);
        let second = circuit.add_qreg("second", 2);
        let first_bits = circuit.add_creg("first_bits", 1);
        let second_bits = circuit.add_creg("second_bits", 2);

        circuit.x(first[0]).unwrap();
        circuit.x(second[1]).unwrap();
        circuit.measure_register(&first, &first_bits).unwrap();
        circuit.measure_register(&second, &second_bits).unwrap();

        let simulator = Simulator::new();
        let result = simulator.run(&circuit, 16).unwrap();
        // second = |10⟩ (MSB first), first = |1⟩.
        assert_eq!(result.counts.get("10 1"), 16);
    }

    #[test]
    fn test_unmeasured_bits_read_zero() {
        let mut circuit = Circuit::new("partial");
        let qreg = circuit.add_qreg("q", 2);
        let creg = circuit.add_creg("c", 2);
        circuit.x(qreg[1]).unwrap();
        circuit.measure(qreg[1], creg[1]).unwrap();

        let simulator = Simulator::new();
        let result = simulator.run(&circuit, 8).unwrap();
        assert_eq!(result.counts.get("10"), 8);
    }

    #[test]
    fn test_statevector_access() {
        let mut circuit = Circuit::new("plus");
        let qreg = circuit.add_qreg("q", 1);
        circuit.h(qreg[0]).unwrap();

        let simulator = Simulator::new();
        let statevec = simulator.statevector(&circuit).unwrap();

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!((statevec[0].re - sqrt2_inv).abs() < 1e-10);
        assert!((statevec[1].re - sqrt2_inv).abs() < 1e-10);
    }

    #[test]
    fn test_mid_circuit_measurement_rejected() {
        let mut circuit = Circuit::new("mid");
        let qreg = circuit.add_qreg("q", 1);
        let creg = circuit.add_creg("c", 1);
        circuit.measure(qreg[0], creg[0]).unwrap();
        circuit.x(qreg[0]).unwrap();

        let simulator = Simulator::new();
        let err = simulator.run(&circuit, 10).unwrap_err();
        assert!(matches!(err, SimError::MidCircuitMeasurement { .. }));
    }

    #[test]
    fn test_too_many_qubits() {
        let mut circuit = Circuit::new("big");
        circuit.add_qreg("q", 10);

        let simulator = Simulator::with_max_qubits(5);
        let err = simulator.run(&circuit, 10).unwrap_err();
        assert!(matches!(err, SimError::CircuitTooLarge(_)));
    }
}
