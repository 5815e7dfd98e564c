//! Statevector simulator for alsvid circuits.
//!
//! This crate provides a local statevector simulator for testing and
//! development. It executes circuits built with `alsvid-ir` as a single
//! blocking call and returns measurement counts keyed per classical register.
//!
//! # Example
//!
//! ```
//! use alsvid_ir::Circuit;
//! use alsvid_sim::Simulator;
//!
//! let mut circuit = Circuit::new("bell");
//! let qreg = circuit.add_qreg("q", 2);
//! let creg = circuit.add_creg("c", 2);
//! circuit.h(qreg[0]).unwrap();
//! circuit.cx(qreg[0], qreg[1]).unwrap();
//! circuit.measure_register(&qreg, &creg).unwrap();
//!
//! let simulator = Simulator::new();
//! let result = simulator.run(&circuit, 1024).unwrap();
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1024);
//! ```

pub mod error;
pub mod result;
pub mod simulator;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use result::{Counts, ExecutionResult};
pub use simulator::Simulator;
pub use statevector::Statevector;
