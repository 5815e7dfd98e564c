//! Alsvid Circuit Intermediate Representation
//!
//! This crate provides the circuit-building collaborator used by the Alsvid
//! image encoders: named register allocation, standard gates (including
//! variadic multi-controlled X and Ry), barriers, measurement, and exact
//! amplitude initialization, all appended to a strictly sequential
//! instruction list.
//!
//! Unlike a compiler IR, there is no DAG here: gate order is semantic and the
//! encoders' conformance properties (gate counts, barrier placement) are
//! stated in emission order, so the representation is a plain list.
//!
//! # Example: uniform superposition with measurement
//!
//! ```rust
//! use alsvid_ir::Circuit;
//!
//! let mut circuit = Circuit::new("superposition");
//! let qreg = circuit.add_qreg("pixels_indexes", 2);
//! let creg = circuit.add_creg("bits_pixels_indexes", 2);
//!
//! for qubit in qreg.iter() {
//!     circuit.h(qubit).unwrap();
//! }
//! circuit.barrier_all().unwrap();
//! circuit.measure_register(&qreg, &creg).unwrap();
//!
//! assert_eq!(circuit.count_ops().get("h"), Some(&2));
//! assert_eq!(circuit.count_ops().get("measure"), Some(&2));
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod register;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
pub use register::{ClassicalRegister, QuantumRegister};
