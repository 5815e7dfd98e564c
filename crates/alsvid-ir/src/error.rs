//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit:?} not found in circuit")]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit:?} not found in circuit")]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit:?} in operation (gate: {gate_name})")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Gate name for context.
        gate_name: String,
    },

    /// Multi-controlled gate needs at least one control qubit.
    #[error("Gate '{0}' requires at least one control qubit")]
    MissingControls(&'static str),

    /// Register measurement with mismatched widths.
    #[error("Cannot measure register of {qubits} qubits into register of {clbits} bits")]
    RegisterWidthMismatch {
        /// Width of the quantum register.
        qubits: usize,
        /// Width of the classical register.
        clbits: usize,
    },

    /// Invalid amplitude initialization.
    #[error("Invalid initialization: {0}")]
    InvalidInitialize(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
