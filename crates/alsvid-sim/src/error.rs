//! Error types for the simulator crate.

use thiserror::Error;

/// Errors that can occur during simulation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit exceeds the simulator's qubit limit.
    #[error("Circuit too large: {0}")]
    CircuitTooLarge(String),

    /// A gate or initialization appears after a measurement.
    ///
    /// The engine evolves the statevector once and samples afterwards, so
    /// measurements must be terminal.
    #[error("Mid-circuit measurement is not supported: instruction '{instruction}' follows a measure")]
    MidCircuitMeasurement {
        /// Name of the offending instruction.
        instruction: &'static str,
    },
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
