//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// `Mcx` and `MCRy` take an arbitrary number of control qubits: the
/// instruction operand list carries the controls first and the target last,
/// so the gate itself has no fixed arity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Hadamard gate.
    H,
    /// Controlled-X (CNOT) gate.
    CX,
    /// Multi-controlled X; controls are all operands but the last.
    Mcx,
    /// Multi-controlled rotation around Y; controls are all operands but the last.
    MCRy(f64),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::CX => "cx",
            StandardGate::Mcx => "mcx",
            StandardGate::MCRy(_) => "mcry",
        }
    }

    /// Get the number of qubits this gate operates on, if fixed.
    ///
    /// Returns `None` for the variadic multi-controlled gates.
    #[inline]
    pub fn num_qubits(&self) -> Option<u32> {
        match self {
            StandardGate::X | StandardGate::H => Some(1),
            StandardGate::CX => Some(2),
            StandardGate::Mcx | StandardGate::MCRy(_) => None,
        }
    }

    /// Check if this gate carries a rotation angle.
    pub fn is_parameterized(&self) -> bool {
        matches!(self, StandardGate::MCRy(_))
    }

    /// The rotation angle, if this gate carries one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::MCRy(theta) => Some(*theta),
            _ => None,
        }
    }
}
