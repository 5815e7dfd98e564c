//! Named quantum and classical registers.
//!
//! Registers are first-class here because downstream consumers depend on
//! declaration order: measurement outcomes are keyed per classical register,
//! most significant register first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::qubit::{ClbitId, QubitId};

/// An ordered, named group of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumRegister {
    name: String,
    bits: Vec<QubitId>,
}

impl QuantumRegister {
    pub(crate) fn new(name: impl Into<String>, bits: Vec<QubitId>) -> Self {
        Self {
            name: name.into(),
            bits,
        }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits in the register.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the register holds no qubits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate over the qubit ids in register order.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.bits.iter().copied()
    }

    /// The qubit ids as a slice, register order.
    pub fn bits(&self) -> &[QubitId] {
        &self.bits
    }
}

impl Index<usize> for QuantumRegister {
    type Output = QubitId;

    fn index(&self, index: usize) -> &QubitId {
        &self.bits[index]
    }
}

impl fmt::Display for QuantumRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.bits.len())
    }
}

/// An ordered, named group of classical bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    name: String,
    bits: Vec<ClbitId>,
}

impl ClassicalRegister {
    pub(crate) fn new(name: impl Into<String>, bits: Vec<ClbitId>) -> Self {
        Self {
            name: name.into(),
            bits,
        }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of classical bits in the register.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the register holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate over the classical bit ids in register order.
    pub fn iter(&self) -> impl Iterator<Item = ClbitId> + '_ {
        self.bits.iter().copied()
    }

    /// The classical bit ids as a slice, register order.
    pub fn bits(&self) -> &[ClbitId] {
        &self.bits
    }
}

impl Index<usize> for ClassicalRegister {
    type Output = ClbitId;

    fn index(&self, index: usize) -> &ClbitId {
        &self.bits[index]
    }
}

impl fmt::Display for ClassicalRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.bits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_indexing() {
        let qreg = QuantumRegister::new("pixels", vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(qreg.len(), 3);
        assert_eq!(qreg[1], QubitId(1));
        assert_eq!(qreg.name(), "pixels");
        assert_eq!(format!("{qreg}"), "pixels[3]");
    }

    #[test]
    fn test_register_iteration_order() {
        let creg = ClassicalRegister::new("bits", vec![ClbitId(4), ClbitId(5)]);
        let ids: Vec<_> = creg.iter().collect();
        assert_eq!(ids, vec![ClbitId(4), ClbitId(5)]);
    }
}
