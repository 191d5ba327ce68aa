// SPDX-License-Identifier: MIT OR Apache-2.0
//! Gate kinds and their boolean evaluation.

use serde::{Deserialize, Serialize};

/// The kind of a logic gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// `a AND b`
    And,
    /// `a OR b`
    Or,
    /// `NOT a` (single input)
    Not,
    /// `a XOR b`
    Xor,
    /// `NOT (a AND b)`
    Nand,
    /// `NOT (a OR b)`
    Nor,
}

/// All gate kinds, in the order they appear in the editor palette
pub const ALL_GATE_KINDS: [GateKind; 6] = [
    GateKind::And,
    GateKind::Or,
    GateKind::Not,
    GateKind::Xor,
    GateKind::Nand,
    GateKind::Nor,
];

impl GateKind {
    /// Display name of the gate
    pub fn name(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Xor => "XOR",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
        }
    }

    /// Number of input ports this gate takes
    pub fn input_count(self) -> usize {
        match self {
            Self::Not => 1,
            _ => 2,
        }
    }
}

impl std::fmt::Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluate a gate over two boolean inputs.
///
/// Callers that have already coerced unset wires to `false` can feed the
/// result straight in; `Not` uses only `a` and ignores `b` entirely.
pub fn evaluate(kind: GateKind, a: bool, b: bool) -> bool {
    match kind {
        GateKind::And => a && b,
        GateKind::Or => a || b,
        GateKind::Not => !a,
        GateKind::Xor => a != b,
        GateKind::Nand => !(a && b),
        GateKind::Nor => !(a || b),
    }
}
