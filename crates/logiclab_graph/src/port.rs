// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// A boolean value on a wire, distinguishing "never driven" from low.
///
/// Input ports start out [`Signal::Unset`] and stay that way until a
/// connected producer pushes a value to them. Everywhere a plain boolean is
/// needed, `Unset` coerces to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// No value has been propagated to this port yet
    #[default]
    Unset,
    /// Logic low (`false`)
    Low,
    /// Logic high (`true`)
    High,
}

impl Signal {
    /// Coerce to a plain boolean; `Unset` and `Low` both read as `false`
    pub fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// Whether a value has been driven onto this port
    pub fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// The driven value, if any
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Unset => None,
            Self::Low => Some(false),
            Self::High => Some(true),
        }
    }
}

impl From<bool> for Signal {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

/// A port on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Unique port ID
    pub id: PortId,
    /// Port name (may be empty; gates label their inputs "A" and "B")
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Current signal on the port
    pub value: Signal,
}

impl Port {
    /// Create a new input port
    pub fn input(name: impl Into<String>) -> Self {
        Self {
            id: PortId::new(),
            name: name.into(),
            direction: PortDirection::Input,
            value: Signal::Unset,
        }
    }

    /// Create a new output port
    pub fn output(name: impl Into<String>) -> Self {
        Self {
            id: PortId::new(),
            name: name.into(),
            direction: PortDirection::Output,
            value: Signal::Unset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_coercion() {
        assert!(!Signal::Unset.is_high());
        assert!(!Signal::Low.is_high());
        assert!(Signal::High.is_high());
        assert_eq!(Signal::Unset.as_bool(), None);
        assert_eq!(Signal::Low.as_bool(), Some(false));
        assert_eq!(Signal::High.as_bool(), Some(true));
    }

    #[test]
    fn test_ports_start_unset() {
        assert_eq!(Port::input("A").value, Signal::Unset);
        assert_eq!(Port::output("").value, Signal::Unset);
    }
}
