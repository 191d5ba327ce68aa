// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the circuit graph.

use crate::gate::GateKind;
use crate::port::{Port, PortId, Signal};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// The closed set of node variants in a circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// User-toggleable boolean source
    Input,
    /// Boolean sink that displays its incoming value
    Output,
    /// Logic gate of the given kind
    Gate(GateKind),
}

impl NodeKind {
    /// Display name of the node kind
    pub fn name(self) -> &'static str {
        match self {
            Self::Input => "INPUT",
            Self::Output => "Output",
            Self::Gate(kind) => kind.name(),
        }
    }
}

/// Color shown for a driven-high port or an Input toggled on
pub const COLOR_TRUE: [u8; 3] = [76, 175, 80];
/// Color shown for a driven-low port or an Input toggled off
pub const COLOR_FALSE: [u8; 3] = [244, 67, 54];
/// Color shown when no value has been driven
pub const COLOR_NEUTRAL: [u8; 3] = [158, 158, 158];

/// Derived presentation state for a node, recomputed after each execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualState {
    /// Node body color
    pub color: [u8; 3],
    /// Title label
    pub label: String,
}

impl VisualState {
    fn neutral(label: impl Into<String>) -> Self {
        Self {
            color: COLOR_NEUTRAL,
            label: label.into(),
        }
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Node variant
    pub kind: NodeKind,
    /// Position on the canvas; used for editor layout and truth-table
    /// column ordering, never for evaluation
    pub position: [f32; 2],
    /// Input ports, in declaration order
    pub inputs: Vec<Port>,
    /// Output ports, in declaration order
    pub outputs: Vec<Port>,
    /// Toggle state; only meaningful for `NodeKind::Input`
    pub value: bool,
    /// Whether the node is collapsed in the editor
    pub collapsed: bool,
    /// Whether the node is pinned in place in the editor
    pub pinned: bool,
    /// Derived presentation state
    pub visual: VisualState,
}

impl Node {
    /// Create a new node of the given kind with its standard ports.
    ///
    /// Inputs get a single output port, Outputs a single input port. NOT
    /// gates get one unnamed input; every other gate gets inputs "A" and "B".
    pub fn new(kind: NodeKind) -> Self {
        let (inputs, outputs) = match kind {
            NodeKind::Input => (vec![], vec![Port::output("")]),
            NodeKind::Output => (vec![Port::input("")], vec![]),
            NodeKind::Gate(GateKind::Not) => (vec![Port::input("")], vec![Port::output("")]),
            NodeKind::Gate(_) => (vec![Port::input("A"), Port::input("B")], vec![Port::output("")]),
        };

        let mut node = Self {
            id: NodeId::new(),
            kind,
            position: [0.0, 0.0],
            inputs,
            outputs,
            value: false,
            collapsed: false,
            pinned: false,
            visual: VisualState::neutral(kind.name()),
        };
        node.refresh_visual();
        node
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Get an input port by index
    pub fn input(&self, index: usize) -> Option<&Port> {
        self.inputs.get(index)
    }

    /// Get an output port by index
    pub fn output(&self, index: usize) -> Option<&Port> {
        self.outputs.get(index)
    }

    /// Get a port by ID
    pub fn port(&self, port_id: PortId) -> Option<&Port> {
        self.ports().find(|p| p.id == port_id)
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Index of an input port, for the snapshot layer
    pub fn input_index(&self, port_id: PortId) -> Option<usize> {
        self.inputs.iter().position(|p| p.id == port_id)
    }

    /// Index of an output port, for the snapshot layer
    pub fn output_index(&self, port_id: PortId) -> Option<usize> {
        self.outputs.iter().position(|p| p.id == port_id)
    }

    /// Recompute color and label from the node's current ports and value.
    ///
    /// Inputs color by their toggle, Outputs by their incoming signal (grey
    /// while nothing has been driven), gates keep a static appearance.
    pub fn refresh_visual(&mut self) {
        self.visual = match self.kind {
            NodeKind::Input => VisualState {
                color: if self.value { COLOR_TRUE } else { COLOR_FALSE },
                label: NodeKind::Input.name().to_string(),
            },
            NodeKind::Output => {
                let incoming = self.inputs.first().map_or(Signal::Unset, |p| p.value);
                match incoming.as_bool() {
                    None => VisualState::neutral("Output"),
                    Some(v) => VisualState {
                        color: if v { COLOR_TRUE } else { COLOR_FALSE },
                        label: format!("Output: {}", u8::from(v)),
                    },
                }
            }
            NodeKind::Gate(kind) => VisualState::neutral(kind.name()),
        };
    }
}
