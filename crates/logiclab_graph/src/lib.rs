// SPDX-License-Identifier: MIT OR Apache-2.0
//! Logic-circuit graph core for `LogicLab`.
//!
//! This crate provides the circuit model and evaluation engine:
//! - Typed boolean ports with a tri-state signal (unset/low/high)
//! - A closed set of node variants (Input, Output, the six gate kinds)
//! - Validated connections between ports
//! - Step-based evaluation with a fixed stabilization bound
//! - Truth-table generation over the current circuit
//! - An explicit, validated snapshot schema for serialization

pub mod connection;
pub mod evaluation;
pub mod gate;
pub mod graph;
pub mod node;
pub mod port;
pub mod snapshot;
pub mod truth_table;

pub use connection::{Connection, ConnectionId};
pub use gate::{evaluate, GateKind};
pub use graph::{ConnectionError, Graph};
pub use node::{Node, NodeId, NodeKind, VisualState};
pub use port::{Port, PortDirection, PortId, Signal};
pub use snapshot::GraphSnapshot;
pub use truth_table::{TruthTable, TruthTableError, TruthTableRow};
