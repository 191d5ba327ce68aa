// SPDX-License-Identifier: MIT OR Apache-2.0
//! Exhaustive truth-table generation for the current circuit.

use crate::evaluation;
use crate::graph::Graph;
use crate::node::{NodeId, NodeKind};
use crate::port::Signal;
use serde::{Deserialize, Serialize};

/// One row of a truth table: a full input assignment and the settled outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthTableRow {
    /// Input values, one per input column
    pub inputs: Vec<bool>,
    /// Settled output values, one per output column
    pub outputs: Vec<bool>,
}

/// A row-major truth table over the circuit's Input and Output nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruthTable {
    /// Input nodes, left to right (ascending canvas x)
    pub input_columns: Vec<NodeId>,
    /// Output nodes, left to right (ascending canvas x)
    pub output_columns: Vec<NodeId>,
    /// Rows in standard truth-table order (first input varies slowest)
    pub rows: Vec<TruthTableRow>,
}

/// Error when a truth table cannot be produced
#[derive(Debug, thiserror::Error)]
pub enum TruthTableError {
    /// The circuit needs at least one Input and one Output node
    #[error("Please add at least one input and one output")]
    InsufficientNodes,
}

/// Generate the truth table for the circuit.
///
/// Every one of the `2^n` input combinations is driven onto the Input nodes
/// in most-significant-bit-first order and the graph is settled before the
/// Output nodes are read (unset outputs read as `false`). The inputs' prior
/// values are restored and the graph resettled before returning, so the
/// circuit ends up exactly as it was.
pub fn generate(graph: &mut Graph) -> Result<TruthTable, TruthTableError> {
    let input_columns = columns_of_kind(graph, NodeKind::Input);
    let output_columns = columns_of_kind(graph, NodeKind::Output);

    if input_columns.is_empty() || output_columns.is_empty() {
        return Err(TruthTableError::InsufficientNodes);
    }

    let saved: Vec<(NodeId, bool)> = input_columns
        .iter()
        .filter_map(|id| graph.node(*id).map(|n| (*id, n.value)))
        .collect();

    let n = input_columns.len();
    let mut rows = Vec::with_capacity(1 << n);
    for i in 0..(1usize << n) {
        for (j, id) in input_columns.iter().enumerate() {
            let bit = (i >> (n - 1 - j)) & 1 == 1;
            drive_input(graph, *id, bit);
        }
        evaluation::settle(graph);

        let inputs = (0..n).map(|j| (i >> (n - 1 - j)) & 1 == 1).collect();
        let outputs = output_columns
            .iter()
            .map(|id| {
                graph
                    .node(*id)
                    .and_then(|node| node.inputs.first())
                    .map_or(Signal::Unset, |p| p.value)
                    .is_high()
            })
            .collect();
        rows.push(TruthTableRow { inputs, outputs });
    }

    for (id, value) in saved {
        drive_input(graph, id, value);
    }
    evaluation::settle(graph);

    Ok(TruthTable {
        input_columns,
        output_columns,
        rows,
    })
}

/// Set an Input node's toggle and push the value straight onto its output
/// port, mirroring what the toggle widget does
fn drive_input(graph: &mut Graph, id: NodeId, value: bool) {
    if let Some(node) = graph.node_mut(id) {
        node.value = value;
        if let Some(port) = node.outputs.first_mut() {
            port.value = Signal::from(value);
        }
        node.refresh_visual();
    }
}

fn columns_of_kind(graph: &Graph, kind: NodeKind) -> Vec<NodeId> {
    let mut ids: Vec<NodeId> = graph
        .nodes()
        .filter(|n| n.kind == kind)
        .map(|n| n.id)
        .collect();
    sort_by_canvas_x(graph, &mut ids);
    ids
}

/// Ascending canvas x; the sort is stable so equal positions keep insertion
/// order
fn sort_by_canvas_x(graph: &Graph, ids: &mut [NodeId]) {
    ids.sort_by(|a, b| {
        let xa = graph.node(*a).map_or(0.0, |n| n.position[0]);
        let xb = graph.node(*b).map_or(0.0, |n| n.position[0]);
        xa.total_cmp(&xb)
    });
}
