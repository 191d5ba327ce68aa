// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph evaluation: the execution step and the settle loop.
//!
//! A step visits every node once, in graph insertion order, with no
//! topological sorting. Each node recomputes its outputs from whatever its
//! input ports currently hold, so a value crosses at most a few hops per
//! step and callers must step repeatedly until the circuit stabilizes.
//! [`settle`] runs the fixed bound of [`SETTLE_STEPS`] steps, which covers
//! the chain depths of hand-built circuits. Cyclic circuits are never
//! rejected; they simply keep whatever values exist when the loop ends.

use crate::gate;
use crate::graph::Graph;
use crate::node::{Node, NodeId, NodeKind};
use crate::port::{PortId, Signal};

/// Number of execution steps treated as "stabilized"
pub const SETTLE_STEPS: usize = 5;

/// Compute a node's output signals from its current input ports.
///
/// Pure per-variant logic: Inputs publish their toggle value, Outputs
/// produce nothing, gates feed their coerced input signals through
/// [`gate::evaluate`]. Unset inputs read as `false`.
fn execute_node(node: &Node) -> Vec<(PortId, Signal)> {
    match node.kind {
        NodeKind::Input => node
            .outputs
            .iter()
            .map(|p| (p.id, Signal::from(node.value)))
            .collect(),
        NodeKind::Output => Vec::new(),
        NodeKind::Gate(kind) => {
            let a = node.input(0).is_some_and(|p| p.value.is_high());
            let b = node.input(1).is_some_and(|p| p.value.is_high());
            let out = Signal::from(gate::evaluate(kind, a, b));
            node.outputs.iter().map(|p| (p.id, out)).collect()
        }
    }
}

/// Run one execution step over the whole graph.
///
/// Every node executes once and its fresh outputs are pushed along outgoing
/// connections into downstream input ports; derived visual state is
/// recomputed as part of the visit. One step settles every value derivable
/// from the ports as they stood when the step began, but not deeper chains.
pub fn run_step(graph: &mut Graph) {
    let ids: Vec<NodeId> = graph.node_ids().collect();
    for id in ids {
        let outputs = match graph.node(id) {
            Some(node) => execute_node(node),
            None => continue,
        };

        if let Some(node) = graph.node_mut(id) {
            for (port_id, value) in &outputs {
                if let Some(port) = node.outputs.iter_mut().find(|p| p.id == *port_id) {
                    port.value = *value;
                }
            }
            node.refresh_visual();
        }

        let pushes: Vec<(NodeId, PortId, Signal)> = outputs
            .iter()
            .flat_map(|(port_id, value)| {
                graph
                    .connections_from(*port_id)
                    .map(|c| (c.to_node, c.to_port, *value))
            })
            .collect();
        for (node_id, port_id, value) in pushes {
            graph.set_input(node_id, port_id, value);
        }
    }
}

/// Run [`SETTLE_STEPS`] execution steps
pub fn settle(graph: &mut Graph) {
    for _ in 0..SETTLE_STEPS {
        run_step(graph);
    }
}
