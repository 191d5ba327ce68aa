// SPDX-License-Identifier: MIT OR Apache-2.0
//! Explicit snapshot schema for serializing a whole graph.
//!
//! Connections are stored as (node id, port index) pairs rather than port
//! ids, so a snapshot stays meaningful even though ports get fresh ids when
//! a node is rebuilt. Restoring validates every reference and drops wires
//! that point at missing nodes or out-of-range ports instead of failing.

use crate::graph::Graph;
use crate::node::{Node, NodeId, NodeKind};
use crate::port::Signal;
use serde::{Deserialize, Serialize};

/// Serialized form of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Node ID, preserved across restore
    pub id: NodeId,
    /// Node variant
    pub kind: NodeKind,
    /// Input toggle state (meaningful for `NodeKind::Input` only)
    pub value: bool,
    /// Canvas position
    pub position: [f32; 2],
    /// Collapsed editor flag
    pub collapsed: bool,
    /// Pinned editor flag
    pub pinned: bool,
}

/// Serialized form of one connection, addressed by port index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSnapshot {
    /// Source node ID
    pub from_node: NodeId,
    /// Index into the source node's output ports
    pub from_output: usize,
    /// Destination node ID
    pub to_node: NodeId,
    /// Index into the destination node's input ports
    pub to_input: usize,
}

/// A full serialized graph state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// All nodes, in graph insertion order
    pub nodes: Vec<NodeSnapshot>,
    /// All connections, in graph insertion order
    pub connections: Vec<ConnectionSnapshot>,
}

/// A graph rebuilt from a snapshot
#[derive(Debug)]
pub struct RestoredGraph {
    /// The rebuilt graph
    pub graph: Graph,
    /// Number of connections dropped because they referenced a missing node
    /// or port; nonzero only for snapshots from outside this process
    pub dropped_connections: usize,
}

impl GraphSnapshot {
    /// Capture the current state of a graph
    pub fn capture(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| NodeSnapshot {
                id: node.id,
                kind: node.kind,
                value: node.value,
                position: node.position,
                collapsed: node.collapsed,
                pinned: node.pinned,
            })
            .collect();

        let connections = graph
            .connections()
            .filter_map(|c| {
                let from_output = graph.node(c.from_node)?.output_index(c.from_port)?;
                let to_input = graph.node(c.to_node)?.input_index(c.to_port)?;
                Some(ConnectionSnapshot {
                    from_node: c.from_node,
                    from_output,
                    to_node: c.to_node,
                    to_input,
                })
            })
            .collect();

        Self { nodes, connections }
    }

    /// Rebuild a graph from this snapshot.
    ///
    /// Nodes are recreated with their standard ports for their kind; Input
    /// nodes publish their restored toggle straight onto their output port.
    /// Invalid connection references are repaired by dropping the wire.
    pub fn restore(&self) -> RestoredGraph {
        let mut graph = Graph::new();

        for snap in &self.nodes {
            let mut node = Node::new(snap.kind);
            node.id = snap.id;
            node.position = snap.position;
            node.value = snap.value;
            node.collapsed = snap.collapsed;
            node.pinned = snap.pinned;
            if snap.kind == NodeKind::Input {
                if let Some(port) = node.outputs.first_mut() {
                    port.value = Signal::from(snap.value);
                }
            }
            node.refresh_visual();
            graph.add_node(node);
        }

        let mut dropped_connections = 0;
        for snap in &self.connections {
            if graph
                .connect_indexed(snap.from_node, snap.from_output, snap.to_node, snap.to_input)
                .is_err()
            {
                dropped_connections += 1;
            }
        }

        RestoredGraph {
            graph,
            dropped_connections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateKind;

    fn sample_graph() -> (Graph, NodeId, NodeId, NodeId) {
        let mut graph = Graph::new();
        let input = graph.add_node(Node::new(NodeKind::Input).with_position(10.0, 20.0));
        let not = graph.add_node(Node::new(NodeKind::Gate(GateKind::Not)));
        let output = graph.add_node(Node::new(NodeKind::Output).with_position(300.0, 20.0));
        graph.connect_indexed(input, 0, not, 0).unwrap();
        graph.connect_indexed(not, 0, output, 0).unwrap();
        graph.node_mut(input).unwrap().value = true;
        (graph, input, not, output)
    }

    #[test]
    fn test_capture_restore_round_trip() {
        let (graph, input, not, output) = sample_graph();
        let snapshot = GraphSnapshot::capture(&graph);
        let restored = snapshot.restore();

        assert_eq!(restored.dropped_connections, 0);
        assert_eq!(restored.graph.node_count(), 3);
        assert_eq!(restored.graph.connection_count(), 2);

        let restored_input = restored.graph.node(input).unwrap();
        assert_eq!(restored_input.kind, NodeKind::Input);
        assert!(restored_input.value);
        assert_eq!(restored_input.position, [10.0, 20.0]);
        assert_eq!(restored_input.outputs[0].value, Signal::High);

        assert_eq!(restored.graph.node(not).unwrap().kind, NodeKind::Gate(GateKind::Not));
        assert_eq!(restored.graph.node(output).unwrap().kind, NodeKind::Output);
    }

    #[test]
    fn test_round_trip_preserves_ui_flags() {
        let (mut graph, input, _, _) = sample_graph();
        graph.node_mut(input).unwrap().collapsed = true;
        graph.node_mut(input).unwrap().pinned = true;

        let restored = GraphSnapshot::capture(&graph).restore();
        let node = restored.graph.node(input).unwrap();
        assert!(node.collapsed);
        assert!(node.pinned);
    }

    #[test]
    fn test_dangling_connection_is_dropped() {
        let (graph, input, _, output) = sample_graph();
        let mut snapshot = GraphSnapshot::capture(&graph);
        snapshot.connections.push(ConnectionSnapshot {
            from_node: NodeId::new(), // no such node
            from_output: 0,
            to_node: output,
            to_input: 0,
        });
        snapshot.connections.push(ConnectionSnapshot {
            from_node: input,
            from_output: 7, // no such port
            to_node: output,
            to_input: 0,
        });

        let restored = snapshot.restore();
        assert_eq!(restored.dropped_connections, 2);
        assert_eq!(restored.graph.connection_count(), 2);
    }
}
