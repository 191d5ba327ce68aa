// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.

use crate::connection::{Connection, ConnectionId};
use crate::node::{Node, NodeId};
use crate::port::{PortDirection, PortId, Signal};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A logic-circuit graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and its connections.
    ///
    /// Input ports that were fed by the removed node revert to unset.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let severed: Vec<Connection> = self
            .connections
            .values()
            .filter(|c| c.involves_node(node_id))
            .cloned()
            .collect();
        for connection in &severed {
            self.connections.swap_remove(&connection.id);
            if connection.from_node == node_id {
                self.reset_input(connection.to_node, connection.to_port);
            }
        }
        self.nodes.swap_remove(&node_id)
    }

    /// Remove every node and connection
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs, in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a connection between ports.
    ///
    /// The source port must be one of `from_node`'s outputs and the
    /// destination one of `to_node`'s inputs; an input port accepts at most
    /// one incoming wire. Cycles are not rejected, a cyclic circuit simply
    /// never stabilizes. The source's current value is pushed onto the
    /// destination port immediately so downstream nodes can re-run.
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: PortId,
        to_node: NodeId,
        to_port: PortId,
    ) -> Result<ConnectionId, ConnectionError> {
        let source_node = self
            .nodes
            .get(&from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?;
        let target_node = self
            .nodes
            .get(&to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?;

        let source_port = source_node
            .port(from_port)
            .ok_or(ConnectionError::PortNotFound(from_port))?;
        let target_port = target_node
            .port(to_port)
            .ok_or(ConnectionError::PortNotFound(to_port))?;

        if source_port.direction != PortDirection::Output
            || target_port.direction != PortDirection::Input
        {
            return Err(ConnectionError::WrongDirection);
        }

        if self.connections.values().any(|c| c.to_port == to_port) {
            return Err(ConnectionError::PortAlreadyConnected(to_port));
        }

        let value = source_port.value;
        let connection = Connection::new(from_node, from_port, to_node, to_port);
        let id = connection.id;
        self.connections.insert(id, connection);
        self.set_input(to_node, to_port, value);
        Ok(id)
    }

    /// Connect ports addressed by index, as the editing collaborator and the
    /// snapshot layer do
    pub fn connect_indexed(
        &mut self,
        from_node: NodeId,
        output_index: usize,
        to_node: NodeId,
        input_index: usize,
    ) -> Result<ConnectionId, ConnectionError> {
        let from_port = self
            .nodes
            .get(&from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?
            .output(output_index)
            .ok_or(ConnectionError::PortIndexOutOfRange {
                node: from_node,
                index: output_index,
            })?
            .id;
        let to_port = self
            .nodes
            .get(&to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?
            .input(input_index)
            .ok_or(ConnectionError::PortIndexOutOfRange {
                node: to_node,
                index: input_index,
            })?
            .id;
        self.connect(from_node, from_port, to_node, to_port)
    }

    /// Remove a connection; the fed input port reverts to unset
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        let connection = self.connections.swap_remove(&connection_id)?;
        self.reset_input(connection.to_node, connection.to_port);
        Some(connection)
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get connections leaving a specific output port
    pub fn connections_from(&self, port_id: PortId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.from_port == port_id)
    }

    /// Get the connection feeding an input port, if any
    pub fn connection_to(&self, port_id: PortId) -> Option<&Connection> {
        self.connections.values().find(|c| c.to_port == port_id)
    }

    /// Get connections involving a node
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.involves_node(node_id))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Write a signal to an input port, if it still exists
    pub(crate) fn set_input(&mut self, node_id: NodeId, port_id: PortId, value: Signal) {
        if let Some(node) = self.nodes.get_mut(&node_id) {
            if let Some(port) = node.inputs.iter_mut().find(|p| p.id == port_id) {
                port.value = value;
            }
        }
    }

    fn reset_input(&mut self, node_id: NodeId, port_id: PortId) {
        self.set_input(node_id, port_id, Signal::Unset);
    }
}

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found
    #[error("Port not found: {0:?}")]
    PortNotFound(PortId),

    /// Port index out of range for the node
    #[error("Port index {index} out of range for node {node:?}")]
    PortIndexOutOfRange {
        /// Node the index was resolved against
        node: NodeId,
        /// Offending port index
        index: usize,
    },

    /// Wires run from an output port to an input port only
    #[error("Connections must go from an output port to an input port")]
    WrongDirection,

    /// Input port is already fed by another wire
    #[error("Port already connected: {0:?}")]
    PortAlreadyConnected(PortId),
}
