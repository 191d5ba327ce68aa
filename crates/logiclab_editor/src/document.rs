// SPDX-License-Identifier: MIT OR Apache-2.0
//! The editing document: a circuit graph plus its undo/redo history.
//!
//! Every user-facing operation goes through [`Document`], which keeps the
//! "mutate, then record" ordering in one place. There is no global state;
//! independent documents coexist freely.

use crate::history::{History, HistoryEntry, HistoryError};
use logiclab_graph::evaluation;
use logiclab_graph::graph::ConnectionError;
use logiclab_graph::port::Signal;
use logiclab_graph::snapshot::GraphSnapshot;
use logiclab_graph::truth_table::{self, TruthTable, TruthTableError};
use logiclab_graph::{ConnectionId, Graph, Node, NodeId, NodeKind};

/// Error type for document operations
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// History serialization failure
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Invalid wiring request
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// A single circuit document with undo/redo
#[derive(Debug)]
pub struct Document {
    graph: Graph,
    history: History,
}

impl Document {
    /// Create an empty document.
    ///
    /// The empty state is recorded as the history baseline, so the first
    /// undo after an edit returns to an empty canvas.
    pub fn new() -> Result<Self> {
        let mut doc = Self {
            graph: Graph::new(),
            history: History::new(),
        };
        doc.record()?;
        Ok(doc)
    }

    /// Read access to the circuit
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Place a new node on the canvas
    pub fn create_node(&mut self, kind: NodeKind, position: [f32; 2]) -> Result<NodeId> {
        let id = self
            .graph
            .add_node(Node::new(kind).with_position(position[0], position[1]));
        tracing::debug!(?id, ?kind, "created node");
        self.record()?;
        Ok(id)
    }

    /// Delete a node and its wires; returns whether anything was deleted
    pub fn delete_node(&mut self, id: NodeId) -> Result<bool> {
        if self.graph.remove_node(id).is_none() {
            return Ok(false);
        }
        tracing::debug!(?id, "deleted node");
        evaluation::run_step(&mut self.graph);
        self.record()?;
        Ok(true)
    }

    /// Remove every node and wire
    pub fn clear(&mut self) -> Result<()> {
        self.graph.clear();
        tracing::debug!("cleared graph");
        self.record()
    }

    /// Finish moving a node; returns whether the node existed
    pub fn move_node(&mut self, id: NodeId, position: [f32; 2]) -> Result<bool> {
        let Some(node) = self.graph.node_mut(id) else {
            return Ok(false);
        };
        node.position = position;
        self.record()?;
        Ok(true)
    }

    /// Wire an output port to an input port, addressed by index
    pub fn connect(
        &mut self,
        from_node: NodeId,
        output_index: usize,
        to_node: NodeId,
        input_index: usize,
    ) -> Result<ConnectionId> {
        let id = self
            .graph
            .connect_indexed(from_node, output_index, to_node, input_index)?;
        evaluation::run_step(&mut self.graph);
        self.record()?;
        Ok(id)
    }

    /// Remove a wire; returns whether it existed
    pub fn disconnect(&mut self, connection: ConnectionId) -> Result<bool> {
        if self.graph.disconnect(connection).is_none() {
            return Ok(false);
        }
        evaluation::run_step(&mut self.graph);
        self.record()?;
        Ok(true)
    }

    /// Set an Input node's toggle and re-run the circuit.
    ///
    /// Not recorded in history, matching the editor's toggle widget. Returns
    /// `false` (a no-op) if the node is missing or not an Input.
    pub fn set_input_value(&mut self, id: NodeId, value: bool) -> bool {
        let Some(node) = self.graph.node_mut(id) else {
            return false;
        };
        if node.kind != NodeKind::Input {
            return false;
        }
        node.value = value;
        if let Some(port) = node.outputs.first_mut() {
            port.value = Signal::from(value);
        }
        node.refresh_visual();
        evaluation::run_step(&mut self.graph);
        true
    }

    /// Flip an Input node's toggle; returns the new value if it was an Input
    pub fn toggle_input(&mut self, id: NodeId) -> Option<bool> {
        let value = match self.graph.node(id) {
            Some(node) if node.kind == NodeKind::Input => !node.value,
            _ => return None,
        };
        self.set_input_value(id, value);
        Some(value)
    }

    /// Restore the previous recorded state; returns whether anything changed
    pub fn undo(&mut self) -> Result<bool> {
        let Some(entry) = self.history.undo() else {
            return Ok(false);
        };
        self.graph = restore_entry(entry)?;
        evaluation::settle(&mut self.graph);
        tracing::debug!("undo");
        Ok(true)
    }

    /// Restore the next recorded state; returns whether anything changed
    pub fn redo(&mut self) -> Result<bool> {
        let Some(entry) = self.history.redo() else {
            return Ok(false);
        };
        self.graph = restore_entry(entry)?;
        evaluation::settle(&mut self.graph);
        tracing::debug!("redo");
        Ok(true)
    }

    /// Whether an undo would change state
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo would change state
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Generate the truth table for the current circuit
    pub fn truth_table(&mut self) -> std::result::Result<TruthTable, TruthTableError> {
        truth_table::generate(&mut self.graph)
    }

    fn record(&mut self) -> Result<()> {
        let snapshot = GraphSnapshot::capture(&self.graph);
        self.history.record(HistoryEntry::from_value(&snapshot)?);
        Ok(())
    }
}

fn restore_entry(entry: &HistoryEntry) -> Result<Graph> {
    let snapshot: GraphSnapshot = entry.to_value()?;
    let restored = snapshot.restore();
    if restored.dropped_connections > 0 {
        tracing::warn!(
            dropped = restored.dropped_connections,
            "snapshot referenced missing nodes or ports; dropped wires"
        );
    }
    Ok(restored.graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logiclab_graph::gate::GateKind;
    use logiclab_graph::node::{COLOR_NEUTRAL, COLOR_TRUE};

    #[test]
    fn test_undo_redo_round_trip() {
        let mut doc = Document::new().unwrap();
        let a = doc.create_node(NodeKind::Input, [0.0, 0.0]).unwrap();
        doc.create_node(NodeKind::Output, [100.0, 0.0]).unwrap();
        assert_eq!(doc.graph().node_count(), 2);

        assert!(doc.undo().unwrap());
        assert_eq!(doc.graph().node_count(), 1);
        assert!(doc.graph().node(a).is_some());

        assert!(doc.undo().unwrap());
        assert_eq!(doc.graph().node_count(), 0);

        // baseline reached
        assert!(!doc.undo().unwrap());

        assert!(doc.redo().unwrap());
        assert_eq!(doc.graph().node_count(), 1);
        assert!(doc.redo().unwrap());
        assert_eq!(doc.graph().node_count(), 2);
        assert!(!doc.redo().unwrap());
    }

    #[test]
    fn test_edit_after_undo_discards_redo() {
        let mut doc = Document::new().unwrap();
        doc.create_node(NodeKind::Input, [0.0, 0.0]).unwrap();
        doc.create_node(NodeKind::Output, [100.0, 0.0]).unwrap();
        doc.undo().unwrap();

        doc.create_node(NodeKind::Gate(GateKind::And), [50.0, 0.0]).unwrap();
        assert!(!doc.can_redo());
        assert_eq!(doc.graph().node_count(), 2);
    }

    #[test]
    fn test_undo_restores_wiring_and_visuals() {
        let mut doc = Document::new().unwrap();
        let input = doc.create_node(NodeKind::Input, [0.0, 0.0]).unwrap();
        let output = doc.create_node(NodeKind::Output, [100.0, 0.0]).unwrap();
        doc.connect(input, 0, output, 0).unwrap();
        doc.set_input_value(input, true);
        assert_eq!(doc.graph().node(output).unwrap().visual.color, COLOR_TRUE);

        // back before the wire existed; output goes neutral again
        doc.undo().unwrap();
        assert_eq!(doc.graph().connection_count(), 0);
        assert_eq!(doc.graph().node(output).unwrap().visual.color, COLOR_NEUTRAL);

        // the wire comes back and the restored toggle value flows through
        doc.redo().unwrap();
        assert_eq!(doc.graph().connection_count(), 1);
    }

    #[test]
    fn test_toggle_runs_circuit_but_does_not_record() {
        let mut doc = Document::new().unwrap();
        let input = doc.create_node(NodeKind::Input, [0.0, 0.0]).unwrap();
        let output = doc.create_node(NodeKind::Output, [100.0, 0.0]).unwrap();
        doc.connect(input, 0, output, 0).unwrap();

        assert_eq!(doc.toggle_input(input), Some(true));
        assert_eq!(doc.graph().node(output).unwrap().visual.color, COLOR_TRUE);

        // undo skips the toggle and removes the connection instead
        doc.undo().unwrap();
        assert_eq!(doc.graph().connection_count(), 0);
    }

    #[test]
    fn test_toggle_on_non_input_is_a_no_op() {
        let mut doc = Document::new().unwrap();
        let output = doc.create_node(NodeKind::Output, [0.0, 0.0]).unwrap();
        assert_eq!(doc.toggle_input(output), None);
        assert!(!doc.set_input_value(NodeId::new(), true));
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut doc = Document::new().unwrap();
        doc.create_node(NodeKind::Input, [0.0, 0.0]).unwrap();
        doc.clear().unwrap();
        assert_eq!(doc.graph().node_count(), 0);

        doc.undo().unwrap();
        assert_eq!(doc.graph().node_count(), 1);
    }

    #[test]
    fn test_delete_missing_node_is_a_no_op() {
        let mut doc = Document::new().unwrap();
        assert!(!doc.delete_node(NodeId::new()).unwrap());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_move_records_position() {
        let mut doc = Document::new().unwrap();
        let id = doc.create_node(NodeKind::Input, [0.0, 0.0]).unwrap();
        assert!(doc.move_node(id, [40.0, 60.0]).unwrap());

        doc.undo().unwrap();
        assert_eq!(doc.graph().node(id).unwrap().position, [0.0, 0.0]);
        doc.redo().unwrap();
        assert_eq!(doc.graph().node(id).unwrap().position, [40.0, 60.0]);
    }

    #[test]
    fn test_truth_table_through_document() {
        let mut doc = Document::new().unwrap();
        let input = doc.create_node(NodeKind::Input, [0.0, 0.0]).unwrap();
        let not = doc.create_node(NodeKind::Gate(GateKind::Not), [50.0, 0.0]).unwrap();
        let output = doc.create_node(NodeKind::Output, [100.0, 0.0]).unwrap();
        doc.connect(input, 0, not, 0).unwrap();
        doc.connect(not, 0, output, 0).unwrap();

        let table = doc.truth_table().unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].outputs, vec![true]);
        assert_eq!(table.rows[1].outputs, vec![false]);
    }

    #[test]
    fn test_truth_table_requires_inputs_and_outputs() {
        let mut doc = Document::new().unwrap();
        doc.create_node(NodeKind::Gate(GateKind::And), [0.0, 0.0]).unwrap();
        assert!(matches!(
            doc.truth_table(),
            Err(TruthTableError::InsufficientNodes)
        ));
    }
}
