// SPDX-License-Identifier: MIT OR Apache-2.0
//! Document layer for `LogicLab`.
//!
//! Wraps the [`logiclab_graph`] core in a [`Document`]: the per-session
//! editing surface (node placement, wiring, input toggles, truth tables)
//! with snapshot-based undo/redo history.

pub mod document;
pub mod history;

pub use document::{Document, DocumentError};
pub use history::{History, HistoryEntry, HistoryError};
