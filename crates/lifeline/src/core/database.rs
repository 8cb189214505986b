//! Storage trait for validated diagram data
//!
//! A database owns the entities of one diagram after they have passed
//! construction-time validation. Insertion order is significant: it is the
//! left-to-right order of actors and the top-to-bottom order of messages.

use anyhow::Result;

/// Core trait for diagram databases
///
/// `Node` is the entity that gets a column or a box (an actor), `Edge` is
/// the entity that connects two nodes (a message). Adding an edge whose
/// endpoints are not already present must fail rather than create them.
pub trait Database {
    /// The node data type for this database
    type Node: Clone;

    /// The edge data type for this database
    type Edge: Clone;

    /// Add a node; duplicate ids are rejected
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Add an edge; both endpoints must already exist
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges in insertion order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}
