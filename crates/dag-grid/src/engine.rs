use crate::{NodeSizes, Point};
use std::collections::HashMap;
use std::hash::Hash;

/// A layout engine that computes positions for graph nodes in one call
///
/// Generic over the graph type `G` so engines can state their own graph
/// requirements. [`GridLayout`](crate::GridLayout) implements it for any
/// reference to an [`Adjacency`](crate::Adjacency) graph.
pub trait LayoutEngine<G> {
    /// The type used to identify nodes in the graph
    type NodeId: Copy + Eq + Hash;

    type Error;

    /// Compute node positions for the given graph
    ///
    /// # Errors
    /// Returns an error if the graph cannot be laid out (e.g. it contains a
    /// cycle) or if a node ends up without a position
    fn layout<S>(&self, graph: G, sizes: &S) -> Result<HashMap<Self::NodeId, Point>, Self::Error>
    where
        S: NodeSizes<Self::NodeId>;
}
