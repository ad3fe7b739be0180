use derive_more::{Display, From};
use petgraph::graphmap::{DiGraphMap, NodeTrait};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::LayoutError;

/// Read access to the adjacency of a directed graph
///
/// This is the only thing the layout needs from a graph. Answers must stay
/// the same for the whole duration of a layout call.
pub trait Adjacency {
    /// The type used to identify nodes in the graph
    type NodeId: Copy + Eq + Hash + fmt::Debug;

    /// Whether the handle resolves to a node of this graph
    fn contains(&self, node: Self::NodeId) -> bool;

    /// All the nodes of the graph, in a stable order
    fn nodes(&self) -> impl Iterator<Item = Self::NodeId> + '_;

    /// Targets of the outgoing edges of `node`
    fn children(&self, node: Self::NodeId) -> impl Iterator<Item = Self::NodeId> + '_;

    /// Sources of the incoming edges of `node`
    fn parents(&self, node: Self::NodeId) -> impl Iterator<Item = Self::NodeId> + '_;
}

/// Stable handle of a node in a [`DagGraph`]
#[derive(
    Debug,
    Display,
    From,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena of nodes addressed by [`NodeId`], with child and parent lists per node
///
/// Edges are kept in insertion order on both ends, so traversals are
/// deterministic. Malformed topology (self-loops, cycles) is accepted here and
/// reported by the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagGraph {
    children: Vec<Vec<NodeId>>,
    parents: Vec<Vec<NodeId>>,
}

impl DagGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(parent, child)` label pairs
    ///
    /// Nodes are allocated in order of first appearance. Returns the graph and
    /// the label of every node, indexed by [`NodeId::index`].
    pub fn from_edges<I>(edges: I) -> (Self, Vec<u32>)
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut graph = Self::new();
        let mut labels = Vec::new();
        let mut ids = HashMap::new();

        let mut id_of = |graph: &mut Self, label: u32| {
            *ids.entry(label).or_insert_with(|| {
                labels.push(label);
                graph.add_node()
            })
        };

        for (parent, child) in edges {
            let parent = id_of(&mut graph, parent);
            let child = id_of(&mut graph, child);
            graph.link(parent, child);
        }

        (graph, labels)
    }

    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.children.len() as u32);
        self.children.push(Vec::new());
        self.parents.push(Vec::new());
        id
    }

    /// Add an edge from `parent` to `child`
    ///
    /// # Errors
    /// Returns [`LayoutError::NullNode`] if either end is not part of the graph
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError<NodeId>> {
        for node in [parent, child] {
            if !self.contains(node) {
                return Err(LayoutError::NullNode(node));
            }
        }
        self.link(parent, child);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.children.len()
    }

    pub fn edge_count(&self) -> usize {
        self.children.iter().map(Vec::len).sum()
    }

    /// All node handles, in allocation order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.children.len() as u32).map(NodeId)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.children[parent.index()].push(child);
        self.parents[child.index()].push(parent);
    }
}

impl Adjacency for DagGraph {
    type NodeId = NodeId;

    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.children.len()
    }

    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        DagGraph::nodes(self)
    }

    fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children.get(node.index()).into_iter().flatten().copied()
    }

    fn parents(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.parents.get(node.index()).into_iter().flatten().copied()
    }
}

// petgraph graphs can be laid out directly
impl<N, E> Adjacency for DiGraphMap<N, E>
where
    N: NodeTrait + fmt::Debug,
{
    type NodeId = N;

    fn contains(&self, node: N) -> bool {
        self.contains_node(node)
    }

    fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        DiGraphMap::nodes(self)
    }

    fn children(&self, node: N) -> impl Iterator<Item = N> + '_ {
        self.neighbors_directed(node, Direction::Outgoing)
    }

    fn parents(&self, node: N) -> impl Iterator<Item = N> + '_ {
        self.neighbors_directed(node, Direction::Incoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_from_edges_allocates_in_first_appearance_order() {
        let (graph, labels) = DagGraph::from_edges([(7, 3), (3, 9), (7, 9)]);

        assert_eq!(labels, vec![7, 3, 9]);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);

        let seven = NodeId::new(0);
        let nine = NodeId::new(2);
        assert_eq!(
            graph.children(seven).collect::<Vec<_>>(),
            vec![NodeId::new(1), nine]
        );
        assert_eq!(
            graph.parents(nine).collect::<Vec<_>>(),
            vec![NodeId::new(1), seven]
        );
    }

    #[test]
    fn test_add_edge_rejects_unknown_nodes() {
        let mut graph = DagGraph::new();
        let a = graph.add_node();

        assert_eq!(
            graph.add_edge(a, NodeId::new(4)),
            Err(LayoutError::NullNode(NodeId::new(4)))
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_unknown_node_has_no_neighbors() {
        let graph = DagGraph::new();

        assert!(!graph.contains(NodeId::new(0)));
        assert_eq!(graph.children(NodeId::new(0)).count(), 0);
        assert_eq!(graph.parents(NodeId::new(0)).count(), 0);
    }

    #[test]
    fn test_graphmap_adjacency() {
        let mut graph = DiGraphMap::<u8, ()>::new();
        graph.add_edge(1, 2, ());
        graph.add_edge(1, 3, ());

        assert!(Adjacency::contains(&graph, 3));
        assert_eq!(Adjacency::children(&graph, 1).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(Adjacency::parents(&graph, 3).collect::<Vec<_>>(), vec![1]);
        assert_eq!(Adjacency::nodes(&graph).count(), 3);
    }
}
