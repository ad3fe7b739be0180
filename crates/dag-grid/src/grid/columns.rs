use crate::{Adjacency, Coords};
use std::collections::VecDeque;
use tracing::trace;

/// Assign every ancestor of `sinks` its longest distance to a sink
///
/// Sinks get column 0. Columns are then pushed up breadth-first: a parent is
/// offered its child's column plus one and is queued again whenever that beats
/// its current column. The component must be acyclic.
pub fn assign_columns<G>(graph: &G, sinks: &[G::NodeId], coords: &mut Coords<G::NodeId>)
where
    G: Adjacency,
{
    let mut queue = VecDeque::new();
    for &sink in sinks {
        coords.set_column(sink, 0);
        queue.push_back(sink);
    }

    while let Some(node) = queue.pop_front() {
        let candidate = coords.column(node) + 1;
        for parent in graph.parents(node) {
            if candidate > coords.column(parent) {
                trace!("Column of {parent:?} raised to {candidate}");
                coords.set_column(parent, candidate);
                queue.push_back(parent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DagGraph, NodeId};
    use test_log::test;

    fn id(raw: u32) -> NodeId {
        NodeId::new(raw)
    }

    #[test]
    fn test_longest_path_wins() {
        // 0 reaches the sink through 1 (short) and 2 -> 3 -> 4 (long)
        let (graph, _) = DagGraph::from_edges([(0, 1), (0, 2), (2, 3), (3, 4)]);
        let mut coords = Coords::new();

        assign_columns(&graph, &[id(1), id(4)], &mut coords);

        assert_eq!(coords.column(id(1)), 0);
        assert_eq!(coords.column(id(4)), 0);
        assert_eq!(coords.column(id(3)), 1);
        assert_eq!(coords.column(id(2)), 2);
        assert_eq!(coords.column(id(0)), 3);
    }

    #[test]
    fn test_merge_takes_max_of_children() {
        // 0 has children at columns 3 and 5
        let (graph, _) = DagGraph::from_edges([
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (0, 5),
            (5, 6),
            (6, 7),
            (7, 8),
            (8, 9),
            (9, 10),
        ]);
        let mut coords = Coords::new();

        assign_columns(&graph, &[id(4), id(10)], &mut coords);

        assert_eq!(coords.column(id(1)), 3);
        assert_eq!(coords.column(id(5)), 5);
        assert_eq!(coords.column(id(0)), 6);
    }

    #[test]
    fn test_rows_are_untouched() {
        let (graph, _) = DagGraph::from_edges([(0, 1)]);
        let mut coords = Coords::new();

        assign_columns(&graph, &[NodeId::new(1)], &mut coords);

        assert!(!coords.has_row(NodeId::new(0)));
        assert!(!coords.has_row(NodeId::new(1)));
    }
}
