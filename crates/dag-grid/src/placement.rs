use crate::{Adjacency, Coords, LayoutError, Margins, Point, Vec2};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Provides the drawn size of every node
pub trait NodeSizes<N> {
    fn size(&self, node: N) -> Vec2;
}

impl<N, F> NodeSizes<N> for F
where
    F: Fn(N) -> Vec2,
{
    fn size(&self, node: N) -> Vec2 {
        self(node)
    }
}

// Nodes missing from the map are treated as empty
impl<N: Eq + Hash> NodeSizes<N> for HashMap<N, Vec2> {
    fn size(&self, node: N) -> Vec2 {
        self.get(&node).copied().unwrap_or(Vec2::zero())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError<N>
where
    N: fmt::Debug,
{
    #[error(transparent)]
    Layout(#[from] LayoutError<N>),

    /// The node has no grid coordinate
    #[error("node {0:?} has no grid coordinate")]
    UnplacedNode(N),
}

/// Straight edge between the centers of a parent and one of its children
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment<N> {
    pub parent: N,
    pub child: N,
    pub from: Point,
    pub to: Point,
}

/// Node positions and edges ready to be drawn
#[derive(Debug, Clone)]
pub struct Placement<N> {
    positions: HashMap<N, Point>,
    edges: Vec<EdgeSegment<N>>,
    size: Vec2,
}

impl<N: Copy + Eq + Hash> Placement<N> {
    /// Top-left corner of a node
    pub fn position(&self, node: N) -> Option<Point> {
        self.positions.get(&node).copied()
    }

    pub fn positions(&self) -> &HashMap<N, Point> {
        &self.positions
    }

    /// One segment per (parent, child) pair, in node order
    pub fn edges(&self) -> &[EdgeSegment<N>] {
        &self.edges
    }

    /// Size of the whole drawing
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn into_positions(self) -> HashMap<N, Point> {
        self.positions
    }
}

/// Converts grid cells into positions
///
/// Every column is as wide as its widest node plus the horizontal margins, and
/// every row as tall as its tallest node plus the vertical margins. Nodes sit
/// at the top-left of their cell, inside the margins.
#[derive(Debug, Clone, Default)]
pub struct GridPlacement {
    pub node_margin: Margins,
}

impl GridPlacement {
    pub fn new(node_margin: Margins) -> Self {
        Self { node_margin }
    }

    /// Place `nodes` using their grid coordinates and sizes
    ///
    /// # Errors
    /// Returns [`PlacementError::UnplacedNode`] if one of `nodes` or one of
    /// their children has no coordinate
    pub fn place<G, I, S>(
        &self,
        graph: &G,
        nodes: I,
        coords: &Coords<G::NodeId>,
        sizes: &S,
    ) -> Result<Placement<G::NodeId>, PlacementError<G::NodeId>>
    where
        G: Adjacency,
        I: IntoIterator<Item = G::NodeId>,
        S: NodeSizes<G::NodeId>,
    {
        let margin = self.node_margin;
        let mut cells = Vec::new();
        let mut column_widths: Vec<f32> = Vec::new();
        let mut row_heights: Vec<f32> = Vec::new();

        for node in nodes {
            let coord = coords.get(node);
            if !coord.is_assigned() {
                return Err(PlacementError::UnplacedNode(node));
            }
            let (column, row) = (coord.column as usize, coord.row as usize);
            let size = sizes.size(node);
            let cell = size + margin.extent();

            grow(&mut column_widths, column, cell.x);
            grow(&mut row_heights, row, cell.y);
            cells.push((node, column, row, size));
        }

        let column_offsets = offsets(&column_widths);
        let row_offsets = offsets(&row_heights);

        let mut positions = HashMap::with_capacity(cells.len());
        let mut centers = HashMap::with_capacity(cells.len());
        for &(node, column, row, size) in &cells {
            let position = Point::new(
                column_offsets[column] + margin.left,
                row_offsets[row] + margin.top,
            );
            positions.insert(node, position);
            centers.insert(node, position + size.half());
        }

        let mut edges = Vec::new();
        for &(parent, ..) in &cells {
            for child in graph.children(parent) {
                let Some(&to) = centers.get(&child) else {
                    return Err(PlacementError::UnplacedNode(child));
                };
                edges.push(EdgeSegment {
                    parent,
                    child,
                    from: centers[&parent],
                    to,
                });
            }
        }

        Ok(Placement {
            positions,
            edges,
            size: Vec2::new(column_widths.iter().sum(), row_heights.iter().sum()),
        })
    }
}

/// Raise `extents[index]` to at least `value`, growing the vector as needed
fn grow(extents: &mut Vec<f32>, index: usize, value: f32) {
    if extents.len() <= index {
        extents.resize(index + 1, 0.0);
    }
    extents[index] = extents[index].max(value);
}

/// Start offset of every slot, from the slot extents
fn offsets(extents: &[f32]) -> Vec<f32> {
    extents
        .iter()
        .scan(0.0, |start, extent| {
            let offset = *start;
            *start += extent;
            Some(offset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, DagGraph, GridLayout, NodeId};
    use test_log::test;

    fn id(raw: u32) -> NodeId {
        NodeId::new(raw)
    }

    #[test]
    fn test_cells_follow_largest_node() {
        let (graph, _) = DagGraph::from_edges([(0, 1), (0, 2)]);
        let coords = GridLayout::new()
            .build_coordinates(&graph, graph.nodes())
            .unwrap()
            .into_result()
            .unwrap();
        let sizes = HashMap::from([
            (id(0), Vec2::new(30.0, 10.0)),
            (id(1), Vec2::new(10.0, 20.0)),
            (id(2), Vec2::new(40.0, 10.0)),
        ]);

        let placement = GridPlacement::new(Margins::uniform(1.0))
            .place(&graph, graph.nodes(), &coords, &sizes)
            .unwrap();

        // Column 0 holds 1 and 2 (widest is 40), row 0 holds 0 and 1 (tallest is 20)
        assert_eq!(placement.position(id(1)), Some(Point::new(1.0, 1.0)));
        assert_eq!(placement.position(id(2)), Some(Point::new(1.0, 23.0)));
        assert_eq!(placement.position(id(0)), Some(Point::new(43.0, 1.0)));
        assert_eq!(placement.size(), Vec2::new(74.0, 34.0));
    }

    #[test]
    fn test_edges_join_centers() {
        let (graph, _) = DagGraph::from_edges([(0, 1)]);
        let mut coords = Coords::new();
        coords.set_column(id(0), 1);
        coords.set_row(id(0), 0);
        coords.set_column(id(1), 0);
        coords.set_row(id(1), 0);
        let sizes = |_: NodeId| Vec2::new(10.0, 4.0);

        let placement = GridPlacement::new(Margins::uniform(0.0))
            .place(&graph, graph.nodes(), &coords, &sizes)
            .unwrap();

        assert_eq!(
            placement.edges(),
            &[EdgeSegment {
                parent: id(0),
                child: id(1),
                from: Point::new(15.0, 2.0),
                to: Point::new(5.0, 2.0),
            }]
        );
    }

    #[test]
    fn test_unassigned_node_is_rejected() {
        let (graph, _) = DagGraph::from_edges([(0, 1)]);
        let mut coords = Coords::new();
        coords.set_column(id(0), 1);
        coords.set_row(id(0), 0);
        let sizes = |_: NodeId| Vec2::zero();

        assert_eq!(
            GridPlacement::default()
                .place(&graph, [id(0)], &coords, &sizes)
                .unwrap_err(),
            PlacementError::UnplacedNode(id(1))
        );
        assert_eq!(coords.get(id(1)), Coord::UNASSIGNED);
    }
}
