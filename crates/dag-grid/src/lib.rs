//! Grid coordinates for the nodes of directed acyclic graphs
//!
//! Every node gets a `(column, row)` cell. Columns are the length of the
//! longest path from a node down to a sink, so every edge goes from a higher
//! column to a lower one. Rows give each sink a band of its own, stacked with
//! the bands of the sink's ancestors. Weakly-connected components are laid
//! out independently and stacked on top of each other.
//!
//! The layout works on any graph implementing [`Adjacency`], like the
//! [`DagGraph`] arena or petgraph's `DiGraphMap`, and writes into a separate
//! [`Coords`] table.
//!
//! # Example
//!
//! ```
//! use dag_grid::{Coord, DagGraph, GridLayout, NodeId};
//!
//! // 0 has two children, 1 and 2
//! let (graph, _labels) = DagGraph::from_edges([(0, 1), (0, 2)]);
//!
//! let grid = GridLayout::new()
//!     .build_coordinates(&graph, graph.nodes())
//!     .unwrap();
//!
//! assert_eq!(grid.coord(NodeId::new(1)), Coord::new(0, 0));
//! assert_eq!(grid.coord(NodeId::new(2)), Coord::new(0, 1));
//! assert_eq!(grid.coord(NodeId::new(0)), Coord::new(1, 0));
//! assert_eq!(grid.rows(), 2);
//! ```
//!
//! [`GridPlacement`] turns the cells into positions once node sizes are known.

mod coord;
mod engine;
mod geometry;
mod graph;
mod placement;

pub mod grid;

pub use coord::{Coord, Coords};
pub use engine::LayoutEngine;
pub use geometry::{Margins, Point, Vec2};
pub use graph::{Adjacency, DagGraph, NodeId};
pub use placement::{EdgeSegment, GridPlacement, NodeSizes, Placement, PlacementError};

pub use grid::{
    ColumnOrigin, ComponentReport, ComponentSpan, Grid, GridLayout, InvalidComponent, LayoutError,
};
