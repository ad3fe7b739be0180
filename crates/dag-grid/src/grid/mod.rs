mod columns;
mod partition;
mod rows;
mod validate;

use crate::{Adjacency, Coord, Coords, GridPlacement, LayoutEngine, NodeSizes, PlacementError, Point};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

pub use columns::assign_columns;
pub use partition::partition;
pub use rows::assign_rows;
pub use validate::validate;

/// Errors that make a graph impossible to lay out
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError<N>
where
    N: fmt::Debug,
{
    /// A node handle does not resolve in the graph
    #[error("node {0:?} is not part of the graph")]
    NullNode(N),

    /// A node lists itself as its own child or parent
    #[error("node {0:?} is its own child or parent")]
    SelfLoop(N),

    /// Every node of a non-empty component has a child
    #[error("component has no sink, every node has a child")]
    NoSinkInComponent,

    /// The graph contains a cycle going through the given node
    #[error("graph contains a cycle at node {0:?}")]
    CycleDetected(N),
}

impl<N: fmt::Debug> LayoutError<N> {
    /// Whether the error proves the graph has a cycle
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::NoSinkInComponent | Self::CycleDetected(_))
    }
}

/// Which end of a component sits at column 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnOrigin {
    /// Sinks at column 0, a node's column is its longest path to a sink
    #[default]
    Sinks,
    /// Mirrored per component so the deepest sources sit at column 0
    Sources,
}

/// What to do when a component fails validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidComponent {
    /// Leave its nodes unassigned, report it and keep going
    #[default]
    Skip,
    /// Stop and return the error
    Abort,
}

/// Configuration for the grid layout of DAGs
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    pub column_origin: ColumnOrigin,

    pub on_invalid: InvalidComponent,

    /// Used when converting the grid to positions with [`LayoutEngine`]
    pub placement: GridPlacement,
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_origin(self, column_origin: ColumnOrigin) -> Self {
        Self {
            column_origin,
            ..self
        }
    }

    pub fn with_on_invalid(self, on_invalid: InvalidComponent) -> Self {
        Self { on_invalid, ..self }
    }

    pub fn with_placement(self, placement: GridPlacement) -> Self {
        Self { placement, ..self }
    }
}

/// Where a laid out component ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpan<N> {
    /// Sinks of the component, one row band each
    pub sinks: Vec<N>,

    /// First row of the component
    pub first_row: i64,

    /// Number of rows consumed by the component
    pub rows: i64,

    /// Number of columns used by the component
    pub columns: i64,
}

/// Outcome of the layout of one weakly-connected component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentReport<N>
where
    N: fmt::Debug,
{
    /// Nodes of the component, in discovery order
    pub nodes: Vec<N>,

    pub outcome: Result<ComponentSpan<N>, LayoutError<N>>,
}

/// Coordinates of a laid out node collection
#[derive(Debug, Clone)]
pub struct Grid<N>
where
    N: Copy + Eq + std::hash::Hash + fmt::Debug,
{
    coords: Coords<N>,
    components: Vec<ComponentReport<N>>,
    rows: i64,
}

impl<N> Grid<N>
where
    N: Copy + Eq + std::hash::Hash + fmt::Debug,
{
    pub fn coord(&self, node: N) -> Coord {
        self.coords.get(node)
    }

    pub fn coords(&self) -> &Coords<N> {
        &self.coords
    }

    /// Reports in discovery order
    pub fn components(&self) -> &[ComponentReport<N>] {
        &self.components
    }

    /// Rows consumed by all the valid components
    pub fn rows(&self) -> i64 {
        self.rows
    }

    pub fn errors(&self) -> impl Iterator<Item = &LayoutError<N>> + '_ {
        self.components
            .iter()
            .filter_map(|component| component.outcome.as_ref().err())
    }

    /// Whether every component was laid out
    pub fn is_complete(&self) -> bool {
        self.errors().next().is_none()
    }

    /// The coordinates, or the error of the first invalid component
    pub fn into_result(self) -> Result<Coords<N>, LayoutError<N>> {
        match self.components.into_iter().find_map(|c| c.outcome.err()) {
            Some(err) => Err(err),
            None => Ok(self.coords),
        }
    }

    pub fn into_coords(self) -> Coords<N> {
        self.coords
    }
}

impl GridLayout {
    /// Compute the grid coordinates of `nodes` and everything connected to them
    ///
    /// Components are laid out independently in the order they are
    /// discovered, each one starting on the row after the previous one.
    ///
    /// # Errors
    /// Returns an error if a node handle does not resolve, or if a component
    /// is invalid and `on_invalid` is [`InvalidComponent::Abort`]. Otherwise
    /// invalid components are reported in the returned [`Grid`].
    pub fn build_coordinates<G, I>(&self, graph: &G, nodes: I) -> Result<Grid<G::NodeId>, LayoutError<G::NodeId>>
    where
        G: Adjacency,
        I: IntoIterator<Item = G::NodeId>,
    {
        let components = partition(graph, nodes)?;
        debug!("Laying out {} components", components.len());

        let mut coords = Coords::new();
        let mut reports = Vec::with_capacity(components.len());
        let mut row_start = 0;

        for (index, nodes) in components.into_iter().enumerate() {
            let outcome = match validate(graph, &nodes) {
                Ok(sinks) => {
                    let span = self.layout_component(graph, &nodes, sinks, row_start, &mut coords);
                    debug!(
                        "Component {index}: {} nodes, {} columns, rows {}..{}",
                        nodes.len(),
                        span.columns,
                        span.first_row,
                        span.first_row + span.rows
                    );
                    row_start += span.rows;
                    Ok(span)
                }
                Err(err) => {
                    warn!("Component {index} of {} nodes rejected: {err}", nodes.len());
                    if self.on_invalid == InvalidComponent::Abort {
                        return Err(err);
                    }
                    Err(err)
                }
            };
            reports.push(ComponentReport { nodes, outcome });
        }

        Ok(Grid {
            coords,
            components: reports,
            rows: row_start,
        })
    }

    fn layout_component<G>(
        &self,
        graph: &G,
        nodes: &[G::NodeId],
        sinks: Vec<G::NodeId>,
        row_start: i64,
        coords: &mut Coords<G::NodeId>,
    ) -> ComponentSpan<G::NodeId>
    where
        G: Adjacency,
    {
        assign_columns(graph, &sinks, coords);

        let max_column = nodes
            .iter()
            .map(|&node| coords.column(node))
            .max()
            .unwrap_or(0);

        if self.column_origin == ColumnOrigin::Sources {
            for &node in nodes {
                let column = coords.column(node);
                coords.set_column(node, max_column - column);
            }
        }

        let rows = assign_rows(graph, &sinks, row_start, coords);

        ComponentSpan {
            sinks,
            first_row: row_start,
            rows,
            columns: max_column + 1,
        }
    }
}

impl<'a, G> LayoutEngine<&'a G> for GridLayout
where
    G: Adjacency,
{
    type NodeId = G::NodeId;
    type Error = PlacementError<G::NodeId>;

    fn layout<S>(&self, graph: &'a G, sizes: &S) -> Result<HashMap<Self::NodeId, Point>, Self::Error>
    where
        S: NodeSizes<Self::NodeId>,
    {
        let coords = self.build_coordinates(graph, graph.nodes())?.into_result()?;
        let placement = self.placement.place(graph, graph.nodes(), &coords, sizes)?;
        Ok(placement.into_positions())
    }
}
