use anyhow::{Context, Result};
use dag_grid::{Adjacency, Coord, Coords, DagGraph, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
struct PlacedNode {
    node: u32,
    column: i64,
    row: i64,
}

fn label(labels: &[u32], node: NodeId) -> u32 {
    labels[node.index()]
}

fn cell(coord: Coord) -> String {
    format!("({}, {})", coord.column, coord.row)
}

/// Every node with its cell, followed by its children and parents
pub fn dump_text(graph: &DagGraph, labels: &[u32], coords: &Coords<NodeId>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Node count: {}", graph.node_count());

    for node in graph.nodes() {
        let _ = writeln!(
            out,
            "Node {}: {}",
            label(labels, node),
            cell(coords.get(node))
        );
        for (title, neighbors) in [
            ("children", graph.children(node).collect::<Vec<_>>()),
            ("parents", graph.parents(node).collect()),
        ] {
            if neighbors.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {title}:");
            for neighbor in neighbors {
                let _ = writeln!(
                    out,
                    "    {} {}",
                    label(labels, neighbor),
                    cell(coords.get(neighbor))
                );
            }
        }
    }

    out
}

/// The cell of every node, as a RON list
pub fn dump_ron(graph: &DagGraph, labels: &[u32], coords: &Coords<NodeId>) -> Result<String> {
    let nodes: Vec<PlacedNode> = graph
        .nodes()
        .map(|node| {
            let coord = coords.get(node);
            PlacedNode {
                node: label(labels, node),
                column: coord.column,
                row: coord.row,
            }
        })
        .collect();

    ron::ser::to_string_pretty(&nodes, ron::ser::PrettyConfig::default())
        .context("Failed to serialize coordinates")
}
