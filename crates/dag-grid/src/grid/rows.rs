use crate::{Adjacency, Coords};
use std::vec;

/// Assign rows to `sinks` and their ancestors, starting at `start_row`
///
/// Each sink opens a band at the current row and the band grows by the number
/// of rows its ancestors claim. A parent keeps the first row it is given, so
/// merge points stay in the band of the branch that reached them first.
///
/// Returns the number of rows consumed by all the bands.
pub fn assign_rows<G>(graph: &G, sinks: &[G::NodeId], start_row: i64, coords: &mut Coords<G::NodeId>) -> i64
where
    G: Adjacency,
{
    let mut cursor = start_row;
    for &sink in sinks {
        coords.set_row(sink, cursor);
        cursor += claim_ancestors(graph, sink, coords);
    }
    cursor - start_row
}

struct Frame<N> {
    /// Row of the node this frame walks from
    base: i64,
    /// Next free row for the remaining parents
    cursor: i64,
    parents: vec::IntoIter<N>,
}

impl<N> Frame<N> {
    fn consumed(&self) -> i64 {
        (self.cursor - self.base).max(1)
    }
}

/// Give rows to the unclaimed ancestors of `node`, whose row is already set
///
/// Every unclaimed parent takes the next free row and then its own ancestors
/// are claimed before moving on to the next parent. Returns the rows consumed
/// by `node`, at least one.
fn claim_ancestors<G>(graph: &G, node: G::NodeId, coords: &mut Coords<G::NodeId>) -> i64
where
    G: Adjacency,
{
    let row = coords.row(node);
    let mut stack = vec![Frame {
        base: row,
        cursor: row,
        parents: parents_of(graph, node),
    }];
    let mut consumed = 1;

    while let Some(frame) = stack.last_mut() {
        match frame.parents.next() {
            Some(parent) if coords.has_row(parent) => {}
            Some(parent) => {
                let row = frame.cursor;
                coords.set_row(parent, row);
                stack.push(Frame {
                    base: row,
                    cursor: row,
                    parents: parents_of(graph, parent),
                });
            }
            None => {
                consumed = frame.consumed();
                stack.pop();
                if let Some(caller) = stack.last_mut() {
                    caller.cursor += consumed;
                }
            }
        }
    }

    consumed
}

fn parents_of<G: Adjacency>(graph: &G, node: G::NodeId) -> vec::IntoIter<G::NodeId> {
    graph.parents(node).collect::<Vec<_>>().into_iter()
}
