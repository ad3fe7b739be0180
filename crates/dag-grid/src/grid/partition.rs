use super::LayoutError;
use crate::Adjacency;
use std::collections::{HashSet, VecDeque};

/// Split `nodes` into maximal weakly-connected components
///
/// Both child and parent edges count as connectivity. Components come out in
/// the order their first node appears in `nodes`, and nodes inside a component
/// in breadth-first discovery order. Duplicated input nodes are ignored.
///
/// # Errors
/// Returns [`LayoutError::NullNode`] if an input node or a neighbor is not
/// part of the graph
pub fn partition<G, I>(graph: &G, nodes: I) -> Result<Vec<Vec<G::NodeId>>, LayoutError<G::NodeId>>
where
    G: Adjacency,
    I: IntoIterator<Item = G::NodeId>,
{
    let mut visited = HashSet::new();
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for node in nodes {
        if !graph.contains(node) {
            return Err(LayoutError::NullNode(node));
        }
        if !visited.insert(node) {
            continue;
        }

        let mut component = vec![node];
        queue.push_back(node);

        while let Some(front) = queue.pop_front() {
            for next in graph.children(front).chain(graph.parents(front)) {
                if !graph.contains(next) {
                    return Err(LayoutError::NullNode(next));
                }
                if visited.insert(next) {
                    queue.push_back(next);
                    component.push(next);
                }
            }
        }

        components.push(component);
    }

    Ok(components)
}
