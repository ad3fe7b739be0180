use super::LayoutError;
use crate::Adjacency;
use std::collections::HashSet;
use std::vec;

/// Check that a component is a DAG and return its sinks
///
/// Sinks are the nodes without children, in component order. The walk starts
/// from every sink and goes up through parent edges, so every node that can
/// reach a sink is proven acyclic along the way.
///
/// # Errors
/// - [`LayoutError::SelfLoop`] if a node is its own child or parent
/// - [`LayoutError::NoSinkInComponent`] if every node has a child
/// - [`LayoutError::CycleDetected`] if the component contains a cycle
pub fn validate<G>(graph: &G, component: &[G::NodeId]) -> Result<Vec<G::NodeId>, LayoutError<G::NodeId>>
where
    G: Adjacency,
{
    let mut sinks = Vec::new();

    for &node in component {
        if graph
            .children(node)
            .chain(graph.parents(node))
            .any(|other| other == node)
        {
            return Err(LayoutError::SelfLoop(node));
        }
        if graph.children(node).next().is_none() {
            sinks.push(node);
        }
    }

    if sinks.is_empty() && !component.is_empty() {
        return Err(LayoutError::NoSinkInComponent);
    }

    let visited = check_ancestors(graph, &sinks)?;

    // Nodes that cannot reach any sink only lead into a cycle
    if let Some(&stray) = component.iter().find(|node| !visited.contains(*node)) {
        return Err(LayoutError::CycleDetected(find_cycle(graph, stray)));
    }

    Ok(sinks)
}

/// Three-color depth-first walk up from the sinks
///
/// `visited` holds every node reached so far, `on_path` the ones on the
/// current path. Returns the visited set.
fn check_ancestors<G>(graph: &G, sinks: &[G::NodeId]) -> Result<HashSet<G::NodeId>, LayoutError<G::NodeId>>
where
    G: Adjacency,
{
    let mut visited = HashSet::new();
    let mut on_path = HashSet::new();
    let mut stack: Vec<(G::NodeId, vec::IntoIter<G::NodeId>)> = Vec::new();

    for &sink in sinks {
        if !visited.insert(sink) {
            continue;
        }
        on_path.insert(sink);
        stack.push((sink, parents_of(graph, sink)));

        while let Some((node, parents)) = stack.last_mut() {
            let node = *node;
            let Some(parent) = parents.next() else {
                on_path.remove(&node);
                stack.pop();
                continue;
            };

            if on_path.contains(&parent) {
                return Err(LayoutError::CycleDetected(parent));
            }
            if visited.insert(parent) {
                on_path.insert(parent);
                stack.push((parent, parents_of(graph, parent)));
            }
        }
    }

    Ok(visited)
}

/// Follow first children from `start` until a node repeats
///
/// Only called on nodes that reach no sink: all their descendants have
/// children too, so the walk always ends on a node of a cycle.
fn find_cycle<G>(graph: &G, start: G::NodeId) -> G::NodeId
where
    G: Adjacency,
{
    let mut seen = HashSet::new();
    let mut node = start;
    while seen.insert(node) {
        match graph.children(node).next() {
            Some(child) => node = child,
            None => break,
        }
    }
    node
}

fn parents_of<G: Adjacency>(graph: &G, node: G::NodeId) -> vec::IntoIter<G::NodeId> {
    graph.parents(node).collect::<Vec<_>>().into_iter()
}
