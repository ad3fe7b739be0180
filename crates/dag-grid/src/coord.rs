use serde::{Deserialize, Serialize};
use std::collections::hash_map;
use std::collections::HashMap;
use std::hash::Hash;

/// Grid cell of a node: `column` grows from sinks towards sources, `row`
/// separates the bands of independent subtrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub column: i64,
    pub row: i64,
}

impl Coord {
    /// Value of a field that was never assigned
    pub const UNSET: i64 = -1;

    /// Coordinate of a node the layout did not reach
    pub const UNASSIGNED: Coord = Coord {
        column: Self::UNSET,
        row: Self::UNSET,
    };

    pub fn new(column: i64, row: i64) -> Self {
        Self { column, row }
    }

    pub fn is_assigned(&self) -> bool {
        self.column >= 0 && self.row >= 0
    }
}

impl Default for Coord {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

/// Coordinate table keyed by node handle
///
/// Lookups of nodes that were never written return [`Coord::UNASSIGNED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coords<N: Eq + Hash> {
    coords: HashMap<N, Coord>,
}

impl<N: Eq + Hash> Default for Coords<N> {
    fn default() -> Self {
        Self {
            coords: HashMap::new(),
        }
    }
}

impl<N> Coords<N>
where
    N: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: N) -> Coord {
        self.coords.get(&node).copied().unwrap_or_default()
    }

    pub fn column(&self, node: N) -> i64 {
        self.get(node).column
    }

    pub fn row(&self, node: N) -> i64 {
        self.get(node).row
    }

    pub fn set_column(&mut self, node: N, column: i64) {
        self.coords.entry(node).or_default().column = column;
    }

    pub fn set_row(&mut self, node: N, row: i64) {
        self.coords.entry(node).or_default().row = row;
    }

    pub fn has_row(&self, node: N) -> bool {
        self.row(node) != Coord::UNSET
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (N, Coord)> + '_ {
        self.coords.iter().map(|(&node, &coord)| (node, coord))
    }
}

impl<N: Eq + Hash> IntoIterator for Coords<N> {
    type Item = (N, Coord);
    type IntoIter = hash_map::IntoIter<N, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_missing_node_is_unassigned() {
        let coords = Coords::<u32>::new();

        assert_eq!(coords.get(3), Coord::UNASSIGNED);
        assert!(!coords.get(3).is_assigned());
        assert!(!coords.has_row(3));
    }

    #[test]
    fn test_fields_are_written_independently() {
        let mut coords = Coords::new();
        coords.set_column(1u32, 4);

        assert_eq!(coords.get(1), Coord::new(4, Coord::UNSET));
        assert!(!coords.get(1).is_assigned());

        coords.set_row(1, 0);
        assert_eq!(coords.get(1), Coord::new(4, 0));
        assert!(coords.get(1).is_assigned());
        assert_eq!(coords.len(), 1);
    }
}
