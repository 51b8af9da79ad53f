//! Breadth-first search for augmenting paths over the alternating tree.
//!
//! Left vertices leave the tree through non-matching edges, right vertices
//! through their matching edge. The first uncovered right vertex reached
//! ends the search, which makes the returned path a shortest one from the
//! root set.

use std::collections::VecDeque;

use crate::error::{InputShapeError, MatchingStateError, Result};
use crate::graph::BipartiteGraph;
use crate::matching::BipartiteGraphMatching;

/// A vertex of the alternating tree, tagged with its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    Left(usize),
    Right(usize),
}

/// Alternating path from an uncovered left vertex to an uncovered right
/// vertex, stored as `(left, right)` edges in path order.
///
/// Edges at even positions are outside the matching, edges at odd
/// positions are in it, so the length is always odd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    edges: Vec<(usize, usize)>,
}

impl AugmentingPath {
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The uncovered left vertex the path starts from.
    pub fn root(&self) -> Option<usize> {
        self.edges.first().map(|&(left, _)| left)
    }

    /// The uncovered right vertex the path ends at.
    pub fn terminal(&self) -> Option<usize> {
        self.edges.last().map(|&(_, right)| right)
    }

    /// Flips the path in `matching`, growing it by exactly one edge.
    ///
    /// Matching edges are removed before the others are added, so no
    /// endpoint is ever doubly covered.
    pub fn apply(&self, matching: &mut BipartiteGraphMatching) -> Result<()> {
        for &(left, right) in self.edges.iter().skip(1).step_by(2) {
            matching.remove_edge(left, right)?;
        }
        for &(left, right) in self.edges.iter().step_by(2) {
            matching.add_edge(left, right)?;
        }
        Ok(())
    }
}

/// Vertices reached by a search that found no augmenting path.
///
/// Every visited right vertex is covered and its partner is a visited
/// left vertex, so the neighbourhood of `left` is exactly `right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternatingTree {
    left: Vec<bool>,
    right: Vec<bool>,
}

impl AlternatingTree {
    fn new(order: usize) -> Self {
        Self {
            left: vec![false; order],
            right: vec![false; order],
        }
    }

    #[cfg(test)]
    pub(crate) fn from_sets(order: usize, left: &[usize], right: &[usize]) -> Self {
        let mut tree = Self::new(order);
        left.iter().for_each(|&l| tree.left[l] = true);
        right.iter().for_each(|&r| tree.right[r] = true);
        tree
    }

    /// Number of vertices on each side of the searched graph.
    pub fn order(&self) -> usize {
        self.left.len()
    }

    pub fn contains_left(&self, left: usize) -> bool {
        self.left.get(left).copied().unwrap_or(false)
    }

    pub fn contains_right(&self, right: usize) -> bool {
        self.right.get(right).copied().unwrap_or(false)
    }

    /// Visited left vertices, the set X.
    pub fn left(&self) -> impl Iterator<Item = usize> + '_ {
        members(&self.left)
    }

    /// Visited right vertices, the set Y.
    pub fn right(&self) -> impl Iterator<Item = usize> + '_ {
        members(&self.right)
    }
}

fn members(set: &[bool]) -> impl Iterator<Item = usize> + '_ {
    set.iter()
        .enumerate()
        .filter_map(|(vertex, &visited)| visited.then_some(vertex))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(AugmentingPath),
    Exhausted(AlternatingTree),
}

/// Searches for an augmenting path starting from any of `roots`.
///
/// Every root must be an uncovered left vertex. An empty root set yields
/// an empty exhausted tree.
pub fn find_augmenting_path(
    graph: &BipartiteGraph,
    matching: &BipartiteGraphMatching,
    roots: &[usize],
) -> Result<SearchOutcome> {
    let order = graph.order();
    if matching.order() != order {
        return Err(InputShapeError::OrderMismatch {
            graph: order,
            matching: matching.order(),
        }
        .into());
    }

    let mut tree = AlternatingTree::new(order);
    // parent of a left vertex is a right vertex and vice versa
    let mut left_parent: Vec<Option<usize>> = vec![None; order];
    let mut right_parent: Vec<Option<usize>> = vec![None; order];
    let mut queue = VecDeque::with_capacity(2 * order);

    for &root in roots {
        if root >= order || matching.is_left_covered(root) {
            return Err(MatchingStateError::RootCovered { left: root }.into());
        }
        if !tree.left[root] {
            tree.left[root] = true;
            queue.push_back(Vertex::Left(root));
        }
    }

    while let Some(vertex) = queue.pop_front() {
        match vertex {
            Vertex::Left(left) => {
                let matched = matching.get_right_match(left);
                for &right in graph.right_neighbors(left) {
                    if tree.right[right] || matched == Some(right) {
                        continue;
                    }
                    tree.right[right] = true;
                    right_parent[right] = Some(left);

                    if !matching.is_right_covered(right) {
                        return Ok(SearchOutcome::Found(trace_path(
                            &left_parent,
                            &right_parent,
                            right,
                        )));
                    }
                    queue.push_back(Vertex::Right(right));
                }
            }
            Vertex::Right(right) => {
                if let Some(left) = matching.get_left_match(right) {
                    if !tree.left[left] {
                        tree.left[left] = true;
                        left_parent[left] = Some(right);
                        queue.push_back(Vertex::Left(left));
                    }
                }
            }
        }
    }

    Ok(SearchOutcome::Exhausted(tree))
}

fn trace_path(
    left_parent: &[Option<usize>],
    right_parent: &[Option<usize>],
    terminal: usize,
) -> AugmentingPath {
    let mut edges = Vec::new();
    let mut current = Some(Vertex::Right(terminal));

    while let Some(vertex) = current {
        current = match vertex {
            Vertex::Right(right) => right_parent[right].map(|left| {
                edges.push((left, right));
                Vertex::Left(left)
            }),
            Vertex::Left(left) => left_parent[left].map(|right| {
                edges.push((left, right));
                Vertex::Right(right)
            }),
        };
    }

    edges.reverse();
    AugmentingPath { edges }
}
