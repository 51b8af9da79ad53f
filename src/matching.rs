use std::fmt;

use crate::error::{MatchingStateError, Result};

/// Pairing state between the left and right vertices `0..order`.
///
/// Both directions are stored so every query is O(1). No graph is
/// attached: callers only add edges that exist in the graph they are
/// working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BipartiteGraphMatching {
    left_to_right: Vec<Option<usize>>,
    right_to_left: Vec<Option<usize>>,
    cardinality: usize,
}

impl BipartiteGraphMatching {
    /// Empty matching over `order` vertices on each side.
    pub fn new(order: usize) -> Self {
        Self {
            left_to_right: vec![None; order],
            right_to_left: vec![None; order],
            cardinality: 0,
        }
    }

    pub fn order(&self) -> usize {
        self.left_to_right.len()
    }

    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    pub fn is_perfect(&self) -> bool {
        self.cardinality == self.order()
    }

    pub fn is_left_covered(&self, left: usize) -> bool {
        self.get_right_match(left).is_some()
    }

    pub fn is_right_covered(&self, right: usize) -> bool {
        self.get_left_match(right).is_some()
    }

    pub fn get_right_match(&self, left: usize) -> Option<usize> {
        self.left_to_right.get(left).copied().flatten()
    }

    pub fn get_left_match(&self, right: usize) -> Option<usize> {
        self.right_to_left.get(right).copied().flatten()
    }

    /// Pairs `left` with `right`. Both must be uncovered.
    pub fn add_edge(&mut self, left: usize, right: usize) -> Result<()> {
        let order = self.order();
        if left >= order || right >= order {
            return Err(MatchingStateError::OutOfRange { left, right, order }.into());
        }
        if let Some(current) = self.left_to_right[left] {
            return Err(MatchingStateError::LeftCovered {
                left,
                right: current,
            }
            .into());
        }
        if let Some(current) = self.right_to_left[right] {
            return Err(MatchingStateError::RightCovered {
                left: current,
                right,
            }
            .into());
        }

        self.left_to_right[left] = Some(right);
        self.right_to_left[right] = Some(left);
        self.cardinality += 1;
        Ok(())
    }

    /// Unpairs `left` and `right`, which must currently be matched together.
    pub fn remove_edge(&mut self, left: usize, right: usize) -> Result<()> {
        if self.get_right_match(left) != Some(right) {
            return Err(MatchingStateError::NotPaired { left, right }.into());
        }

        self.left_to_right[left] = None;
        self.right_to_left[right] = None;
        self.cardinality -= 1;
        Ok(())
    }

    /// Matched `(left, right)` pairs in increasing left order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.left_to_right
            .iter()
            .enumerate()
            .filter_map(|(left, right)| right.map(|right| (left, right)))
    }

    pub fn uncovered_left(&self) -> impl Iterator<Item = usize> + '_ {
        self.left_to_right
            .iter()
            .enumerate()
            .filter_map(|(left, right)| right.is_none().then_some(left))
    }

    /// The right partner of every left vertex, if the matching is perfect.
    pub fn permutation(&self) -> Option<Vec<usize>> {
        self.left_to_right.iter().copied().collect()
    }
}

impl fmt::Display for BipartiteGraphMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (left, right)) in self.pairs().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{left} -> {right}")?;
        }
        write!(f, "}}")
    }
}
