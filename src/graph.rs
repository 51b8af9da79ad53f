use std::fmt;

use nalgebra::{Dim, Matrix, RawStorage};

use crate::error::{InputShapeError, Result};

/// Bipartite graph with `order` vertices on each side, stored as the
/// right-neighbour list of every left vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BipartiteGraph {
    order: usize,
    adjacency: Vec<Vec<usize>>,
}

impl BipartiteGraph {
    /// Builds a graph from one neighbour list per left vertex.
    ///
    /// Repeated neighbours are collapsed, first occurrence wins.
    pub fn new(order: usize, adjacency: Vec<Vec<usize>>) -> Result<Self> {
        if adjacency.len() != order {
            return Err(InputShapeError::AdjacencyRows {
                order,
                rows: adjacency.len(),
            }
            .into());
        }

        let mut seen = vec![false; order];
        let mut cleaned = Vec::with_capacity(order);
        for (left, rights) in adjacency.into_iter().enumerate() {
            let mut row = Vec::with_capacity(rights.len());
            for right in rights {
                if right >= order {
                    return Err(InputShapeError::VertexOutOfRange { left, right, order }.into());
                }
                if !seen[right] {
                    seen[right] = true;
                    row.push(right);
                }
            }
            row.iter().for_each(|&r| seen[r] = false);
            cleaned.push(row);
        }

        Ok(Self {
            order,
            adjacency: cleaned,
        })
    }

    /// Builds a graph from an edge list.
    pub fn from_edges<I>(order: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut adjacency = vec![Vec::new(); order];
        for (left, right) in edges {
            if left >= order || right >= order {
                return Err(InputShapeError::VertexOutOfRange { left, right, order }.into());
            }
            adjacency[left].push(right);
        }
        Self::new(order, adjacency)
    }

    /// Graph of the zero entries of a square matrix: edge `(i, j)` exists
    /// iff `costs[(i, j)]` is zero.
    pub fn from_tight_entries<T, R, C, S>(costs: &Matrix<T, R, C, S>) -> Result<Self>
    where
        T: num_traits::Zero,
        R: Dim,
        C: Dim,
        S: RawStorage<T, R, C>,
    {
        let (rows, cols) = costs.shape();
        if rows != cols {
            return Err(InputShapeError::NonSquare { rows, cols }.into());
        }

        let adjacency = (0..rows)
            .map(|row| (0..cols).filter(|&col| costs[(row, col)].is_zero()).collect())
            .collect();

        Ok(Self {
            order: rows,
            adjacency,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Right vertices adjacent to `left`. Empty for out-of-range vertices.
    pub fn right_neighbors(&self, left: usize) -> &[usize] {
        self.adjacency.get(left).map_or(&[], Vec::as_slice)
    }

    pub fn has_edge(&self, left: usize, right: usize) -> bool {
        self.right_neighbors(left).contains(&right)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

impl fmt::Display for BipartiteGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (left, rights) in self.adjacency.iter().enumerate() {
            writeln!(f, "{left}: {rights:?}")?;
        }
        Ok(())
    }
}
