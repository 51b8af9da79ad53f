//! Error types for matching and assignment.

use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building matchings or solving assignments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input, detected before any algorithmic work.
    #[error(transparent)]
    InputShape(#[from] InputShapeError),

    /// Misuse of a [`BipartiteGraphMatching`](crate::BipartiteGraphMatching).
    #[error(transparent)]
    MatchingState(#[from] MatchingStateError),

    /// The graph admits no perfect matching.
    ///
    /// `hall_violator` is a set of left vertices whose neighbourhood is
    /// strictly smaller than the set itself.
    #[error(
        "perfect matching does not exist: reached cardinality {cardinality} of {order}, \
         left vertices {hall_violator:?} have too few neighbours"
    )]
    PerfectMatchingNotExists {
        cardinality: usize,
        order: usize,
        hall_violator: Vec<usize>,
    },

    /// The configured cap on dual adjustments was reached before the
    /// matching became perfect.
    #[error("dual adjustment limit of {limit} reached")]
    DualAdjustmentLimit { limit: usize },

    /// No entry was left to tighten during dual adjustment.
    #[error("cost reduction exhausted: no entry outside the alternating tree to tighten")]
    ReductionExhausted,
}

/// Input that cannot be interpreted as a square cost matrix or bipartite graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputShapeError {
    #[error("cost matrix must be square, got {rows}x{cols}")]
    NonSquare { rows: usize, cols: usize },

    #[error("row {row} has {got} entries, expected {expected}")]
    JaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("adjacency has {rows} rows for order {order}")]
    AdjacencyRows { order: usize, rows: usize },

    #[error("graph of order {graph} used with matching of order {matching}")]
    OrderMismatch { graph: usize, matching: usize },

    #[error("alternating tree of order {tree} used with a {matrix}x{matrix} matrix")]
    TreeOrderMismatch { tree: usize, matrix: usize },

    #[error("edge ({left}, {right}) out of range for order {order}")]
    VertexOutOfRange {
        left: usize,
        right: usize,
        order: usize,
    },

    #[error("weight at ({row}, {col}) is not a finite number")]
    NonFiniteWeight { row: usize, col: usize },

    #[error("weight at ({row}, {col}) is negative")]
    NegativeWeight { row: usize, col: usize },
}

/// Invalid transition of the pairing state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingStateError {
    #[error("left vertex {left} is already matched to {right}")]
    LeftCovered { left: usize, right: usize },

    #[error("right vertex {right} is already matched to {left}")]
    RightCovered { left: usize, right: usize },

    #[error("edge ({left}, {right}) is not in the matching")]
    NotPaired { left: usize, right: usize },

    #[error("edge ({left}, {right}) out of range for order {order}")]
    OutOfRange {
        left: usize,
        right: usize,
        order: usize,
    },

    #[error("search root {left} is covered or out of range")]
    RootCovered { left: usize },
}
