//! Bipartite matchings and the assignment problem.
//!
//! Matchings are grown along augmenting paths found by breadth-first
//! search over the alternating tree. The assignment problem is solved
//! with the Hungarian method: the cost matrix is reduced until its zero
//! entries admit a perfect matching.
//!
//! ```rust
//! use hungarian_matching::hungarian;
//!
//! #[rustfmt::skip]
//! let costs = nalgebra::Matrix3::from_row_slice(&[
//!     4., 1., 3.,
//!     2., 0., 5.,
//!     3., 2., 2.,
//! ]);
//! let assignment = hungarian(&costs).unwrap();
//! assert_eq!(assignment.permutation(), vec![1, 0, 2]);
//! assert_eq!(assignment.total_cost(), 5.);
//! ```

mod config;
mod error;
mod graph;
mod hungarian;
mod matcher;
mod matching;
mod reduce;
mod search;

pub use config::{NegativeWeights, SolverConfig};
pub use error::{Error, InputShapeError, MatchingStateError, Result};
pub use graph::BipartiteGraph;
pub use hungarian::{hungarian, Assignment, HungarianSolver, SolveStats};
pub use matcher::{augment_to_maximum, max_cardinality_matching, perfect_matching};
pub use matching::BipartiteGraphMatching;
pub use reduce::{dual_adjust, initial_reduce, DualStep, Weight};
pub use search::{find_augmenting_path, AlternatingTree, AugmentingPath, SearchOutcome, Vertex};
