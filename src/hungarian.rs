use nalgebra::{DMatrix, Dim, Matrix, RawStorage};
use tracing::{debug, debug_span, trace};

use crate::config::{NegativeWeights, SolverConfig};
use crate::error::{Error, InputShapeError, Result};
use crate::graph::BipartiteGraph;
use crate::matching::BipartiteGraphMatching;
use crate::reduce::{dual_adjust, initial_reduce, is_finite, Weight};
use crate::search::{find_augmenting_path, SearchOutcome};

/// Counters describing how a solve progressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub augmentations: usize,
    pub dual_adjustments: usize,
}

/// Minimum-cost perfect matching of a cost matrix.
#[derive(Debug, Clone)]
pub struct Assignment<T> {
    matching: BipartiteGraphMatching,
    total_cost: T,
    stats: SolveStats,
}

impl<T: Copy> Assignment<T> {
    pub fn matching(&self) -> &BipartiteGraphMatching {
        &self.matching
    }

    pub fn into_matching(self) -> BipartiteGraphMatching {
        self.matching
    }

    /// `(row, col)` pairs of the assignment, usable as matrix indices.
    pub fn assignment(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matching.pairs()
    }

    /// Column assigned to each row.
    pub fn permutation(&self) -> Vec<usize> {
        self.matching.pairs().map(|(_, col)| col).collect()
    }

    /// Sum of the assigned entries of the original cost matrix.
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }
}

/// Solves `costs` with the default [`SolverConfig`].
pub fn hungarian<T, R, C, S>(costs: &Matrix<T, R, C, S>) -> Result<Assignment<T>>
where
    T: Weight,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    HungarianSolver::default().solve(costs)
}

/// Hungarian method over the graph of tight (zero reduced cost) entries.
///
/// The solver repeatedly searches for an augmenting path of tight edges
/// from the first uncovered row. When none exists the duals are shifted
/// around the search tree, which adds a tight edge, and the search is
/// retried.
#[derive(Debug, Clone, Default)]
pub struct HungarianSolver {
    config: SolverConfig,
}

impl HungarianSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves a cost matrix given as rows, which may be jagged.
    pub fn solve_rows<T, Row>(&self, rows: &[Row]) -> Result<Assignment<T>>
    where
        T: Weight,
        Row: AsRef<[T]>,
    {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.as_ref().len() != cols)
        {
            return Err(InputShapeError::JaggedRow {
                row,
                expected: cols,
                got: r.as_ref().len(),
            }
            .into());
        }

        let costs = DMatrix::from_fn(rows.len(), cols, |i, j| rows[i].as_ref()[j]);
        self.solve(&costs)
    }

    /// Solves the assignment problem for `costs`, leaving it untouched.
    pub fn solve<T, R, C, S>(&self, costs: &Matrix<T, R, C, S>) -> Result<Assignment<T>>
    where
        T: Weight,
        R: Dim,
        C: Dim,
        S: RawStorage<T, R, C>,
    {
        let mut reduced = self.prepare(costs)?;
        let order = reduced.nrows();
        let _span = debug_span!("hungarian", order).entered();

        initial_reduce(&mut reduced);

        let mut matching = BipartiteGraphMatching::new(order);
        let mut stats = SolveStats::default();
        loop {
            let Some(root) = matching.uncovered_left().next() else {
                break;
            };

            let graph = BipartiteGraph::from_tight_entries(&reduced)?;
            match find_augmenting_path(&graph, &matching, &[root])? {
                SearchOutcome::Found(path) => {
                    trace!(root, length = path.len(), "augmenting");
                    path.apply(&mut matching)?;
                    stats.augmentations += 1;
                }
                SearchOutcome::Exhausted(tree) => {
                    if let Some(limit) = self
                        .config
                        .max_dual_adjustments
                        .filter(|&limit| stats.dual_adjustments >= limit)
                    {
                        debug!(limit, "dual adjustment limit reached");
                        return Err(Error::DualAdjustmentLimit { limit });
                    }
                    let step = dual_adjust(&mut reduced, &tree)?;
                    trace!(
                        root,
                        delta = ?step.delta,
                        row = step.row,
                        col = step.col,
                        "dual adjustment"
                    );
                    stats.dual_adjustments += 1;
                }
            }
        }

        let total_cost = matching
            .pairs()
            .fold(T::zero(), |acc, (row, col)| acc + costs[(row, col)]);
        debug!(
            augmentations = stats.augmentations,
            dual_adjustments = stats.dual_adjustments,
            "assignment found"
        );

        Ok(Assignment {
            matching,
            total_cost,
            stats,
        })
    }

    /// Validates `costs` and copies it into an owned, non-negative
    /// working matrix.
    fn prepare<T, R, C, S>(&self, costs: &Matrix<T, R, C, S>) -> Result<DMatrix<T>>
    where
        T: Weight,
        R: Dim,
        C: Dim,
        S: RawStorage<T, R, C>,
    {
        let (rows, cols) = costs.shape();
        if rows != cols {
            return Err(InputShapeError::NonSquare { rows, cols }.into());
        }

        let mut min: Option<T> = None;
        for row in 0..rows {
            for col in 0..cols {
                let value = costs[(row, col)];
                if !is_finite(value) {
                    return Err(InputShapeError::NonFiniteWeight { row, col }.into());
                }
                if value < T::zero() {
                    if self.config.negative_weights == NegativeWeights::Reject {
                        return Err(InputShapeError::NegativeWeight { row, col }.into());
                    }
                    if min.map_or(true, |m| value < m) {
                        min = Some(value);
                    }
                }
            }
        }

        let mut working = DMatrix::from_fn(rows, cols, |i, j| costs[(i, j)]);
        if let Some(min) = min {
            debug!(shift = ?min, "shifting negative weights");
            working.iter_mut().for_each(|v| *v -= min);
        }
        Ok(working)
    }
}

#[cfg(test)]
mod test {
    use nalgebra::{Dim, Matrix, Matrix1, Matrix2, Matrix2x3, Matrix4, Matrix5, RawStorage};

    use super::*;

    fn assert_costs<R, C, S>(
        costs: &Matrix<f64, R, C, S>,
        assignment: &Assignment<f64>,
        cost_expected: f64,
        epsilon: f64,
    ) -> bool
    where
        R: Dim,
        C: Dim,
        S: RawStorage<f64, R, C>,
    {
        let summed = assignment
            .assignment()
            .map(|a| costs.get(a).expect("within cost bounds"))
            .sum::<f64>();
        (summed - cost_expected).abs() < epsilon
            && (assignment.total_cost() - cost_expected).abs() < epsilon
    }

    #[test]
    fn basic_two() {
        #[rustfmt::skip]
        let costs = Matrix2::from_row_slice(
            &[
                1., 2.,
                2., 1.,
            ]
        );
        let assignment = hungarian(&costs).unwrap();
        assert!(assert_costs(&costs, &assignment, 2., f64::EPSILON));
    }

    #[test]
    fn basic_two_rev() {
        #[rustfmt::skip]
        let costs = Matrix2::from_row_slice(
            &[
                1., 2.,
                2., 100.
            ]
        );
        let assignment = hungarian(&costs).unwrap();
        assert!(assert_costs(&costs, &assignment, 4., f64::EPSILON));
        assert_eq!(assignment.permutation(), vec![1, 0]);
    }

    #[test]
    fn already_reduced() {
        #[rustfmt::skip]
        let costs = Matrix2::from_row_slice(
            &[
                0., 1.,
                1., 0.,
            ]
        );
        let assignment = hungarian(&costs).unwrap();
        assert_eq!(assignment.permutation(), vec![0, 1]);
        assert_eq!(assignment.total_cost(), 0.);
        assert_eq!(assignment.stats().dual_adjustments, 0);
    }

    #[test]
    fn single_entry() {
        let costs = Matrix1::new(5);
        let assignment = hungarian(&costs).unwrap();
        assert_eq!(assignment.permutation(), vec![0]);
        assert_eq!(assignment.total_cost(), 5);
        assert_eq!(
            assignment.stats(),
            SolveStats {
                augmentations: 1,
                dual_adjustments: 0
            }
        );
    }

    #[test]
    fn empty_matrix() {
        let costs = DMatrix::<f64>::zeros(0, 0);
        let assignment = hungarian(&costs).unwrap();
        assert!(assignment.matching().is_perfect());
        assert_eq!(assignment.total_cost(), 0.);
    }

    #[test]
    fn basic_four() {
        #[rustfmt::skip]
        let costs = Matrix4::from_row_slice(
            &[
                82., 83., 69., 92.,
                77., 37., 49., 92.,
                11., 69.,  5., 86.,
                 8.,  9., 98., 23.,
            ]
        );
        let assignment = hungarian(&costs).unwrap();
        assert!(assert_costs(&costs, &assignment, 140., f64::EPSILON));
    }

    #[test]
    fn basic_five() {
        #[rustfmt::skip]
        let costs = Matrix5::from_row_slice(
            &[
                10., 5.,13.,15.,16.,
                 3., 9.,18.,13., 6.,
                10., 7., 2., 2., 2.,
                 7.,11., 9., 7.,12.,
                 7., 9.,10., 4.,12.,
            ]
        );
        let assignment = hungarian(&costs).unwrap();
        assert!(assert_costs(&costs, &assignment, 23., f64::EPSILON));
    }

    #[test]
    fn basic_five_2() {
        #[rustfmt::skip]
        let costs = Matrix5::from_row_slice(
            &[
                20., 15., 18., 20., 25.,
                18., 20., 12., 14., 15.,
                21., 23., 25., 27., 25.,
                17., 18., 21., 23., 20.,
                18., 18., 16., 19., 20.,
            ]
        );
        let assignment = hungarian(&costs).unwrap();
        assert!(assert_costs(&costs, &assignment, 86., f64::EPSILON));
    }

    #[test]
    fn five_by_five_integer() {
        #[rustfmt::skip]
        let costs = Matrix5::from_row_slice(
            &[
                 6,  7,  8, 14,  7,
                 8, 14,  6,  9,  7,
                14, 14, 13,  9, 11,
                 5, 12, 10,  9, 14,
                 6, 10,  8, 10, 15,
            ]
        );
        let assignment = hungarian(&costs).unwrap();
        assert_eq!(assignment.total_cost(), 36);
        assert_eq!(assignment.permutation(), vec![1, 4, 3, 0, 2]);
        // the caller's matrix is not reduced in place
        assert_eq!(costs[(0, 0)], 6);
    }

    #[test]
    fn unsigned_weights() {
        let costs = DMatrix::<u32>::from_row_slice(3, 3, &[4, 1, 3, 2, 0, 5, 3, 2, 2]);
        let assignment = hungarian(&costs).unwrap();
        assert_eq!(assignment.total_cost(), 5);
        assert_eq!(assignment.permutation(), vec![1, 0, 2]);
    }

    #[test]
    fn unsigned_weights_near_max() {
        // optimum 246 fits in u8 but intermediate duals would not
        #[rustfmt::skip]
        let costs = DMatrix::<u8>::from_row_slice(3, 3, &[
            194, 238,   6,
            225, 192,   0,
             48, 116, 206,
        ]);
        let assignment = hungarian(&costs).unwrap();
        assert_eq!(assignment.permutation(), vec![2, 1, 0]);
        assert_eq!(assignment.total_cost(), 246);
    }

    #[test]
    fn non_square_is_rejected() {
        let costs = Matrix2x3::from_row_slice(&[1., 2., 3., 4., 5., 6.]);
        assert_eq!(
            hungarian(&costs).unwrap_err(),
            Error::InputShape(InputShapeError::NonSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn non_finite_is_rejected() {
        let costs = Matrix2::from_row_slice(&[1., f64::NAN, f64::INFINITY, 0.]);
        assert_eq!(
            hungarian(&costs).unwrap_err(),
            Error::InputShape(InputShapeError::NonFiniteWeight { row: 0, col: 1 })
        );
    }

    #[test]
    fn negative_weights_follow_policy() {
        let costs = Matrix2::from_row_slice(&[-3, 1, 2, -1]);
        assert_eq!(
            hungarian(&costs).unwrap_err(),
            Error::InputShape(InputShapeError::NegativeWeight { row: 0, col: 0 })
        );

        let solver = HungarianSolver::new(
            SolverConfig::default().with_negative_weights(NegativeWeights::Shift),
        );
        let assignment = solver.solve(&costs).unwrap();
        assert_eq!(assignment.permutation(), vec![0, 1]);
        assert_eq!(assignment.total_cost(), -4);
    }

    #[test]
    fn rows_input() {
        let solver = HungarianSolver::default();
        let assignment = solver.solve_rows(&[[0, 1], [1, 0]]).unwrap();
        assert_eq!(assignment.permutation(), vec![0, 1]);

        let jagged = vec![vec![1., 2.], vec![3.]];
        assert_eq!(
            solver.solve_rows(&jagged[..]).unwrap_err(),
            Error::InputShape(InputShapeError::JaggedRow {
                row: 1,
                expected: 2,
                got: 1
            })
        );

        let wide = vec![vec![1., 2., 3.], vec![3., 4., 5.]];
        assert_eq!(
            solver.solve_rows(&wide[..]).unwrap_err(),
            Error::InputShape(InputShapeError::NonSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn dual_adjustment_limit() {
        #[rustfmt::skip]
        let costs = Matrix4::from_row_slice(
            &[
                82, 83, 69, 92,
                77, 37, 49, 92,
                11, 69,  5, 86,
                 8,  9, 98, 23,
            ]
        );
        let unbounded = hungarian(&costs).unwrap();
        assert!(unbounded.stats().dual_adjustments > 0);

        let solver = HungarianSolver::new(SolverConfig::default().with_max_dual_adjustments(0));
        assert_eq!(
            solver.solve(&costs).unwrap_err(),
            Error::DualAdjustmentLimit { limit: 0 }
        );

        let solver = HungarianSolver::new(SolverConfig::default().with_max_dual_adjustments(1));
        assert_eq!(solver.solve(&costs).unwrap().total_cost(), 140);
    }
}
