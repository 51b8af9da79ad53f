//! Row/column reduction and dual adjustment of a cost matrix.
//!
//! Both operations subtract constants from whole rows and add constants
//! to whole columns, so the reduced matrix always differs from the
//! original by fixed row and column offsets.

use nalgebra::{Dim, RawStorageMut, SquareMatrix};

use crate::error::{Error, InputShapeError, Result};
use crate::search::AlternatingTree;

/// Element type of a cost matrix.
pub trait Weight:
    nalgebra::Scalar
    + Copy
    + PartialOrd
    + num_traits::Zero
    + num_traits::Bounded
    + std::ops::SubAssign
    + std::ops::AddAssign
{
}

impl<T> Weight for T where
    T: nalgebra::Scalar
        + Copy
        + PartialOrd
        + num_traits::Zero
        + num_traits::Bounded
        + std::ops::SubAssign
        + std::ops::AddAssign
{
}

/// `false` for NaN and for values beyond the type's bounds, such as
/// floating point infinities.
pub(crate) fn is_finite<T: Weight>(value: T) -> bool {
    value.partial_cmp(&value).is_some()
        && value >= T::min_value()
        && value <= T::max_value()
}

fn smallest<T: Weight>(values: impl Iterator<Item = T>) -> Option<T> {
    values.reduce(|min, v| if v < min { v } else { min })
}

/// Outcome of a single [`dual_adjust`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualStep<T> {
    pub delta: T,
    /// First entry, in row-major order, that attained `delta` and is now zero.
    pub row: usize,
    pub col: usize,
}

/// Subtracts each row's minimum from that row, then each column's minimum
/// from that column.
///
/// Afterwards every row and column holds a zero, and no entry of a
/// non-negative matrix goes below zero.
pub fn initial_reduce<T, D, S>(costs: &mut SquareMatrix<T, D, S>)
where
    T: Weight,
    D: Dim,
    S: RawStorageMut<T, D, D>,
{
    // subtract minimum value from each respective row
    costs.row_iter_mut().for_each(|mut r| {
        if let Some(min) = smallest(r.iter().copied()) {
            r.iter_mut().for_each(|v| *v -= min);
        }
    });

    // subtract minimum value from each respective col
    costs.column_iter_mut().for_each(|mut c| {
        if let Some(min) = smallest(c.iter().copied()) {
            c.iter_mut().for_each(|v| *v -= min);
        }
    });
}

/// Shifts the duals around a failed search's tree.
///
/// `delta` is the smallest entry in a tree row outside the tree columns.
/// It is subtracted from every tree row and added to every tree column,
/// which keeps tight edges inside the tree tight and creates at least one
/// new tight edge leaving it.
///
/// Entries that would grow past `T::max_value()` saturate there. The
/// remaining adjustments of a solve sum to less than its optimum, so a
/// saturated entry never becomes tight while the optimum is representable.
pub fn dual_adjust<T, D, S>(
    costs: &mut SquareMatrix<T, D, S>,
    tree: &AlternatingTree,
) -> Result<DualStep<T>>
where
    T: Weight,
    D: Dim,
    S: RawStorageMut<T, D, D>,
{
    let (rows, cols) = costs.shape();
    if rows != cols {
        return Err(InputShapeError::NonSquare { rows, cols }.into());
    }
    if tree.order() != rows {
        return Err(InputShapeError::TreeOrderMismatch {
            tree: tree.order(),
            matrix: rows,
        }
        .into());
    }

    let mut step: Option<DualStep<T>> = None;
    for row in tree.left() {
        for col in (0..cols).filter(|&col| !tree.contains_right(col)) {
            let value = costs[(row, col)];
            if step.map_or(true, |s| value < s.delta) {
                step = Some(DualStep {
                    delta: value,
                    row,
                    col,
                });
            }
        }
    }
    let step = step.ok_or(Error::ReductionExhausted)?;
    let delta = step.delta;
    let mut headroom = T::max_value();
    headroom -= delta;

    // net change per entry: tree rows inside tree columns cancel out
    costs.column_iter_mut().enumerate().for_each(|(j, mut c)| {
        let in_tree = tree.contains_right(j);
        c.iter_mut()
            .enumerate()
            .for_each(|(i, v)| match (tree.contains_left(i), in_tree) {
                (true, false) => *v -= delta,
                (false, true) if *v > headroom => *v = T::max_value(),
                (false, true) => *v += delta,
                _ => {}
            });
    });

    Ok(step)
}
