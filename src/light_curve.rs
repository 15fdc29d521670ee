use crate::data::CellSequence;
use crate::error::BlocksError;
use crate::float_trait::Float;
use crate::optimizer::ChangePoints;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Piecewise-constant light curve of the Bayesian Blocks
///
/// Every block is a horizontal step, its start and end coordinates and its value are stored twice,
/// so `x` and `y` have two elements per block and can be plotted as a line directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct LightCurve<T> {
    pub x: Vec<T>,
    pub y: Vec<T>,
}

impl<T> LightCurve<T>
where
    T: Float,
{
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.x.len() / 2
    }

    /// `(x_start, x_end, y)` of every block
    pub fn blocks(&self) -> impl Iterator<Item = (T, T, T)> + '_ {
        self.x
            .iter()
            .tuples()
            .zip(self.y.iter().step_by(2))
            .map(|((&x_start, &x_end), &y)| (x_start, x_end, y))
    }
}

/// Build the step light curve of the given partition
///
/// Block edges come from the cell widths, so replaced cell sizes do not shift the curve. Block
/// values are the count rate in counting modes and the inverse-variance weighted mean for point
/// measurements.
pub fn reconstruct<T>(
    cells: &CellSequence<T>,
    change_points: &ChangePoints,
) -> Result<LightCurve<T>, BlocksError>
where
    T: Float,
{
    if change_points.cell_count() != cells.len() {
        return Err(BlocksError::LengthMismatch {
            expected: cells.len(),
            actual: change_points.cell_count(),
        });
    }
    let mut x = Vec::with_capacity(2 * change_points.num_blocks());
    let mut y = Vec::with_capacity(2 * change_points.num_blocks());
    for (imin, imax) in change_points.blocks() {
        x.push(cells.boundary(imin));
        x.push(cells.boundary(imax));
        let value = cells.block_value(imin, imax - 1);
        y.push(value);
        y.push(value);
    }
    log::trace!(
        "Light curve of {} blocks spans [{:?}, {:?}]",
        change_points.num_blocks(),
        x.first(),
        x.last(),
    );
    Ok(LightCurve { x, y })
}
