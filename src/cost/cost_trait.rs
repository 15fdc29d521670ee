use crate::float_trait::Float;

use enum_dispatch::enum_dispatch;
use std::fmt::Debug;

/// Log-likelihood of a contiguous run of cells treated as a single block
#[enum_dispatch]
pub trait BlockCostTrait<T>: Debug + Clone + Send + Sync
where
    T: Float,
{
    /// Number of cells the cost is defined over
    fn cell_count(&self) -> usize;

    /// Cost of cells `imin..=imax` merged into one block
    ///
    /// Both indices are inclusive, `imin <= imax < cell_count()`.
    fn block_cost(&self, imin: usize, imax: usize) -> T;
}
