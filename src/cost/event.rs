use crate::array_stats::partial_sums;
use crate::cost::BlockCostTrait;
use crate::error::BlocksError;
use crate::float_trait::Float;

use ndarray::{Array1, ArrayView1};

/// Poisson block likelihood for event counts
///
/// For a block of total size $S$ and total content $N$ the maximum-likelihood rate is $N / S$ and
/// the log-likelihood up to a partition-independent constant is
/// $$
/// \ln L = N \left(\ln\frac{N}{S} - 1\right).
/// $$
/// Blocks without content have zero cost. Works for both unbinned events (unity content per cell)
/// and binned, possibly weighted, counts.
#[derive(Clone, Debug, PartialEq)]
pub struct EventCost<T> {
    size_partial_sums: Array1<T>,
    content_partial_sums: Array1<T>,
}

impl<T> EventCost<T>
where
    T: Float,
{
    /// `sizes` and `contents` must have the same length
    pub fn new(sizes: ArrayView1<T>, contents: ArrayView1<T>) -> Result<Self, BlocksError> {
        if sizes.len() != contents.len() {
            return Err(BlocksError::LengthMismatch {
                expected: sizes.len(),
                actual: contents.len(),
            });
        }
        Ok(Self {
            size_partial_sums: partial_sums(sizes),
            content_partial_sums: partial_sums(contents),
        })
    }

    /// Total size of cells `imin..=imax`
    #[inline]
    pub fn block_size(&self, imin: usize, imax: usize) -> T {
        self.size_partial_sums[imax + 1] - self.size_partial_sums[imin]
    }

    /// Total content of cells `imin..=imax`
    #[inline]
    pub fn block_content(&self, imin: usize, imax: usize) -> T {
        self.content_partial_sums[imax + 1] - self.content_partial_sums[imin]
    }
}

impl<T> BlockCostTrait<T> for EventCost<T>
where
    T: Float,
{
    #[inline]
    fn cell_count(&self) -> usize {
        self.size_partial_sums.len() - 1
    }

    fn block_cost(&self, imin: usize, imax: usize) -> T {
        let content = self.block_content(imin, imax);
        if content.is_zero() {
            return T::zero();
        }
        let size = self.block_size(imin, imax);
        content * ((content / size).ln() - T::one())
    }
}
