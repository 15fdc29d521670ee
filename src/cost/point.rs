use crate::array_stats::partial_sums;
use crate::cost::BlockCostTrait;
use crate::error::BlocksError;
use crate::float_trait::Float;

use ndarray::{Array1, ArrayView1, Zip};

/// Gaussian block likelihood for point measurements with known errors
///
/// A block of measurements $f_k$ with errors $\sigma_k$ is described by a constant equal to the
/// inverse-variance weighted mean. With normalized weights
/// $w_k = \sigma_k^{-2} / \sum_l \sigma_l^{-2}$ the cost is
/// $$
/// \ln L = -\frac{\sigma_x^2}{2} \sum_k \sigma_k^{-2},
/// \quad \sigma_x^2 = \sum_k w_k f_k^2 - \left(\sum_k w_k f_k\right)^2.
/// $$
///
/// Values are stored relative to the weighted mean of the whole sequence, the cost is invariant
/// under this shift and the partial sums stay small for data with a large constant level.
#[derive(Clone, Debug, PartialEq)]
pub struct PointCost<T> {
    offset: T,
    weight_partial_sums: Array1<T>,
    weighted_value_partial_sums: Array1<T>,
    weighted_square_partial_sums: Array1<T>,
}

impl<T> PointCost<T>
where
    T: Float,
{
    /// `values` and `errors` must have the same length, errors must be positive
    pub fn new(values: ArrayView1<T>, errors: ArrayView1<T>) -> Result<Self, BlocksError> {
        if values.len() != errors.len() {
            return Err(BlocksError::LengthMismatch {
                expected: values.len(),
                actual: errors.len(),
            });
        }
        let weights = errors.mapv(|sigma| sigma.powi(-2));
        let total_weight = weights.sum();
        let offset = if total_weight > T::zero() {
            weights.dot(&values) / total_weight
        } else {
            T::zero()
        };
        let weighted_values = Zip::from(&weights)
            .and(&values)
            .map_collect(|&w, &f| w * (f - offset));
        let weighted_squares = Zip::from(&weighted_values)
            .and(&values)
            .map_collect(|&wf, &f| wf * (f - offset));
        Ok(Self {
            offset,
            weight_partial_sums: partial_sums(weights.view()),
            weighted_value_partial_sums: partial_sums(weighted_values.view()),
            weighted_square_partial_sums: partial_sums(weighted_squares.view()),
        })
    }

    /// Sum of inverse variances of cells `imin..=imax`
    #[inline]
    pub fn block_weight(&self, imin: usize, imax: usize) -> T {
        self.weight_partial_sums[imax + 1] - self.weight_partial_sums[imin]
    }

    /// Inverse-variance weighted mean of cells `imin..=imax`
    pub fn block_mean(&self, imin: usize, imax: usize) -> T {
        self.offset
            + (self.weighted_value_partial_sums[imax + 1] - self.weighted_value_partial_sums[imin])
                / self.block_weight(imin, imax)
    }
}

impl<T> BlockCostTrait<T> for PointCost<T>
where
    T: Float,
{
    #[inline]
    fn cell_count(&self) -> usize {
        self.weight_partial_sums.len() - 1
    }

    fn block_cost(&self, imin: usize, imax: usize) -> T {
        let sum_w = self.block_weight(imin, imax);
        let sum_wf =
            self.weighted_value_partial_sums[imax + 1] - self.weighted_value_partial_sums[imin];
        let sum_wff =
            self.weighted_square_partial_sums[imax + 1] - self.weighted_square_partial_sums[imin];
        // sum_w * sigma_x^2
        let scatter = sum_wff - sum_wf * sum_wf / sum_w;
        -T::half() * scatter
    }
}
