use crate::error::BlocksError;
use crate::float_trait::Float;

use conv::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Prior penalty for every additional block
///
/// Empirical calibration of Scargle et al. (2013, ApJ 764, 167) for event data: a prior of
/// $$
/// \mathrm{ncp\_prior} = 4 - \ln\left(73.53\, p\, N^{-0.478}\right)
/// $$
/// gives false positive rate $p$ of a single spurious change point in a sequence of $N$ cells.
///
/// Fails with [`BlocksError::InvalidArgument`] unless $0 < p < 1$ and $N \geq 1$.
pub fn ncp_prior<T>(num_points: usize, p: T) -> Result<T, BlocksError>
where
    T: Float,
{
    if num_points == 0 {
        return Err(BlocksError::InvalidArgument(
            "number of points must be positive",
        ));
    }
    if !(p > T::zero() && p < T::one()) {
        return Err(BlocksError::InvalidArgument(
            "false positive rate must be in the (0, 1) interval",
        ));
    }
    let n: T = num_points
        .approx()
        .map_err(|_| BlocksError::InvalidArgument("number of points is out of range"))?;
    let coeff = cast::<T>(73.53)?;
    let index = cast::<T>(-0.478)?;
    Ok(cast::<T>(4.0)? - (coeff * p * n.powf(index)).ln())
}

fn cast<T: Float>(x: f64) -> Result<T, BlocksError> {
    x.approx()
        .map_err(|_| BlocksError::InvalidArgument("value cannot be represented as float"))
}

/// Choice of the per-block prior penalty
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NcpPrior {
    /// The penalty is given explicitly
    Fixed { value: f64 },
    /// The penalty is calibrated for the given false positive rate and the cell count, see
    /// [`ncp_prior`]
    FalsePositiveRate { p: f64 },
}

impl NcpPrior {
    /// Resolve the penalty for a sequence of `num_points` cells
    pub fn value<T>(&self, num_points: usize) -> Result<T, BlocksError>
    where
        T: Float,
    {
        match *self {
            Self::Fixed { value } => {
                if !value.is_finite() {
                    return Err(BlocksError::InvalidArgument("ncp_prior must be finite"));
                }
                cast(value)
            }
            Self::FalsePositiveRate { p } => ncp_prior(num_points, cast(p)?),
        }
    }
}
