use crate::cost::BlockCostTrait;
use crate::data::CellSequence;
use crate::error::BlocksError;
use crate::float_trait::Float;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Cell indices delimiting blocks
///
/// Strictly increasing, starts with zero and ends with the number of cells, so the `i`-th block
/// consists of cells `self[i]..self[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct ChangePoints(Vec<usize>);

impl ChangePoints {
    /// Validate externally obtained change points for a sequence of `cell_count` cells
    pub fn new(indices: Vec<usize>, cell_count: usize) -> Result<Self, BlocksError> {
        let change_points = Self::try_from(indices)?;
        if change_points.cell_count() != cell_count {
            return Err(BlocksError::InvalidArgument(
                "the last change point must be equal to the number of cells",
            ));
        }
        Ok(change_points)
    }

    /// Number of cells covered
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.0.len() - 1
    }

    /// Change points which are neither the first nor the last cell boundary
    pub fn internal(&self) -> &[usize] {
        &self.0[1..self.0.len() - 1]
    }

    /// Half-open `(start, end)` cell ranges of the blocks
    pub fn blocks(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().copied().tuple_windows()
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl TryFrom<Vec<usize>> for ChangePoints {
    type Error = BlocksError;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        if indices.len() < 2 {
            return Err(BlocksError::InvalidArgument(
                "change points must include both ends of the sequence",
            ));
        }
        if indices[0] != 0 {
            return Err(BlocksError::InvalidArgument(
                "the first change point must be zero",
            ));
        }
        if !indices.iter().tuple_windows().all(|(a, b)| a < b) {
            return Err(BlocksError::InvalidArgument(
                "change points must be strictly increasing",
            ));
        }
        Ok(Self(indices))
    }
}

impl From<ChangePoints> for Vec<usize> {
    fn from(change_points: ChangePoints) -> Self {
        change_points.0
    }
}

impl Deref for ChangePoints {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[usize]> for ChangePoints {
    fn as_ref(&self) -> &[usize] {
        self
    }
}

/// Optimal partition together with its penalized log-likelihood
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct Segmentation<T> {
    pub change_points: ChangePoints,
    /// Sum of block costs minus the prior penalty for every block
    pub score: T,
}

/// Best scores and last change points of every prefix of the cell sequence
struct OptimizationTable<T> {
    best: Vec<T>,
    last: Vec<usize>,
}

impl<T> OptimizationTable<T>
where
    T: Float,
{
    fn fill<C>(cost: &C, ncp_prior: T) -> Self
    where
        C: BlockCostTrait<T>,
    {
        let n = cost.cell_count();
        let mut best = Vec::with_capacity(n);
        let mut last = Vec::with_capacity(n);
        best.push(cost.block_cost(0, 0) - ncp_prior);
        last.push(0);
        for nn in 1..n {
            // the whole prefix as a single block
            let mut max_opt = cost.block_cost(0, nn) - ncp_prior;
            let mut j_max = 0;
            for j in 1..=nn {
                let opt = best[j - 1] + cost.block_cost(j, nn) - ncp_prior;
                // on ties the earliest change point wins
                if opt > max_opt {
                    max_opt = opt;
                    j_max = j;
                }
            }
            best.push(max_opt);
            last.push(j_max);
        }
        Self { best, last }
    }

    fn score(&self) -> T {
        self.best[self.best.len() - 1]
    }

    fn backtrace(&self) -> ChangePoints {
        let n = self.last.len();
        let mut indices = vec![n];
        let mut index = self.last[n - 1];
        while index > 0 {
            indices.push(index);
            index = self.last[index - 1];
        }
        indices.push(0);
        indices.reverse();
        ChangePoints(indices)
    }
}

/// Find the optimal partition for an arbitrary block likelihood
///
/// Exact $O(N^2)$ dynamic programming: every block costs `ncp_prior`, so larger values give fewer
/// blocks.
pub fn optimize_cost<T, C>(cost: &C, ncp_prior: T) -> Result<Segmentation<T>, BlocksError>
where
    T: Float,
    C: BlockCostTrait<T>,
{
    let n = cost.cell_count();
    if n == 0 {
        return Err(BlocksError::InsufficientData {
            actual: 0,
            minimum: 1,
        });
    }
    if !ncp_prior.is_finite() {
        return Err(BlocksError::InvalidArgument("ncp_prior must be finite"));
    }

    let table = OptimizationTable::fill(cost, ncp_prior);
    let segmentation = Segmentation {
        change_points: table.backtrace(),
        score: table.score(),
    };
    log::debug!(
        "Bayesian Blocks with ncp_prior {:.4}: {} cells split into {} blocks, score {:.6e}",
        ncp_prior,
        n,
        segmentation.change_points.num_blocks(),
        segmentation.score,
    );
    Ok(segmentation)
}

/// Find the optimal partition of the cells and its score
pub fn optimize<T>(cells: &CellSequence<T>, ncp_prior: T) -> Result<Segmentation<T>, BlocksError>
where
    T: Float,
{
    optimize_cost(cells.cost(), ncp_prior)
}

/// Find the optimal change points of the cells
pub fn solve<T>(cells: &CellSequence<T>, ncp_prior: T) -> Result<ChangePoints, BlocksError>
where
    T: Float,
{
    Ok(optimize(cells, ncp_prior)?.change_points)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    use crate::cost::EventCost;
    use crate::prior::ncp_prior;
    use crate::tests::*;

    use ndarray::Array1;

    fn check_invariants(change_points: &ChangePoints, n: usize) {
        assert_eq!(change_points[0], 0);
        assert_eq!(change_points.cell_count(), n);
        assert!(change_points.iter().tuple_windows().all(|(a, b)| a < b));
        assert_eq!(change_points.blocks().count(), change_points.num_blocks());
    }

    #[test]
    fn single_cell() {
        let cells = CellSequence::binned(&[3.0_f64], &[1.0], 0.0).unwrap();
        let segmentation = optimize(&cells, 1.0).unwrap();
        assert_eq!(&segmentation.change_points[..], &[0, 1]);
        assert_eq!(segmentation.score, 3.0 * (f64::ln(3.0) - 1.0) - 1.0);
    }

    #[test]
    fn empty_cost_is_insufficient() {
        let cost = EventCost::<f64>::new(Array1::zeros(0).view(), Array1::zeros(0).view()).unwrap();
        assert_eq!(
            optimize_cost(&cost, 1.0).unwrap_err(),
            BlocksError::InsufficientData {
                actual: 0,
                minimum: 1
            }
        );
    }

    #[test]
    fn non_finite_prior() {
        let cells = step_cells::<f64>(&[(10, 1.0)]);
        assert_eq!(
            solve(&cells, f64::NAN).unwrap_err(),
            BlocksError::InvalidArgument("ncp_prior must be finite")
        );
        assert!(solve(&cells, f64::INFINITY).is_err());
    }

    #[test]
    fn constant_rate_is_single_block() {
        let cells = step_cells::<f64>(&[(50, 1.0)]);
        let change_points = solve(&cells, 1000.0).unwrap();
        assert_eq!(&change_points[..], &[0, 50]);
        assert!(change_points.internal().is_empty());
    }

    #[test]
    fn binned_step() {
        let cells = step_cells::<f64>(&[(30, 5.0), (30, 20.0)]);
        let prior = ncp_prior(60, 1e-3).unwrap();
        let change_points = solve(&cells, prior).unwrap();
        assert_eq!(&change_points[..], &[0, 30, 60]);
    }

    #[test]
    fn binned_two_steps_f32() {
        let cells = step_cells::<f32>(&[(20, 2.0), (20, 12.0), (20, 2.0)]);
        let prior = ncp_prior(60, 1e-3_f32).unwrap();
        let change_points = solve(&cells, prior).unwrap();
        assert_eq!(&change_points[..], &[0, 20, 40, 60]);
    }

    #[test]
    fn negative_prior_splits_every_cell() {
        // every extra block is rewarded and single cells have non-positive cost
        let cells = step_cells::<f64>(&[(8, 1.0)]);
        let change_points = solve(&cells, -10.0).unwrap();
        assert_eq!(&change_points[..], &(0..=8).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn ties_keep_fewer_blocks() {
        // Zero-content cells have zero cost, so every partition has the same likelihood and
        // a zero prior makes all of them tie
        let cells = CellSequence::binned(&[0.0_f64; 6], &[1.0; 6], 0.0).unwrap();
        let change_points = solve(&cells, 0.0).unwrap();
        assert_eq!(&change_points[..], &[0, 6]);
    }

    #[test]
    fn empty_gap_is_separate_block() {
        let cells = CellSequence::binned(&[4.0_f64, 0.0, 0.0, 4.0], &[1.0; 4], 0.0).unwrap();
        for _ in 0..3 {
            let change_points = solve(&cells, 0.5).unwrap();
            assert_eq!(&change_points[..], &[0, 1, 3, 4]);
        }
    }

    #[test]
    fn invariants_for_random_events() {
        let mut rng = StdRng::seed_from_u64(0);
        for n in [2, 3, 10, 100] {
            let t = randvec::<f64>(&mut rng, n);
            let cells = CellSequence::unbinned(&t).unwrap();
            for prior in [-5.0, 0.0, 1.0, 3.0, 10.0, 100.0] {
                let change_points = solve(&cells, prior).unwrap();
                check_invariants(&change_points, n);
            }
        }
    }

    #[test]
    fn larger_prior_never_adds_blocks() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = piecewise_uniform_events::<f64>(&mut rng, &[(0.0, 1.0, 50), (1.0, 1.2, 50)]);
        let cells = CellSequence::unbinned(&t).unwrap();
        let blocks: Vec<_> = (0..40)
            .map(|i| 0.5 * i as f64)
            .chain([1e2, 1e3, 1e4])
            .map(|prior| solve(&cells, prior).unwrap().num_blocks())
            .collect();
        assert!(blocks.iter().tuple_windows().all(|(a, b)| a >= b), "{blocks:?}");
        assert!(blocks[0] > 1, "{blocks:?}");
        // a split gains less than N ln(span / smallest cell) which is far below the last prior
        assert_eq!(blocks[blocks.len() - 1], 1);
    }

    #[test]
    fn repeated_solve_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(2);
        let t = piecewise_uniform_events::<f64>(&mut rng, &[(0.0, 1.0, 30), (1.0, 1.5, 60)]);
        let cells = CellSequence::unbinned(&t).unwrap();
        let first = optimize(&cells, 3.0).unwrap();
        let second = optimize(&cells, 3.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn change_points_validation() {
        assert!(ChangePoints::new(vec![0, 3, 5], 5).is_ok());
        assert!(ChangePoints::new(vec![0, 3, 5], 6).is_err());
        assert!(ChangePoints::new(vec![1, 3, 5], 5).is_err());
        assert!(ChangePoints::new(vec![0, 3, 3, 5], 5).is_err());
        assert!(ChangePoints::new(vec![0], 0).is_err());
    }

    #[test]
    fn change_points_blocks() {
        let change_points = ChangePoints::new(vec![0, 2, 7, 9], 9).unwrap();
        assert_eq!(change_points.num_blocks(), 3);
        assert_eq!(change_points.internal(), &[2, 7]);
        assert_eq!(
            change_points.blocks().collect::<Vec<_>>(),
            [(0, 2), (2, 7), (7, 9)]
        );
    }

    #[test]
    fn change_points_serde() {
        let change_points = ChangePoints::new(vec![0, 2, 7, 9], 9).unwrap();
        let json = serde_json::to_string(&change_points).unwrap();
        assert_eq!(json, "[0,2,7,9]");
        let de: ChangePoints = serde_json::from_str(&json).unwrap();
        assert_eq!(de, change_points);
        assert!(serde_json::from_str::<ChangePoints>("[0,5,4]").is_err());
    }
}
