use crate::data::CellSequence;
use crate::error::BlocksError;
use crate::float_trait::Float;
use crate::light_curve::{LightCurve, reconstruct};
use crate::optimizer::{ChangePoints, Segmentation, optimize};
use crate::prior::NcpPrior;

use macro_const::macro_const;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_const! {
    const DOC: &str = r"
Bayesian Blocks optimal segmentation

Partitions a sequence of $N$ cells into contiguous blocks of constant value, maximizing the total
fitness
$$
F = \sum_{k=1}^{K} \left(\ln L_k - \mathrm{ncp\_prior}\right),
$$
where $\ln L_k$ is the log-likelihood of the $k$-th block and $\mathrm{ncp\_prior}$ is the prior
penalty for every block. The optimum over all $2^{N-1}$ partitions is found exactly in $O(N^2)$
time by dynamic programming (Scargle et al. 2013, ApJ 764, 167).

Counting cells (unbinned events or histogram bins) use the Poisson likelihood
$\ln L = N_k (\ln(N_k / S_k) - 1)$, where $N_k$ is the block content and $S_k$ is its size.
Point measurements use the Gaussian likelihood of the inverse-variance weighted mean.

The penalty is either fixed or calibrated for a false positive rate $p$ of a spurious change point,
$\mathrm{ncp\_prior} = 4 - \ln(73.53\, p\, N^{-0.478})$.

- Depends on: **cell coordinates**, **cell contents** or **measurement values** and **errors**
- Minimum number of cells: **1**, unbinned events require at least **2** arrivals
- Output: change point indices and a piecewise-constant light curve with two points per block
";
}

#[doc = DOC!()]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BayesianBlocks {
    ncp_prior: NcpPrior,
}

impl BayesianBlocks {
    pub fn new(ncp_prior: NcpPrior) -> Self {
        Self { ncp_prior }
    }

    /// Use the same penalty for every sequence
    pub fn with_fixed_ncp_prior(value: f64) -> Self {
        Self::new(NcpPrior::Fixed { value })
    }

    /// Calibrate the penalty for the false positive rate `p` and the sequence length
    pub fn with_false_positive_rate(p: f64) -> Self {
        Self::new(NcpPrior::FalsePositiveRate { p })
    }

    pub fn ncp_prior(&self) -> NcpPrior {
        self.ncp_prior
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    /// Penalty resolved for the given cells
    pub fn penalty<T>(&self, cells: &CellSequence<T>) -> Result<T, BlocksError>
    where
        T: Float,
    {
        self.ncp_prior.value(cells.len())
    }

    pub fn segmentation<T>(&self, cells: &CellSequence<T>) -> Result<Segmentation<T>, BlocksError>
    where
        T: Float,
    {
        optimize(cells, self.penalty(cells)?)
    }

    pub fn change_points<T>(&self, cells: &CellSequence<T>) -> Result<ChangePoints, BlocksError>
    where
        T: Float,
    {
        Ok(self.segmentation(cells)?.change_points)
    }

    /// Optimal partition of the cells mapped to the observation axis
    pub fn light_curve<T>(&self, cells: &CellSequence<T>) -> Result<LightCurve<T>, BlocksError>
    where
        T: Float,
    {
        let change_points = self.change_points(cells)?;
        reconstruct(cells, &change_points)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    use crate::optimizer::solve;
    use crate::prior::ncp_prior;
    use crate::tests::*;

    check_doc_static_method!(doc_static_method, BayesianBlocks);

    serde_json_test!(
        ser_json_de_fixed,
        BayesianBlocks,
        BayesianBlocks::with_fixed_ncp_prior(4.5),
    );

    serde_json_test!(
        ser_json_de_false_positive_rate,
        BayesianBlocks,
        BayesianBlocks::with_false_positive_rate(0.01),
    );

    #[test]
    fn json_layout() {
        let bb = BayesianBlocks::with_fixed_ncp_prior(2.0);
        assert_eq!(
            serde_json::to_string(&bb).unwrap(),
            r#"{"ncp_prior":{"fixed":{"value":2.0}}}"#
        );
    }

    #[test]
    fn json_schema() {
        let schema = schemars::schema_for!(BayesianBlocks);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("ncp_prior"));
        assert!(json.contains("false_positive_rate"));
    }

    #[test]
    fn resolves_penalty_per_sequence() {
        let bb = BayesianBlocks::with_false_positive_rate(0.05);
        let short = step_cells::<f64>(&[(10, 1.0)]);
        let long = step_cells::<f64>(&[(1000, 1.0)]);
        assert_eq!(bb.penalty(&short).unwrap(), ncp_prior(10, 0.05).unwrap());
        assert!(bb.penalty(&long).unwrap() > bb.penalty(&short).unwrap());
    }

    #[test]
    fn invalid_false_positive_rate() {
        let cells = step_cells::<f64>(&[(10, 1.0)]);
        let bb = BayesianBlocks::with_false_positive_rate(1.5);
        assert!(matches!(
            bb.change_points(&cells),
            Err(BlocksError::InvalidArgument(_))
        ));
        assert!(bb.light_curve(&cells).is_err());
    }

    #[test]
    fn same_as_free_functions() {
        let mut rng = StdRng::seed_from_u64(0);
        let t = piecewise_uniform_events::<f64>(&mut rng, &[(0.0, 1.0, 50), (1.0, 1.2, 80)]);
        let cells = CellSequence::unbinned(&t).unwrap();
        let bb = BayesianBlocks::with_false_positive_rate(0.01);
        let penalty = ncp_prior(cells.len(), 0.01).unwrap();
        let change_points = solve(&cells, penalty).unwrap();
        assert_eq!(bb.change_points(&cells).unwrap(), change_points);
        assert_eq!(
            bb.light_curve(&cells).unwrap(),
            reconstruct(&cells, &change_points).unwrap()
        );
        assert_eq!(
            bb.segmentation(&cells).unwrap(),
            optimize(&cells, penalty).unwrap()
        );
    }

    #[test]
    fn detects_burst() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = piecewise_uniform_events::<f64>(
            &mut rng,
            &[(0.0, 4.0, 40), (4.0, 5.0, 100), (5.0, 10.0, 50)],
        );
        let cells = CellSequence::unbinned(&t).unwrap();
        let lc = BayesianBlocks::with_false_positive_rate(0.01)
            .light_curve(&cells)
            .unwrap();
        let (_, _, peak) = lc
            .blocks()
            .max_by(|a, b| a.2.partial_cmp(&b.2).unwrap())
            .unwrap();
        assert!(lc.num_blocks() >= 3, "{lc:?}");
        assert!(peak > 50.0, "{lc:?}");
    }
}
