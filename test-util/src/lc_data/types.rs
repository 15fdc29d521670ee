use bayesian_blocks::Float;
use bayesian_blocks::ndarray::Array1;
use conv::ConvUtil;
use serde::Deserialize;

/// Flux measurements with 1-sigma errors
// We cannot return `CellSequence`, because it would cause cyclic crate dependencies
#[derive(Clone, Debug)]
pub struct PointLightCurve<T> {
    pub t: Array1<T>,
    pub flux: Array1<T>,
    pub fluxerr: Array1<T>,
}

impl<T> PointLightCurve<T> {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn into_triple(self) -> (Array1<T>, Array1<T>, Array1<T>) {
        (self.t, self.flux, self.fluxerr)
    }
}

#[derive(Deserialize)]
pub(super) struct EventRecord {
    time: f64,
}

impl EventRecord {
    pub(super) fn time<T: Float>(&self) -> T {
        self.time.approx_as().unwrap()
    }
}

#[derive(Deserialize)]
pub(super) struct PointRecord {
    time: f64,
    flux: f64,
    fluxerr: f64,
}

impl PointRecord {
    pub(super) fn into_triple<T: Float>(self) -> (T, T, T) {
        (
            self.time.approx_as().unwrap(),
            self.flux.approx_as().unwrap(),
            self.fluxerr.approx_as().unwrap(),
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub(super) enum Error {
    #[error(transparent)]
    CsvError(#[from] csv::Error),
    #[error("test data file {0} is not found")]
    NotFound(String),
}
