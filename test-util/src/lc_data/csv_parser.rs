use crate::lc_data::{Error, EventRecord, PointLightCurve, PointRecord};

use bayesian_blocks::Float;
use itertools::{Itertools, process_results};
use std::io::Read;

pub(super) fn arrivals_from_reader<T, R>(reader: R) -> Result<Vec<T>, Error>
where
    T: Float,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let arrivals = csv_reader
        .deserialize()
        .map(|record: Result<EventRecord, _>| record.map(|record| record.time()))
        .collect::<Result<_, csv::Error>>()?;
    Ok(arrivals)
}

pub(super) fn points_from_reader<T, R>(reader: R) -> Result<PointLightCurve<T>, Error>
where
    T: Float,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let iter = csv_reader
        .deserialize()
        .map(|record: Result<PointRecord, _>| -> Result<_, csv::Error> {
            Ok(record?.into_triple::<T>())
        });
    let (t, flux, fluxerr): (Vec<_>, Vec<_>, Vec<_>) =
        process_results(iter, |iter| iter.multiunzip())?;
    Ok(PointLightCurve {
        t: t.into(),
        flux: flux.into(),
        fluxerr: fluxerr.into(),
    })
}
