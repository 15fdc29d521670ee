use crate::lc_data::Error;
use crate::lc_data::csv_parser::arrivals_from_reader;

use bayesian_blocks::Float;
use include_dir::{Dir, include_dir};
use itertools::Itertools;
use lazy_static::lazy_static;
use std::path::Path;

const EVENTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/../test-data/events");

fn events_from_file<T, P>(path: P) -> Result<Vec<T>, Error>
where
    T: Float,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = EVENTS_DIR
        .get_file(path)
        .ok_or_else(|| Error::NotFound(path.display().to_string()))?;
    arrivals_from_reader(file.contents())
}

/// Arrival times of a bundled event list, e.g. `"step.csv"`
pub fn event_arrivals<T, P>(path: P) -> Vec<T>
where
    T: Float,
    P: AsRef<Path>,
{
    events_from_file(path).unwrap()
}

pub fn iter_event_arrivals<T>() -> impl Iterator<Item = (String, Vec<T>)>
where
    T: Float,
{
    EVENTS_DIR
        .find("**/*.csv")
        .unwrap()
        .filter_map(|entry| {
            let path = entry.as_file()?.path();
            Some((
                path.to_str().unwrap().to_owned(),
                events_from_file(path).ok()?,
            ))
        })
        .sorted_by(|a, b| a.0.cmp(&b.0))
}

lazy_static! {
    pub static ref EVENTS_F64: Vec<(String, Vec<f64>)> = iter_event_arrivals().collect();
}
