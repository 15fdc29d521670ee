use crate::lc_data::csv_parser::points_from_reader;
use crate::lc_data::{Error, PointLightCurve};

use bayesian_blocks::Float;
use include_dir::{Dir, include_dir};
use itertools::Itertools;
use lazy_static::lazy_static;
use std::path::Path;

const POINTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/../test-data/points");

fn points_from_file<T, P>(path: P) -> Result<PointLightCurve<T>, Error>
where
    T: Float,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = POINTS_DIR
        .get_file(path)
        .ok_or_else(|| Error::NotFound(path.display().to_string()))?;
    points_from_reader(file.contents())
}

/// Bundled point-measurement light curve, e.g. `"three_levels.csv"`
pub fn point_light_curve<T, P>(path: P) -> PointLightCurve<T>
where
    T: Float,
    P: AsRef<Path>,
{
    points_from_file(path).unwrap()
}

pub fn iter_point_light_curves<T>() -> impl Iterator<Item = (String, PointLightCurve<T>)>
where
    T: Float,
{
    POINTS_DIR
        .find("**/*.csv")
        .unwrap()
        .filter_map(|entry| {
            let path = entry.as_file()?.path();
            Some((
                path.to_str().unwrap().to_owned(),
                points_from_file(path).ok()?,
            ))
        })
        .sorted_by(|a, b| a.0.cmp(&b.0))
}

lazy_static! {
    pub static ref POINT_LIGHT_CURVES_F64: Vec<(String, PointLightCurve<f64>)> =
        iter_point_light_curves().collect();
}
