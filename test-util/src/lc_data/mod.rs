pub use types::PointLightCurve;
use types::{Error, EventRecord, PointRecord};

mod csv_parser;
pub(crate) mod events;
pub(crate) mod points;
mod types;
