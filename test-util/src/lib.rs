pub use fixtures::{Histogram, piecewise_uniform_events};
pub use lc_data::PointLightCurve;
pub use lc_data::events::{EVENTS_F64, event_arrivals, iter_event_arrivals};
pub use lc_data::points::{POINT_LIGHT_CURVES_F64, iter_point_light_curves, point_light_curve};

mod fixtures;
mod lc_data;
