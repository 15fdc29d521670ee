#![doc = include_str!("../README.md")]


mod array_stats;

mod bayesian_blocks;
pub use bayesian_blocks::BayesianBlocks;

pub mod cost;
pub use cost::{BlockCost, BlockCostTrait, EventCost, PointCost};

mod data;
pub use data::{CellContent, CellMode, CellSequence, DataSample};

mod error;
pub use error::{BlocksError, SortedArrayError};

mod float_trait;
pub use float_trait::Float;

mod light_curve;
pub use light_curve::{LightCurve, reconstruct};

mod optimizer;
pub use optimizer::{ChangePoints, Segmentation, optimize, optimize_cost, solve};

pub mod prelude;

mod prior;
pub use prior::{NcpPrior, ncp_prior};

mod types;

pub use ndarray;
