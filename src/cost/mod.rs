//! Block likelihoods maximized by the optimizer

use crate::float_trait::Float;

use enum_dispatch::enum_dispatch;

mod cost_trait;
pub use cost_trait::BlockCostTrait;

mod event;
pub use event::EventCost;

mod point;
pub use point::PointCost;

/// Block cost of a [`CellSequence`](crate::CellSequence), chosen by its [`CellMode`](crate::CellMode)
#[enum_dispatch(BlockCostTrait<T>)]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum BlockCost<T>
where
    T: Float,
{
    Event(EventCost<T>),
    Point(PointCost<T>),
}
