pub use crate::cost::BlockCostTrait;
pub use crate::float_trait::Float;
