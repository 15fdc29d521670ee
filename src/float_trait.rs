use conv::prelude::*;
use ndarray::NdFloat;
use num_traits::{FloatConst, NumAssignOps};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::iter::Sum;

/// Floating point type the segmentation works with, implemented for [`f32`] and [`f64`]
pub trait Float:
    'static
    + Sized
    + NdFloat
    + num_traits::Float
    + FloatConst
    + NumAssignOps
    + Sum
    + ApproxFrom<usize>
    + ApproxFrom<f64>
    + Serialize
    + DeserializeOwned
{
    fn half() -> Self;
    fn three() -> Self;
}

impl Float for f32 {
    #[inline]
    fn half() -> Self {
        0.5
    }

    #[inline]
    fn three() -> Self {
        3.0
    }
}

impl Float for f64 {
    #[inline]
    fn half() -> Self {
        0.5
    }

    #[inline]
    fn three() -> Self {
        3.0
    }
}
