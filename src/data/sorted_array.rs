use crate::error::SortedArrayError;
use crate::float_trait::Float;

use ndarray::Array1;
use std::ops::Deref;

// Underlying array is guaranteed to be sorted and contiguous, callers check for NaN beforehand
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SortedArray<T>(Array1<T>);

impl<T> SortedArray<T>
where
    T: Float,
{
    pub fn from_sorted(sorted_array: impl Into<Array1<T>>) -> Result<Self, SortedArrayError> {
        let sorted_array = sorted_array.into();
        if sorted_array
            .as_slice()
            .ok_or(SortedArrayError::NonContiguous)?
            .is_sorted()
        {
            Ok(Self(sorted_array))
        } else {
            Err(SortedArrayError::Unsorted)
        }
    }
}

impl<T> From<Vec<T>> for SortedArray<T>
where
    T: Float,
{
    fn from(mut v: Vec<T>) -> Self {
        v[..].sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
        Self(Array1::from_vec(v))
    }
}

impl<T> Deref for SortedArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice().unwrap()
    }
}

impl<T> AsRef<[T]> for SortedArray<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}
