use crate::float_trait::Float;
use crate::types::CowArray1;

use ndarray::{Array1, ArrayView1};

/// Array-like input of the [`CellSequence`](crate::CellSequence) builders
///
/// Could be constructed from [`ndarray::Array1`], [`ndarray::ArrayView1`], 1-D
/// [`ndarray::CowArray`], `Vec<T>` or anything referencing a slice.
#[derive(Clone, Debug)]
pub struct DataSample<'a, T>
where
    T: Float,
{
    pub sample: CowArray1<'a, T>,
}

impl<'a, T> DataSample<'a, T>
where
    T: Float,
{
    pub fn new(sample: CowArray1<'a, T>) -> Self {
        Self { sample }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sample.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.sample.iter().copied().collect()
    }

    pub fn into_array(self) -> Array1<T> {
        self.sample.into_owned()
    }

    /// Index of the first NaN or infinite value
    pub fn position_non_finite(&self) -> Option<usize> {
        self.sample.iter().position(|x| !x.is_finite())
    }

    /// Index of the first value which is not strictly positive
    pub fn position_non_positive(&self) -> Option<usize> {
        self.sample.iter().position(|&x| x <= T::zero())
    }
}

impl<'a, T, Slice: ?Sized> From<&'a Slice> for DataSample<'a, T>
where
    T: Float,
    Slice: AsRef<[T]>,
{
    fn from(s: &'a Slice) -> Self {
        ArrayView1::from(s.as_ref()).into()
    }
}

impl<T> From<Vec<T>> for DataSample<'_, T>
where
    T: Float,
{
    fn from(v: Vec<T>) -> Self {
        Array1::from(v).into()
    }
}

impl<'a, T> From<ArrayView1<'a, T>> for DataSample<'a, T>
where
    T: Float,
{
    fn from(a: ArrayView1<'a, T>) -> Self {
        Self::new(a.into())
    }
}

impl<T> From<Array1<T>> for DataSample<'_, T>
where
    T: Float,
{
    fn from(a: Array1<T>) -> Self {
        Self::new(a.into())
    }
}

impl<'a, T> From<CowArray1<'a, T>> for DataSample<'a, T>
where
    T: Float,
{
    fn from(a: CowArray1<'a, T>) -> Self {
        Self::new(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{array, s};

    #[test]
    fn from_slice_vec_and_arrays() {
        let v = vec![1.0_f64, 2.0, 3.0];
        assert_eq!(DataSample::<f64>::from(&v).to_vec(), v);
        assert_eq!(DataSample::<f64>::from(&v[..]).to_vec(), v);
        assert_eq!(DataSample::<f64>::from(v.clone()).to_vec(), v);
        let a = array![1.0_f64, 2.0, 3.0];
        assert_eq!(DataSample::from(a.view()).to_vec(), v);
        assert_eq!(DataSample::from(a).into_array().to_vec(), v);
    }

    #[test]
    fn strided_view() {
        let a = array![0.0_f32, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ds = DataSample::from(a.slice(s![..;2]));
        assert_eq!(ds.to_vec(), [0.0, 2.0, 4.0]);
    }

    #[test]
    fn positions() {
        let ds = DataSample::<f64>::from(&[1.0_f64, 0.5, 0.0, f64::NAN, -1.0]);
        assert_eq!(ds.position_non_positive(), Some(2));
        assert_eq!(ds.position_non_finite(), Some(3));

        let ds = DataSample::<f64>::from(&[1.0_f64, 2.0]);
        assert_eq!(ds.position_non_positive(), None);
        assert_eq!(ds.position_non_finite(), None);
    }
}
