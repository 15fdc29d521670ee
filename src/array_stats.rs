use crate::float_trait::Float;

use ndarray::{Array1, ArrayView1};

/// Cumulative sums with a leading zero, `result[i]` is the sum of the first `i` elements
pub fn partial_sums<T>(arr: ArrayView1<T>) -> Array1<T>
where
    T: Float,
{
    std::iter::once(T::zero())
        .chain(arr.iter().scan(T::zero(), |state, &x| {
            *state += x;
            Some(*state)
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn partial_sums_basic() {
        let arr = array![1.0f64, 2.0, 3.0, 4.0];
        assert_eq!(partial_sums(arr.view()), array![0.0, 1.0, 3.0, 6.0, 10.0]);
    }

    #[test]
    fn partial_sums_empty() {
        let arr: Array1<f32> = Array1::from(vec![]);
        assert_eq!(partial_sums(arr.view()), array![0.0]);
    }

    #[test]
    fn partial_sums_differences() {
        let arr = array![0.5f32, 0.25, 2.0];
        let sums = partial_sums(arr.view());
        assert_eq!(sums[3] - sums[1], 2.25);
    }
}
