use ndarray::{ArrayD, IxDyn};

use crate::{ArrayDType, ArrayView, InvariantError, Shape};

/// Conversion to and from ndarray, used as ground truth in tests.
impl<const R: usize, T: ArrayDType> ArrayView<R, T> {
    /// Copies the addressed elements into an owned ndarray of the same shape.
    pub fn to_ndarray(&self) -> ArrayD<T> {
        let shape = self.shape();
        ArrayD::from_shape_fn(IxDyn(&shape.inner()[..]), |index| {
            self.get(std::array::from_fn(|n| index[n]))
        })
    }
}

impl<const R: usize, T: ArrayDType> TryFrom<ArrayD<T>> for ArrayView<R, T> {
    type Error = InvariantError;

    fn try_from(array: ArrayD<T>) -> Result<Self, Self::Error> {
        let shape = Shape::<R>::try_from(array.shape())?;
        let data = array.iter().copied().collect::<Vec<_>>();
        Self::try_from_vec(shape, data)
    }
}
