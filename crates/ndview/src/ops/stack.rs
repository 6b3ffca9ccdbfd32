use crate::{ArrayDType, ArrayView, Enforcer, InvariantError, Shape};

/// Copies equally shaped rank `L` views into a new rank `H` array, along a
/// new leading axis.
pub(crate) fn stack_into<const L: usize, const H: usize, T: ArrayDType>(
    views: &[ArrayView<L, T>],
) -> Result<ArrayView<H, T>, InvariantError> {
    assert_eq!(L + 1, H);
    Enforcer::check_input_arity_range(views.len(), 1..=usize::MAX)?;
    let inner = views[0].shape();
    for view in views.iter().skip(1) {
        Enforcer::check_shapes(&inner, &view.shape())?;
    }
    log::debug!("Stacking {} views of shape {:?}", views.len(), inner);

    let shape: [usize; H] = std::array::from_fn(|n| match n {
        0 => views.len(),
        n => inner[n - 1],
    });
    let data = views.iter().flat_map(|view| view.values()).collect();
    Ok(ArrayView::owned(Shape::new(shape), data))
}

macro_rules! impl_stack {
    ($($L:literal => $H:literal),* $(,)?) => {
        $(
            impl<T: ArrayDType> ArrayView<$H, T> {
                /// Stacks `views` along a new leading axis into fresh storage.
                ///
                /// Panics if `views` is empty or the shapes differ.
                pub fn stack(views: &[ArrayView<$L, T>]) -> Self {
                    Self::try_stack(views).unwrap_or_else(|e| panic!("{}", e))
                }

                pub fn try_stack(views: &[ArrayView<$L, T>]) -> Result<Self, InvariantError> {
                    stack_into(views)
                }
            }
        )*
    };
}

impl_stack!(0 => 1, 1 => 2, 2 => 3, 3 => 4, 4 => 5, 5 => 6);

#[cfg(test)]
mod tests {
    use crate::{ArrayView, InvariantError};

    #[test]
    fn test_stack_scalars() {
        let values = [1.0, 2.0, 3.0].map(ArrayView::scalar);
        let v = ArrayView::<1>::stack(&values);
        assert_eq!(v.shape(), [3]);
        assert_eq!(v.to_vec(), vec![1.0, 2.0, 3.0]);
        assert!(!v.shares(&values[0]));
    }

    #[test]
    fn test_stack_rows() {
        let rows = [
            ArrayView::<1>::from(vec![1.0, 2.0]),
            ArrayView::<1>::from(vec![3.0, 4.0]),
            ArrayView::<1>::from(vec![5.0, 6.0]),
        ];
        let m = ArrayView::<2>::stack(&rows);
        assert_eq!(m.shape(), [3, 2]);
        assert_eq!(m.at(1).to_vec(), vec![3.0, 4.0]);
        assert_eq!(m[[2, 1]].get(), 6.0);
    }

    #[test]
    fn test_stack_strided_inputs() {
        let a = ArrayView::<2>::from_vec([3, 3], (0..9).map(|x| x as f64).collect());
        let columns = [a.combine_axis(0).within_step(0..9, 3), a.combine_axis(0).within_step(2..9, 3)];
        let s = ArrayView::<2>::stack(&columns);
        assert_eq!(s.to_vec(), vec![0.0, 3.0, 6.0, 2.0, 5.0, 8.0]);
    }

    #[test]
    fn test_stack_empty() {
        let err = ArrayView::<3>::try_stack(&[]).unwrap_err();
        assert!(matches!(err, InvariantError::InputArity { actual: 0, .. }));
    }

    #[test]
    fn test_stack_shape_mismatch() {
        let views = [ArrayView::<1>::zeros([2]), ArrayView::<1>::zeros([3])];
        assert_eq!(
            ArrayView::<2>::try_stack(&views).unwrap_err(),
            InvariantError::ShapeMismatch { axis: 0, a: 2, b: 3 }
        );
    }
}
