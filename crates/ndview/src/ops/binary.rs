use crate::{ArrayDType, ArrayView, Enforcer, InvariantError};
#[cfg(test)]
use test_strategy::Arbitrary;

#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
        }
    }

    pub fn operator(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    #[inline]
    pub fn apply<T: ArrayDType>(&self, lhs: T, rhs: T) -> T {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
        }
    }
}

/// Elementwise arithmetic. Shapes must match exactly.
impl<const R: usize, T: ArrayDType> ArrayView<R, T> {
    /// Applies `op` elementwise into a freshly allocated array.
    pub fn binary(&self, other: &Self, op: BinaryOp) -> Result<Self, InvariantError> {
        Enforcer::check_shapes(&self.shape(), &other.shape())?;
        log::debug!("Binary {} ({}) over {:?}", op.name(), op.operator(), self.shape());
        let data = self
            .values()
            .zip(other.values())
            .map(|(l, r)| op.apply(l, r))
            .collect();
        Ok(Self::owned(self.shape(), data))
    }

    pub fn binary_scalar(&self, rhs: T, op: BinaryOp) -> Self {
        let data = self.values().map(|l| op.apply(l, rhs)).collect();
        Self::owned(self.shape(), data)
    }

    /// Applies `op` elementwise, writing through this view.
    ///
    /// `other` is read element by element as the writes progress, so it should
    /// not overlap this view unless it is this view.
    pub fn binary_inplace(&self, other: &Self, op: BinaryOp) -> Result<(), InvariantError> {
        Enforcer::check_shapes(&self.shape(), &other.shape())?;
        log::debug!("Inplace binary {} ({}) over {:?}", op.name(), op.operator(), self.shape());
        self.iter()
            .zip(other.iter())
            .for_each(|(l, r)| l.set(op.apply(l.get(), r.get())));
        Ok(())
    }

    pub fn binary_scalar_inplace(&self, rhs: T, op: BinaryOp) {
        self.iter().for_each(|l| l.set(op.apply(l.get(), rhs)));
    }
}

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:expr) => {
        impl<const R: usize, T: ArrayDType> std::ops::$trait<&ArrayView<R, T>> for &ArrayView<R, T> {
            type Output = ArrayView<R, T>;

            fn $method(self, rhs: &ArrayView<R, T>) -> Self::Output {
                self.binary(rhs, $op).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl<const R: usize, T: ArrayDType> std::ops::$trait<ArrayView<R, T>> for ArrayView<R, T> {
            type Output = ArrayView<R, T>;

            fn $method(self, rhs: ArrayView<R, T>) -> Self::Output {
                self.binary(&rhs, $op).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl<const R: usize, T: ArrayDType> std::ops::$trait<T> for &ArrayView<R, T> {
            type Output = ArrayView<R, T>;

            fn $method(self, rhs: T) -> Self::Output {
                self.binary_scalar(rhs, $op)
            }
        }

        impl<const R: usize, T: ArrayDType> std::ops::$trait<T> for ArrayView<R, T> {
            type Output = ArrayView<R, T>;

            fn $method(self, rhs: T) -> Self::Output {
                self.binary_scalar(rhs, $op)
            }
        }

        impl<const R: usize, T: ArrayDType> std::ops::$assign_trait<&ArrayView<R, T>>
            for ArrayView<R, T>
        {
            fn $assign_method(&mut self, rhs: &ArrayView<R, T>) {
                self.binary_inplace(rhs, $op)
                    .unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl<const R: usize, T: ArrayDType> std::ops::$assign_trait<T> for ArrayView<R, T> {
            fn $assign_method(&mut self, rhs: T) {
                self.binary_scalar_inplace(rhs, $op)
            }
        }
    };
}

impl_binary_operator!(Add, add, AddAssign, add_assign, BinaryOp::Add);
impl_binary_operator!(Sub, sub, SubAssign, sub_assign, BinaryOp::Sub);
impl_binary_operator!(Mul, mul, MulAssign, mul_assign, BinaryOp::Mul);
impl_binary_operator!(Div, div, DivAssign, div_assign, BinaryOp::Div);

impl<const R: usize, T: ArrayDType> std::ops::Neg for &ArrayView<R, T> {
    type Output = ArrayView<R, T>;

    fn neg(self) -> Self::Output {
        ArrayView::owned(self.shape(), self.values().map(|x| -x).collect())
    }
}

impl<const R: usize, T: ArrayDType> std::ops::Neg for ArrayView<R, T> {
    type Output = ArrayView<R, T>;

    fn neg(self) -> Self::Output {
        -&self
    }
}

#[cfg(all(test, feature = "rand", feature = "testing"))]
mod tests {
    use crate::{shape, ArrayView, BinaryOp, InvariantError};
    use ndarray::ArrayD;
    use test_strategy::{proptest, Arbitrary};

    #[derive(Arbitrary, Debug)]
    struct BinaryProblem {
        op: BinaryOp,
        #[strategy(1..=8usize)]
        rows: usize,
        #[strategy(1..=64usize)]
        cols: usize,
    }

    fn ground_truth(a: &ArrayD<f32>, b: &ArrayD<f32>, op: BinaryOp) -> ArrayD<f32> {
        match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        }
    }

    fn run_binary_trial(prob: BinaryProblem) -> anyhow::Result<()> {
        let BinaryProblem { op, rows, cols } = prob;
        let a = ArrayView::<2, f32>::randn(shape![rows, cols]);
        let b = ArrayView::<2, f32>::randn(shape![rows, cols]);
        let ground = ArrayView::<2, f32>::try_from(ground_truth(
            &a.to_ndarray(),
            &b.to_ndarray(),
            op,
        ))?;

        let c = a.binary(&b, op)?;
        ground.all_close(&c, 1e-6, 1e-6)?;

        a.binary_inplace(&b, op)?;
        ground.all_close(&a, 1e-6, 1e-6)?;
        Ok(())
    }

    #[proptest(cases = 16)]
    fn test_binary(prob: BinaryProblem) {
        let _ = env_logger::builder().is_test(true).try_init();
        run_binary_trial(prob).unwrap();
    }

    #[test]
    fn test_operators() {
        let a = ArrayView::<1>::from(vec![1.0, 2.0, 3.0]);
        let b = ArrayView::<1>::from(vec![4.0, 5.0, 6.0]);
        assert_eq!((&a + &b).to_vec(), vec![5.0, 7.0, 9.0]);
        assert_eq!((&b - &a).to_vec(), vec![3.0, 3.0, 3.0]);
        assert_eq!((&a * &b).to_vec(), vec![4.0, 10.0, 18.0]);
        assert_eq!((&b / &a).to_vec(), vec![4.0, 2.5, 2.0]);
        assert_eq!((&a * 2.0).to_vec(), vec![2.0, 4.0, 6.0]);
        assert_eq!((-&a).to_vec(), vec![-1.0, -2.0, -3.0]);

        let c = a.clone() + b.clone();
        assert!(!c.shares(&a));
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_assign_operators_write_through() {
        let a = ArrayView::<2>::from_elem([2, 3], 1.0);
        let mut row = a.at(1);
        row += 2.0;
        row *= &ArrayView::<1>::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(a.to_vec(), vec![1.0, 1.0, 1.0, 3.0, 6.0, 9.0]);

        let mut all = a.clone();
        all -= 1.0;
        assert_eq!(a.at(0).to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = ArrayView::<2>::zeros([2, 3]);
        let b = ArrayView::<2>::zeros([3, 2]);
        assert_eq!(
            a.binary(&b, BinaryOp::Add).unwrap_err(),
            InvariantError::ShapeMismatch { axis: 0, a: 2, b: 3 }
        );
        assert!(a.binary_inplace(&b, BinaryOp::Mul).is_err());
    }

    #[test]
    #[should_panic(expected = "Shape mismatch")]
    fn test_operator_panics_on_mismatch() {
        let a = ArrayView::<1>::zeros([2]);
        let b = ArrayView::<1>::zeros([3]);
        let _ = &a + &b;
    }

    #[test]
    fn test_strided_operands() {
        let a = ArrayView::<1>::from((0..10).map(|x| x as f64).collect::<Vec<_>>());
        let evens = a.within_step(0..10, 2);
        let odds = a.within_step(1..10, 2);
        assert_eq!((&evens + &odds).to_vec(), vec![1.0, 5.0, 9.0, 13.0, 17.0]);
    }

    #[test]
    fn test_op_names() {
        assert_eq!(BinaryOp::Div.name(), "div");
        assert_eq!(BinaryOp::Sub.operator(), "-");
    }
}
