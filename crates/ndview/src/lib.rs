//! Strided, rank-typed views over shared numeric buffers.
//!
//! An [`ArrayView`] pairs a reference counted [`Storage`] with a [`Selector`]
//! describing which elements of it the view addresses. Indexing, slicing and
//! axis merging derive new views over the same storage; writes through any
//! view are visible through all of them.
mod array;
mod close;
mod dtype;
mod enforcer;
mod iter;
#[cfg(feature = "testing")]
mod ndarray_ext;
mod ops;
mod selector;
mod shape;
mod storage;
mod strides;

pub use array::*;
pub use dtype::*;
pub use enforcer::*;
pub use iter::*;
pub use ops::*;
pub use selector::*;
pub use shape::*;
pub use storage::*;
pub use strides::*;

/// Rank 0 view over a single element.
pub type Scalar<T = f64> = ArrayView<0, T>;
pub type Vector<T = f64> = ArrayView<1, T>;
pub type Matrix<T = f64> = ArrayView<2, T>;

#[macro_export]
macro_rules! shape {
    ($($x:expr),*$(,)*) => ({
        $crate::Shape::new([$($x,)*])
    });
}

pub mod prelude {
    pub use crate::{shape, ArrayView, BinaryOp, Matrix, Scalar, Selector, Vector};
}
