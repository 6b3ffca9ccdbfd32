use std::cell::Cell;
use std::ops::{Index, Range};

use crate::storage::dump_inner;
use crate::{ArrayDType, DType, Enforcer, InvariantError, Iter, Selector, Shape, Storage, Strides};

#[cfg(feature = "rand")]
use {rand::prelude::*, rand_distr::StandardNormal};

/// A strided view of rank `R` into shared, reference counted storage.
///
/// Views are cheap handles: cloning one, indexing it with [`at`](ArrayView::at)
/// or narrowing it with [`select`](ArrayView::select) yields a new view that
/// aliases the same buffer. Writes through any of them are visible to all.
/// Use [`copy`](ArrayView::copy) to break the aliasing.
///
/// Element access hands out the live [`Cell`] in storage:
///
/// ```
/// use ndview::ArrayView;
///
/// let a = ArrayView::<2>::zeros([3, 4]);
/// let row = a.at(1);
/// row[[2]].set(7.0);
/// assert_eq!(a[[1, 2]].get(), 7.0);
/// assert!(row.shares(&a));
/// ```
#[derive(Clone)]
pub struct ArrayView<const R: usize, T = f64> {
    selector: Selector<R>,
    strides: Strides<R>,
    offset: usize,
    storage: Storage<T>,
}

impl<const R: usize, T: ArrayDType> ArrayView<R, T> {
    /// Creates an exclusively owned array of the given shape, filled with zeros.
    pub fn zeros(shape: impl Into<Shape<R>>) -> Self {
        Self::from_elem(shape, T::zero())
    }

    pub fn from_elem(shape: impl Into<Shape<R>>, value: T) -> Self {
        let shape = shape.into();
        Self::owned(shape, Storage::from_elem(shape.numel(), value))
    }

    /// Creates an array owning `data`, laid out in row-major order.
    ///
    /// Panics if `data` does not hold exactly `shape.numel()` elements.
    pub fn from_vec(shape: impl Into<Shape<R>>, data: Vec<T>) -> Self {
        Self::try_from_vec(shape, data).unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_from_vec(shape: impl Into<Shape<R>>, data: Vec<T>) -> Result<Self, InvariantError> {
        let shape = shape.into();
        Enforcer::check_storage_len(shape.numel(), data.len())?;
        Ok(Self::owned(shape, Storage::from_iter(data)))
    }

    /// Creates a view of `storage` through `selector`.
    ///
    /// The storage must hold exactly the selector's unsliced extent, otherwise
    /// this panics.
    pub fn from_storage(selector: Selector<R>, storage: Storage<T>) -> Self {
        Self::try_from_storage(selector, storage).unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_from_storage(
        selector: Selector<R>,
        storage: Storage<T>,
    ) -> Result<Self, InvariantError> {
        Enforcer::check_storage_len(selector.extent(), storage.len())?;
        Ok(Self::derived(selector, 0, storage))
    }

    #[cfg(feature = "rand")]
    pub fn randn(shape: impl Into<Shape<R>>) -> Self {
        let shape = shape.into();
        let mut rng = rand::thread_rng();
        let data = (0..shape.numel())
            .map(|_| {
                let sample: f64 = StandardNormal.sample(&mut rng);
                <T as num_traits::NumCast>::from(sample).unwrap_or_else(T::nan)
            })
            .collect();
        Self::owned(shape, data)
    }

    pub(crate) fn owned(shape: Shape<R>, storage: Storage<T>) -> Self {
        Self::derived(Selector::full(*shape.inner()), 0, storage)
    }

    pub(crate) fn derived(selector: Selector<R>, offset: usize, storage: Storage<T>) -> Self {
        let selector = selector.reset();
        Self {
            strides: Strides::from(selector.count()),
            selector,
            offset,
            storage,
        }
    }
}

impl<const R: usize, T: ArrayDType> ArrayView<R, T> {
    pub fn shape(&self) -> Shape<R> {
        self.selector.shape()
    }

    pub fn size(&self) -> usize {
        self.selector.size()
    }

    pub fn rank(&self) -> usize {
        R
    }

    pub fn dt(&self) -> DType {
        T::dt()
    }

    pub fn strides(&self) -> &Strides<R> {
        &self.strides
    }

    pub fn selector(&self) -> &Selector<R> {
        &self.selector
    }

    /// Base offset into storage, applied before the selector's offsets.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// True if this view covers its whole storage in order.
    pub fn is_contiguous(&self) -> bool {
        self.selector.is_contiguous() && self.size() == self.storage.len()
    }

    #[inline]
    pub(crate) fn flat_offset(&self, absolute: &[usize; R]) -> usize {
        self.offset
            + absolute
                .iter()
                .zip(self.strides.iter())
                .map(|(i, s)| i * s)
                .sum::<usize>()
    }

    /// Flat storage offset of the element at `index`.
    #[inline]
    pub fn offset_of(&self, index: [usize; R]) -> usize {
        debug_assert!(
            index.iter().zip(self.shape().iter()).all(|(i, n)| i < n),
            "index {:?} out of bounds for shape {:?}",
            index,
            self.shape()
        );
        let (start, skip) = (self.selector.start(), self.selector.skip());
        self.flat_offset(&std::array::from_fn(|n| start[n] + skip[n] * index[n]))
    }

    /// Live handle to the element at `index`.
    #[inline]
    pub fn cell(&self, index: [usize; R]) -> &Cell<T> {
        self.storage.cell(self.offset_of(index))
    }

    #[inline]
    pub fn get(&self, index: [usize; R]) -> T {
        self.cell(index).get()
    }

    #[inline]
    pub fn set(&self, index: [usize; R], value: T) {
        self.cell(index).set(value)
    }

    /// Live handles to every element, in row-major order.
    pub fn iter(&self) -> Iter<'_, R, T> {
        Iter::new(self)
    }

    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().map(Cell::get)
    }

    /// The elements this view addresses, in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.values().collect()
    }
}

/// Selection
impl<const R: usize, T: ArrayDType> ArrayView<R, T> {
    /// Derives a view aliasing this one's storage through a selector built
    /// from this view's own.
    ///
    /// ```
    /// use ndview::ArrayView;
    ///
    /// let a = ArrayView::<3>::zeros([10, 30, 2]);
    /// let b = a.select(|s| s.within(0..10).collapse(4).within(0..2));
    /// assert_eq!(b.shape(), [10, 2]);
    /// assert!(b.shares(&a));
    /// ```
    pub fn select<const L: usize>(
        &self,
        f: impl FnOnce(Selector<R>) -> Selector<L>,
    ) -> ArrayView<L, T> {
        ArrayView::derived(f(self.selector), self.offset, self.storage.clone())
    }

    /// Narrows axis 0 to `range`.
    pub fn within(&self, range: Range<usize>) -> Self {
        self.select(|s| s.within(range))
    }

    /// Narrows axis 0 to every `step`-th element of `range`.
    pub fn within_step(&self, range: Range<usize>, step: usize) -> Self {
        self.select(|s| s.within_step(range, step))
    }
}

/// Aliasing
impl<const R: usize, T: ArrayDType> ArrayView<R, T> {
    /// True if both views reference the same storage, whatever their shape.
    pub fn shares<const Q: usize>(&self, other: &ArrayView<Q, T>) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    /// True if both views address the same elements of the same storage.
    pub fn is(&self, other: &Self) -> bool {
        self.shares(other) && self.selector == other.selector && self.offset == other.offset
    }

    /// Copies the addressed elements into fresh, contiguous storage.
    pub fn copy(&self) -> Self {
        Self::owned(self.shape(), self.values().collect())
    }

    /// Rebinds this handle to alias `other`.
    pub fn rebind(&mut self, other: &Self) {
        log::debug!(
            "Rebinding {:?} view onto storage of {} elements",
            self.shape(),
            other.storage.len()
        );
        *self = other.clone();
    }

    /// Replaces the storage with a fresh zeroed buffer of the given shape.
    ///
    /// Other views aliasing the old storage keep it.
    pub fn resize(&mut self, shape: impl Into<Shape<R>>) {
        let handles = self.storage.handle_count();
        if handles > 1 {
            log::warn!(
                "Resizing a view that shares its storage with {} other handles",
                handles - 1
            );
        }
        *self = Self::zeros(shape);
    }

    /// Writes `value` to every addressed element.
    pub fn fill(&self, value: T) {
        self.iter().for_each(|cell| cell.set(value));
    }

    /// Writes the elements of `other` into the elements this view addresses.
    ///
    /// Panics if the shapes differ.
    pub fn assign(&self, other: &Self) {
        self.try_assign(other).unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_assign(&self, other: &Self) -> Result<(), InvariantError> {
        Enforcer::check_shapes(&self.shape(), &other.shape())?;
        self.iter()
            .zip(other.iter())
            .for_each(|(dst, src)| dst.set(src.get()));
        Ok(())
    }
}

macro_rules! impl_view_reduction {
    ($($R:literal => $L:literal),* $(,)?) => {
        $(
            impl<T: ArrayDType> ArrayView<$R, T> {
                /// Indexes axis 0, yielding a view of one fewer axis that
                /// aliases this one.
                pub fn at(&self, index: usize) -> ArrayView<$L, T> {
                    self.at_axis(0, index)
                }

                /// Indexes `axis`, which must not be the last.
                pub fn at_axis(&self, axis: usize, index: usize) -> ArrayView<$L, T> {
                    self.select(|s| s.on(axis).collapse(index))
                }

                /// Flattens `axis` and its successor into one axis.
                pub fn combine_axis(&self, axis: usize) -> ArrayView<$L, T> {
                    self.select(|s| s.on(axis).combine())
                }
            }
        )*
    };
}

impl_view_reduction!(2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5);

impl<T: ArrayDType> ArrayView<1, T> {
    /// The rank-0 view of the element at `index`.
    pub fn at(&self, index: usize) -> ArrayView<0, T> {
        ArrayView::derived(
            Selector::full([]),
            self.offset_of([index]),
            self.storage.clone(),
        )
    }
}

impl<T: ArrayDType> ArrayView<0, T> {
    pub fn scalar(value: T) -> Self {
        Self::from_elem([], value)
    }

    pub fn value(&self) -> T {
        self.get([])
    }

    pub fn set_value(&self, value: T) {
        self.set([], value)
    }
}

impl<T: ArrayDType> From<T> for ArrayView<0, T> {
    fn from(value: T) -> Self {
        Self::scalar(value)
    }
}

impl<T: ArrayDType> PartialEq<T> for ArrayView<0, T> {
    fn eq(&self, other: &T) -> bool {
        self.value() == *other
    }
}

macro_rules! impl_scalar_conversion {
    ($($t:ty),*) => {
        $(
            impl From<ArrayView<0, $t>> for $t {
                fn from(view: ArrayView<0, $t>) -> Self {
                    view.value()
                }
            }
        )*
    };
}

impl_scalar_conversion!(f32, f64, half::f16, half::bf16);

impl<T: ArrayDType> From<Vec<T>> for ArrayView<1, T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec([data.len()], data)
    }
}

impl<const R: usize, T: ArrayDType> Default for ArrayView<R, T> {
    /// The empty view. At rank 0 this is the scalar zero.
    fn default() -> Self {
        Self::zeros([0; R])
    }
}

impl<const R: usize, T: ArrayDType> Index<[usize; R]> for ArrayView<R, T> {
    type Output = Cell<T>;

    fn index(&self, index: [usize; R]) -> &Self::Output {
        self.cell(index)
    }
}

impl<const R: usize, T: ArrayDType> std::fmt::Debug for ArrayView<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayView")
            .field("dt", &T::dt())
            .field("shape", &self.shape())
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("data", &dump_inner(&self.to_vec(), false))
            .finish()
    }
}
