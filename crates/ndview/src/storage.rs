use std::cell::Cell;
use std::rc::Rc;

use crate::ArrayDType;

/// Reference counted flat buffer shared by every view that aliases it.
///
/// Elements live in [`Cell`]s, so any view holding a handle can write through
/// it. Cloning the handle aliases the buffer; use
/// [`deep_clone`](Storage::deep_clone) for a fresh one.
#[derive(Clone, derive_new::new)]
pub struct Storage<T> {
    inner: Rc<[Cell<T>]>,
}

impl<T: ArrayDType> Storage<T> {
    pub fn zeros(len: usize) -> Self {
        Self::from_elem(len, T::zero())
    }

    pub fn from_elem(len: usize, value: T) -> Self {
        log::debug!("Allocating {} x {:?} storage", len, T::dt());
        Self::new((0..len).map(|_| Cell::new(value)).collect())
    }

    pub fn from_slice(data: &[T]) -> Self {
        Self::from_iter(data.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn n_bytes(&self) -> usize {
        self.len() * T::dt().size_of()
    }

    /// Live handle to the element at flat offset `offset`.
    #[inline]
    pub fn cell(&self, offset: usize) -> &Cell<T> {
        &self.inner[offset]
    }

    #[inline]
    pub fn get(&self, offset: usize) -> T {
        self.inner[offset].get()
    }

    #[inline]
    pub fn set(&self, offset: usize, value: T) {
        self.inner[offset].set(value)
    }

    /// Copies the buffer into a new, unshared allocation.
    pub fn deep_clone(&self) -> Self {
        Self::from_iter(self.inner.iter().map(Cell::get))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.inner.iter().map(Cell::get).collect()
    }

    /// True if both handles refer to the same buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of handles, across all views, keeping this buffer alive.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    pub fn dump(&self, full: bool) -> String {
        dump_inner(&self.to_vec(), full)
    }
}

pub(crate) fn dump_inner<T: std::fmt::Debug>(data: &[T], full: bool) -> String {
    let length = if data.len() < 64 { data.len() } else { 64 };
    if full || data.len() <= 2 * length {
        format!("{:?}", data)
    } else {
        format!("{:?}...{:?}", &data[..length], &data[data.len() - length..])
    }
}

impl<T: ArrayDType> FromIterator<T> for Storage<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Cell::new).collect())
    }
}

impl<T: ArrayDType> std::fmt::Debug for Storage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("dt", &T::dt())
            .field("len", &self.len())
            .field("data", &self.dump(false))
            .finish()
    }
}
