use std::cell::Cell;

use crate::{ArrayDType, ArrayView};

/// Row-major iterator over the live element cells of an [`ArrayView`].
pub struct Iter<'a, const R: usize, T> {
    view: &'a ArrayView<R, T>,
    index: [usize; R],
    remaining: usize,
}

impl<'a, const R: usize, T: ArrayDType> Iter<'a, R, T> {
    pub(crate) fn new(view: &'a ArrayView<R, T>) -> Self {
        Self {
            view,
            index: *view.selector().start(),
            remaining: view.size(),
        }
    }
}

impl<'a, const R: usize, T: ArrayDType> Iterator for Iter<'a, R, T> {
    type Item = &'a Cell<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let view: &'a ArrayView<R, T> = self.view;
        let cell = view.storage().cell(view.flat_offset(&self.index));
        self.remaining -= 1;
        view.selector().next(&mut self.index);
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const R: usize, T: ArrayDType> ExactSizeIterator for Iter<'_, R, T> {}

impl<const R: usize, T: ArrayDType> std::iter::FusedIterator for Iter<'_, R, T> {}

impl<'a, const R: usize, T: ArrayDType> IntoIterator for &'a ArrayView<R, T> {
    type Item = &'a Cell<T>;
    type IntoIter = Iter<'a, R, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
