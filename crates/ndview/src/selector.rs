use std::cmp::Ordering;
use std::ops::Range;

use crate::Shape;

/// # Selector
///
/// A rectangular, possibly strided, subspace of a row-major index space of
/// rank `R`.
///
/// Each axis carries the extent of the space it is carved from (`count`), the
/// selected range `[start, stop)` and a `skip` multiplier. The selector also
/// carries a cursor, the current axis, which chained calls to
/// [`within`](Selector::within), `collapse` and `combine` consume from left to
/// right:
///
/// ```
/// use ndview::Selector;
///
/// let s = Selector::full([10, 30, 2]);
/// let s = s.within(0..10).collapse(5).within(0..2);
/// assert_eq!(s.shape(), [10, 2]);
/// ```
///
/// `collapse` fixes the current axis to a single index and folds it into the
/// next axis, so the result still addresses the same flat buffer with one
/// fewer axis. Rank-changing operations exist for ranks up to 6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selector<const R: usize> {
    count: [usize; R],
    start: [usize; R],
    stop: [usize; R],
    skip: [usize; R],
    axis: usize,
}

impl<const R: usize> Selector<R> {
    pub fn new(count: [usize; R], start: [usize; R], stop: [usize; R], skip: [usize; R]) -> Self {
        debug_assert!(skip.iter().all(|&s| s > 0), "selector: skip must be > 0");
        debug_assert!(
            start.iter().zip(stop.iter()).all(|(a, b)| a <= b),
            "selector: start {:?} exceeds stop {:?}",
            start,
            stop
        );
        Self {
            count,
            start,
            stop,
            skip,
            axis: 0,
        }
    }

    /// Selects the whole of a space with the given extents.
    pub fn full(count: [usize; R]) -> Self {
        Self::new(count, [0; R], count, [1; R])
    }

    pub fn count(&self) -> &[usize; R] {
        &self.count
    }

    pub fn start(&self) -> &[usize; R] {
        &self.start
    }

    pub fn stop(&self) -> &[usize; R] {
        &self.stop
    }

    pub fn skip(&self) -> &[usize; R] {
        &self.skip
    }

    /// The axis the next chained operation applies to.
    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn rank(&self) -> usize {
        R
    }

    pub fn shape(&self) -> Shape<R> {
        Shape::new(std::array::from_fn(|n| {
            self.stop[n].saturating_sub(self.start[n]) / self.skip[n]
        }))
    }

    pub fn size(&self) -> usize {
        self.shape().numel()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Extent of the unsliced space, i.e. the length of the buffer this
    /// selector addresses.
    pub fn extent(&self) -> usize {
        self.count.iter().product()
    }

    /// True if every axis is selected in full with unit skip.
    pub fn is_contiguous(&self) -> bool {
        (0..R).all(|n| self.start[n] == 0 && self.stop[n] == self.count[n] && self.skip[n] == 1)
    }

    /// Narrows the current axis to `range`, given in the axis' own coordinates,
    /// and moves on to the next axis.
    pub fn within(&self, range: Range<usize>) -> Self {
        self.within_step(range, 1)
    }

    /// As [`within`](Selector::within), keeping only every `step`-th element
    /// of the range.
    pub fn within_step(&self, range: Range<usize>, step: usize) -> Self {
        let a = self.axis;
        assert!(a < R, "selector: attempting to index on axis {a} >= rank {R}");
        assert!(step > 0, "selector: step must be > 0");
        debug_assert!(
            range.start <= range.end && range.end <= self.shape()[a],
            "selector: range {:?} out of bounds for axis {} of shape {:?}",
            range,
            a,
            self.shape()
        );
        let skip = self.skip[a] * step;
        let len = (range.end - range.start).div_ceil(step);

        let mut next = *self;
        next.start[a] = self.start[a] + range.start * self.skip[a];
        next.stop[a] = next.start[a] + len * skip;
        next.skip[a] = skip;
        next.axis = a + 1;
        next
    }

    /// The same subspace, with the cursor moved to `axis`.
    pub fn on(&self, axis: usize) -> Self {
        assert!(axis < R, "selector: attempting to index on axis {axis} >= rank {R}");
        Self { axis, ..*self }
    }

    /// The same subspace, with the cursor back on axis 0.
    pub fn reset(&self) -> Self {
        self.on_unchecked(0)
    }

    fn on_unchecked(&self, axis: usize) -> Self {
        Self { axis, ..*self }
    }

    /// Advances an absolute coordinate to its successor in row-major order.
    ///
    /// The last axis moves fastest, stepping by its skip and wrapping back to
    /// `start` once it runs past the axis' shape. Returns `false`, leaving
    /// `index` equal to `stop`, once the sequence is exhausted.
    pub fn next(&self, index: &mut [usize; R]) -> bool {
        if R == 0 {
            return false;
        }
        let shape = self.shape();
        let mut n = R - 1;
        loop {
            index[n] += self.skip[n];
            if index[n] < self.start[n] + shape[n] * self.skip[n] {
                return true;
            }
            if n == 0 {
                *index = self.stop;
                return false;
            }
            index[n] = self.start[n];
            n -= 1;
        }
    }

    /// Absolute coordinates of every element, in [`next`](Selector::next)
    /// order.
    pub fn indices(&self) -> Indices<R> {
        Indices {
            selector: self.reset(),
            index: self.start,
            remaining: self.size(),
        }
    }

    pub(crate) fn collapse_into<const L: usize>(&self, index: usize) -> Selector<L> {
        assert_eq!(L + 1, R);
        let a = self.axis;
        assert!(a + 1 < R, "selector: cannot collapse final axis {a}");
        debug_assert!(
            index < self.shape()[a],
            "selector: index {} out of bounds for axis {} of shape {:?}",
            index,
            a,
            self.shape()
        );
        let inner = self.count[a + 1];
        let row = self.start[a] + index * self.skip[a];
        self.merge(
            self.count[a] * inner,
            row * inner + self.start[a + 1],
            row * inner + self.stop[a + 1],
            self.skip[a + 1],
        )
    }

    pub(crate) fn combine_into<const L: usize>(&self) -> Selector<L> {
        assert_eq!(L + 1, R);
        let a = self.axis;
        assert!(a + 1 < R, "selector: cannot combine final axis {a}");
        assert!(
            self.skip[a] == 1 && self.skip[a + 1] == 1,
            "selector: can only combine unit-skip axes"
        );
        assert!(
            self.start[a + 1] == 0 && self.stop[a + 1] == self.count[a + 1],
            "selector: axis {} must be selected in full to combine",
            a + 1
        );
        let inner = self.count[a + 1];
        self.merge(
            self.count[a] * inner,
            self.start[a] * inner,
            self.stop[a] * inner,
            1,
        )
    }

    /// Replaces the current axis and its successor with a single axis.
    fn merge<const L: usize>(
        &self,
        count: usize,
        start: usize,
        stop: usize,
        skip: usize,
    ) -> Selector<L> {
        let a = self.axis;
        let pick = |src: &[usize; R], merged: usize| -> [usize; L] {
            std::array::from_fn(|n| match n.cmp(&a) {
                Ordering::Less => src[n],
                Ordering::Equal => merged,
                Ordering::Greater => src[n + 1],
            })
        };
        Selector {
            count: pick(&self.count, count),
            start: pick(&self.start, start),
            stop: pick(&self.stop, stop),
            skip: pick(&self.skip, skip),
            axis: a,
        }
    }
}

macro_rules! impl_selector_reduction {
    ($($R:literal => $L:literal),* $(,)?) => {
        $(
            impl Selector<$R> {
                /// Fixes the current axis at `index`, merging it into the next
                /// axis. The cursor stays on the merged axis.
                pub fn collapse(&self, index: usize) -> Selector<$L> {
                    self.collapse_into(index)
                }

                /// Merges the current axis and the next, keeping both ranges.
                /// The next axis must be selected in full, both with unit skip.
                pub fn combine(&self) -> Selector<$L> {
                    self.combine_into()
                }
            }
        )*
    };
}

impl_selector_reduction!(2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5);

impl<const R: usize> IntoIterator for Selector<R> {
    type Item = [usize; R];
    type IntoIter = Indices<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices()
    }
}

/// Iterator over the absolute coordinates of a [`Selector`].
#[derive(Clone, Debug)]
pub struct Indices<const R: usize> {
    selector: Selector<R>,
    index: [usize; R],
    remaining: usize,
}

impl<const R: usize> Iterator for Indices<R> {
    type Item = [usize; R];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.index;
        self.remaining -= 1;
        self.selector.next(&mut self.index);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const R: usize> ExactSizeIterator for Indices<R> {}

impl<const R: usize> std::iter::FusedIterator for Indices<R> {}
