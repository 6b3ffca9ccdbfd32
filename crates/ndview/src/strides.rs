use crate::Shape;

/// Row-major element multipliers, one per axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strides<const R: usize>([usize; R]);

impl<const R: usize> Strides<R> {
    pub fn inner(&self) -> &[usize; R] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.0.to_vec()
    }

    pub fn rank(&self) -> usize {
        R
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }
}

impl<const R: usize> std::fmt::Debug for Strides<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dims = self.0.iter().map(|d| d.to_string()).collect::<Vec<_>>();
        write!(f, "[{}]", dims.join("x"))
    }
}

impl<const R: usize> std::ops::Index<usize> for Strides<R> {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<const R: usize> From<&[usize; R]> for Strides<R> {
    fn from(count: &[usize; R]) -> Self {
        let mut strides = [0; R];
        let mut stride = 1;
        for (n, size) in count.iter().enumerate().rev() {
            strides[n] = stride;
            stride *= *size;
        }
        Self(strides)
    }
}

impl<const R: usize> From<&Shape<R>> for Strides<R> {
    fn from(shape: &Shape<R>) -> Self {
        Self::from(shape.inner())
    }
}
