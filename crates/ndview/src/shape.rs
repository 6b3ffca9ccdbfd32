/// Per-axis extents of an array of rank `R`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape<const R: usize>([usize; R]);

impl<const R: usize> Shape<R> {
    pub fn new(shape: [usize; R]) -> Self {
        Self(shape)
    }

    pub fn inner(&self) -> &[usize; R] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&usize> {
        self.0.get(index)
    }

    /// Number of elements addressed by this shape. A rank-0 shape holds one.
    pub fn numel(&self) -> usize {
        self.0.iter().product()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.0.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        R
    }

    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    pub fn rank(&self) -> usize {
        R
    }
}

impl<const R: usize> std::fmt::Debug for Shape<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dims = self.0.iter().map(|d| d.to_string()).collect::<Vec<_>>();
        write!(f, "[{}]", dims.join("x"))
    }
}

impl<const R: usize> std::fmt::Display for Shape<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<const R: usize> std::ops::Index<usize> for Shape<R> {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<const R: usize> From<[usize; R]> for Shape<R> {
    fn from(shape: [usize; R]) -> Self {
        Self(shape)
    }
}

impl<const R: usize> From<&Shape<R>> for Shape<R> {
    fn from(shape: &Shape<R>) -> Self {
        *shape
    }
}

impl<const R: usize> From<Shape<R>> for [usize; R] {
    fn from(shape: Shape<R>) -> Self {
        shape.0
    }
}

impl<const R: usize> TryFrom<&[usize]> for Shape<R> {
    type Error = crate::InvariantError;

    fn try_from(slice: &[usize]) -> Result<Self, Self::Error> {
        let inner: [usize; R] =
            slice
                .try_into()
                .map_err(|_| crate::InvariantError::RankMismatch {
                    expected: R,
                    actual: slice.len(),
                })?;
        Ok(Self(inner))
    }
}

impl<const R: usize> PartialEq<[usize; R]> for Shape<R> {
    fn eq(&self, other: &[usize; R]) -> bool {
        &self.0 == other
    }
}
