use std::ops::RangeInclusive;

use crate::Shape;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("Shape mismatch at axis {axis}, {a} != {b}.")]
    ShapeMismatch { axis: usize, a: usize, b: usize },
    #[error("Rank mismatch. {expected} != {actual}.")]
    RankMismatch { expected: usize, actual: usize },
    #[error("Storage holds {actual} elements, selector spans {expected}.")]
    StorageLength { expected: usize, actual: usize },
    #[error("Wrong input arity. Allowed range is {accepted:?}, got {actual}.")]
    InputArity {
        accepted: RangeInclusive<usize>,
        actual: usize,
    },
}

/// # Enforcer
///
/// Enforcer enforces common invariants on array views.
pub struct Enforcer;

impl Enforcer {
    pub fn check_input_arity_range(
        actual: usize,
        accepted: RangeInclusive<usize>,
    ) -> Result<(), InvariantError> {
        if !accepted.contains(&actual) {
            return Err(InvariantError::InputArity { accepted, actual });
        }
        Ok(())
    }

    /// Shapes must match exactly, there is no broadcasting.
    pub fn check_shapes<const R: usize>(a: &Shape<R>, b: &Shape<R>) -> Result<(), InvariantError> {
        for axis in 0..R {
            if a[axis] != b[axis] {
                return Err(InvariantError::ShapeMismatch {
                    axis,
                    a: a[axis],
                    b: b[axis],
                });
            }
        }
        Ok(())
    }

    pub fn check_storage_len(expected: usize, actual: usize) -> Result<(), InvariantError> {
        if expected != actual {
            return Err(InvariantError::StorageLength { expected, actual });
        }
        Ok(())
    }
}
