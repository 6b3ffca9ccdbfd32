use half::{bf16, f16};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub enum DType {
    F16,
    BF16,
    F32,
    #[default]
    F64,
}

impl DType {
    /// Returns the size of the type in bytes.
    pub fn size_of(self) -> usize {
        match self {
            DType::F16 => 2,
            DType::BF16 => 2,
            DType::F32 => 4,
            DType::F64 => 8,
        }
    }

    pub fn is_half(self) -> bool {
        matches!(self, DType::F16 | DType::BF16)
    }
}

/// Floating point element types an [`ArrayView`](crate::ArrayView) can hold.
pub trait ArrayDType:
    num_traits::Float
    + std::fmt::Debug
    + std::fmt::Display
    + Default
    + PartialEq
    + 'static
{
    fn dt() -> DType;
}

macro_rules! map_type {
    ($t:ty, $v:ident) => {
        impl ArrayDType for $t {
            fn dt() -> DType {
                DType::$v
            }
        }
    };
}

map_type!(f32, F32);
map_type!(f64, F64);
map_type!(f16, F16);
map_type!(bf16, BF16);
