//! Native Rust scalars with a graph element type.

use crate::DType;

/// Maps a Rust scalar type to its graph element type.
///
/// The half-precision types have no native counterpart and are not covered.
pub trait HasDType: Copy {
    const DTYPE: DType;

    /// Element type of this value.
    fn dtype(&self) -> DType {
        Self::DTYPE
    }
}

macro_rules! impl_has_dtype {
    ($($dtype:ident => $ty:ty),* $(,)?) => {
        $(impl HasDType for $ty { const DTYPE: DType = DType::$dtype; })*
    };
}

impl_has_dtype! {
    Bool => bool,
    Int8 => i8, Int16 => i16, Int32 => i32, Int64 => i64,
    UInt8 => u8, UInt16 => u16, UInt32 => u32, UInt64 => u64,
    Float32 => f32, Float64 => f64,
}
