//! Numeric inputs accepted by the `from_rows` constructors

/// Numeric type that can be stored as an `f32` matrix entry
///
/// Implemented for every primitive integer and float. Wide integers and
/// `f64` round to the nearest representable `f32`.
pub trait Element: Copy {
    /// Convert to the stored `f32` value
    fn to_f32(self) -> f32;
}

macro_rules! impl_element {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
                fn to_f32(self) -> f32 {
                    self as f32
                }
            }
        )*
    };
}

impl_element!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
