// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Byte order and the fixed-width scalar encodings.
//!
//! Every scalar is encoded as its raw in-memory representation with the
//! chosen byte order: two's complement for signed integers, the IEEE-754 bit
//! pattern for floats (swapped exactly like the unsigned integer of the same
//! width). 8-bit scalars ignore the byte order.

/// Byte order for multi-byte scalars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Endian {
    /// Least-significant byte first.
    #[default]
    Little,
    /// Most-significant byte first (network order).
    Big,
}

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width primitive with a byte-order-aware wire encoding.
///
/// Sealed: implemented for `i8`..`i64`, `u8`..`u64`, `f32` and `f64`.
pub trait Scalar: Copy + sealed::Sealed {
    /// Wire width in bytes.
    const WIDTH: usize;

    /// Encode `self` into `out[..Self::WIDTH]`.
    ///
    /// Panics if `out` is shorter than [`Self::WIDTH`]; the codec only calls
    /// this after its bounds check passed.
    fn put(self, endian: Endian, out: &mut [u8]);

    /// Decode a value from `src[..Self::WIDTH]`.
    ///
    /// Panics if `src` is shorter than [`Self::WIDTH`].
    fn get(endian: Endian, src: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const WIDTH: usize = core::mem::size_of::<$ty>();

            #[inline]
            fn put(self, endian: Endian, out: &mut [u8]) {
                let raw = match endian {
                    Endian::Little => self.to_le_bytes(),
                    Endian::Big => self.to_be_bytes(),
                };
                out[..Self::WIDTH].copy_from_slice(&raw);
            }

            #[inline]
            fn get(endian: Endian, src: &[u8]) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$ty>()];
                raw.copy_from_slice(&src[..Self::WIDTH]);
                match endian {
                    Endian::Little => <$ty>::from_le_bytes(raw),
                    Endian::Big => <$ty>::from_be_bytes(raw),
                }
            }
        }
    )*};
}

impl_scalar!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_wire_table() {
        assert_eq!(<i8 as Scalar>::WIDTH, 1);
        assert_eq!(<u16 as Scalar>::WIDTH, 2);
        assert_eq!(<i32 as Scalar>::WIDTH, 4);
        assert_eq!(<f32 as Scalar>::WIDTH, 4);
        assert_eq!(<u64 as Scalar>::WIDTH, 8);
        assert_eq!(<f64 as Scalar>::WIDTH, 8);
    }

    #[test]
    fn byte_order_layout() {
        let mut out = [0u8; 4];
        0x0102_0304u32.put(Endian::Little, &mut out);
        assert_eq!(out, [0x04, 0x03, 0x02, 0x01]);
        0x0102_0304u32.put(Endian::Big, &mut out);
        assert_eq!(out, [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(u32::get(Endian::Big, &out), 0x0102_0304);
        assert_eq!(u32::get(Endian::Little, &out), 0x0403_0201);
    }

    #[test]
    fn negative_integers_are_twos_complement() {
        let mut out = [0u8; 2];
        (-2i16).put(Endian::Big, &mut out);
        assert_eq!(out, [0xff, 0xfe]);
    }

    #[test]
    fn floats_swap_like_unsigned_of_same_width() {
        let mut as_float = [0u8; 8];
        let mut as_bits = [0u8; 8];
        let value = -1234.5678f64;
        value.put(Endian::Big, &mut as_float);
        value.to_bits().put(Endian::Big, &mut as_bits);
        assert_eq!(as_float, as_bits);
    }

    #[test]
    fn little_endian_is_default() {
        assert_eq!(Endian::default(), Endian::Little);
    }
}
