// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The [`Wire`] routine contract and helpers that run all three passes.

use tracing::{debug, warn};

use crate::codec::Codec;
use crate::endian::Endian;
use crate::error::WireError;

/// A type's single source of truth for its wire format.
///
/// `wire` drives every field through `codec` in one fixed order and returns
/// [`Codec::len`]. The same routine is run once per pass (count, write,
/// read); it must not branch on the codec's mode, and the call sequence must
/// be identical across the three passes.
///
/// Schema evolution is done with version guards inside the routine:
///
/// ```
/// use wirepass::{Codec, Wire};
///
/// #[derive(Default)]
/// struct Config {
///     retries: u16,
///     timeout_ms: u32, // added in v2
/// }
///
/// impl Wire for Config {
///     fn wire(&mut self, codec: &mut Codec<'_>) -> usize {
///         let mut version = 2u32;
///         codec.u32(&mut version);
///         codec.u16(&mut self.retries);
///         if version >= 2 {
///             codec.u32(&mut self.timeout_ms);
///         }
///         codec.len()
///     }
/// }
/// ```
pub trait Wire {
    /// Drive this value's fields through `codec`; return `codec.len()`.
    fn wire(&mut self, codec: &mut Codec<'_>) -> usize;
}

macro_rules! impl_wire_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Wire for $ty {
            #[inline]
            fn wire(&mut self, codec: &mut Codec<'_>) -> usize {
                codec.scalar(self);
                codec.len()
            }
        }
    )*};
}

impl_wire_scalar!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

impl<const N: usize> Wire for [u8; N] {
    fn wire(&mut self, codec: &mut Codec<'_>) -> usize {
        codec.array(self);
        codec.len()
    }
}

/// Length-prefixed sequence (see [`Codec::sync_vec`]).
impl<T: Wire + Default> Wire for Vec<T> {
    fn wire(&mut self, codec: &mut Codec<'_>) -> usize {
        codec.sync_vec(self, |c, item| {
            item.wire(c);
        });
        codec.len()
    }
}

/// Count pass: bytes `value` needs on the wire.
pub fn measure<T: Wire + ?Sized>(value: &mut T, endian: Endian) -> usize {
    let mut codec = Codec::count(endian);
    value.wire(&mut codec);
    codec.len()
}

/// Write pass into `buf`. Returns the bytes produced.
///
/// The fields that fit are written even when the pass overruns `buf`; the
/// overrun is reported as [`WireError::Truncated`].
pub fn pack_into<T: Wire + ?Sized>(
    value: &mut T,
    buf: &mut [u8],
    endian: Endian,
) -> Result<usize, WireError> {
    let available = buf.len();
    let mut codec = Codec::writer(buf, endian);
    value.wire(&mut codec);
    let needed = codec.len();
    if needed > available {
        warn!(needed, available, "write pass overran buffer");
        return Err(WireError::Truncated { needed, available });
    }
    debug!(bytes = needed, "packed");
    Ok(needed)
}

/// Count pass, then a write pass into an exactly sized vector.
pub fn pack_to_vec<T: Wire + ?Sized>(value: &mut T, endian: Endian) -> Vec<u8> {
    let mut out = vec![0u8; measure(value, endian)];
    let mut codec = Codec::writer(&mut out, endian);
    value.wire(&mut codec);
    debug!(bytes = codec.len(), "packed");
    out
}

/// Read pass into `T::default()`.
///
/// Trailing bytes are allowed: a payload written by a newer schema version
/// decodes with the fields this version knows.
pub fn unpack_from<T: Wire + Default>(bytes: &[u8], endian: Endian) -> Result<T, WireError> {
    read_pass(bytes, endian).map(|(value, _)| value)
}

/// Read pass that must consume `bytes` exactly.
pub fn unpack_exact<T: Wire + Default>(bytes: &[u8], endian: Endian) -> Result<T, WireError> {
    let (value, consumed) = read_pass(bytes, endian)?;
    if consumed < bytes.len() {
        warn!(consumed, available = bytes.len(), "read pass left trailing bytes");
        return Err(WireError::TrailingBytes {
            consumed,
            available: bytes.len(),
        });
    }
    Ok(value)
}

fn read_pass<T: Wire + Default>(bytes: &[u8], endian: Endian) -> Result<(T, usize), WireError> {
    let mut value = T::default();
    let mut codec = Codec::reader(bytes, endian);
    value.wire(&mut codec);
    let consumed = codec.len();
    if consumed > bytes.len() {
        warn!(needed = consumed, available = bytes.len(), "read pass overran buffer");
        return Err(WireError::Truncated {
            needed: consumed,
            available: bytes.len(),
        });
    }
    debug!(bytes = consumed, "unpacked");
    Ok((value, consumed))
}
