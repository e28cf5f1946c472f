// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The tri-mode codec operator.
//!
//! A [`Codec`] is driven by a type's own encode/decode routine. The same call
//! sequence sizes the value ([`Mode::Count`]), serializes it
//! ([`Mode::Write`]) or deserializes it ([`Mode::Read`]); the routine never
//! asks which.
//!
//! Bounds policy for every field of wire width `w`:
//!
//! - the buffer is touched only if `cursor + w <= buffer.len()`;
//! - otherwise nothing is touched and, in Read mode, the caller's value is
//!   left as it was;
//! - the cursor advances by exactly `w` either way.
//!
//! A short buffer therefore truncates silently while [`Codec::len`] still
//! reports the full size the value needs.

use core::ops::Range;

use tracing::{debug, trace};

use crate::endian::{Endian, Scalar};

/// Which pass a [`Codec`] is driving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Measure the encoded size; no buffer.
    Count,
    /// Serialize into a caller-allocated buffer.
    Write,
    /// Deserialize from previously written bytes.
    Read,
}

/// Mode and backing buffer of a [`Codec`], carried as one value.
#[derive(Debug)]
pub enum Target<'a> {
    /// Sizing pass.
    Count,
    /// Serializing pass into this buffer.
    Write(&'a mut [u8]),
    /// Deserializing pass over these bytes.
    Read(&'a [u8]),
}

impl Target<'_> {
    /// Mode this target drives.
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Count => Mode::Count,
            Self::Write(_) => Mode::Write,
            Self::Read(_) => Mode::Read,
        }
    }

    /// Length of the backing buffer (0 in Count mode).
    pub const fn buffer_len(&self) -> usize {
        match self {
            Self::Count => 0,
            Self::Write(buf) => buf.len(),
            Self::Read(buf) => buf.len(),
        }
    }

    fn reborrow(&mut self) -> Target<'_> {
        match self {
            Self::Count => Target::Count,
            Self::Write(buf) => Target::Write(&mut **buf),
            Self::Read(buf) => Target::Read(*buf),
        }
    }
}

/// Cursor-based operator shared by the count, write and read passes.
///
/// The operator never allocates: size the buffer with a Count pass first,
/// then hand it to [`Codec::writer`].
#[derive(Debug)]
pub struct Codec<'a> {
    target: Target<'a>,
    endian: Endian,
    cursor: usize,
}

macro_rules! byte_fields {
    ($($name:ident: $ty:ty),* $(,)?) => {$(
        #[doc = concat!("Drive one `", stringify!($ty), "` field (1 byte). Returns the field's offset.")]
        #[inline]
        pub fn $name(&mut self, value: &mut $ty) -> usize {
            self.scalar(value)
        }
    )*};
}

macro_rules! ordered_fields {
    ($($name:ident, $le:ident, $be:ident: $ty:ty),* $(,)?) => {$(
        #[doc = concat!(
            "Drive one `", stringify!($ty), "` field in the operator's byte order. ",
            "Returns the field's offset."
        )]
        #[inline]
        pub fn $name(&mut self, value: &mut $ty) -> usize {
            self.scalar(value)
        }

        #[doc = concat!("Drive one little-endian `", stringify!($ty), "` field.")]
        #[inline]
        pub fn $le(&mut self, value: &mut $ty) -> usize {
            self.scalar_with(value, Endian::Little)
        }

        #[doc = concat!("Drive one big-endian `", stringify!($ty), "` field.")]
        #[inline]
        pub fn $be(&mut self, value: &mut $ty) -> usize {
            self.scalar_with(value, Endian::Big)
        }
    )*};
}

impl<'a> Codec<'a> {
    /// Operator over an explicit target.
    pub fn new(target: Target<'a>, endian: Endian) -> Self {
        Self {
            target,
            endian,
            cursor: 0,
        }
    }

    /// Sizing operator: touches no memory, only advances the cursor.
    pub fn count(endian: Endian) -> Self {
        Self::new(Target::Count, endian)
    }

    /// Serializing operator over a caller-allocated buffer.
    pub fn writer(buf: &'a mut [u8], endian: Endian) -> Self {
        Self::new(Target::Write(buf), endian)
    }

    /// Deserializing operator over previously written bytes.
    pub fn reader(buf: &'a [u8], endian: Endian) -> Self {
        Self::new(Target::Read(buf), endian)
    }

    /// Pass this operator drives.
    pub const fn mode(&self) -> Mode {
        self.target.mode()
    }

    /// Byte order used by the unsuffixed field methods.
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// Bytes driven so far. After a Count pass this is the buffer size to
    /// allocate; after a Write pass, the number of bytes produced.
    pub const fn len(&self) -> usize {
        self.cursor
    }

    /// `true` until the first field has been driven.
    pub const fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Bytes left in the buffer past the cursor (0 in Count mode).
    pub const fn remaining(&self) -> usize {
        self.target.buffer_len().saturating_sub(self.cursor)
    }

    /// New operator over the same buffer, mode and byte order, positioned at
    /// `cursor`. `self` keeps its own position.
    ///
    /// Pair it with the offsets the field methods return to back-patch a
    /// slot written earlier.
    pub fn seek_to(&mut self, cursor: usize) -> Codec<'_> {
        debug!(from = self.cursor, to = cursor, mode = ?self.mode(), "codec repositioned");
        Codec {
            target: self.target.reborrow(),
            endian: self.endian,
            cursor,
        }
    }

    /// Drive one scalar field in the operator's byte order.
    #[inline]
    pub fn scalar<T: Scalar>(&mut self, value: &mut T) -> usize {
        self.scalar_with(value, self.endian)
    }

    /// Drive one scalar field in an explicit byte order. Returns the
    /// field's offset.
    pub fn scalar_with<T: Scalar>(&mut self, value: &mut T, endian: Endian) -> usize {
        let Some(range) = self.window(T::WIDTH) else {
            self.skipped(T::WIDTH);
            return self.advance(T::WIDTH);
        };
        match &mut self.target {
            Target::Count => {}
            Target::Write(buf) => value.put(endian, &mut buf[range]),
            Target::Read(buf) => *value = T::get(endian, &buf[range]),
        }
        self.advance(T::WIDTH)
    }

    byte_fields! {
        i8: i8,
        u8: u8,
    }

    ordered_fields! {
        i16, i16_le, i16_be: i16,
        u16, u16_le, u16_be: u16,
        i32, i32_le, i32_be: i32,
        u32, u32_le, u32_be: u32,
        i64, i64_le, i64_be: i64,
        u64, u64_le, u64_be: u64,
        f32, f32_le, f32_be: f32,
        f64, f64_le, f64_be: f64,
    }

    /// Copy a raw byte range verbatim, `value.len()` bytes wide. Returns
    /// the range's offset.
    ///
    /// A Write operator over an empty buffer sizes the range like a Count
    /// operator would.
    pub fn bytes(&mut self, value: &mut [u8]) -> usize {
        let width = value.len();
        if let Some(range) = self.window(width) {
            match &mut self.target {
                Target::Count => {}
                Target::Write(buf) => buf[range].copy_from_slice(value),
                Target::Read(buf) => value.copy_from_slice(&buf[range]),
            }
        } else if self.target.buffer_len() > 0 {
            self.skipped(width);
        }
        self.advance(width)
    }

    /// Copy a fixed-size byte array verbatim. Returns its offset.
    #[inline]
    pub fn array<const N: usize>(&mut self, value: &mut [u8; N]) -> usize {
        self.bytes(value)
    }

    fn window(&self, width: usize) -> Option<Range<usize>> {
        let end = self.cursor.checked_add(width)?;
        (end <= self.target.buffer_len()).then_some(self.cursor..end)
    }

    pub(crate) fn advance(&mut self, width: usize) -> usize {
        let start = self.cursor;
        self.cursor = start.saturating_add(width);
        start
    }

    fn skipped(&self, width: usize) {
        if self.mode() != Mode::Count {
            trace!(
                offset = self.cursor,
                width,
                available = self.remaining(),
                mode = ?self.mode(),
                "short buffer, field skipped"
            );
        }
    }
}
