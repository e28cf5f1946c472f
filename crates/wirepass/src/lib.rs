// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tri-mode binary codec operator.
//!
//! A type describes its wire format once, in a [`Wire::wire`] routine that
//! drives its fields through a [`Codec`]. Running that routine with the three
//! codec constructors gives the full round trip:
//!
//! 1. [`Codec::count`] measures the encoded size,
//! 2. [`Codec::writer`] serializes into a buffer of that size,
//! 3. [`Codec::reader`] deserializes it back.
//!
//! The routine never branches on the pass; mode-specific behavior lives
//! entirely inside each field method. Fields are fixed-width scalars
//! (`i8`..`u64`, `f32`, `f64`) in a per-operator or per-call byte order, raw
//! byte ranges, and 4-byte length prefixes for variable-length containers
//! ([`Codec::sync_len`]).
//!
//! ```
//! use wirepass::{Codec, Endian, Wire};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Reading {
//!     sensor: u16,
//!     celsius: f32,
//!     samples: Vec<i32>,
//! }
//!
//! impl Wire for Reading {
//!     fn wire(&mut self, codec: &mut Codec<'_>) -> usize {
//!         let mut version = 1u32;
//!         codec.u32(&mut version);
//!         codec.u16(&mut self.sensor);
//!         codec.f32(&mut self.celsius);
//!         self.samples.wire(codec);
//!         codec.len()
//!     }
//! }
//!
//! let mut reading = Reading { sensor: 7, celsius: 21.5, samples: vec![3, -4] };
//!
//! let size = reading.wire(&mut Codec::count(Endian::Little));
//! assert_eq!(size, 4 + 2 + 4 + 4 + 2 * 4);
//!
//! let mut buf = vec![0u8; size];
//! reading.wire(&mut Codec::writer(&mut buf, Endian::Little));
//!
//! let mut back = Reading::default();
//! back.wire(&mut Codec::reader(&buf, Endian::Little));
//! assert_eq!(back, reading);
//! ```
//!
//! # Short buffers
//!
//! The codec has no error type. A field that does not fit is skipped (a
//! skipped read leaves the caller's value untouched) and the cursor still
//! advances by the field's width, so [`Codec::len`] always reports the size
//! the value needs. Compare it with the buffer length to detect truncation,
//! or use the checked helpers ([`pack_into`], [`unpack_from`],
//! [`unpack_exact`]) which return a [`WireError`].
//!
//! # Logging
//!
//! Skipped Write/Read fields are reported as `tracing` events at `TRACE`
//! level; repositioning and helper pass sizes at `DEBUG`.
#![forbid(unsafe_code)]

mod codec;
mod endian;
mod error;
mod length;
mod wire;

pub use codec::{Codec, Mode, Target};
pub use endian::{Endian, Scalar};
pub use error::WireError;
pub use wire::{measure, pack_into, pack_to_vec, unpack_exact, unpack_from, Wire};
