// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Length-sync: variable-length containers on top of the fixed-width codec.
//!
//! The length travels as a 4-byte unsigned prefix directly in front of the
//! elements it counts. The codec never learns about containers: the caller
//! resizes its own storage when a Read pass reports a different length, then
//! drives one field sequence per element.

use tracing::debug;

use crate::codec::{Codec, Mode};
use crate::endian::Endian;

impl Codec<'_> {
    /// Reconcile a container length with the stream, in the operator's byte
    /// order.
    ///
    /// Returns `(len, changed)`. Count and Write passes return
    /// `(current, false)`. A Read pass returns the stored length and whether
    /// it differs from `current`, i.e. whether the container must be resized
    /// before its elements are decoded.
    ///
    /// Lengths above `u32::MAX` are truncated on the wire, not rejected.
    pub fn sync_len(&mut self, current: usize) -> (usize, bool) {
        self.sync_len_with(current, self.endian())
    }

    /// [`Codec::sync_len`] with a little-endian prefix.
    pub fn sync_len_le(&mut self, current: usize) -> (usize, bool) {
        self.sync_len_with(current, Endian::Little)
    }

    /// [`Codec::sync_len`] with a big-endian prefix.
    pub fn sync_len_be(&mut self, current: usize) -> (usize, bool) {
        self.sync_len_with(current, Endian::Big)
    }

    fn sync_len_with(&mut self, current: usize, endian: Endian) -> (usize, bool) {
        #[allow(clippy::cast_possible_truncation)]
        let mut wire = current as u32;
        self.scalar_with(&mut wire, endian);
        if self.mode() != Mode::Read {
            return (current, false);
        }
        let stored = usize::try_from(wire).unwrap_or(usize::MAX);
        (stored, stored != current)
    }

    /// Length-sync `items`, resize it when the stream says so, then call
    /// `each` once per element. Returns what [`Codec::sync_len`] returned.
    ///
    /// Only as many elements as there are bytes left in the buffer are
    /// materialized, so a corrupt prefix cannot force a huge allocation. The
    /// cursor still advances over the full stored length: the elements that
    /// were not materialized are sized from one default element, and a
    /// zero-width element type is materialized in full.
    pub fn sync_vec<T, F>(&mut self, items: &mut Vec<T>, mut each: F) -> (usize, bool)
    where
        T: Default,
        F: FnMut(&mut Self, &mut T),
    {
        let (len, changed) = self.sync_len(items.len());
        if changed {
            items.resize_with(len.min(self.remaining()), T::default);
        }
        for item in items.iter_mut() {
            each(&mut *self, item);
        }

        let missing = len.saturating_sub(items.len());
        if missing > 0 {
            let mut scratch = T::default();
            let start = self.len();
            each(&mut *self, &mut scratch);
            let width = self.len().saturating_sub(start);
            if width == 0 {
                items.push(scratch);
                items.resize_with(len, T::default);
            } else {
                self.advance((missing - 1).saturating_mul(width));
            }
            debug!(len, materialized = items.len(), width, "sequence past end of buffer");
        }
        (len, changed)
    }
}
