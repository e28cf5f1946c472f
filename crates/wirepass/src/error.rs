// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors reported by the checked round-trip helpers.
//!
//! The [`Codec`](crate::Codec) itself never fails; these describe mismatches
//! the helpers detect by comparing a pass's size against the buffer it ran
//! over.

use thiserror::Error;

/// Size mismatch between a completed pass and its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WireError {
    /// The pass advanced past the end of the buffer; fields beyond
    /// `available` were skipped.
    #[error("buffer too short: pass needed {needed} bytes, buffer holds {available}")]
    Truncated {
        /// Bytes the pass needed.
        needed: usize,
        /// Bytes the buffer held.
        available: usize,
    },
    /// The read pass finished before the end of the buffer.
    #[error("trailing bytes: pass consumed {consumed} of {available} bytes")]
    TrailingBytes {
        /// Bytes the pass consumed.
        consumed: usize,
        /// Bytes the buffer held.
        available: usize,
    },
}
