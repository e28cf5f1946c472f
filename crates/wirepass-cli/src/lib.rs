// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `wirepass` developer CLI.
//!
//! Runs the codec's canonical scenarios (length-sync, schema evolution,
//! layout inspection, truncated reads) and prints what each pass did.
//! Reports go to stdout as text or JSON; logs go to stderr.

pub mod cli;
pub mod report;
pub mod scenarios;
