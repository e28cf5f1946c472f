// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CLI entry point for wirepass.

use anyhow::Result;
use wirepass_cli::cli::entrypoint;

fn main() -> Result<()> {
    entrypoint()
}
