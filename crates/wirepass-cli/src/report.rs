// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Text and JSON rendering of scenario reports.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use crate::scenarios::{DynsizeReport, EvolveStep, InspectReport, TruncateReport};

/// Human-readable form of a report.
pub trait Text {
    /// Write the report as plain lines.
    fn text(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Write `report` to stdout, as JSON when `json` is set.
pub fn emit<R: Serialize + Text + ?Sized>(report: &R, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, report)?;
        writeln!(out)?;
    } else {
        report.text(&mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn endian_name(endian: wirepass::Endian) -> &'static str {
    match endian {
        wirepass::Endian::Little => "little",
        wirepass::Endian::Big => "big",
    }
}

impl Text for DynsizeReport {
    fn text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "endian: {}", endian_name(self.endian))?;
        writeln!(out, "packed {} bytes: {}", self.packed_len, self.hex)?;
        writeln!(out, "sync_len: len={} changed={}", self.sync_len, self.changed)?;
        writeln!(out, "decoded: {:?}", self.decoded)
    }
}

impl Text for Vec<EvolveStep> {
    fn text(&self, out: &mut dyn Write) -> io::Result<()> {
        for step in self {
            let v = &step.decoded;
            writeln!(
                out,
                "v{} -> v{} ({} bytes): field={} field_added_v2={} field_added_v3={}",
                step.writer, step.reader, step.bytes, v.field, v.field_added_v2, v.field_added_v3
            )?;
        }
        Ok(())
    }
}

impl Text for InspectReport {
    fn text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "endian: {}  total: {} bytes", endian_name(self.endian), self.total)?;
        writeln!(out, "{:>6}  {:>5}  {:<4}  bytes", "offset", "width", "name")?;
        for row in &self.fields {
            writeln!(
                out,
                "{:>6}  {:>5}  {:<4}  {}",
                row.span.offset, row.span.width, row.span.name, row.hex
            )?;
        }
        Ok(())
    }
}

impl Text for TruncateReport {
    fn text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "endian: {}  kept {} of {} bytes  cursor after read: {}",
            endian_name(self.endian),
            self.kept,
            self.needed,
            self.cursor
        )?;
        for field in &self.fields {
            let verdict = if field.survived { "ok" } else { "lost" };
            writeln!(out, "  {:<4} {verdict}", field.name)?;
        }
        writeln!(out, "checked: {}", self.checked)
    }
}
