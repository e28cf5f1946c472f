// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Demo payloads and the scenarios the CLI runs over them.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use wirepass::{measure, pack_to_vec, unpack_from, Codec, Endian, Wire};

// ── Dynamic length ──────────────────────────────────────────────────

/// One element of a [`Batch`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Payload.
    pub field: i32,
}

impl Wire for Item {
    fn wire(&mut self, codec: &mut Codec<'_>) -> usize {
        codec.i32(&mut self.field);
        codec.len()
    }
}

/// Versioned, length-prefixed list of [`Item`]s.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Elements.
    pub items: Vec<Item>,
    /// What the last length-sync reported.
    pub last_sync: Option<(usize, bool)>,
}

impl Wire for Batch {
    fn wire(&mut self, codec: &mut Codec<'_>) -> usize {
        let mut version = 1u32;
        codec.u32(&mut version);

        let synced = codec.sync_vec(&mut self.items, |c, item| {
            item.wire(c);
        });
        self.last_sync = Some(synced);
        codec.len()
    }
}

/// Outcome of [`dynsize`].
#[derive(Debug, Serialize)]
pub struct DynsizeReport {
    /// Byte order used for all passes.
    pub endian: Endian,
    /// Size reported by the count pass.
    pub packed_len: usize,
    /// Encoded bytes, hex.
    pub hex: String,
    /// Length the read pass found in the stream.
    pub sync_len: usize,
    /// Whether the empty target had to be resized.
    pub changed: bool,
    /// Decoded element payloads.
    pub decoded: Vec<i32>,
}

/// Pack two items, unpack into an empty batch.
pub fn dynsize(endian: Endian) -> Result<DynsizeReport> {
    let mut source = Batch {
        items: vec![Item { field: 123 }, Item { field: 234 }],
        last_sync: None,
    };
    let packed = pack_to_vec(&mut source, endian);

    let mut target = Batch::default();
    target.wire(&mut Codec::reader(&packed, endian));
    let (sync_len, changed) = target
        .last_sync
        .context("read pass never reached the length prefix")?;
    info!(sync_len, changed, "batch decoded");

    Ok(DynsizeReport {
        endian,
        packed_len: packed.len(),
        hex: hex::encode(packed),
        sync_len,
        changed,
        decoded: target.items.iter().map(|item| item.field).collect(),
    })
}

// ── Schema evolution ────────────────────────────────────────────────

/// Logical value shared by every schema version.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Versioned {
    /// Present since v1.
    pub field: i32,
    /// Added in v2.
    pub field_added_v2: i8,
    /// Added in v3.
    pub field_added_v3: i16,
}

/// [`Versioned`] as seen by the routine of one schema version.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Schema<const V: u32>(pub Versioned);

impl<const V: u32> Wire for Schema<V> {
    fn wire(&mut self, codec: &mut Codec<'_>) -> usize {
        let mut version = V;
        codec.u32(&mut version);
        codec.i32(&mut self.0.field);
        if version >= 2 && V >= 2 {
            codec.i8(&mut self.0.field_added_v2);
        }
        if version >= 3 && V >= 3 {
            codec.i16(&mut self.0.field_added_v3);
        }
        codec.len()
    }
}

/// One hop of [`evolve`].
#[derive(Debug, Serialize)]
pub struct EvolveStep {
    /// Version whose routine wrote the payload.
    pub writer: u32,
    /// Version whose routine read it.
    pub reader: u32,
    /// Payload size.
    pub bytes: usize,
    /// Decoded value.
    pub decoded: Versioned,
}

fn hop<const W: u32, const R: u32>(value: Versioned, endian: Endian) -> Result<EvolveStep> {
    let packed = pack_to_vec(&mut Schema::<W>(value), endian);
    let decoded: Schema<R> = unpack_from(&packed, endian)
        .with_context(|| format!("v{R} failed to read a v{W} payload"))?;
    info!(writer = W, reader = R, bytes = packed.len(), "schema hop");
    Ok(EvolveStep {
        writer: W,
        reader: R,
        bytes: packed.len(),
        decoded: decoded.0,
    })
}

/// v1 → v2 → v3, then v3 read back by v1 and v2.
pub fn evolve(endian: Endian) -> Result<Vec<EvolveStep>> {
    let mut steps = Vec::with_capacity(4);

    let v1 = Versioned {
        field: 1,
        ..Versioned::default()
    };
    let up2 = hop::<1, 2>(v1, endian)?;
    let mut v2 = up2.decoded;
    steps.push(up2);

    v2.field_added_v2 = 2;
    let up3 = hop::<2, 3>(v2, endian)?;
    let mut v3 = up3.decoded;
    steps.push(up3);

    v3.field_added_v3 = 3;
    steps.push(hop::<3, 1>(v3, endian)?);
    steps.push(hop::<3, 2>(v3, endian)?);
    Ok(steps)
}

// ── Layout inspection ───────────────────────────────────────────────

/// Every primitive width plus a raw tag.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sample {
    /// Raw 4-byte tag.
    pub tag: [u8; 4],
    /// 8-bit signed.
    pub i8: i8,
    /// 8-bit unsigned.
    pub u8: u8,
    /// 16-bit signed.
    pub i16: i16,
    /// 16-bit unsigned.
    pub u16: u16,
    /// 32-bit signed.
    pub i32: i32,
    /// 32-bit unsigned.
    pub u32: u32,
    /// 64-bit signed.
    pub i64: i64,
    /// 64-bit unsigned.
    pub u64: u64,
    /// Single precision.
    pub f32: f32,
    /// Double precision.
    pub f64: f64,
}

impl Sample {
    /// The values `inspect` and `truncate` encode.
    pub fn demo() -> Self {
        Self {
            tag: *b"WPS1",
            i8: -50,
            u8: u8::MAX,
            i16: -1024,
            u16: u16::MAX,
            i32: -128_000,
            u32: u32::MAX,
            i64: -4_294_967_296,
            u64: u64::MAX,
            f32: 1.5,
            f64: -0.125,
        }
    }

    /// Drive every field, reporting `(name, offset)` as each is placed.
    pub fn wire_marked(
        &mut self,
        codec: &mut Codec<'_>,
        mut mark: impl FnMut(&'static str, usize),
    ) -> usize {
        mark("tag", codec.array(&mut self.tag));
        mark("i8", codec.i8(&mut self.i8));
        mark("u8", codec.u8(&mut self.u8));
        mark("i16", codec.i16(&mut self.i16));
        mark("u16", codec.u16(&mut self.u16));
        mark("i32", codec.i32(&mut self.i32));
        mark("u32", codec.u32(&mut self.u32));
        mark("i64", codec.i64(&mut self.i64));
        mark("u64", codec.u64(&mut self.u64));
        mark("f32", codec.f32(&mut self.f32));
        mark("f64", codec.f64(&mut self.f64));
        codec.len()
    }

    /// Field spans, in wire order, from a count pass.
    pub fn layout(endian: Endian) -> Vec<FieldSpan> {
        let mut starts: Vec<(&'static str, usize)> = Vec::new();
        let total = Self::default().wire_marked(&mut Codec::count(endian), |name, offset| {
            starts.push((name, offset));
        });
        let ends = starts.iter().skip(1).map(|&(_, offset)| offset).chain([total]);
        starts
            .iter()
            .zip(ends)
            .map(|(&(name, offset), end)| FieldSpan {
                name,
                offset,
                width: end - offset,
            })
            .collect()
    }

    /// Bit-exact comparison of one named field.
    fn field_eq(&self, other: &Self, name: &str) -> bool {
        match name {
            "tag" => self.tag == other.tag,
            "i8" => self.i8 == other.i8,
            "u8" => self.u8 == other.u8,
            "i16" => self.i16 == other.i16,
            "u16" => self.u16 == other.u16,
            "i32" => self.i32 == other.i32,
            "u32" => self.u32 == other.u32,
            "i64" => self.i64 == other.i64,
            "u64" => self.u64 == other.u64,
            "f32" => self.f32.to_bits() == other.f32.to_bits(),
            "f64" => self.f64.to_bits() == other.f64.to_bits(),
            _ => false,
        }
    }
}

impl Wire for Sample {
    fn wire(&mut self, codec: &mut Codec<'_>) -> usize {
        self.wire_marked(codec, |_, _| {})
    }
}

/// Where one field sits in the encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpan {
    /// Field name.
    pub name: &'static str,
    /// Offset of its first byte.
    pub offset: usize,
    /// Wire width.
    pub width: usize,
}

/// One row of [`InspectReport`].
#[derive(Debug, Serialize)]
pub struct FieldDump {
    /// Placement.
    #[serde(flatten)]
    pub span: FieldSpan,
    /// Encoded bytes, hex.
    pub hex: String,
}

/// Outcome of [`inspect`].
#[derive(Debug, Serialize)]
pub struct InspectReport {
    /// Byte order used.
    pub endian: Endian,
    /// Total encoded size.
    pub total: usize,
    /// Per-field dump.
    pub fields: Vec<FieldDump>,
}

/// Pack [`Sample::demo`] and dump each field's bytes.
pub fn inspect(endian: Endian) -> InspectReport {
    let packed = pack_to_vec(&mut Sample::demo(), endian);
    let fields = Sample::layout(endian)
        .into_iter()
        .map(|span| {
            let hex = hex::encode(&packed[span.offset..span.offset + span.width]);
            FieldDump { span, hex }
        })
        .collect();
    InspectReport {
        endian,
        total: packed.len(),
        fields,
    }
}

// ── Truncation ──────────────────────────────────────────────────────

/// Whether one field made it through a truncated read.
#[derive(Debug, Serialize)]
pub struct Survivor {
    /// Field name.
    pub name: &'static str,
    /// Decoded equal to the original.
    pub survived: bool,
}

/// Outcome of [`truncate`].
#[derive(Debug, Serialize)]
pub struct TruncateReport {
    /// Byte order used.
    pub endian: Endian,
    /// Bytes the full encoding needs.
    pub needed: usize,
    /// Bytes handed to the read pass.
    pub kept: usize,
    /// Cursor after the best-effort read pass.
    pub cursor: usize,
    /// Per-field outcome.
    pub fields: Vec<Survivor>,
    /// What the checked helper reports for the same bytes.
    pub checked: String,
}

/// Pack [`Sample::demo`], keep the first `keep` bytes, read best-effort.
pub fn truncate(endian: Endian, keep: usize) -> TruncateReport {
    let original = Sample::demo();
    let packed = pack_to_vec(&mut original.clone(), endian);
    let kept = keep.min(packed.len());
    let chopped = &packed[..kept];

    let mut partial = Sample::default();
    let cursor = partial.wire(&mut Codec::reader(chopped, endian));
    let fields = Sample::layout(endian)
        .into_iter()
        .map(|span| Survivor {
            name: span.name,
            survived: partial.field_eq(&original, span.name),
        })
        .collect();
    let checked = match unpack_from::<Sample>(chopped, endian) {
        Ok(_) => "ok".to_owned(),
        Err(err) => err.to_string(),
    };
    info!(needed = packed.len(), kept, cursor, "truncated read");

    TruncateReport {
        endian,
        needed: measure(&mut Sample::demo(), endian),
        kept,
        cursor,
        fields,
        checked,
    }
}
