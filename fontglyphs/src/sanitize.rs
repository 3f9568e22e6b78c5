//! Turning glyph names into unique identifiers.

use std::collections::HashMap;

use indexmap::IndexSet;
use smol_str::SmolStr;
use write_fonts::types::GlyphId;

use crate::{glyph_names::GlyphNameRecord, walk::CodepointEntry};

/// A glyph's identifier and the codepoint that selects it.
///
/// The name always matches `[A-Za-z_][A-Za-z0-9_]*`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdentifierRecord {
    pub name: SmolStr,
    pub codepoint: u32,
    pub glyph_id: GlyphId,
}

impl IdentifierRecord {
    pub(crate) fn new(name: SmolStr, entry: CodepointEntry) -> Self {
        debug_assert!(is_identifier(&name), "'{name}' is not an identifier");
        IdentifierRecord {
            name,
            codepoint: entry.codepoint,
            glyph_id: entry.glyph_id,
        }
    }
}

/// True if `name` is non-empty, starts with a letter or underscore and
/// contains only ASCII letters, digits and underscores.
pub fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        _ => false,
    }
}

/// The name used when a glyph name has nothing usable in it: `_` and the
/// codepoint in uppercase hex.
pub fn hex_fallback(codepoint: u32) -> SmolStr {
    smol_str::format_smolstr!("_{codepoint:X}")
}

/// Make an identifier out of raw glyph name bytes.
///
/// Anything other than an ASCII letter, digit or underscore becomes `_`, a
/// leading digit gets a `_` prefix and an empty name becomes
/// [`hex_fallback`]. Names made only of replaced bytes also fall back, so
/// `.notdef` stays readable but `...` doesn't turn into `___`.
pub fn sanitize_name(raw: &[u8], codepoint: u32) -> SmolStr {
    if !raw.iter().any(u8::is_ascii_alphanumeric) {
        return hex_fallback(codepoint);
    }
    let mut name = String::with_capacity(raw.len() + 1);
    if raw[0].is_ascii_digit() {
        name.push('_');
    }
    name.extend(raw.iter().map(|&b| {
        if b.is_ascii_alphanumeric() || b == b'_' {
            b as char
        } else {
            '_'
        }
    }));
    name.into()
}

/// Sanitize the name of the glyph mapped by `entry`.
pub fn sanitize(raw: &GlyphNameRecord, entry: CodepointEntry) -> IdentifierRecord {
    IdentifierRecord::new(sanitize_name(&raw.raw, entry.codepoint), entry)
}

/// Keeps the identifiers of one file unique.
///
/// The first use of a name keeps it; later uses get `_1`, `_2`, … appended,
/// choosing the smallest suffix that gives a name not yet handed out.
#[derive(Clone, Debug, Default)]
pub struct Deduplicator {
    used: IndexSet<SmolStr>,
    // smallest suffix that might still be free, per base name
    next_suffix: HashMap<SmolStr, u32>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dedup(&mut self, mut record: IdentifierRecord) -> IdentifierRecord {
        if self.used.insert(record.name.clone()) {
            return record;
        }
        let base = record.name;
        let mut n = self.next_suffix.get(&base).copied().unwrap_or(1);
        let name = loop {
            let candidate = smol_str::format_smolstr!("{base}_{n}");
            n += 1;
            if self.used.insert(candidate.clone()) {
                break candidate;
            }
        };
        self.next_suffix.insert(base, n);
        record.name = name;
        record
    }

    /// Names handed out so far, in order.
    pub fn names(&self) -> impl Iterator<Item = &SmolStr> + '_ {
        self.used.iter()
    }
}

/// Deduplicate one file's records, in walk order.
pub fn dedup(batch: impl IntoIterator<Item = IdentifierRecord>) -> Vec<IdentifierRecord> {
    let mut dedup = Deduplicator::new();
    batch.into_iter().map(|r| dedup.dedup(r)).collect()
}
