//! Raw glyph names from the [post] table.
//!
//! [post]: https://learn.microsoft.com/en-us/typography/opentype/spec/post

use log::warn;
use smol_str::SmolStr;
use write_fonts::{
    read::{tables::post::Post, FontRef, TableProvider},
    types::{GlyphId, GlyphId16, Version16Dot16},
};

/// How the bytes of a glyph name are to be interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameEncoding {
    /// Printable ASCII, per the post table's rules for glyph names
    #[default]
    Ascii,
}

/// The name of one glyph, as stored in the font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphNameRecord {
    pub glyph_id: GlyphId,
    pub raw: Vec<u8>,
    pub encoding: NameEncoding,
}

impl GlyphNameRecord {
    /// True if any byte is outside printable ASCII.
    pub fn has_anomalies(&self) -> bool {
        self.raw.iter().any(|b| !(0x20..=0x7E).contains(b))
    }
}

/// Looks up glyph names for one face.
///
/// Whether the face has names at all is decided once, up front.
#[derive(Clone)]
pub(crate) struct GlyphNames<'a> {
    post: Option<Post<'a>>,
    max_len: usize,
}

impl<'a> GlyphNames<'a> {
    pub(crate) fn new(font: &FontRef<'a>, max_len: usize) -> Self {
        let post = font.post().ok().filter(|post| {
            let version = post.version();
            version == Version16Dot16::VERSION_1_0 || version == Version16Dot16::VERSION_2_0
        });
        GlyphNames { post, max_len }
    }

    pub(crate) fn is_supported(&self) -> bool {
        self.post.is_some()
    }

    /// The name of `glyph_id`, or `None` if this face has no glyph names.
    ///
    /// A glyph without an entry in a face that does have names gets an empty
    /// record. Names longer than the limit are truncated.
    pub(crate) fn resolve(&self, glyph_id: GlyphId) -> Option<GlyphNameRecord> {
        let post = self.post.as_ref()?;
        let name = GlyphId16::try_from(glyph_id)
            .ok()
            .and_then(|gid| post.glyph_name(gid))
            .unwrap_or_default();
        let bytes = name.as_bytes();
        let raw = bytes[..bytes.len().min(self.max_len)].to_vec();
        let record = GlyphNameRecord {
            glyph_id,
            raw,
            encoding: NameEncoding::Ascii,
        };
        if record.has_anomalies() {
            warn!(
                "Glyph {} has a name with non-printable or non-ASCII bytes: {:?}",
                glyph_id.to_u32(),
                String::from_utf8_lossy(&record.raw)
            );
        }
        Some(record)
    }
}

/// A name for a glyph in a face without glyph names, derived from its codepoint.
pub fn codepoint_name(codepoint: u32) -> SmolStr {
    if codepoint <= 0xFFFF {
        smol_str::format_smolstr!("uni{codepoint:04X}")
    } else {
        smol_str::format_smolstr!("u{codepoint:X}")
    }
}
