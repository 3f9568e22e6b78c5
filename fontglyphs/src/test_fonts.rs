//! Tiny fonts for tests.
//!
//! Only the tables the crate reads are written. cmap and name are assembled
//! by hand so tests can describe tables a compiler would refuse to produce.

use std::path::{Path, PathBuf};

use write_fonts::{
    dump_table, read::tables::cmap::PlatformId, tables::post::Post, types::Tag, FontBuilder,
};

/// One cmap subtable and the encoding record pointing at it.
#[derive(Clone, Debug)]
pub(crate) struct CmapSpec {
    platform: PlatformId,
    encoding_id: u16,
    subtable: Vec<u8>,
}

impl CmapSpec {
    /// A byte encoding table mapping each (code, glyph) pair; codes must be < 256.
    pub(crate) fn format0(platform: PlatformId, encoding_id: u16, map: &[(u8, u8)]) -> Self {
        let mut glyphs = [0u8; 256];
        for (code, gid) in map {
            glyphs[*code as usize] = *gid;
        }
        let mut subtable = Vec::new();
        push_u16(&mut subtable, 0);
        push_u16(&mut subtable, 6 + 256);
        push_u16(&mut subtable, 0);
        subtable.extend(glyphs);
        CmapSpec {
            platform,
            encoding_id,
            subtable,
        }
    }

    /// A segmented coverage table of (start, end, start glyph) groups, written
    /// exactly as given.
    pub(crate) fn format12(
        platform: PlatformId,
        encoding_id: u16,
        groups: &[(u32, u32, u32)],
    ) -> Self {
        let mut subtable = Vec::new();
        push_u16(&mut subtable, 12);
        push_u16(&mut subtable, 0);
        push_u32(&mut subtable, 16 + 12 * groups.len() as u32);
        push_u32(&mut subtable, 0);
        push_u32(&mut subtable, groups.len() as u32);
        for (start, end, gid) in groups {
            push_u32(&mut subtable, *start);
            push_u32(&mut subtable, *end);
            push_u32(&mut subtable, *gid);
        }
        CmapSpec {
            platform,
            encoding_id,
            subtable,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct FontSpec {
    /// Written as a cmap table unless empty
    pub(crate) cmaps: Vec<CmapSpec>,
    /// Used as the cmap table verbatim, in place of `cmaps`
    pub(crate) raw_cmap: Option<Vec<u8>>,
    /// Written as a version 2 post table
    pub(crate) glyph_names: Option<Vec<&'static str>>,
    /// Written as name id 1 in a name table
    pub(crate) family_name: Option<&'static str>,
}

impl Default for FontSpec {
    fn default() -> Self {
        FontSpec {
            cmaps: vec![CmapSpec::format12(
                PlatformId::Windows,
                10,
                &[(0x41, 0x43, 1)],
            )],
            raw_cmap: None,
            glyph_names: Some(vec![".notdef", "A", "B", "C"]),
            family_name: None,
        }
    }
}

fn push_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend(value.to_be_bytes());
}

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend(value.to_be_bytes());
}

fn cmap_table(cmaps: &[CmapSpec]) -> Vec<u8> {
    let mut table = Vec::new();
    push_u16(&mut table, 0);
    push_u16(&mut table, cmaps.len() as u16);
    let mut offset = 4 + 8 * cmaps.len() as u32;
    for cmap in cmaps {
        push_u16(&mut table, cmap.platform as u16);
        push_u16(&mut table, cmap.encoding_id);
        push_u32(&mut table, offset);
        offset += cmap.subtable.len() as u32;
    }
    for cmap in cmaps {
        table.extend(&cmap.subtable);
    }
    table
}

/// A cmap whose only (Windows, UCS-4) subtable holds `groups` unchecked.
///
/// Overlapping groups make the same codepoint come up twice.
pub(crate) fn malformed_cmap12(groups: &[(u32, u32, u32)]) -> Vec<u8> {
    cmap_table(&[CmapSpec::format12(PlatformId::Windows, 10, groups)])
}

fn name_table(family: &str) -> Vec<u8> {
    let string: Vec<u8> = family.encode_utf16().flat_map(u16::to_be_bytes).collect();
    let mut table = Vec::new();
    push_u16(&mut table, 0);
    push_u16(&mut table, 1);
    push_u16(&mut table, 6 + 12);
    // Windows, Unicode BMP, en-US, family name
    push_u16(&mut table, 3);
    push_u16(&mut table, 1);
    push_u16(&mut table, 0x409);
    push_u16(&mut table, 1);
    push_u16(&mut table, string.len() as u16);
    push_u16(&mut table, 0);
    table.extend(string);
    table
}

pub(crate) fn build_font(spec: &FontSpec) -> Vec<u8> {
    let mut builder = FontBuilder::default();
    if let Some(raw) = &spec.raw_cmap {
        builder.add_raw(Tag::new(b"cmap"), raw.clone());
    } else if !spec.cmaps.is_empty() {
        builder.add_raw(Tag::new(b"cmap"), cmap_table(&spec.cmaps));
    }
    if let Some(names) = &spec.glyph_names {
        let post = Post::new_v2(names.iter().copied());
        builder.add_raw(Tag::new(b"post"), dump_table(&post).unwrap());
    }
    if let Some(family) = spec.family_name {
        builder.add_raw(Tag::new(b"name"), name_table(family));
    }
    builder.build()
}

/// Build the font and write it to `dir/file_name`.
pub(crate) fn write_font(dir: &Path, file_name: &str, spec: &FontSpec) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, build_font(spec)).unwrap();
    path
}
