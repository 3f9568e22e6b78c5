//! Choosing which [cmap] subtable a face is walked through.
//!
//! [cmap]: https://learn.microsoft.com/en-us/typography/opentype/spec/cmap

use std::fmt::Display;

use log::debug;
use write_fonts::{
    read::{
        tables::cmap::{Cmap, CmapSubtable, EncodingRecord, PlatformId},
        FontRef, TableProvider,
    },
    types::Tag,
};

/// The character encoding of a charmap.
///
/// Discriminants are the four byte tags FreeType uses for the same encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Encoding {
    None = 0,
    MsSymbol = 0x73796D62,      // 'symb'
    Unicode = 0x756E6963,       // 'unic'
    Sjis = 0x736A6973,          // 'sjis'
    Prc = 0x67622020,           // 'gb  '
    Big5 = 0x62696735,          // 'big5'
    Wansung = 0x77616E73,       // 'wans'
    Johab = 0x6A6F6861,         // 'joha'
    AdobeStandard = 0x41444F42, // 'ADOB'
    AdobeExpert = 0x41444245,   // 'ADBE'
    AdobeCustom = 0x41444243,   // 'ADBC'
    AdobeLatin1 = 0x6C617431,   // 'lat1'
    OldLatin2 = 0x6C617432,     // 'lat2'
    AppleRoman = 0x61726D6E,    // 'armn'
}

impl Encoding {
    pub const GB2312: Encoding = Encoding::Prc;
    pub const MS_SJIS: Encoding = Encoding::Sjis;
    pub const MS_GB2312: Encoding = Encoding::Prc;
    pub const MS_BIG5: Encoding = Encoding::Big5;
    pub const MS_WANSUNG: Encoding = Encoding::Wansung;
    pub const MS_JOHAB: Encoding = Encoding::Johab;

    /// The encoding of an sfnt cmap encoding record.
    pub fn from_record(platform: PlatformId, encoding_id: u16) -> Encoding {
        match (platform, encoding_id) {
            // variation sequences (format 14) don't map codepoints on their own
            (PlatformId::Unicode, 5) => Encoding::None,
            (PlatformId::Unicode, _) | (PlatformId::ISO, _) => Encoding::Unicode,
            (PlatformId::Macintosh, 0) => Encoding::AppleRoman,
            (PlatformId::Windows, 0) => Encoding::MsSymbol,
            (PlatformId::Windows, 1) | (PlatformId::Windows, 10) => Encoding::Unicode,
            (PlatformId::Windows, 2) => Encoding::Sjis,
            (PlatformId::Windows, 3) => Encoding::Prc,
            (PlatformId::Windows, 4) => Encoding::Big5,
            (PlatformId::Windows, 5) => Encoding::Wansung,
            (PlatformId::Windows, 6) => Encoding::Johab,
            _ => Encoding::None,
        }
    }

    pub fn tag(self) -> Tag {
        Tag::new(&(self as u32).to_be_bytes())
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::None => f.write_str("none"),
            other => write!(f, "{}", other.tag()),
        }
    }
}

/// Describes the charmap selected for a face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharmapInfo {
    /// Index of the encoding record in the cmap table
    pub record_index: usize,
    pub platform: PlatformId,
    pub encoding_id: u16,
    pub encoding: Encoding,
    /// The subtable format, e.g. 4 or 12
    pub format: u16,
    /// True if the subtable covers the full Unicode repertoire rather than just the BMP
    pub wide: bool,
}

impl Display for CharmapInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}/{} format {} ({})",
            self.platform,
            self.encoding_id,
            self.format,
            if self.wide { "UCS-4" } else { "UCS-2" }
        )
    }
}

/// The active charmap of a face; lives exactly as long as the face's data.
#[derive(Clone)]
pub(crate) struct SelectedCharmap<'a> {
    pub(crate) info: CharmapInfo,
    pub(crate) subtable: CmapSubtable<'a>,
}

/// Subtable formats the walker knows how to enumerate.
fn walkable_format(subtable: &CmapSubtable) -> Option<u16> {
    match subtable {
        CmapSubtable::Format0(_) => Some(0),
        CmapSubtable::Format4(_) => Some(4),
        CmapSubtable::Format6(_) => Some(6),
        CmapSubtable::Format10(_) => Some(10),
        CmapSubtable::Format12(_) => Some(12),
        CmapSubtable::Format13(_) => Some(13),
        _ => None,
    }
}

fn is_ucs4_record(record: &EncodingRecord) -> bool {
    matches!(
        (record.platform_id(), record.encoding_id()),
        (PlatformId::Windows, 10) | (PlatformId::Unicode, 4) | (PlatformId::Unicode, 6)
    )
}

/// Pick the Unicode subtable with the widest coverage.
///
/// Like FreeType, records are searched last to first and a UCS-4 subtable
/// beats any UCS-2 one; among equals the last record in the table wins.
pub(crate) fn select_best<'a>(font: &FontRef<'a>) -> Option<SelectedCharmap<'a>> {
    let cmap = font.cmap().ok()?;
    select_from_cmap(&cmap)
}

fn select_from_cmap<'a>(cmap: &Cmap<'a>) -> Option<SelectedCharmap<'a>> {
    let mut best: Option<SelectedCharmap<'a>> = None;
    for (i, record) in cmap.encoding_records().iter().enumerate().rev() {
        let encoding = Encoding::from_record(record.platform_id(), record.encoding_id());
        if encoding != Encoding::Unicode {
            continue;
        }
        let subtable = match record.subtable(cmap.offset_data()) {
            Ok(subtable) => subtable,
            Err(e) => {
                debug!("Skip unreadable cmap subtable {i}: {e}");
                continue;
            }
        };
        let Some(format) = walkable_format(&subtable) else {
            debug!("Skip cmap subtable {i}, format is not walkable");
            continue;
        };
        let wide = is_ucs4_record(record) || matches!(format, 10 | 12 | 13);
        if best.as_ref().is_some_and(|b| b.info.wide || !wide) {
            continue;
        }
        best = Some(SelectedCharmap {
            info: CharmapInfo {
                record_index: i,
                platform: record.platform_id(),
                encoding_id: record.encoding_id(),
                encoding,
                format,
                wide,
            },
            subtable,
        });
    }
    best
}

/// The distinct encodings of every record in the font's cmap, in table order.
pub(crate) fn encodings(font: &FontRef) -> Vec<Encoding> {
    let Ok(cmap) = font.cmap() else {
        return Vec::new();
    };
    let mut encodings = Vec::new();
    for record in cmap.encoding_records() {
        let encoding = Encoding::from_record(record.platform_id(), record.encoding_id());
        if !encodings.contains(&encoding) {
            encodings.push(encoding);
        }
    }
    encodings
}
