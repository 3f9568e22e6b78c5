//! Strings from the [name] table.
//!
//! [name]: https://learn.microsoft.com/en-us/typography/opentype/spec/name

use write_fonts::{
    read::{FontRef, TableProvider},
    types::NameId as RawNameId,
};

/// The predefined name identifiers, 0 through 25.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NameId {
    Copyright = 0,
    FontFamily = 1,
    FontSubfamily = 2,
    UniqueSubfamilyId = 3,
    FontFullName = 4,
    NameTableVersion = 5,
    /// At most 63 printable ASCII characters, excluding `[](){}<>/%`
    PostscriptName = 6,
    TrademarkNotice = 7,
    ManufacturerName = 8,
    DesignerName = 9,
    FontDescription = 10,
    FontVendorUrl = 11,
    FontDesignerUrl = 12,
    FontLicense = 13,
    FontLicenseUrl = 14,
    Reserved15 = 15,
    /// Only present if different from [`NameId::FontFamily`]
    TypographicFamily = 16,
    /// Only present if different from [`NameId::FontSubfamily`]
    TypographicSubfamily = 17,
    CompatibleFullName = 18,
    SampleText = 19,
    PostscriptCidName = 20,
    WwsFamilyName = 21,
    WwsSubfamilyName = 22,
    LightBackgroundPalette = 23,
    DarkBackgroundPalette = 24,
    VariationsPostscriptNamePrefix = 25,
}

impl NameId {
    pub fn to_u16(self) -> u16 {
        self as u16
    }
}

impl From<NameId> for RawNameId {
    fn from(value: NameId) -> Self {
        RawNameId::new(value.to_u16())
    }
}

// Windows first, then Unicode; both are UTF-16BE. Mac Roman last.
fn platform_rank(platform_id: u16) -> u8 {
    match platform_id {
        3 => 0,
        0 => 1,
        _ => 2,
    }
}

pub(crate) fn lookup(font: &FontRef, id: NameId) -> Option<String> {
    let name = font.name().ok()?;
    let target = RawNameId::from(id);
    let record = name
        .name_record()
        .iter()
        .filter(|record| record.name_id() == target)
        .min_by_key(|record| platform_rank(record.platform_id()))?;
    record
        .string(name.string_data())
        .ok()
        .map(|s| s.chars().collect())
}

/// The family name users would see, preferring the typographic family.
pub(crate) fn family_name(font: &FontRef) -> Option<String> {
    lookup(font, NameId::TypographicFamily).or_else(|| lookup(font, NameId::FontFamily))
}
