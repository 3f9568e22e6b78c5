//! One opened face of a font file.

use std::path::{Path, PathBuf};

use log::{debug, trace};
use write_fonts::{read::FontRef, types::GlyphId};

use crate::{
    charmap::{self, CharmapInfo, SelectedCharmap},
    engine::{EngineOptions, FaceCounters},
    error::Error,
    glyph_names::{GlyphNameRecord, GlyphNames},
    names::{self, NameId},
    walk::CodepointWalker,
};

/// A face opened by an [`Engine`](crate::Engine).
///
/// The face borrows its engine; dropping it releases the face.
pub struct Face<'a> {
    path: PathBuf,
    index: u32,
    font: FontRef<'a>,
    options: &'a EngineOptions,
    counters: &'a FaceCounters,
    glyph_names: GlyphNames<'a>,
    charmap: Option<SelectedCharmap<'a>>,
}

impl<'a> Face<'a> {
    pub(crate) fn new(
        path: PathBuf,
        index: u32,
        font: FontRef<'a>,
        options: &'a EngineOptions,
        counters: &'a FaceCounters,
    ) -> Self {
        let glyph_names = GlyphNames::new(&font, options.max_glyph_name_len);
        Face {
            path,
            index,
            font,
            options,
            counters,
            glyph_names,
            charmap: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn font(&self) -> &FontRef<'a> {
        &self.font
    }

    pub fn options(&self) -> &EngineOptions {
        self.options
    }

    /// Make the best Unicode charmap the active one.
    ///
    /// Fails with [`Error::NoCharmap`] if the face has no Unicode charmap we
    /// can walk.
    pub fn select_best_charmap(&mut self) -> Result<CharmapInfo, Error> {
        let Some(selected) = charmap::select_best(&self.font) else {
            return Err(Error::NoCharmap {
                path: self.path.clone(),
                encodings: charmap::encodings(&self.font),
            });
        };
        debug!("Selected charmap {} for {:?}", selected.info, self.path);
        let info = selected.info.clone();
        self.charmap = Some(selected);
        Ok(info)
    }

    /// The active charmap, if one has been selected.
    pub fn charmap(&self) -> Option<&CharmapInfo> {
        self.charmap.as_ref().map(|c| &c.info)
    }

    /// A fresh walk over the active charmap.
    ///
    /// Without an active charmap the walk is empty.
    pub fn codepoints(&self) -> CodepointWalker<'a> {
        CodepointWalker::new(
            self.charmap.as_ref().map(|c| &c.subtable),
            self.options.max_codepoints,
        )
    }

    /// Whether this face stores glyph names.
    pub fn has_glyph_names(&self) -> bool {
        self.glyph_names.is_supported()
    }

    /// The stored name of a glyph, `None` if the face has no glyph names.
    pub fn glyph_name(&self, glyph_id: GlyphId) -> Option<GlyphNameRecord> {
        self.glyph_names.resolve(glyph_id)
    }

    /// A string from the name table.
    pub fn name(&self, id: NameId) -> Option<String> {
        names::lookup(&self.font, id)
    }

    pub fn family_name(&self) -> Option<String> {
        names::family_name(&self.font)
    }
}

impl Drop for Face<'_> {
    fn drop(&mut self) {
        self.counters.released();
        trace!("Released face {} of {:?}", self.index, self.path);
    }
}
