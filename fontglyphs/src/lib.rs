//! Enumerating the glyphs of a font as identifier/codepoint pairs
//!
//! Opens a face, picks its best Unicode charmap, walks every mapped codepoint
//! and turns each glyph's name into a unique identifier.

mod cancel;
mod charmap;
mod diagnostic;
mod engine;
mod enumerate;
mod error;
mod face;
mod glyph_names;
mod names;
pub mod sanitize;
mod walk;

#[cfg(test)]
mod test_fonts;

pub use cancel::CancellationFlag;
pub use charmap::{CharmapInfo, Encoding};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use engine::{
    Engine, EngineOptions, DEFAULT_CANCEL_CHECK_INTERVAL, DEFAULT_MAX_CODEPOINTS,
    DEFAULT_MAX_GLYPH_NAME_LEN,
};
pub use enumerate::{
    enumerate_batch, enumerate_face, enumerate_glyphs, BatchReport, FileOutcome, FileStatus,
    FontGlyphs, FontInput,
};
pub use error::{Error, FaceOpenReason};
pub use face::Face;
pub use glyph_names::{codepoint_name, GlyphNameRecord, NameEncoding};
pub use names::NameId;
pub use sanitize::IdentifierRecord;
pub use walk::{CodepointEntry, CodepointWalker, WalkError};

/// The cmap platform of a [`CharmapInfo`].
pub use write_fonts::read::tables::cmap::PlatformId;
