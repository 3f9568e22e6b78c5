//! The engine that owns font data while faces are examined.
//!
//! An [`Engine`] is created once per batch and reused for every file in it.
//! Opening a [`Face`] borrows the engine mutably, so there is never more than
//! one face in flight per engine; hosts that want to work on several files at
//! once create one engine per thread.

use std::{
    cell::Cell,
    fs::File,
    io::{self, Read},
    path::Path,
};

use log::{debug, warn};
use write_fonts::read::{FileRef, FontRef, ReadError};

use crate::{
    error::{Error, FaceOpenReason},
    face::Face,
};

/// Glyph names longer than this are truncated.
///
/// The post table allows 63 characters per name; FreeType callers
/// conventionally use a 128 byte buffer including the terminator.
pub const DEFAULT_MAX_GLYPH_NAME_LEN: usize = 127;

/// Last resort fonts map every code up to 0x1FFFFF, so leave room for them.
pub const DEFAULT_MAX_CODEPOINTS: u32 = 0x20_0000;

pub const DEFAULT_CANCEL_CHECK_INTERVAL: u32 = 256;

/// Tunables for an [`Engine`], checked once when the engine is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Longest glyph name, in bytes, that is kept
    pub max_glyph_name_len: usize,
    /// Most charmap steps taken in one face before the walk is treated as runaway
    pub max_codepoints: u32,
    /// Number of codepoints walked between checks for cancellation
    pub cancel_check_interval: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            max_glyph_name_len: DEFAULT_MAX_GLYPH_NAME_LEN,
            max_codepoints: DEFAULT_MAX_CODEPOINTS,
            cancel_check_interval: DEFAULT_CANCEL_CHECK_INTERVAL,
        }
    }
}

impl EngineOptions {
    fn validate(&self) -> Result<(), Error> {
        if self.max_glyph_name_len == 0 {
            return Err(Error::EngineInit(
                "max_glyph_name_len must be at least 1".to_string(),
            ));
        }
        if self.max_codepoints == 0 {
            return Err(Error::EngineInit(
                "max_codepoints must be at least 1".to_string(),
            ));
        }
        if self.cancel_check_interval == 0 {
            return Err(Error::EngineInit(
                "cancel_check_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counts faces handed out and given back, shared with every [`Face`].
#[derive(Debug, Default)]
pub(crate) struct FaceCounters {
    opened: Cell<usize>,
    released: Cell<usize>,
}

impl FaceCounters {
    fn opened(&self) {
        self.opened.set(self.opened.get() + 1);
    }

    pub(crate) fn released(&self) {
        self.released.set(self.released.get() + 1);
    }

    fn live(&self) -> usize {
        self.opened.get().saturating_sub(self.released.get())
    }
}

/// Exclusive owner of the font-processing state for one batch.
#[derive(Debug)]
pub struct Engine {
    options: EngineOptions,
    // file bytes for the face currently (or most recently) open
    buffer: Vec<u8>,
    counters: FaceCounters,
}

impl Engine {
    /// Acquire a new engine.
    pub fn new(options: EngineOptions) -> Result<Engine, Error> {
        options.validate()?;
        debug!("Acquired font engine {options:?}");
        Ok(Engine {
            options,
            buffer: Vec::new(),
            counters: FaceCounters::default(),
        })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The number of faces opened from this engine that have not been dropped.
    pub fn live_faces(&self) -> usize {
        self.counters.live()
    }

    /// Open face `index` of the font file at `path`.
    ///
    /// Only the file's table directory is parsed here; tables are read on
    /// demand while the face is examined. The returned face borrows this
    /// engine until it is dropped.
    pub fn open_face<'a>(&'a mut self, path: &Path, index: u32) -> Result<Face<'a>, Error> {
        let Engine {
            options,
            buffer,
            counters,
        } = self;
        let open_error = |reason, detail: String| Error::FaceOpen {
            path: path.to_path_buf(),
            index,
            reason,
            detail,
        };

        buffer.clear();
        File::open(path)
            .and_then(|mut file| file.read_to_end(buffer))
            .map_err(|e| open_error(io_reason(&e), e.to_string()))?;

        let data: &'a [u8] = buffer.as_slice();
        let font = font_at(data, index).map_err(|e| open_error(read_reason(&e), e.to_string()))?;
        counters.opened();
        debug!(
            "Opened face {index} of {path:?}, {} bytes, {} tables",
            data.len(),
            font.table_directory.num_tables()
        );
        Ok(Face::new(path.to_path_buf(), index, font, options, counters))
    }

    /// Release the engine.
    ///
    /// Dropping has the same effect; this exists so call sites can make the
    /// end of a batch explicit.
    pub fn release(self) {}
}

impl Drop for Engine {
    fn drop(&mut self) {
        let live = self.counters.live();
        if live > 0 {
            warn!("Releasing font engine with {live} faces still open");
        }
        debug!(
            "Released font engine after {} faces",
            self.counters.opened.get()
        );
    }
}

fn font_at(data: &[u8], index: u32) -> Result<FontRef<'_>, ReadError> {
    match (FileRef::new(data)?, index) {
        (FileRef::Font(font), 0) => Ok(font),
        (FileRef::Font(_), other) => Err(ReadError::InvalidCollectionIndex(other)),
        (FileRef::Collection(collection), index) => collection.get(index),
    }
}

fn io_reason(err: &io::Error) -> FaceOpenReason {
    match err.kind() {
        io::ErrorKind::NotFound => FaceOpenReason::NotFound,
        _ => FaceOpenReason::Unreadable,
    }
}

fn read_reason(err: &ReadError) -> FaceOpenReason {
    match err {
        ReadError::InvalidSfnt(_) | ReadError::InvalidTtc(_) => FaceOpenReason::UnsupportedFormat,
        ReadError::InvalidCollectionIndex(_) => FaceOpenReason::IndexOutOfRange,
        _ => FaceOpenReason::Corrupt,
    }
}
