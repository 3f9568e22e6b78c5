//! Enumerating the glyph identifiers of font files.

use std::{
    panic::AssertUnwindSafe,
    path::{Path, PathBuf},
};

use log::{debug, error, info, warn};

use crate::{
    cancel::CancellationFlag,
    charmap::CharmapInfo,
    diagnostic::Diagnostic,
    engine::{Engine, EngineOptions},
    error::Error,
    glyph_names::codepoint_name,
    sanitize::{sanitize, Deduplicator, IdentifierRecord},
};

/// A face to enumerate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontInput {
    pub path: PathBuf,
    /// Which face of a collection; 0 for plain fonts
    pub face_index: u32,
}

impl FontInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FontInput {
            path: path.into(),
            face_index: 0,
        }
    }

    pub fn with_face_index(mut self, face_index: u32) -> Self {
        self.face_index = face_index;
        self
    }
}

/// Everything learned about one face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontGlyphs {
    pub path: PathBuf,
    pub face_index: u32,
    pub family_name: Option<String>,
    pub charmap: CharmapInfo,
    /// False if identifiers were derived from codepoints because the face
    /// stores no glyph names
    pub has_glyph_names: bool,
    /// In walk order; names are unique
    pub identifiers: Vec<IdentifierRecord>,
}

/// Enumerate the first face of the font at `path` with a fresh engine.
pub fn enumerate_glyphs(path: &Path) -> Result<FontGlyphs, Error> {
    let mut engine = Engine::new(EngineOptions::default())?;
    enumerate_face(&mut engine, &FontInput::new(path), &CancellationFlag::new())
}

/// Enumerate one face using an existing engine.
///
/// The face is released before this returns, whatever the outcome. If
/// `cancel` is tripped during the walk the partial result is dropped and
/// [`Error::Cancelled`] is returned.
pub fn enumerate_face(
    engine: &mut Engine,
    input: &FontInput,
    cancel: &CancellationFlag,
) -> Result<FontGlyphs, Error> {
    let check_interval = engine.options().cancel_check_interval as usize;
    let mut face = engine.open_face(&input.path, input.face_index)?;
    let charmap = face.select_best_charmap()?;
    let has_glyph_names = face.has_glyph_names();
    if !has_glyph_names {
        debug!(
            "{:?} has no glyph names, naming glyphs by codepoint",
            input.path
        );
    }

    let mut dedup = Deduplicator::new();
    let mut identifiers = Vec::new();
    for (i, entry) in face.codepoints().enumerate() {
        if i % check_interval == 0 && cancel.is_cancelled() {
            debug!(
                "Cancelled {:?} after {i} codepoints, dropping them",
                input.path
            );
            return Err(Error::Cancelled);
        }
        let entry = entry.map_err(|source| Error::MalformedCharmap {
            path: input.path.clone(),
            source,
        })?;
        let record = match face.glyph_name(entry.glyph_id) {
            Some(raw) => sanitize(&raw, entry),
            None => IdentifierRecord::new(codepoint_name(entry.codepoint), entry),
        };
        identifiers.push(dedup.dedup(record));
    }

    debug!(
        "{:?} face {}: {} identifiers via {charmap}",
        input.path,
        input.face_index,
        identifiers.len()
    );
    Ok(FontGlyphs {
        path: input.path.clone(),
        face_index: input.face_index,
        family_name: face.family_name(),
        charmap,
        has_glyph_names,
        identifiers,
    })
}

/// How one file of a batch went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileStatus {
    Complete(FontGlyphs),
    /// Nothing to enumerate; a warning
    Skipped(Diagnostic),
    Failed(Diagnostic),
    /// Stopped partway; nothing from the file is kept
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileOutcome {
    pub input: FontInput,
    pub status: FileStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One per file started, in input order
    pub outcomes: Vec<FileOutcome>,
    /// True if the batch stopped early
    pub cancelled: bool,
}

impl BatchReport {
    pub fn completed(&self) -> impl Iterator<Item = &FontGlyphs> + '_ {
        self.outcomes.iter().filter_map(|o| match &o.status {
            FileStatus::Complete(glyphs) => Some(glyphs),
            _ => None,
        })
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.outcomes.iter().filter_map(|o| match &o.status {
            FileStatus::Skipped(d) | FileStatus::Failed(d) => Some(d),
            _ => None,
        })
    }

    pub fn has_errors(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.status, FileStatus::Failed(_)))
    }
}

/// Enumerate every input with one engine.
///
/// Only failing to create the engine fails the batch. Problems with a file,
/// including panics while reading it, are recorded in its outcome and the
/// batch moves on. Once `cancel` is tripped no further files are started.
pub fn enumerate_batch(
    options: EngineOptions,
    inputs: &[FontInput],
    cancel: &CancellationFlag,
) -> Result<BatchReport, Error> {
    let mut engine = Engine::new(options)?;
    let mut report = BatchReport::default();
    for input in inputs {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }
        let status = enumerate_input(&mut engine, input, cancel);
        if status == FileStatus::Cancelled {
            report.cancelled = true;
        }
        report.outcomes.push(FileOutcome {
            input: input.clone(),
            status,
        });
    }
    engine.release();

    info!(
        "Enumerated {} of {} files{}",
        report.completed().count(),
        inputs.len(),
        if report.cancelled { ", cancelled" } else { "" }
    );
    Ok(report)
}

fn enumerate_input(
    engine: &mut Engine,
    input: &FontInput,
    cancel: &CancellationFlag,
) -> FileStatus {
    let status = guarded(|| enumerate_face(engine, input, cancel));
    match &status {
        FileStatus::Skipped(diagnostic) => warn!("{diagnostic}"),
        FileStatus::Failed(diagnostic) => error!("{diagnostic}"),
        FileStatus::Cancelled => info!("Cancelled while enumerating {:?}", input.path),
        FileStatus::Complete(_) => (),
    }
    status
}

fn guarded(work: impl FnOnce() -> Result<FontGlyphs, Error>) -> FileStatus {
    match std::panic::catch_unwind(AssertUnwindSafe(work)) {
        Ok(Ok(glyphs)) => FileStatus::Complete(glyphs),
        Ok(Err(Error::Cancelled)) => FileStatus::Cancelled,
        Ok(Err(err @ Error::NoCharmap { .. })) => {
            FileStatus::Skipped(Diagnostic::from_error(&err))
        }
        Ok(Err(err)) => FileStatus::Failed(Diagnostic::from_error(&err)),
        Err(panic) => {
            let msg = get_panic_message(panic);
            FileStatus::Failed(Diagnostic::unhandled(msg.clone(), msg))
        }
    }
}

fn get_panic_message(msg: Box<dyn std::any::Any + Send + 'static>) -> String {
    match msg.downcast_ref::<&'static str>() {
        Some(s) => s.to_string(),
        None => match msg.downcast_ref::<String>() {
            Some(s) => s.to_owned(),
            None => "Box<dyn Any>".to_owned(),
        },
    }
}
