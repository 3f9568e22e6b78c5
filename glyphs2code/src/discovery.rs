//! Finding the fonts to generate code for.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use fontglyphs::FontInput;
use log::{debug, warn};

use crate::{config::Config, Error};

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "otc"];

/// A font to process and the module name its code goes in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub input: FontInput,
    pub output_name: String,
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FONT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Expand `paths` into the fonts to process.
///
/// Files are used as given. Directories contribute the font files directly
/// inside them, in name order. Anything that doesn't pass the config's path
/// filters is dropped, and a disabled config yields nothing.
pub fn discover(
    paths: &[PathBuf],
    config: &Config,
    face_index: u32,
) -> Result<Vec<SourceFile>, Error> {
    if !config.enabled {
        debug!("Generation is disabled, ignoring {} inputs", paths.len());
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|source| Error::FileIo {
                path: path.clone(),
                source,
            })?;
            let mut fonts = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|source| Error::FileIo {
                    path: path.clone(),
                    source,
                })?;
                let file = entry.path();
                if file.is_file() && is_font_file(&file) {
                    fonts.push(file);
                }
            }
            fonts.sort();
            candidates.extend(fonts);
        } else {
            candidates.push(path.clone());
        }
    }

    let mut used_names = HashSet::new();
    let mut sources = Vec::new();
    for path in candidates {
        if !config.matches(&path) {
            debug!("{path:?} does not match any path filter");
            continue;
        }
        let base = output_name(&path);
        let mut name = base.clone();
        let mut n = 1;
        while !used_names.insert(name.clone()) {
            name = format!("{base}_{n}");
            n += 1;
        }
        if name != base {
            warn!("{path:?} would be written as '{base}', which is taken; using '{name}'");
        }
        sources.push(SourceFile {
            input: FontInput::new(path).with_face_index(face_index),
            output_name: name,
        });
    }
    Ok(sources)
}

/// The snake_case module name for a font file, from its stem.
///
/// `MaterialIcons-Regular.ttf` becomes `material_icons_regular`.
pub fn output_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let mut name = String::with_capacity(stem.len() + 4);
    let mut prev: Option<char> = None;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            let boundary = c.is_ascii_uppercase()
                && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            if boundary && !name.ends_with('_') {
                name.push('_');
            }
            name.push(c.to_ascii_lowercase());
        } else if !name.is_empty() && !name.ends_with('_') {
            name.push('_');
        }
        prev = Some(c);
    }
    while name.ends_with('_') {
        name.pop();
    }
    if name.is_empty() {
        name.push_str("font");
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
