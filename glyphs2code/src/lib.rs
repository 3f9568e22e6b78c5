//! Generates Rust constants that name the glyphs of icon and symbol fonts.

#[cfg(feature = "cli")]
mod args;
pub mod codegen;
pub mod config;
pub mod discovery;
mod error;

#[cfg(feature = "cli")]
pub use args::Args;
pub use config::{AccessLevel, Config};
pub use error::Error;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use fontglyphs::{
    enumerate_batch, CancellationFlag, Diagnostic, DiagnosticKind, FileStatus, Severity,
};
use log::{debug, error, info};

use crate::{codegen::render, discovery::discover};

/// Where generated code goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Stdout,
    /// One `<output name>.rs` per font
    Dir(PathBuf),
}

/// What a [`run`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Files written, when writing to a directory
    pub written: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
    pub cancelled: bool,
}

impl RunReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
            .count()
    }
}

pub fn require_dir(dir: &Path) -> Result<PathBuf, Error> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::ExpectedDirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| Error::FileIo {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    debug!("require_dir {:?}", dir);
    Ok(dir.to_path_buf())
}

fn write_output(
    output: &Output,
    output_name: &str,
    code: &str,
) -> Result<Option<PathBuf>, Error> {
    match output {
        Output::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(code.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(Error::StdioWriteFail)?;
            Ok(None)
        }
        Output::Dir(dir) => {
            let path = dir.join(format!("{output_name}.rs"));
            fs::write(&path, code).map_err(|source| Error::FileIo {
                path: path.clone(),
                source,
            })?;
            Ok(Some(path))
        }
    }
}

/// Generate code for every font found in `inputs`.
///
/// Fails only if the inputs or output directory can't be read or created,
/// or if no font can be processed at all. Problems with individual fonts,
/// including writing their code, end up in the report's diagnostics.
pub fn run(
    inputs: &[PathBuf],
    config: &Config,
    face_index: u32,
    output: &Output,
    cancel: &CancellationFlag,
) -> Result<RunReport, Error> {
    let sources = discover(inputs, config, face_index)?;
    if sources.is_empty() {
        info!("No fonts to generate code for");
        return Ok(RunReport::default());
    }
    if let Output::Dir(dir) = output {
        require_dir(dir)?;
    }

    let font_inputs: Vec<_> = sources.iter().map(|s| s.input.clone()).collect();
    let batch = enumerate_batch(config.engine.clone(), &font_inputs, cancel)?;

    let mut report = RunReport {
        cancelled: batch.cancelled,
        ..Default::default()
    };
    // outcomes are in input order, one per file started
    for (source, outcome) in sources.iter().zip(batch.outcomes) {
        match outcome.status {
            FileStatus::Complete(glyphs) => {
                let code = render(&glyphs, &source.output_name, config);
                match write_output(output, &source.output_name, &code) {
                    Ok(Some(path)) => {
                        info!(
                            "Wrote {} glyphs of {:?} to {path:?}",
                            glyphs.identifiers.len(),
                            glyphs.path
                        );
                        report.written.push(path);
                    }
                    Ok(None) => (),
                    Err(e) => {
                        let diagnostic =
                            Diagnostic::new(DiagnosticKind::OutputWrite, e.to_string());
                        error!("{diagnostic}");
                        report.diagnostics.push(diagnostic);
                    }
                }
            }
            FileStatus::Skipped(diagnostic) | FileStatus::Failed(diagnostic) => {
                report.diagnostics.push(diagnostic)
            }
            FileStatus::Cancelled => report
                .diagnostics
                .push(Diagnostic::from_error(&fontglyphs::Error::Cancelled)),
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use write_fonts::{dump_table, tables::post::Post, types::Tag, FontBuilder};

    /// A font mapping U+E000.. to `names`, as a single Windows UCS-4 cmap group
    fn icon_font(names: &[&str]) -> Vec<u8> {
        let mut cmap = Vec::new();
        // header and one encoding record
        for v in [0u16, 1, 3, 10] {
            cmap.extend(v.to_be_bytes());
        }
        cmap.extend(12u32.to_be_bytes());
        // format 12 with one group
        cmap.extend(12u16.to_be_bytes());
        cmap.extend(0u16.to_be_bytes());
        for v in [28u32, 0, 1, 0xE000, 0xE000 + names.len() as u32 - 1, 1] {
            cmap.extend(v.to_be_bytes());
        }
        let post = Post::new_v2(std::iter::once(".notdef").chain(names.iter().copied()));

        let mut builder = FontBuilder::default();
        builder.add_raw(Tag::new(b"cmap"), cmap);
        builder.add_raw(Tag::new(b"post"), dump_table(&post).unwrap());
        builder.build()
    }

    #[test]
    fn writes_one_file_per_font() {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = tempdir().unwrap();
        let fonts = temp_dir.path().join("fonts");
        fs::create_dir(&fonts).unwrap();
        fs::write(fonts.join("Material-Icons.ttf"), icon_font(&["home", "search"])).unwrap();
        fs::write(fonts.join("broken.ttf"), b"not a font").unwrap();
        let out_dir = temp_dir.path().join("out");

        let report = run(
            &[fonts],
            &Config::default(),
            0,
            &Output::Dir(out_dir.clone()),
            &CancellationFlag::new(),
        )
        .unwrap();

        assert_eq!(vec![out_dir.join("material_icons.rs")], report.written);
        assert_eq!(1, report.error_count());
        assert_eq!(DiagnosticKind::FaceOpen, report.diagnostics[0].kind);

        let code = fs::read_to_string(out_dir.join("material_icons.rs")).unwrap();
        assert!(code.contains("pub(crate) mod material_icons {"), "{code}");
        assert!(code.contains("pub const home: char = '\\u{E000}';"), "{code}");
        assert!(code.contains("pub const search: char = '\\u{E001}';"), "{code}");
    }

    #[test]
    fn disabled_does_nothing() {
        let temp_dir = tempdir().unwrap();
        let font = temp_dir.path().join("a.ttf");
        fs::write(&font, icon_font(&["a"])).unwrap();
        let out_dir = temp_dir.path().join("out");
        let config = Config {
            enabled: false,
            ..Default::default()
        };
        let report = run(
            &[font],
            &config,
            0,
            &Output::Dir(out_dir.clone()),
            &CancellationFlag::new(),
        )
        .unwrap();
        assert_eq!(RunReport::default(), report);
        assert!(!out_dir.exists());
    }

    #[test]
    fn cancelled_run_writes_nothing() {
        let temp_dir = tempdir().unwrap();
        let font = temp_dir.path().join("a.ttf");
        fs::write(&font, icon_font(&["a"])).unwrap();
        let out_dir = temp_dir.path().join("out");
        let cancel = CancellationFlag::new();
        cancel.cancel();
        let report = run(&[font], &Config::default(), 0, &Output::Dir(out_dir), &cancel).unwrap();
        assert!(report.cancelled);
        assert!(report.written.is_empty());
    }

    #[test]
    fn output_dir_must_be_a_dir() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("taken");
        fs::write(&file, b"").unwrap();
        assert!(matches!(
            require_dir(&file),
            Err(Error::ExpectedDirectory(_))
        ));
    }
}
