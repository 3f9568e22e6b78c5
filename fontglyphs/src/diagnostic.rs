//! Structured warnings and errors handed to whoever reports them.

use std::fmt::Display;

use crate::error::Error;

const ISSUE_URL: &str = "https://github.com/workgroupengineering/Glyphs2Code";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// What went wrong; each kind has a stable id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Unhandled,
    EngineInit,
    FaceOpen,
    NoCharmap,
    MalformedCharmap,
    OutputWrite,
    Cancelled,
}

impl DiagnosticKind {
    pub fn id(self) -> &'static str {
        match self {
            DiagnosticKind::Unhandled => "G2C0000",
            DiagnosticKind::EngineInit => "G2C0001",
            DiagnosticKind::FaceOpen => "G2C0002",
            DiagnosticKind::NoCharmap => "G2C0003",
            DiagnosticKind::MalformedCharmap => "G2C0004",
            DiagnosticKind::OutputWrite => "G2C0005",
            DiagnosticKind::Cancelled => "G2C0006",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::NoCharmap | DiagnosticKind::Cancelled => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// The catch-all for failures nothing else describes.
    pub fn unhandled(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Diagnostic::new(
            DiagnosticKind::Unhandled,
            format!(
                "Unhandled error while enumerating glyphs: {}. Please file an issue: {ISSUE_URL}",
                message.into()
            ),
        )
        .with_detail(detail)
    }

    pub fn from_error(err: &Error) -> Self {
        let kind = match err {
            Error::EngineInit(_) => DiagnosticKind::EngineInit,
            Error::FaceOpen { .. } => DiagnosticKind::FaceOpen,
            Error::NoCharmap { .. } => DiagnosticKind::NoCharmap,
            Error::MalformedCharmap { .. } => DiagnosticKind::MalformedCharmap,
            Error::Cancelled => DiagnosticKind::Cancelled,
        };
        let diagnostic = Diagnostic::new(kind, err.to_string());
        match err {
            Error::FaceOpen { detail, .. } => diagnostic.with_detail(detail.clone()),
            _ => diagnostic,
        }
    }
}

impl From<&Error> for Diagnostic {
    fn from(err: &Error) -> Self {
        Diagnostic::from_error(err)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.severity(), self.id(), self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  {detail}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{charmap::Encoding, error::FaceOpenReason};
    use std::path::PathBuf;

    #[test]
    fn missing_charmap_is_a_warning() {
        let err = Error::NoCharmap {
            path: PathBuf::from("a.ttf"),
            encodings: vec![Encoding::MsSymbol],
        };
        let diagnostic = Diagnostic::from_error(&err);
        assert_eq!("G2C0003", diagnostic.id());
        assert_eq!(Severity::Warning, diagnostic.severity());
    }

    #[test]
    fn face_open_keeps_detail() {
        let err = Error::FaceOpen {
            path: PathBuf::from("a.ttf"),
            index: 0,
            reason: FaceOpenReason::NotFound,
            detail: "No such file or directory".to_string(),
        };
        let diagnostic = Diagnostic::from(&err);
        assert_eq!(Severity::Error, diagnostic.severity());
        assert_eq!(Some("No such file or directory"), diagnostic.detail.as_deref());
        assert!(diagnostic.to_string().starts_with("error G2C0002: "));
    }

    #[test]
    fn unhandled_points_at_issues() {
        let diagnostic = Diagnostic::unhandled("boom", "boom at walk.rs");
        assert_eq!("G2C0000", diagnostic.id());
        assert!(diagnostic.message.contains("boom"));
        assert!(diagnostic.message.contains(ISSUE_URL));
        assert_eq!(Some("boom at walk.rs"), diagnostic.detail.as_deref());
    }
}
