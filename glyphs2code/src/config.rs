//! Settings for a generation run
//!
//! Settings are read from an optional YAML file, checked once and then only
//! handled in their typed form.

use std::{fmt::Display, fs, path::Path, str::FromStr};

use fontglyphs::{sanitize::is_identifier, EngineOptions};
use glob::Pattern;
use serde::Deserialize;

use crate::Error;

/// Visibility of generated items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AccessLevel {
    Public = 0,
    Private = 1,
    #[default]
    Internal = 2,
    Protected = 3,
}

impl AccessLevel {
    /// The visibility qualifier, followed by a space unless it is empty.
    pub fn qualifier(self) -> &'static str {
        match self {
            AccessLevel::Public => "pub ",
            AccessLevel::Private => "",
            AccessLevel::Internal => "pub(crate) ",
            AccessLevel::Protected => "pub(super) ",
        }
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AccessLevel::Public => f.write_str("public"),
            AccessLevel::Private => f.write_str("private"),
            AccessLevel::Internal => f.write_str("internal"),
            AccessLevel::Protected => f.write_str("protected"),
        }
    }
}

impl FromStr for AccessLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" | "pub" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "internal" | "crate" => Ok(Self::Internal),
            "protected" | "super" => Ok(Self::Protected),
            _ => Err(Error::InvalidAccessLevel(s.to_string())),
        }
    }
}

/// The config file as written.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub is_enabled: Option<bool>,
    /// One or more globs separated by `;`
    pub filter_by_path: Option<String>,
    pub class_access_modifier: Option<String>,
    pub field_access_modifier: Option<String>,
    /// `a::b` or `a.b`
    pub root_namespace: Option<String>,
    pub max_glyph_name_len: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub enabled: bool,
    /// A font is processed if any of these match; empty matches everything
    pub path_filters: Vec<Pattern>,
    pub class_access: AccessLevel,
    pub field_access: AccessLevel,
    /// Modules to nest generated code in, outermost first; may be empty
    pub root_namespace: Vec<String>,
    pub engine: EngineOptions,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            enabled: true,
            path_filters: Vec::new(),
            class_access: AccessLevel::Internal,
            field_access: AccessLevel::Public,
            root_namespace: Vec::new(),
            engine: EngineOptions::default(),
        }
    }
}

impl Config {
    /// Read and check a YAML config file.
    pub fn load(path: &Path) -> Result<Config, Error> {
        let yml = fs::read_to_string(path).map_err(|source| Error::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = serde_yaml::from_str(&yml).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        Config::try_from(raw)
    }

    /// Whether a font at `path` passes the path filters.
    ///
    /// Filters are tried against the whole path and against the file name.
    pub fn matches(&self, path: &Path) -> bool {
        if self.path_filters.is_empty() {
            return true;
        }
        let file_name = path.file_name().and_then(|n| n.to_str());
        self.path_filters.iter().any(|filter| {
            filter.matches_path(path) || file_name.is_some_and(|name| filter.matches(name))
        })
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = Error;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let mut config = Config::default();
        if let Some(enabled) = raw.is_enabled {
            config.enabled = enabled;
        }
        if let Some(filters) = raw.filter_by_path {
            config.path_filters = parse_filters(&filters)?;
        }
        if let Some(access) = raw.class_access_modifier {
            config.class_access = access.parse()?;
        }
        if let Some(access) = raw.field_access_modifier {
            config.field_access = access.parse()?;
        }
        if let Some(namespace) = raw.root_namespace {
            config.root_namespace = parse_namespace(&namespace)?;
        }
        if let Some(len) = raw.max_glyph_name_len {
            config.engine.max_glyph_name_len = len;
        }
        Ok(config)
    }
}

/// Split `;` separated globs.
pub fn parse_filters(filters: &str) -> Result<Vec<Pattern>, Error> {
    filters
        .split(';')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|filter| {
            Pattern::new(filter).map_err(|source| Error::InvalidFilter {
                filter: filter.to_string(),
                source,
            })
        })
        .collect()
}

/// Split `a::b` or `a.b` into module names.
pub fn parse_namespace(namespace: &str) -> Result<Vec<String>, Error> {
    let namespace = namespace.trim();
    if namespace.is_empty() {
        return Ok(Vec::new());
    }
    let segments: Vec<_> = if namespace.contains("::") {
        namespace.split("::").collect()
    } else {
        namespace.split('.').collect()
    };
    if !segments.iter().all(|s| is_identifier(s)) {
        return Err(Error::InvalidNamespace(namespace.to_string()));
    }
    Ok(segments.into_iter().map(str::to_string).collect())
}
