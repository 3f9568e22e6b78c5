//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::{parse_filters, parse_namespace, AccessLevel, Config},
    Error, Output,
};

/// Generate Rust constants naming the glyphs of icon and symbol fonts
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about)]
pub struct Args {
    /// Font files, or directories holding them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// YAML config file; flags given here take precedence over it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to write `<name>.rs` files to. Default is stdout.
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Only process fonts whose path or file name matches this glob.
    /// May be repeated, or hold several globs separated by ';'
    #[arg(short, long)]
    pub filter: Vec<String>,

    /// Visibility of generated modules: public, private, internal or protected
    #[arg(long)]
    pub class_access: Option<AccessLevel>,

    /// Visibility of generated constants: public, private, internal or protected
    #[arg(long)]
    pub field_access: Option<AccessLevel>,

    /// Modules to nest generated code in, e.g. `assets::fonts`
    #[arg(long)]
    pub root_namespace: Option<String>,

    /// Index of the face to read from font collections
    #[arg(long, default_value_t = 0)]
    pub face_index: u32,

    /// Don't generate anything
    #[arg(long)]
    pub disable: bool,

    /// Longest glyph name, in bytes, before truncation
    #[arg(long)]
    pub max_name_len: Option<usize>,
}

impl Args {
    /// The config file, if any, with these flags applied on top.
    pub fn config(&self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if self.disable {
            config.enabled = false;
        }
        if !self.filter.is_empty() {
            config.path_filters = self
                .filter
                .iter()
                .map(|f| parse_filters(f))
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .flatten()
                .collect();
        }
        if let Some(access) = self.class_access {
            config.class_access = access;
        }
        if let Some(access) = self.field_access {
            config.field_access = access;
        }
        if let Some(namespace) = &self.root_namespace {
            config.root_namespace = parse_namespace(namespace)?;
        }
        if let Some(len) = self.max_name_len {
            config.engine.max_glyph_name_len = len;
        }
        Ok(config)
    }

    pub fn output(&self) -> Output {
        match &self.out_dir {
            Some(dir) => Output::Dir(dir.clone()),
            None => Output::Stdout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("glyphs2code").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn inputs_are_required() {
        assert!(Args::try_parse_from(["glyphs2code"]).is_err());
    }

    #[test]
    fn defaults_without_flags() {
        let args = parse(&["icons.ttf"]);
        assert_eq!(Config::default(), args.config().unwrap());
        assert_eq!(Output::Stdout, args.output());
    }

    #[test]
    fn flags_override_file() {
        let temp_dir = tempdir().unwrap();
        let config_file = temp_dir.path().join("glyphs2code.yml");
        fs::write(
            &config_file,
            "class_access_modifier: protected\nfield_access_modifier: private\n",
        )
        .unwrap();
        let args = parse(&[
            "--config",
            config_file.to_str().unwrap(),
            "--class-access",
            "Public",
            "--filter",
            "*.ttf;*.otf",
            "--filter",
            "*.ttc",
            "--root-namespace",
            "assets::fonts",
            "--out-dir",
            "generated",
            "fonts",
        ]);
        let config = args.config().unwrap();
        assert_eq!(AccessLevel::Public, config.class_access);
        assert_eq!(AccessLevel::Private, config.field_access);
        assert_eq!(3, config.path_filters.len());
        assert_eq!(vec!["assets", "fonts"], config.root_namespace);
        assert_eq!(Output::Dir(PathBuf::from("generated")), args.output());
    }

    #[test]
    fn disable_wins() {
        let args = parse(&["--disable", "--max-name-len", "31", "a.ttf"]);
        let config = args.config().unwrap();
        assert!(!config.enabled);
        assert_eq!(31, config.engine.max_glyph_name_len);
    }

    #[test]
    fn bad_access_level() {
        let result = Args::try_parse_from(["glyphs2code", "--field-access", "friend", "a.ttf"]);
        assert!(result.is_err());
    }
}
