//! Rendering enumerated glyphs as a Rust module.

use std::collections::HashSet;

use fontglyphs::FontGlyphs;

use crate::config::Config;

// strict and reserved keywords that `r#` can escape
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

// keywords that can't be raw identifiers
const PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Turn an identifier into something usable as a Rust item name.
pub fn rust_ident(name: &str) -> String {
    if PATH_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str("    ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }
}

fn codepoint_literal(codepoint: u32) -> (&'static str, String) {
    match char::from_u32(codepoint) {
        Some(_) => ("char", format!("'\\u{{{codepoint:X}}}'")),
        None => ("u32", format!("0x{codepoint:X}")),
    }
}

/// Render the glyphs of one font as module `output_name`.
///
/// The module sits inside the config's root namespace, if any, and holds one
/// constant per identifier.
pub fn render(glyphs: &FontGlyphs, output_name: &str, config: &Config) -> String {
    let mut w = Writer {
        out: String::new(),
        depth: 0,
    };
    w.line(&format!(
        "// Generated by glyphs2code from '{}'. Do not edit.",
        glyphs.path.display()
    ));
    if let Some(family) = &glyphs.family_name {
        w.line(&format!("// Family: {family}"));
    }
    w.line(&format!("// Charmap: {}", glyphs.charmap));
    if !glyphs.has_glyph_names {
        w.line("// The font has no glyph names; names are derived from codepoints.");
    }
    w.line("");

    let module_access = config.class_access.qualifier();
    for segment in &config.root_namespace {
        w.open(&format!("{module_access}mod {} {{", rust_ident(segment)));
    }
    w.line("#[allow(non_upper_case_globals, dead_code)]");
    w.open(&format!("{module_access}mod {} {{", rust_ident(output_name)));

    let field_access = config.field_access.qualifier();
    let mut emitted = HashSet::new();
    for record in &glyphs.identifiers {
        let mut name = rust_ident(&record.name);
        // escaping `self` to `self_` can collide with a real `self_`
        while !emitted.insert(name.clone()) {
            name.push('_');
        }
        let (ty, value) = codepoint_literal(record.codepoint);
        w.line(&format!("{field_access}const {name}: {ty} = {value};"));
    }

    w.close();
    for _ in &config.root_namespace {
        w.close();
    }
    w.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessLevel;
    use fontglyphs::{CharmapInfo, Encoding, IdentifierRecord, PlatformId};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::PathBuf;
    use write_fonts::types::GlyphId;

    fn glyphs(records: &[(&str, u32)]) -> FontGlyphs {
        FontGlyphs {
            path: PathBuf::from("fonts/icons.ttf"),
            face_index: 0,
            family_name: Some("Icons".to_string()),
            charmap: CharmapInfo {
                record_index: 0,
                platform: PlatformId::Windows,
                encoding_id: 10,
                encoding: Encoding::Unicode,
                format: 12,
                wide: true,
            },
            has_glyph_names: true,
            identifiers: records
                .iter()
                .enumerate()
                .map(|(i, (name, codepoint))| IdentifierRecord {
                    name: (*name).into(),
                    codepoint: *codepoint,
                    glyph_id: GlyphId::new(i as u32 + 1),
                })
                .collect(),
        }
    }

    #[rstest]
    #[case("home", "home")]
    #[case("type", "r#type")]
    #[case("async", "r#async")]
    #[case("self", "self_")]
    #[case("Self", "Self_")]
    #[case("crate", "crate_")]
    fn idents(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(expected, rust_ident(name));
    }

    #[test]
    fn renders_module() {
        let code = render(
            &glyphs(&[("home", 0xE88A), ("type", 0x41)]),
            "icons",
            &Config::default(),
        );
        assert_eq!(
            "// Generated by glyphs2code from 'fonts/icons.ttf'. Do not edit.\n\
             // Family: Icons\n\
             // Charmap: Windows/10 format 12 (UCS-4)\n\
             \n\
             #[allow(non_upper_case_globals, dead_code)]\n\
             pub(crate) mod icons {\n    \
             pub const home: char = '\\u{E88A}';\n    \
             pub const r#type: char = '\\u{41}';\n\
             }\n",
            code
        );
    }

    #[test]
    fn nests_root_namespace() {
        let config = Config {
            class_access: AccessLevel::Public,
            field_access: AccessLevel::Private,
            root_namespace: vec!["acme".to_string(), "fonts".to_string()],
            ..Default::default()
        };
        let code = render(&glyphs(&[("a", 0x61)]), "icons", &config);
        let body: Vec<_> = code.lines().skip(4).collect();
        assert_eq!(
            vec![
                "pub mod acme {",
                "    pub mod fonts {",
                "        #[allow(non_upper_case_globals, dead_code)]",
                "        pub mod icons {",
                "            const a: char = '\\u{61}';",
                "        }",
                "    }",
                "}",
            ],
            body
        );
    }

    #[test]
    fn surrogates_are_u32() {
        let code = render(&glyphs(&[("odd", 0xD800)]), "icons", &Config::default());
        assert!(code.contains("pub const odd: u32 = 0xD800;"), "{code}");
    }

    #[test]
    fn escaped_names_stay_unique() {
        let code = render(
            &glyphs(&[("self_", 0x41), ("self", 0x42)]),
            "icons",
            &Config::default(),
        );
        assert!(code.contains("const self_: char = '\\u{41}';"), "{code}");
        assert!(code.contains("const self__: char = '\\u{42}';"), "{code}");
    }
}
