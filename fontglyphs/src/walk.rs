//! Walking every codepoint of the selected charmap.

use std::{collections::HashSet, iter::FusedIterator, ops::RangeInclusive};

use write_fonts::{
    read::tables::cmap::{Cmap4Iter, CmapSubtable, ConstantMapGroup, SequentialMapGroup},
    types::{BigEndian, GlyphId},
};

/// A codepoint and the glyph it maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodepointEntry {
    pub codepoint: u32,
    pub glyph_id: GlyphId,
}

/// A charmap that can't be walked to completion.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalkError {
    #[error("codepoint U+{0:04X} was returned twice")]
    RepeatedCodepoint(u32),
    #[error("walk did not finish within {0} steps")]
    TooManySteps(u32),
}

/// Raw (codepoint, glyph) pairs of one subtable, in table order.
///
/// Pairs that map to glyph 0 are passed through; the walker skips them.
enum Mappings<'a> {
    Empty,
    /// Formats 0, 6 and 10: consecutive codes starting at `first`
    Trimmed {
        first: u32,
        glyphs: TrimmedGlyphs<'a>,
        pos: usize,
    },
    Segments(Cmap4Iter<'a>),
    /// Formats 12 and 13
    Groups {
        groups: Groups<'a>,
        next_group: usize,
        current: Option<GroupCursor>,
    },
}

enum TrimmedGlyphs<'a> {
    Bytes(&'a [u8]),
    Words(&'a [BigEndian<u16>]),
}

impl TrimmedGlyphs<'_> {
    fn get(&self, pos: usize) -> Option<u32> {
        match self {
            TrimmedGlyphs::Bytes(glyphs) => glyphs.get(pos).map(|g| *g as u32),
            TrimmedGlyphs::Words(glyphs) => glyphs.get(pos).map(|g| g.get() as u32),
        }
    }
}

enum Groups<'a> {
    Sequential(&'a [SequentialMapGroup]),
    Constant(&'a [ConstantMapGroup]),
}

impl Groups<'_> {
    fn cursor(&self, idx: usize) -> Option<GroupCursor> {
        let (start, end, glyph, constant) = match self {
            Groups::Sequential(groups) => {
                let group = groups.get(idx)?;
                (
                    group.start_char_code(),
                    group.end_char_code(),
                    group.start_glyph_id(),
                    false,
                )
            }
            Groups::Constant(groups) => {
                let group = groups.get(idx)?;
                (
                    group.start_char_code(),
                    group.end_char_code(),
                    group.glyph_id(),
                    true,
                )
            }
        };
        Some(GroupCursor {
            codes: start..=end,
            start,
            glyph,
            constant,
        })
    }
}

struct GroupCursor {
    codes: RangeInclusive<u32>,
    start: u32,
    glyph: u32,
    constant: bool,
}

impl GroupCursor {
    fn next(&mut self) -> Option<(u32, u32)> {
        let code = self.codes.next()?;
        let glyph = if self.constant {
            self.glyph
        } else {
            // overflowing glyph ids don't exist; report them as unmapped
            self.glyph.checked_add(code - self.start).unwrap_or(0)
        };
        Some((code, glyph))
    }
}

impl<'a> Mappings<'a> {
    fn new(subtable: &CmapSubtable<'a>) -> Self {
        match subtable {
            CmapSubtable::Format0(table) => Mappings::Trimmed {
                first: 0,
                glyphs: TrimmedGlyphs::Bytes(table.glyph_id_array()),
                pos: 0,
            },
            CmapSubtable::Format4(table) => Mappings::Segments(table.iter()),
            CmapSubtable::Format6(table) => Mappings::Trimmed {
                first: table.first_code() as u32,
                glyphs: TrimmedGlyphs::Words(table.glyph_id_array()),
                pos: 0,
            },
            CmapSubtable::Format10(table) => Mappings::Trimmed {
                first: table.start_char_code(),
                glyphs: TrimmedGlyphs::Words(table.glyph_id_array()),
                pos: 0,
            },
            CmapSubtable::Format12(table) => Mappings::Groups {
                groups: Groups::Sequential(table.groups()),
                next_group: 0,
                current: None,
            },
            CmapSubtable::Format13(table) => Mappings::Groups {
                groups: Groups::Constant(table.groups()),
                next_group: 0,
                current: None,
            },
            _ => Mappings::Empty,
        }
    }
}

impl Iterator for Mappings<'_> {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Mappings::Empty => None,
            Mappings::Trimmed { first, glyphs, pos } => {
                let glyph = glyphs.get(*pos)?;
                let code = first.checked_add(*pos as u32)?;
                *pos += 1;
                Some((code, glyph))
            }
            Mappings::Segments(iter) => iter.next().map(|(code, gid)| (code, gid.to_u32())),
            Mappings::Groups {
                groups,
                next_group,
                current,
            } => loop {
                if let Some(item) = current.as_mut().and_then(GroupCursor::next) {
                    return Some(item);
                }
                *current = Some(groups.cursor(*next_group)?);
                *next_group += 1;
            },
        }
    }
}

/// Lazily yields every mapped codepoint of a charmap.
///
/// The walk follows the subtable's own order, which need not be ascending.
/// A codepoint seen twice, or a walk longer than the step limit, ends the
/// walk with an error: such tables are malformed and could otherwise loop
/// forever. A charmap that maps nothing yields an empty sequence.
pub struct CodepointWalker<'a> {
    mappings: Mappings<'a>,
    seen: HashSet<u32>,
    steps: u32,
    max_steps: u32,
    done: bool,
}

impl<'a> CodepointWalker<'a> {
    pub(crate) fn new(subtable: Option<&CmapSubtable<'a>>, max_steps: u32) -> Self {
        CodepointWalker {
            mappings: subtable.map(Mappings::new).unwrap_or(Mappings::Empty),
            seen: HashSet::new(),
            steps: 0,
            max_steps,
            done: false,
        }
    }

    fn fail(&mut self, err: WalkError) -> Option<Result<CodepointEntry, WalkError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl Iterator for CodepointWalker<'_> {
    type Item = Result<CodepointEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let Some((codepoint, glyph)) = self.mappings.next() else {
                self.done = true;
                return None;
            };
            self.steps += 1;
            if self.steps > self.max_steps {
                return self.fail(WalkError::TooManySteps(self.max_steps));
            }
            if glyph == 0 {
                continue;
            }
            if !self.seen.insert(codepoint) {
                return self.fail(WalkError::RepeatedCodepoint(codepoint));
            }
            return Some(Ok(CodepointEntry {
                codepoint,
                glyph_id: GlyphId::new(glyph),
            }));
        }
    }
}

impl FusedIterator for CodepointWalker<'_> {}
