//! Character to glyph lookup with fallback
//!
//! Lookups never fail: a missing character resolves to the fallback glyph
//! and, if that is missing too, to [`Glyph::EMPTY`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::Chars;

use super::Glyph;

/// Fallback character used when none is configured explicitly
///
/// Only takes effect when the atlas charset contains `'?'`.
pub const DEFAULT_FALLBACK: char = '?';

static EMPTY_GLYPH: Glyph = Glyph::EMPTY;

/// Read-only glyph table built once per font
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphTable {
    glyphs: BTreeMap<char, Glyph>,
    fallback: Option<char>,
}

impl GlyphTable {
    /// Build a table from glyphs, using [`DEFAULT_FALLBACK`]
    pub fn new(glyphs: impl IntoIterator<Item = Glyph>) -> Self {
        Self {
            glyphs: glyphs.into_iter().map(|glyph| (glyph.character(), glyph)).collect(),
            fallback: Some(DEFAULT_FALLBACK),
        }
    }

    /// Replace the fallback character; `None` disables fallback lookup
    pub fn with_fallback(mut self, fallback: Option<char>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Configured fallback character
    pub fn fallback(&self) -> Option<char> {
        self.fallback
    }

    /// Whether `character` has its own glyph
    pub fn contains(&self, character: char) -> bool {
        self.glyphs.contains_key(&character)
    }

    /// Glyph for `character`, the fallback glyph, or the empty glyph
    pub fn lookup(&self, character: char) -> &Glyph {
        self.glyphs
            .get(&character)
            .or_else(|| self.fallback.and_then(|fallback| self.glyphs.get(&fallback)))
            .unwrap_or(&EMPTY_GLYPH)
    }

    /// Kerned advance from `character` to `next`
    ///
    /// Kerning is keyed by the resolved glyphs, so a missing `next` kerns
    /// against the fallback glyph.
    pub fn advance(&self, character: char, next: Option<char>) -> f32 {
        let next = next.map(|next| self.lookup(next).character());
        self.lookup(character).advance_to(next)
    }

    /// Walk `text` yielding each glyph with its pen span
    pub fn spans<'a>(&'a self, text: &'a str) -> GlyphSpans<'a> {
        GlyphSpans {
            table: self,
            chars: text.chars().peekable(),
        }
    }

    /// Unscaled width of `text` laid out on a single line
    pub fn measure(&self, text: &str) -> f32 {
        self.spans(text).map(|span| span.advance).sum()
    }

    /// Glyphs in character order
    pub fn iter(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.values()
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the table holds no glyphs
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

/// One step of a glyph walk
#[derive(Debug, Clone, Copy)]
pub struct GlyphSpan<'a> {
    /// Source character
    pub character: char,
    /// Resolved glyph
    pub glyph: &'a Glyph,
    /// Pen travel in font-size units: kerned advance, or the glyph extent
    /// when this is the final character of the walk
    pub advance: f32,
    /// Whether this is the final character of the walk
    pub is_last: bool,
}

/// Iterator returned by [`GlyphTable::spans`]
#[derive(Debug, Clone)]
pub struct GlyphSpans<'a> {
    table: &'a GlyphTable,
    chars: Peekable<Chars<'a>>,
}

impl<'a> Iterator for GlyphSpans<'a> {
    type Item = GlyphSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let character = self.chars.next()?;
        let glyph = self.table.lookup(character);
        let (advance, is_last) = match self.chars.peek() {
            Some(&next) => (glyph.advance_to(Some(self.table.lookup(next).character())), false),
            None => (glyph.extent(), true),
        };
        Some(GlyphSpan {
            character,
            glyph,
            advance,
            is_last,
        })
    }
}
