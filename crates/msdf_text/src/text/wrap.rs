//! Line wrapping
//!
//! Splits text into [`TextLine`]s under one of four strategies. Widths are
//! accumulated from kerned glyph advances multiplied by `scale`; the final
//! glyph of the input contributes its visible extent instead of its advance.
//!
//! Only `'\n'` counts as an explicit line break. It is tested on the source
//! character, before any fallback substitution.

use serde::{Deserialize, Serialize};

use super::{GlyphTable, TextLine};

/// Explicit line-break character
pub const LINE_BREAK: char = '\n';

/// Wrapping strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WrapMode {
    /// Keep everything on one line; line breaks become spaces
    None,
    /// Break only at explicit line breaks
    #[default]
    Default,
    /// Break between any two glyphs to stay under the maximum width
    Character,
    /// Break between whitespace-delimited words to stay under the maximum width
    Word,
}

/// Split `text` into lines
///
/// `max_width` is clamped to be non-negative and only matters for
/// [`WrapMode::Character`] and [`WrapMode::Word`].
pub fn wrap_text(glyphs: &GlyphTable, text: &str, scale: f32, mode: WrapMode, max_width: f32) -> Vec<TextLine> {
    let max_width = max_width.max(0.0);
    match mode {
        WrapMode::None => {
            let text = text.replace(LINE_BREAK, " ");
            let width = glyphs.measure(&text) * scale;
            vec![TextLine::new(text, width)]
        }
        WrapMode::Default => text
            .split(LINE_BREAK)
            .map(|segment| TextLine::new(segment, glyphs.measure(segment) * scale))
            .collect(),
        WrapMode::Character => wrap_characters(glyphs, text, scale, max_width),
        WrapMode::Word => wrap_words(glyphs, text, scale, max_width),
    }
}

fn wrap_characters(glyphs: &GlyphTable, text: &str, scale: f32, max_width: f32) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let mut line = TextLine::default();

    for span in glyphs.spans(text) {
        if span.character == LINE_BREAK {
            lines.push(std::mem::take(&mut line));
            continue;
        }

        let advance = span.advance * scale;
        if !line.is_blank() && line.width() + advance >= max_width {
            lines.push(std::mem::take(&mut line));
            if span.character.is_whitespace() {
                continue;
            }
        }
        line.push(span.character, advance);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn wrap_words(glyphs: &GlyphTable, text: &str, scale: f32, max_width: f32) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let mut line = TextLine::default();
    let mut word = TextLine::default();

    for span in glyphs.spans(text) {
        if span.character == LINE_BREAK {
            let word = std::mem::take(&mut word);
            let line = std::mem::take(&mut line);
            if word.is_empty() || fits(&line, &word, max_width) {
                lines.push(line + word);
            } else {
                lines.push(line);
                lines.push(word);
            }
            continue;
        }

        word.push(span.character, span.advance * scale);

        if span.character.is_whitespace() || span.is_last {
            let word = std::mem::take(&mut word);
            if fits(&line, &word, max_width) {
                line = std::mem::take(&mut line) + word;
            } else {
                lines.push(std::mem::replace(&mut line, word));
            }
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// A word joins the current line when the line is empty or it still fits
fn fits(line: &TextLine, word: &TextLine, max_width: f32) -> bool {
    line.is_empty() || line.width() + word.width() <= max_width
}
