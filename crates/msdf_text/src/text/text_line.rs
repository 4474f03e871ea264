//! A single laid-out line of text

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Text of one output line together with its scaled width
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextLine {
    text: String,
    width: f32,
}

impl TextLine {
    /// Create a line from its text and scaled width
    pub fn new(text: impl Into<String>, width: f32) -> Self {
        Self {
            text: text.into(),
            width,
        }
    }

    /// Line content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Scaled width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Whether the line has no characters at all
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the line is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }

    /// Join two lines, summing their widths
    #[must_use]
    pub fn concat(mut self, other: Self) -> Self {
        self.text.push_str(&other.text);
        self.width += other.width;
        self
    }

    /// Append one character while the line is still being built
    pub(crate) fn push(&mut self, character: char, width: f32) {
        self.text.push(character);
        self.width += width;
    }
}

impl Add for TextLine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.concat(other)
    }
}
