//! Textured strings.
//!
//! A textured string owns an ordered list of characters and keeps their
//! absolute screen positions in sync with its anchor position and scale.
//!
//! Layout note: a character at index `i` is offset by the previous
//! character's width multiplied by `i`, not by a running sum of prior
//! widths. That only packs contiguously when every glyph has the same
//! width; the behavior is long-standing and fonts shipped against it, so it
//! is kept as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

use modkit_shared::math::Vec2;

use crate::character::TexturedCharacter;
use crate::render::GlyphRenderer;

/// An anchored, scaled run of textured characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TexturedString {
    pub label: String,
    pub position: Vec2,
    pub scale: f32,
    /// Whether layout accounts for the previous character's trailing
    /// padding.
    pub use_right_padding: bool,
    characters: Vec<TexturedCharacter>,
}

impl TexturedString {
    pub fn new(
        label: impl Into<String>,
        position: Vec2,
        characters: Vec<TexturedCharacter>,
        use_right_padding: bool,
        scale: f32,
    ) -> Self {
        let mut s = Self {
            label: label.into(),
            position,
            scale,
            use_right_padding,
            characters,
        };
        s.layout();
        s
    }

    pub fn characters(&self) -> &[TexturedCharacter] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Recomputes every character position relative to the anchor.
    ///
    /// The first character sits at `anchor + left_padding * scale`; each
    /// later character is offset by its own left padding, the previous
    /// character's right padding (when enabled), and the previous
    /// character's width times its index.
    pub fn layout(&mut self) {
        let mut prev_width = 0.0;
        let mut prev_right = 0.0;

        for (index, ch) in self.characters.iter_mut().enumerate() {
            let x = if index == 0 {
                self.position.x + ch.spacing.left * self.scale
            } else if self.use_right_padding {
                self.position.x
                    + ch.spacing.left * self.scale
                    + prev_right * self.scale
                    + prev_width * self.scale * index as f32
            } else {
                self.position.x
                    + ch.spacing.left * self.scale
                    + prev_width * self.scale * index as f32
            };
            ch.position = Vec2::new(x, self.position.y);

            prev_width = ch.texture.width;
            prev_right = ch.spacing.right;
        }
    }

    /// Appends one character and re-lays out the string.
    pub fn push(&mut self, ch: TexturedCharacter) {
        self.characters.push(ch);
        self.layout();
    }

    /// Appends many characters and re-lays out the string.
    pub fn extend(&mut self, chars: impl IntoIterator<Item = TexturedCharacter>) {
        self.characters.extend(chars);
        self.layout();
    }

    /// Removes `count` characters starting at `index`. Positions of the
    /// remaining characters are left untouched.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), LayoutError> {
        let len = self.characters.len();
        let end = index.checked_add(count).filter(|end| *end <= len);
        let Some(end) = end else {
            return Err(LayoutError::RangeOutOfBounds { index, count, len });
        };
        self.characters.drain(index..end);
        Ok(())
    }

    /// Moves the whole string to `position` and re-lays out.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.layout();
    }

    /// Horizontal extent from the anchor to the rightmost glyph edge.
    pub fn width(&self) -> f32 {
        self.characters
            .iter()
            .map(|ch| ch.position.x + ch.texture.width * self.scale - self.position.x)
            .fold(0.0, f32::max)
    }

    /// Returns a copy of this string re-anchored at `position`.
    pub fn copy_at(&self, position: Vec2) -> Self {
        let mut copy = self.clone();
        copy.set_position(position);
        copy
    }

    /// Returns a copy with a new label, re-anchored at `position`.
    pub fn copy_with_label(&self, label: impl Into<String>, position: Vec2) -> Self {
        let mut copy = self.copy_at(position);
        copy.label = label.into();
        copy
    }

    /// Draws every character through the given renderer.
    pub fn draw(&self, renderer: &mut dyn GlyphRenderer) {
        for ch in &self.characters {
            renderer.draw_glyph(ch.symbol, ch.texture, ch.position, self.scale);
        }
    }
}

/// Joins two strings into a new one anchored at `position`.
///
/// Both character lists are copied, never aliased; mutating the result
/// leaves the sources untouched. The result keeps the first string's scale
/// and padding mode and starts with an empty label.
pub fn concat(first: &TexturedString, second: &TexturedString, position: Vec2) -> TexturedString {
    let mut characters = first.characters.clone();
    characters.extend(second.characters.iter().copied());
    TexturedString::new(
        "",
        position,
        characters,
        first.use_right_padding,
        first.scale,
    )
}

/// Layout operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    RangeOutOfBounds {
        index: usize,
        count: usize,
        len: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::RangeOutOfBounds { index, count, len } => write!(
                f,
                "character range {index}..{} out of bounds for string of length {len}",
                index + count
            ),
        }
    }
}

impl std::error::Error for LayoutError {}
