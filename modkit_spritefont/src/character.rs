//! Textured characters.

use serde::{Deserialize, Serialize};

use modkit_shared::math::Vec2;

/// Backing glyph image dimensions, in texels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GlyphTexture {
    pub width: f32,
    pub height: f32,
}

impl GlyphTexture {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Horizontal spacing around a glyph, in unscaled texels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CharacterSpacing {
    pub left: f32,
    pub right: f32,
}

impl CharacterSpacing {
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }
}

/// One positioned character of a textured string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TexturedCharacter {
    pub symbol: char,
    pub texture: GlyphTexture,
    pub spacing: CharacterSpacing,
    /// Absolute screen position, maintained by the owning string's layout.
    pub position: Vec2,
}

impl TexturedCharacter {
    pub fn new(symbol: char, texture: GlyphTexture, spacing: CharacterSpacing) -> Self {
        Self {
            symbol,
            texture,
            spacing,
            position: Vec2::ZERO,
        }
    }
}
