//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend. The host
//! game implements [`GlyphRenderer`] against its own sprite batch.

use modkit_shared::math::Vec2;

use crate::character::GlyphTexture;

/// A minimal glyph-drawing API.
pub trait GlyphRenderer: Send + Sync {
    fn draw_glyph(&mut self, symbol: char, texture: GlyphTexture, position: Vec2, scale: f32);
}

/// A no-op renderer useful for headless tests.
#[derive(Default)]
pub struct NullGlyphRenderer;

impl GlyphRenderer for NullGlyphRenderer {
    fn draw_glyph(&mut self, _symbol: char, _texture: GlyphTexture, _position: Vec2, _scale: f32) {}
}
