//! `modkit_spritefont`
//!
//! Sprite-font layout for custom text rendering. Characters are backed by
//! individual glyph textures with per-character spacing; a textured string
//! computes each character's absolute screen position relative to a string
//! anchor and scale. Drawing goes through a renderer trait so the crate
//! stays independent of the host's graphics backend.

pub mod character;
pub mod render;
pub mod string;
