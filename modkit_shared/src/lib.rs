//! `modkit_shared`
//!
//! Shared libraries used by the replication and sprite-font crates.
//!
//! Design goals:
//! - Deterministic and modular where practical.
//! - Clear separation of concerns (ids, objects, registry, config).
//! - Traits for abstraction and dependency injection.
//! - No `unsafe`.

pub mod config;
pub mod id;
pub mod math;
pub mod object;
pub mod registry;
pub mod serializer;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::id::*;
    pub use crate::math::*;
    pub use crate::object::*;
    pub use crate::registry::*;
    pub use crate::serializer::*;
}
