//! Data-driven battle content and loaders.
//!
//! This crate reads static content from RON/TOML data files:
//! - Battle tuning (TOML)
//! - Monster catalog (RON)
//! - Question bank (RON)
//! - Character roster used by the demo client and tests (RON)
//!
//! Content is consumed by runtime oracles and repositories; it never appears in
//! battle state directly.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CharacterLoader, CharacterSpec, ConfigLoader, ContentFactory, MonsterLoader, MonsterSpec,
    QuestionLoader,
};

/// Directory holding the bundled sample data.
pub const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
