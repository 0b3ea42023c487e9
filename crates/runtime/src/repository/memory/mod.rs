//! In-memory repository implementations for testing and development.

mod characters;

pub use characters::{CharacterRecord, InMemoryCharacterRepo};
