//! Storyloom Store — story record storage.
//!
//! Records live for the lifetime of the process; nothing is persisted and
//! nothing is evicted.

pub mod in_memory_story_repository;

pub use in_memory_story_repository::InMemoryStoryRepository;
