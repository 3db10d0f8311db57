//! Shared test mocks and utilities for Storyloom.

mod clock;
mod generator;
mod repository;

pub use clock::FixedClock;
pub use generator::ScriptedGenerator;
pub use repository::FailingStoryRepository;
