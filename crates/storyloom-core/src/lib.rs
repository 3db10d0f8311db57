//! Storyloom Core — shared domain abstractions.
//!
//! This crate defines the story record, the storage and text generation
//! seams, and the error type every other crate builds on. It contains no
//! infrastructure code.

pub mod clock;
pub mod error;
pub mod generation;
pub mod repository;
pub mod story;
