//! Domain layer: commands and the world-building prompt/parse contract.

pub mod commands;
pub mod world_builder;
