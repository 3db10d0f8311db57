//! Application layer: command handlers, query handlers, and generation locking.

pub mod command_handlers;
pub mod locks;
pub mod query_handlers;
