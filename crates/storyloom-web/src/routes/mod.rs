//! Route modules.

pub mod health;
pub mod home;
pub mod stories_api;
pub mod story;
