//! Storyloom — story bounded context.
//!
//! Responsible for creating story records from submitted premises and for
//! the two-phase world-building pipeline: a topic list first, then one
//! elaboration per topic.

pub mod application;
pub mod domain;
