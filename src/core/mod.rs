//! Core business logic - framework-agnostic blog operations.
//!
//! Every write goes through this module so derived fields and moderation rules are
//! applied in one place; the request-handling layer only calls these functions.

pub mod blog;
pub mod blogroll;
pub mod comment;
pub mod entry;
pub mod reaction;
pub mod seed;
pub mod tags;
pub mod validate;
