//! Domain layer: the persisted post record and feed limit rules.

pub mod post;

pub use post::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT, Post, clamp_limit};
