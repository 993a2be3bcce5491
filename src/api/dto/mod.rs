//! Data Transfer Objects for REST request/response serialization.
//!
//! Request types carry their schema as `validator` attributes; they are
//! checked by [`crate::api::extract::ValidatedJson`] before a handler runs.

pub mod post_dto;
pub mod presign_dto;

pub use post_dto::*;
pub use presign_dto::*;
