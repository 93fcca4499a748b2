//! Error types

mod auth;
mod source;

pub use auth::*;
pub use source::*;
