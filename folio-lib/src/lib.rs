//! Portfolio data and collaborators for the folio tables.
//!
//! Domain records with their column definitions, the authentication and
//! session layer that guards the screens, and the data sources that feed
//! delegated tables.

pub mod auth;
pub mod error;
pub mod model;
pub mod portfolio;
pub mod sample;
pub mod source;
