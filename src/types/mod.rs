//! Core domain types for the place-link addon.
//!
//! This module contains the fundamental types used throughout the addon,
//! designed to encode invariants via the type system.

pub mod ids;
pub mod place;

// Re-export commonly used types at the module level
pub use ids::{EventToken, InvalidPlaceUrl, PlaceUrl};
pub use place::{GitHubLink, JiveLink, PlaceRecord};
