//! Remote data sources.
//!
//! - [`backend`]: The [`Source`] trait
//! - [`fixture`]: [`FixtureSource`], a fixed item list paged with offset tokens

pub mod backend;
pub mod fixture;

pub use backend::Source;
pub use fixture::FixtureSource;
