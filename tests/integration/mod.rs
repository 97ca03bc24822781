//! Integration test modules for gwstrain
//!
//! Test categories:
//! - generator: construction, dispatch, domain duality and fallback
//! - parameters: filtering, conversion and type validation
//! - axes: lazy axis recomputation and overrides

pub mod generator;
pub mod parameters;
