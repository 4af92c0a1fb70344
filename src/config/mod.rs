//! Configuration for the collection engine.
//!
//! Every threshold the original extension hardcoded is an overridable
//! field here, defaulted from `utils::constants`.

pub mod methods;
pub mod types;

pub use types::DigestConfig;
