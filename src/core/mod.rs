//! Core library components.
//!
//! Configuration resolution, signing key checks, version derivation and
//! artifact naming. Nothing in here prints; the CLI layer does that.

pub mod constants;
pub mod document;
pub mod key;
pub mod naming;
pub mod process;
pub mod properties;
pub mod repository;
pub mod resolver;
pub mod signing;
pub mod source;
pub mod version;
