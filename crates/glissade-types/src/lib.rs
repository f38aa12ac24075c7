//! Foundation types for glissade.
//!
//! This crate contains the host-agnostic types shared by all glissade
//! crates: input events, the style-command backend trait, configuration,
//! and error types.

pub mod backend;
pub mod config;
pub mod error;
pub mod input;
