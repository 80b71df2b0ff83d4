//! Common utilities for the Wombat minifier.
//!
//! This crate provides shared infrastructure used by all minifier components:
//! - **Warning System** - deduplicated, colored terminal output for recoverable
//!   problems in the input (malformed tags, unclosed script regions)

pub mod warning;
