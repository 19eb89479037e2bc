//! PyO3 bindings
//!
//! Minimal FFI surface: Python passes a config dict, Rust runs the whole
//! cohort and returns plain dicts and lists.

pub mod cohort;
pub mod types;
