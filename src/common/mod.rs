//! Types shared across the pt2 tools
//!
//! The crate-level error type and command line parsing for `pt2dump`.

pub mod cli;
pub mod error;

pub use error::{Pt2Error, Pt2Result};
