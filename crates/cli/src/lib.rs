//! CLI utilities for Keepsake search tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Status messages
//! - Match highlighting

#![warn(missing_docs)]

pub mod output;
