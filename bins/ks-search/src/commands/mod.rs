//! CLI command implementations

pub mod fuzzy;
pub mod parse;
pub mod query;
