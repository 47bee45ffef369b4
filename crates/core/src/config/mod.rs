//! Configuration loading and schema definitions
//!
//! Settings shared by the Keepsake search tools.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
