//! Core utilities for Keepsake search tools
//!
//! This crate provides the shared functionality around the pure search engine:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Catalogs**: Loading exported records for searching
//!
//! # Example
//!
//! ```rust,no_run
//! use keepsake_core::{catalog::Catalog, config::Config};
//! use keepsake_search::search_parsed;
//!
//! let config = Config::load(None)?;
//! let catalog = Catalog::load("catalog.json")?;
//!
//! let query = config.query_parser().parse("@movie rating>=4 heist");
//! for result in search_parsed(catalog.items(), &query) {
//!     println!("{} ({})", result.item.title, result.score);
//! }
//! # Ok::<(), keepsake_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};
