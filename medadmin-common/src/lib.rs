//! # Medadmin Common Library
//!
//! Shared code for the medical administration tools:
//! - Multi-criteria record filtering (state, transitions, predicate, summary)
//! - Strongly-typed records for each filtering screen
//! - Configuration loading
//! - Error types and time utilities

pub mod config;
pub mod error;
pub mod filter;
pub mod records;
pub mod time;

pub use error::{Error, Result};
pub use filter::{FilterContext, FilterState, Filterable};
