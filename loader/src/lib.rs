//! File loading for network-plan configurations.
//!
//! This crate reads configuration documents from disk (JSON or YAML),
//! validates them with [`netplan_config_core::validate`], and checks that
//! the input files they reference exist.
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use netplan_config_loader::{LoadError, load_config};
//!
//! match load_config("config.yaml") {
//!     Ok(loaded) => {
//!         for file in loaded.missing_files(Path::new(".")) {
//!             eprintln!("{} file not found: {}", file.role, file.path.display());
//!         }
//!     }
//!     Err(LoadError::Invalid(errors)) => eprint!("{}", errors.report()),
//!     Err(err) => eprintln!("error: {err}"),
//! }
//! ```

mod document;
mod error;
mod files;
mod loader;

pub use document::{DocumentFormat, load_document};
pub use error::{LoadError, Result};
pub use files::{FileRole, ReferencedFile, missing_files, referenced_files};
pub use loader::{LoadedConfig, load_config};
