//! # LogoForge Export
//!
//! Turns one logo image into the complete icon set for iOS, Android and the
//! Web, packaged as a ZIP archive.
//!
//! ## Features
//!
//! - **Exact catalogs**: every size, folder and file name each platform expects
//! - **Deterministic output**: identical inputs produce byte-identical archives
//! - **Streaming archives**: the HTTP endpoint streams the ZIP as it is written
//! - **Typed failures**: every error carries a stable code and HTTP status
//!
//! ## Usage
//!
//! ```bash
//! logoforge_export export logo.png --platforms ios,web --padding 10
//! logoforge_export serve --bind 0.0.0.0:3000
//! logoforge_export catalog --platform android
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;
pub mod server;

pub use bundler::{Artifact, Bundler, ExportBundle, Platform, ProcessingOptions};
pub use cli::Args;
pub use config::ExportConfig;
pub use error::{CliError, ExportError, Result, ValidationError};
