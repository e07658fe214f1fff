//! Export orchestration.
//!
//! The [`Bundler`] runs one export end to end: decode the source bytes,
//! render every selected platform and collect the artifacts into an
//! [`ExportBundle`]. The CPU-bound work runs on tokio's blocking pool and is
//! raced against the configured time budget.
//!
//! # Example
//!
//! ```no_run
//! use logoforge_export::bundler::{Bundler, Platform, ProcessingOptions};
//! use std::time::Duration;
//!
//! # async fn example(logo: Vec<u8>) -> logoforge_export::bundler::Result<()> {
//! let bundler = Bundler::new(Default::default(), Duration::from_secs(60));
//! let bundle = bundler
//!     .export(logo, vec![Platform::Ios, Platform::Web], ProcessingOptions::default())
//!     .await?;
//!
//! for artifact in bundle.iter() {
//!     println!("{} ({} bytes)", artifact.path, artifact.bytes.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::bail;
use crate::bundler::platform::{self, Platform, ProcessingOptions};
use crate::bundler::transform::{self, DecodeLimits};
use crate::bundler::{Error, ExportBundle, Result};
use std::time::{Duration, Instant};

/// Runs exports with fixed decode limits and time budget.
#[derive(Debug, Clone)]
pub struct Bundler {
    limits: DecodeLimits,
    timeout: Duration,
}

impl Bundler {
    /// Creates a bundler.
    pub fn new(limits: DecodeLimits, timeout: Duration) -> Self {
        Self { limits, timeout }
    }

    /// Decode limits applied to every source image.
    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    /// Time budget for one export.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Renders `platforms` from the raw `logo` bytes.
    ///
    /// Repeated platforms are rendered once. Decoding is part of the timed
    /// step. After a timeout the blocking task keeps running until it
    /// finishes and its output is dropped.
    ///
    /// # Errors
    ///
    /// - [`Error::Decode`] when the logo is not a usable PNG, JPEG or WebP
    /// - [`Error::Timeout`] when the budget expires
    /// - any rendering, encoding or packing failure
    pub async fn export(
        &self,
        logo: Vec<u8>,
        platforms: Vec<Platform>,
        options: ProcessingOptions,
    ) -> Result<ExportBundle> {
        if platforms.is_empty() {
            bail!("no platforms selected for export");
        }

        let limits = self.limits;
        let started = Instant::now();
        let work = tokio::task::spawn_blocking(move || {
            let source = transform::decode(&logo, &limits)?;
            drop(logo);
            platform::assemble_platforms(&source, &platforms, &options)
        });

        let bundle = match tokio::time::timeout(self.timeout, work).await {
            Err(_) => {
                log::warn!("Export exceeded {:?}, abandoning", self.timeout);
                return Err(Error::Timeout(self.timeout));
            }
            Ok(Err(e)) => return Err(Error::TaskFailed(format!("export worker failed: {}", e))),
            Ok(Ok(result)) => result?,
        };

        log::info!(
            "Exported {} artifacts ({} bytes) in {:?}",
            bundle.len(),
            bundle.total_bytes(),
            started.elapsed()
        );
        Ok(bundle)
    }
}

impl Default for Bundler {
    fn default() -> Self {
        Self::new(DecodeLimits::default(), Duration::from_secs(60))
    }
}
