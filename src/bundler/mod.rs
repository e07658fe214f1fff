//! Icon export engine.
//!
//! Turns one source logo into every icon iOS, Android and the Web expect,
//! then packages the result as a ZIP archive.
//!
//! # Pipeline
//!
//! ```text
//! bytes -> transform::decode -> SourceImage
//!       -> platform assemblers (catalog walk + transforms + sidecars)
//!       -> ExportBundle (ordered path -> bytes)
//!       -> archive (buffered or streamed ZIP)
//! ```
//!
//! # Supported Platforms
//!
//! | Platform | Root folder | Notes |
//! |----------|-------------|-------|
//! | iOS | `ios/AppIcon.appiconset` | Xcode asset catalog |
//! | Android | `android/` | mipmaps, adaptive icon XML, Play Store icon |
//! | Web | `web/` | favicons, `favicon.ico`, PWA manifest, MS tiles |
//!
//! # Integration
//!
//! ```no_run
//! use logoforge_export::bundler::{archive, Bundler, Platform, ProcessingOptions};
//!
//! # async fn example(logo: Vec<u8>) -> logoforge_export::bundler::Result<()> {
//! let bundle = Bundler::default()
//!     .export(logo, vec![Platform::Android], ProcessingOptions::default())
//!     .await?;
//! let zip = archive::archive_to_vec(&bundle, archive::CompressionLevel::Maximum).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod archive;
mod builder;
pub mod catalog;
pub mod color;
pub mod error;
pub mod ico;
pub mod platform;
pub mod transform;

// Public re-exports
pub use archive::CompressionLevel;
pub use builder::Bundler;
pub use color::{HexColor, InvalidHexColor};
pub use error::{Context, DecodeError, Error, Result};
pub use platform::{Platform, ProcessingOptions, UnknownPlatform};
pub use transform::{DecodeLimits, SourceImage};

/// One generated file, addressed by its path inside the archive root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Relative path such as `web/favicon.ico`.
    pub path: String,

    /// File contents.
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Creates an artifact.
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// Ordered, path-unique collection of artifacts for one export.
///
/// Insertion order is archive order.
#[derive(Debug, Clone, Default)]
pub struct ExportBundle {
    artifacts: Vec<Artifact>,
}

impl ExportBundle {
    /// Appends an artifact, rejecting a path that is already present.
    pub fn push(&mut self, artifact: Artifact) -> Result<()> {
        if self.get(&artifact.path).is_some() {
            return Err(Error::DuplicatePath(artifact.path));
        }
        self.artifacts.push(artifact);
        Ok(())
    }

    /// Looks up an artifact by path.
    pub fn get(&self, path: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path == path)
    }

    /// Artifacts in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }

    /// Paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(|a| a.path.as_str())
    }

    /// Number of artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the bundle holds no artifacts.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Sum of all artifact sizes in bytes.
    pub fn total_bytes(&self) -> usize {
        self.artifacts.iter().map(|a| a.bytes.len()).sum()
    }
}

impl IntoIterator for ExportBundle {
    type Item = Artifact;
    type IntoIter = std::vec::IntoIter<Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExportBundle {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}
