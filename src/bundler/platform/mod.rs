//! Platform-specific icon assemblers.
//!
//! Each assembler walks its catalog table in order, renders every entry from
//! the shared [`SourceImage`] and appends generated metadata files.
//!
//! # Supported Platforms
//!
//! | Platform | Output | Module |
//! |----------|--------|--------|
//! | iOS | `AppIcon.appiconset` + `Contents.json` | [`ios`] |
//! | Android | `mipmap-*` launcher, round, adaptive + XML | [`android`] |
//! | Web | favicons, `favicon.ico`, PWA manifest, tiles | [`web`] |
//!
//! # Ordering
//!
//! Platforms are independent and may be rendered concurrently by
//! [`assemble_platforms`], but results are always merged in request order so
//! two exports of the same input produce the same archive.

pub mod android;
pub mod ios;
pub mod web;

use crate::bundler::color::HexColor;
use crate::bundler::error::{Error, Result};
use crate::bundler::transform::{self, SourceImage};
use crate::bundler::{Artifact, ExportBundle};
use std::{fmt, str::FromStr};

/// Target platforms an export can include.
///
/// # Examples
///
/// ```
/// use logoforge_export::bundler::Platform;
///
/// let platform: Platform = "android".parse().unwrap();
/// assert_eq!(platform, Platform::Android);
/// assert_eq!(platform.to_string(), "android");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    /// iOS asset catalog.
    Ios,
    /// Android mipmap resources.
    Android,
    /// Favicons and PWA icons.
    Web,
}

/// Platform name that is not `ios`, `android` or `web`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform {0:?}, expected one of: ios, android, web")]
pub struct UnknownPlatform(pub String);

impl Platform {
    /// Every platform, in canonical order.
    pub const ALL: [Platform; 3] = [Platform::Ios, Platform::Android, Platform::Web];

    /// Lowercase identifier used in requests, CLI flags and logs.
    pub fn short_name(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Web => "web",
        }
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "web" => Ok(Platform::Web),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Caller options shared by every platform of one export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingOptions {
    /// Fill color; when set, square icons are flattened onto it.
    pub background_color: Option<HexColor>,
    /// Safe-area padding in percent of the icon size, clamped to `0..=20`.
    pub padding: f64,
    /// PWA name written to `manifest.json`.
    pub app_name: Option<String>,
}

impl ProcessingOptions {
    /// Padding after clamping.
    pub fn padding(&self) -> f64 {
        transform::clamp_padding(self.padding)
    }

    /// Name for `manifest.json`, `"App"` when unset.
    pub fn app_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or("App")
    }

    /// Background color reference for transforms.
    pub fn background(&self) -> Option<&HexColor> {
        self.background_color.as_ref()
    }
}

/// Renders a plain square icon, padded when the options ask for it.
pub(crate) fn render_square(
    source: &SourceImage,
    size: u32,
    options: &ProcessingOptions,
) -> Result<Vec<u8>> {
    let padding = options.padding();
    if padding > 0.0 {
        transform::add_padding(source, size, padding, options.background())
    } else {
        transform::resize_to_square(source, size, options.background())
    }
}

/// Assembles every artifact for one platform.
pub fn assemble(
    platform: Platform,
    source: &SourceImage,
    options: &ProcessingOptions,
) -> Result<Vec<Artifact>> {
    let artifacts = match platform {
        Platform::Ios => ios::assemble(source, options)?,
        Platform::Android => android::assemble(source, options)?,
        Platform::Web => web::assemble(source, options)?,
    };
    log::info!("Assembled {} {} artifacts", artifacts.len(), platform);
    Ok(artifacts)
}

/// Removes repeated platforms, keeping the first occurrence.
pub fn dedup_platforms(platforms: &[Platform]) -> Vec<Platform> {
    let mut unique = Vec::with_capacity(platforms.len());
    for platform in platforms {
        if !unique.contains(platform) {
            unique.push(*platform);
        }
    }
    unique
}

/// Assembles several platforms into one bundle.
///
/// Platforms render on scoped threads. The bundle lists them in request
/// order regardless of which finishes first. The first failing platform in
/// request order aborts the whole export.
pub fn assemble_platforms(
    source: &SourceImage,
    platforms: &[Platform],
    options: &ProcessingOptions,
) -> Result<ExportBundle> {
    let platforms = dedup_platforms(platforms);

    let results: Vec<Result<Vec<Artifact>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = platforms
            .iter()
            .map(|platform| {
                let platform = *platform;
                (
                    platform,
                    scope.spawn(move || assemble(platform, source, options)),
                )
            })
            .collect();

        handles
            .into_iter()
            .map(|(platform, handle)| {
                handle.join().unwrap_or_else(|_| {
                    Err(Error::TaskFailed(format!("{platform} assembler panicked")))
                })
            })
            .collect()
    });

    let mut bundle = ExportBundle::default();
    for result in results {
        for artifact in result? {
            bundle.push(artifact)?;
        }
    }
    Ok(bundle)
}
