//! Static icon size tables for every export platform.
//!
//! Each platform owns an ordered slice of [`IconSpec`]. The order is the
//! order icons are rendered and written to the archive, so it must stay
//! stable for exports to be reproducible.
//!
//! | Platform | Folder | Entries |
//! |----------|--------|---------|
//! | iOS | `ios/AppIcon.appiconset` | 16 PNGs + `Contents.json` |
//! | Android | `android/mipmap-*` | 5 launcher, 5 round, 5 adaptive foreground, Play Store |
//! | Web | `web` | favicons, Apple touch, manifest, tiles, `favicon.ico` |
//!
//! Adding a size is a data change here, never a change to the assemblers.

use crate::bundler::platform::Platform;

/// iOS asset catalog folder.
pub const IOS_FOLDER: &str = "ios/AppIcon.appiconset";
/// Web output folder.
pub const WEB_FOLDER: &str = "web";

/// Sizes packed into `favicon.ico`, in directory order.
pub const FAVICON_ICO_SIZES: [u32; 3] = [16, 32, 48];
/// Path of the packed favicon container.
pub const FAVICON_ICO_PATH: &str = "web/favicon.ico";

/// Adaptive foreground canvas is 108dp with the logo confined to the inner 72dp.
pub const ADAPTIVE_SAFE_ZONE: (u32, u32) = (72, 108);

/// Minimum padding (percent) applied to maskable web manifest icons.
pub const MASKABLE_MIN_PADDING: f64 = 10.0;

/// iOS device class an asset targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idiom {
    /// iPhone
    Iphone,
    /// iPad
    Ipad,
    /// App Store listing
    IosMarketing,
}

impl Idiom {
    /// Name used in `Contents.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Idiom::Iphone => "iphone",
            Idiom::Ipad => "ipad",
            Idiom::IosMarketing => "ios-marketing",
        }
    }
}

/// iOS display scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// 1x
    X1,
    /// 2x
    X2,
    /// 3x
    X3,
}

impl Scale {
    /// Name used in `Contents.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::X1 => "1x",
            Scale::X2 => "2x",
            Scale::X3 => "3x",
        }
    }

    /// Pixels per point.
    pub fn multiplier(&self) -> u32 {
        match self {
            Scale::X1 => 1,
            Scale::X2 => 2,
            Scale::X3 => 3,
        }
    }
}

/// Android screen density bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    /// ~160dpi
    Mdpi,
    /// ~240dpi
    Hdpi,
    /// ~320dpi
    Xhdpi,
    /// ~480dpi
    Xxhdpi,
    /// ~640dpi
    Xxxhdpi,
}

impl Density {
    /// All densities, lowest first.
    pub const ALL: [Density; 5] = [
        Density::Mdpi,
        Density::Hdpi,
        Density::Xhdpi,
        Density::Xxhdpi,
        Density::Xxxhdpi,
    ];

    /// Bucket name as used in resource folder qualifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Mdpi => "mdpi",
            Density::Hdpi => "hdpi",
            Density::Xhdpi => "xhdpi",
            Density::Xxhdpi => "xxhdpi",
            Density::Xxxhdpi => "xxxhdpi",
        }
    }

    /// Launcher icon size at this density (48dp).
    pub fn launcher_size(&self) -> u32 {
        match self {
            Density::Mdpi => 48,
            Density::Hdpi => 72,
            Density::Xhdpi => 96,
            Density::Xxhdpi => 144,
            Density::Xxxhdpi => 192,
        }
    }
}

/// Which Android artifact an entry produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AndroidVariant {
    /// Square legacy launcher icon
    Launcher,
    /// Circular launcher icon (Android 7.1+)
    Round,
    /// Adaptive icon foreground layer, transparent outside the safe zone
    AdaptiveForeground,
    /// Google Play listing icon
    PlayStore,
}

/// Web manifest `purpose` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Rendered as-is
    Any,
    /// May be cropped by a platform mask; needs a safe zone
    Maskable,
}

impl Purpose {
    /// Value used in `manifest.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Any => "any",
            Purpose::Maskable => "maskable",
        }
    }
}

/// Role of a web icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebRole {
    /// Standalone favicon PNG (also packed into `favicon.ico`)
    Favicon,
    /// `apple-touch-icon.png`
    AppleTouch,
    /// PWA manifest icon
    Manifest(Purpose),
    /// Microsoft tile
    Tile,
}

/// Platform-specific tags carried by a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTags {
    /// iOS asset catalog entry
    Ios {
        /// Device class
        idiom: Idiom,
        /// Display scale
        scale: Scale,
    },
    /// Android resource
    Android {
        /// Density bucket, `None` for the Play Store icon
        density: Option<Density>,
        /// Artifact kind
        variant: AndroidVariant,
    },
    /// Web asset
    Web {
        /// Icon role
        role: WebRole,
    },
}

/// One required output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    /// Square edge length in pixels.
    pub size: u32,
    /// Output file name.
    pub filename: &'static str,
    /// Destination folder inside the archive root, empty for none.
    pub folder: &'static str,
    /// Platform tags.
    pub tags: PlatformTags,
}

impl IconSpec {
    /// Full path of this entry inside the archive root.
    pub fn output_path(&self) -> String {
        if self.folder.is_empty() {
            self.filename.to_string()
        } else {
            format!("{}/{}", self.folder, self.filename)
        }
    }

    /// Point size for iOS entries (`pixels / scale`), `None` elsewhere.
    pub fn point_size(&self) -> Option<f64> {
        match self.tags {
            PlatformTags::Ios { scale, .. } => {
                Some(f64::from(self.size) / f64::from(scale.multiplier()))
            }
            _ => None,
        }
    }
}

const fn ios(size: u32, filename: &'static str, idiom: Idiom, scale: Scale) -> IconSpec {
    IconSpec {
        size,
        filename,
        folder: IOS_FOLDER,
        tags: PlatformTags::Ios { idiom, scale },
    }
}

const fn android(
    size: u32,
    filename: &'static str,
    folder: &'static str,
    density: Density,
    variant: AndroidVariant,
) -> IconSpec {
    IconSpec {
        size,
        filename,
        folder,
        tags: PlatformTags::Android {
            density: Some(density),
            variant,
        },
    }
}

const fn web(size: u32, filename: &'static str, role: WebRole) -> IconSpec {
    IconSpec {
        size,
        filename,
        folder: WEB_FOLDER,
        tags: PlatformTags::Web { role },
    }
}

/// iOS `AppIcon.appiconset` entries.
pub static IOS_ICONS: &[IconSpec] = &[
    // App Store
    ios(1024, "AppIcon-1024.png", Idiom::IosMarketing, Scale::X1),
    // iPhone
    ios(180, "AppIcon-60@3x.png", Idiom::Iphone, Scale::X3),
    ios(120, "AppIcon-60@2x.png", Idiom::Iphone, Scale::X2),
    ios(120, "AppIcon-40@3x.png", Idiom::Iphone, Scale::X3),
    ios(87, "AppIcon-29@3x.png", Idiom::Iphone, Scale::X3),
    ios(80, "AppIcon-40@2x.png", Idiom::Iphone, Scale::X2),
    ios(58, "AppIcon-29@2x.png", Idiom::Iphone, Scale::X2),
    ios(40, "AppIcon-20@2x.png", Idiom::Iphone, Scale::X2),
    // iPad
    ios(167, "AppIcon-83.5@2x.png", Idiom::Ipad, Scale::X2),
    ios(152, "AppIcon-76@2x.png", Idiom::Ipad, Scale::X2),
    ios(80, "AppIcon-40@2x-ipad.png", Idiom::Ipad, Scale::X2),
    ios(76, "AppIcon-76@1x.png", Idiom::Ipad, Scale::X1),
    ios(40, "AppIcon-40@1x.png", Idiom::Ipad, Scale::X1),
    ios(40, "AppIcon-20@2x-ipad.png", Idiom::Ipad, Scale::X2),
    ios(29, "AppIcon-29@1x.png", Idiom::Ipad, Scale::X1),
    ios(20, "AppIcon-20@1x.png", Idiom::Ipad, Scale::X1),
];

/// Android mipmap entries: launcher, round, adaptive foreground, Play Store.
pub static ANDROID_ICONS: &[IconSpec] = &[
    android(48, "ic_launcher.png", "android/mipmap-mdpi", Density::Mdpi, AndroidVariant::Launcher),
    android(72, "ic_launcher.png", "android/mipmap-hdpi", Density::Hdpi, AndroidVariant::Launcher),
    android(96, "ic_launcher.png", "android/mipmap-xhdpi", Density::Xhdpi, AndroidVariant::Launcher),
    android(144, "ic_launcher.png", "android/mipmap-xxhdpi", Density::Xxhdpi, AndroidVariant::Launcher),
    android(192, "ic_launcher.png", "android/mipmap-xxxhdpi", Density::Xxxhdpi, AndroidVariant::Launcher),
    android(48, "ic_launcher_round.png", "android/mipmap-mdpi", Density::Mdpi, AndroidVariant::Round),
    android(72, "ic_launcher_round.png", "android/mipmap-hdpi", Density::Hdpi, AndroidVariant::Round),
    android(96, "ic_launcher_round.png", "android/mipmap-xhdpi", Density::Xhdpi, AndroidVariant::Round),
    android(144, "ic_launcher_round.png", "android/mipmap-xxhdpi", Density::Xxhdpi, AndroidVariant::Round),
    android(192, "ic_launcher_round.png", "android/mipmap-xxxhdpi", Density::Xxxhdpi, AndroidVariant::Round),
    // density_size * 108/48
    android(108, "ic_launcher_foreground.png", "android/mipmap-mdpi", Density::Mdpi, AndroidVariant::AdaptiveForeground),
    android(162, "ic_launcher_foreground.png", "android/mipmap-hdpi", Density::Hdpi, AndroidVariant::AdaptiveForeground),
    android(216, "ic_launcher_foreground.png", "android/mipmap-xhdpi", Density::Xhdpi, AndroidVariant::AdaptiveForeground),
    android(324, "ic_launcher_foreground.png", "android/mipmap-xxhdpi", Density::Xxhdpi, AndroidVariant::AdaptiveForeground),
    android(432, "ic_launcher_foreground.png", "android/mipmap-xxxhdpi", Density::Xxxhdpi, AndroidVariant::AdaptiveForeground),
    IconSpec {
        size: 512,
        filename: "playstore-icon.png",
        folder: "android",
        tags: PlatformTags::Android {
            density: None,
            variant: AndroidVariant::PlayStore,
        },
    },
];

/// Web favicon, touch, manifest and tile entries.
pub static WEB_ICONS: &[IconSpec] = &[
    web(16, "favicon-16x16.png", WebRole::Favicon),
    web(32, "favicon-32x32.png", WebRole::Favicon),
    web(48, "favicon-48x48.png", WebRole::Favicon),
    web(180, "apple-touch-icon.png", WebRole::AppleTouch),
    web(192, "android-chrome-192x192.png", WebRole::Manifest(Purpose::Any)),
    web(512, "android-chrome-512x512.png", WebRole::Manifest(Purpose::Any)),
    web(192, "android-chrome-192x192-maskable.png", WebRole::Manifest(Purpose::Maskable)),
    web(512, "android-chrome-512x512-maskable.png", WebRole::Manifest(Purpose::Maskable)),
    web(150, "mstile-150x150.png", WebRole::Tile),
    web(310, "mstile-310x310.png", WebRole::Tile),
];

/// Asset catalog descriptor.
pub const IOS_CONTENTS_PATH: &str = "ios/AppIcon.appiconset/Contents.json";
/// Adaptive launcher descriptor.
pub const ANDROID_ADAPTIVE_ICON_PATH: &str = "android/mipmap-anydpi-v26/ic_launcher.xml";
/// Adaptive round launcher descriptor.
pub const ANDROID_ADAPTIVE_ROUND_ICON_PATH: &str = "android/mipmap-anydpi-v26/ic_launcher_round.xml";
/// Launcher background color resource.
pub const ANDROID_COLORS_PATH: &str = "android/values/colors.xml";
/// PWA manifest.
pub const WEB_MANIFEST_PATH: &str = "web/manifest.json";
/// Windows tile configuration.
pub const WEB_BROWSERCONFIG_PATH: &str = "web/browserconfig.xml";

/// iOS sidecar files, in archive order.
pub const IOS_SIDECARS: &[&str] = &[IOS_CONTENTS_PATH];

/// Android sidecar files, in archive order.
pub const ANDROID_SIDECARS: &[&str] = &[
    ANDROID_ADAPTIVE_ICON_PATH,
    ANDROID_ADAPTIVE_ROUND_ICON_PATH,
    ANDROID_COLORS_PATH,
];

/// Web sidecar files, in archive order.
pub const WEB_SIDECARS: &[&str] = &[WEB_MANIFEST_PATH, WEB_BROWSERCONFIG_PATH];

/// Catalog entries for a platform, in render order.
pub fn icons(platform: Platform) -> &'static [IconSpec] {
    match platform {
        Platform::Ios => IOS_ICONS,
        Platform::Android => ANDROID_ICONS,
        Platform::Web => WEB_ICONS,
    }
}

/// Distinct pixel sizes a platform needs, largest first.
pub fn unique_sizes(platform: Platform) -> Vec<u32> {
    let mut sizes: Vec<u32> = icons(platform).iter().map(|spec| spec.size).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes.dedup();
    sizes
}

/// Destination folders holding a platform's images.
pub fn folder_structure(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Ios => &[IOS_FOLDER],
        Platform::Android => &[
            "android/mipmap-mdpi",
            "android/mipmap-hdpi",
            "android/mipmap-xhdpi",
            "android/mipmap-xxhdpi",
            "android/mipmap-xxxhdpi",
        ],
        Platform::Web => &[WEB_FOLDER],
    }
}

/// Generated metadata files for a platform.
pub fn sidecar_paths(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Ios => IOS_SIDECARS,
        Platform::Android => ANDROID_SIDECARS,
        Platform::Web => WEB_SIDECARS,
    }
}

/// Every path an export of `platform` produces, in archive order.
pub fn expected_paths(platform: Platform) -> Vec<String> {
    let mut paths: Vec<String> = icons(platform).iter().map(IconSpec::output_path).collect();
    if platform == Platform::Web {
        paths.push(FAVICON_ICO_PATH.to_string());
    }
    paths.extend(sidecar_paths(platform).iter().map(|p| p.to_string()));
    paths
}
