//! Android launcher icon assembly.
//!
//! Produces, per density bucket, a square legacy launcher, a round launcher
//! and an adaptive icon foreground layer, plus the Play Store listing icon.
//! The adaptive XML descriptors reference `@color/ic_launcher_background`,
//! which `values/colors.xml` defines from the caller's background color.

use crate::bundler::catalog::{
    ANDROID_ADAPTIVE_ICON_PATH, ANDROID_ADAPTIVE_ROUND_ICON_PATH, ANDROID_COLORS_PATH,
    ANDROID_ICONS, AndroidVariant, IconSpec, PlatformTags,
};
use crate::bundler::error::{Context, Result};
use crate::bundler::platform::{ProcessingOptions, render_square};
use crate::bundler::transform::{self, SourceImage};
use crate::bundler::Artifact;
use handlebars::Handlebars;
use serde_json::json;

/// Background color written to `colors.xml` when none is given.
pub const DEFAULT_LAUNCHER_BACKGROUND: &str = "#FFFFFF";

const ADAPTIVE_ICON_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<adaptive-icon xmlns:android="http://schemas.android.com/apk/res/android">
    <background android:drawable="@color/ic_launcher_background"/>
    <foreground android:drawable="@mipmap/ic_launcher_foreground"/>
</adaptive-icon>"#;

const COLORS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <color name="ic_launcher_background">{{color}}</color>
</resources>"#;

/// Renders every Android icon and the adaptive icon resources.
pub fn assemble(source: &SourceImage, options: &ProcessingOptions) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::with_capacity(ANDROID_ICONS.len() + 3);

    for spec in ANDROID_ICONS {
        let bytes = render(source, spec, options)
            .with_context(|| format!("rendering {}", spec.output_path()))?;
        artifacts.push(Artifact::new(spec.output_path(), bytes));
    }

    artifacts.push(Artifact::new(
        ANDROID_ADAPTIVE_ICON_PATH,
        ADAPTIVE_ICON_XML.as_bytes().to_vec(),
    ));
    artifacts.push(Artifact::new(
        ANDROID_ADAPTIVE_ROUND_ICON_PATH,
        ADAPTIVE_ICON_XML.as_bytes().to_vec(),
    ));
    artifacts.push(Artifact::new(
        ANDROID_COLORS_PATH,
        colors_xml(options)?.into_bytes(),
    ));
    Ok(artifacts)
}

fn render(source: &SourceImage, spec: &IconSpec, options: &ProcessingOptions) -> Result<Vec<u8>> {
    let PlatformTags::Android { variant, .. } = spec.tags else {
        crate::bail!("{} is not an Android catalog entry", spec.output_path());
    };

    log::debug!("Rendering Android {:?} {}x{} in {}", variant, spec.size, spec.size, spec.folder);
    match variant {
        AndroidVariant::Launcher | AndroidVariant::PlayStore => {
            render_square(source, spec.size, options)
        }
        AndroidVariant::Round => transform::mask_circular(
            source,
            spec.size,
            options.padding(),
            options.background(),
        ),
        AndroidVariant::AdaptiveForeground => {
            transform::composite_adaptive_foreground(source, spec.size)
        }
    }
}

/// `values/colors.xml` defining the launcher background color.
pub fn colors_xml(options: &ProcessingOptions) -> Result<String> {
    let color = options
        .background()
        .map(|c| c.as_str())
        .unwrap_or(DEFAULT_LAUNCHER_BACKGROUND);

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    Ok(handlebars.render_template(COLORS_TEMPLATE, &json!({ "color": color }))?)
}
