//! Web favicon and PWA icon assembly.

use crate::bundler::catalog::{
    FAVICON_ICO_PATH, FAVICON_ICO_SIZES, IconSpec, MASKABLE_MIN_PADDING, PlatformTags,
    Purpose, WEB_BROWSERCONFIG_PATH, WEB_ICONS, WEB_MANIFEST_PATH, WebRole,
};
use crate::bundler::color::HexColor;
use crate::bundler::error::{Context, Result};
use crate::bundler::platform::{ProcessingOptions, render_square};
use crate::bundler::transform::{self, SourceImage};
use crate::bundler::{Artifact, ico};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

/// Tile color written to `browserconfig.xml` when none is given.
pub const DEFAULT_TILE_COLOR: &str = "#ffffff";

const MANIFEST_THEME_COLOR: &str = "#ffffff";

const BROWSERCONFIG_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<browserconfig>
    <msapplication>
        <tile>
            <square150x150logo src="/mstile-150x150.png"/>
            <square310x310logo src="/mstile-310x310.png"/>
            <TileColor>{{color}}</TileColor>
        </tile>
    </msapplication>
</browserconfig>"#;

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    name: &'a str,
    short_name: &'a str,
    icons: Vec<ManifestIcon>,
    theme_color: &'static str,
    background_color: &'static str,
    display: &'static str,
}

#[derive(Debug, Serialize)]
struct ManifestIcon {
    src: String,
    sizes: String,
    #[serde(rename = "type")]
    mime: &'static str,
    purpose: &'static str,
}

/// Renders every web icon, `favicon.ico`, `manifest.json` and `browserconfig.xml`.
pub fn assemble(source: &SourceImage, options: &ProcessingOptions) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::with_capacity(WEB_ICONS.len() + 3);
    let mut favicons = Vec::new();

    for spec in WEB_ICONS {
        let bytes = render(source, spec, options)
            .with_context(|| format!("rendering {}", spec.output_path()))?;
        if is_favicon(spec) {
            favicons.push((spec.size, bytes.clone()));
        }
        artifacts.push(Artifact::new(spec.output_path(), bytes));
    }

    let ico_images = FAVICON_ICO_SIZES
        .iter()
        .map(|size| {
            favicons
                .iter()
                .find(|(rendered, _)| rendered == size)
                .cloned()
                .with_context(|| format!("no {size}px favicon to pack into favicon.ico"))
        })
        .collect::<Result<Vec<_>>>()?;
    let favicon = ico::encode(&ico_images).context("packing favicon.ico")?;
    artifacts.push(Artifact::new(FAVICON_ICO_PATH, favicon));

    artifacts.push(Artifact::new(
        WEB_MANIFEST_PATH,
        manifest_json(options)?.into_bytes(),
    ));
    artifacts.push(Artifact::new(
        WEB_BROWSERCONFIG_PATH,
        browserconfig_xml(options)?.into_bytes(),
    ));
    Ok(artifacts)
}

fn is_favicon(spec: &IconSpec) -> bool {
    matches!(
        spec.tags,
        PlatformTags::Web {
            role: WebRole::Favicon
        }
    )
}

fn render(source: &SourceImage, spec: &IconSpec, options: &ProcessingOptions) -> Result<Vec<u8>> {
    let PlatformTags::Web { role } = spec.tags else {
        crate::bail!("{} is not a web catalog entry", spec.output_path());
    };

    log::debug!("Rendering web {:?} {}x{}", role, spec.size, spec.size);
    match role {
        // Favicons ignore background and padding
        WebRole::Favicon => transform::resize_to_square(source, spec.size, None),
        WebRole::Manifest(Purpose::Maskable) => {
            let padding = options.padding().max(MASKABLE_MIN_PADDING);
            let white = HexColor::white();
            let background = options.background().unwrap_or(&white);
            transform::add_padding(source, spec.size, padding, Some(background))
        }
        WebRole::AppleTouch | WebRole::Tile | WebRole::Manifest(Purpose::Any) => {
            render_square(source, spec.size, options)
        }
    }
}

/// Pretty-printed PWA `manifest.json`.
pub fn manifest_json(options: &ProcessingOptions) -> Result<String> {
    let icons = WEB_ICONS
        .iter()
        .filter_map(|spec| match spec.tags {
            PlatformTags::Web {
                role: WebRole::Manifest(purpose),
            } => Some(ManifestIcon {
                src: format!("/{}", spec.filename),
                sizes: format!("{0}x{0}", spec.size),
                mime: "image/png",
                purpose: purpose.as_str(),
            }),
            _ => None,
        })
        .collect();

    let manifest = Manifest {
        name: options.app_name(),
        short_name: options.app_name(),
        icons,
        theme_color: MANIFEST_THEME_COLOR,
        background_color: MANIFEST_THEME_COLOR,
        display: "standalone",
    };
    Ok(serde_json::to_string_pretty(&manifest)?)
}

/// `browserconfig.xml` for Microsoft tiles.
pub fn browserconfig_xml(options: &ProcessingOptions) -> Result<String> {
    let color = options
        .background()
        .map(|c| c.as_str())
        .unwrap_or(DEFAULT_TILE_COLOR);

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    Ok(handlebars.render_template(BROWSERCONFIG_TEMPLATE, &json!({ "color": color }))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_defaults() {
        let json: serde_json::Value =
            serde_json::from_str(&manifest_json(&ProcessingOptions::default()).unwrap()).unwrap();
        assert_eq!(json["name"], "App");
        assert_eq!(json["short_name"], "App");
        assert_eq!(json["display"], "standalone");
        assert_eq!(json["theme_color"], "#ffffff");

        let icons = json["icons"].as_array().unwrap();
        assert_eq!(icons.len(), 4);
        assert_eq!(icons[0]["src"], "/android-chrome-192x192.png");
        assert_eq!(icons[0]["type"], "image/png");
        assert_eq!(icons[0]["purpose"], "any");
        assert_eq!(icons[3]["src"], "/android-chrome-512x512-maskable.png");
        assert_eq!(icons[3]["sizes"], "512x512");
        assert_eq!(icons[3]["purpose"], "maskable");
    }

    #[test]
    fn test_manifest_uses_app_name() {
        let options = ProcessingOptions {
            app_name: Some("Acme".into()),
            ..Default::default()
        };
        let json: serde_json::Value =
            serde_json::from_str(&manifest_json(&options).unwrap()).unwrap();
        assert_eq!(json["name"], "Acme");
    }

    #[test]
    fn test_browserconfig_color() {
        let xml = browserconfig_xml(&ProcessingOptions::default()).unwrap();
        assert!(xml.contains("<TileColor>#ffffff</TileColor>"));

        let options = ProcessingOptions {
            background_color: Some("#ABC".parse().unwrap()),
            ..Default::default()
        };
        assert!(browserconfig_xml(&options).unwrap().contains("<TileColor>#ABC</TileColor>"));
    }
}
