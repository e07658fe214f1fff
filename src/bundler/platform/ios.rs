//! iOS `AppIcon.appiconset` assembly.

use crate::bundler::catalog::{IOS_CONTENTS_PATH, IOS_ICONS, IconSpec, PlatformTags};
use crate::bundler::error::{Context, Result};
use crate::bundler::platform::{ProcessingOptions, render_square};
use crate::bundler::transform::SourceImage;
use crate::bundler::Artifact;
use serde::Serialize;

/// Author recorded in `Contents.json`.
const CONTENTS_AUTHOR: &str = "LogoForge";

#[derive(Debug, Serialize)]
struct Contents {
    images: Vec<ContentsImage>,
    info: ContentsInfo,
}

#[derive(Debug, Serialize)]
struct ContentsImage {
    filename: &'static str,
    idiom: &'static str,
    scale: &'static str,
    size: String,
}

#[derive(Debug, Serialize)]
struct ContentsInfo {
    author: &'static str,
    version: u32,
}

/// Renders every iOS icon and the asset catalog `Contents.json`.
pub fn assemble(source: &SourceImage, options: &ProcessingOptions) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::with_capacity(IOS_ICONS.len() + 1);

    for spec in IOS_ICONS {
        let bytes = render_square(source, spec.size, options)
            .with_context(|| format!("rendering {}", spec.output_path()))?;
        log::debug!("Rendered iOS {}x{} {}", spec.size, spec.size, spec.filename);
        artifacts.push(Artifact::new(spec.output_path(), bytes));
    }

    artifacts.push(Artifact::new(IOS_CONTENTS_PATH, contents_json()?.into_bytes()));
    Ok(artifacts)
}

/// Pretty-printed `Contents.json` listing every catalog entry.
pub fn contents_json() -> Result<String> {
    let images = IOS_ICONS
        .iter()
        .filter_map(|spec: &IconSpec| match spec.tags {
            PlatformTags::Ios { idiom, scale } => {
                let points = spec.point_size()?;
                Some(ContentsImage {
                    filename: spec.filename,
                    idiom: idiom.as_str(),
                    scale: scale.as_str(),
                    size: format!("{points}x{points}"),
                })
            }
            _ => None,
        })
        .collect();

    let contents = Contents {
        images,
        info: ContentsInfo {
            author: CONTENTS_AUTHOR,
            version: 1,
        },
    };
    Ok(serde_json::to_string_pretty(&contents)?)
}
