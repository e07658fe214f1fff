//! Export command implementation.
//!
//! Runs the same pipeline as the HTTP endpoint against a local file and
//! writes the archive in one piece.

use crate::bundler::archive::{archive_to_vec, download_filename};
use crate::bundler::ProcessingOptions;
use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{CliError, Result};
use sha2::{Digest, Sha256};

/// Execute export command
pub(super) async fn execute_export(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Export {
        input,
        platforms,
        background_color,
        padding,
        app_name,
        output,
        ..
    } = &args.command
    else {
        unreachable!("execute_export called with non-Export command");
    };

    let export_config = args.export_config();
    let logo = tokio::fs::read(input).await?;

    let _ = config.output().progress(&format!(
        "Rendering {} for {}",
        input.display(),
        platforms
            .iter()
            .map(|p| p.short_name())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    let options = ProcessingOptions {
        background_color: background_color.clone(),
        padding: *padding,
        app_name: app_name.clone(),
    };
    let bundle = export_config
        .bundler()
        .export(logo, platforms.clone(), options)
        .await?;

    for artifact in &bundle {
        config.verbose_println(&format!("{} ({} bytes)", artifact.path, artifact.bytes.len()));
    }

    let archive = archive_to_vec(&bundle, export_config.buffered_compression).await?;
    let destination = output
        .clone()
        .unwrap_or_else(|| download_filename(chrono::Utc::now().date_naive()).into());

    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(CliError::ExecutionFailed {
            command: "export".to_string(),
            reason: format!("output directory {} does not exist", parent.display()),
        }
        .into());
    }
    tokio::fs::write(&destination, &archive).await?;

    let digest = Sha256::digest(&archive);

    config.success_println(&format!("Wrote {}", destination.display()));
    let _ = config.output().field("files", &bundle.len().to_string());
    let _ = config.output().field("size", &format!("{} bytes", archive.len()));
    let _ = config.output().field("sha256", &format!("{:x}", digest));
    Ok(())
}
