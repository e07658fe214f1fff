//! Catalog command implementation.

use crate::bundler::Platform;
use crate::bundler::catalog::{folder_structure, icons, sidecar_paths, unique_sizes};
use crate::bundler::catalog::{FAVICON_ICO_PATH, FAVICON_ICO_SIZES};
use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

/// Print sizes, folders and output paths per platform
pub(super) fn execute_catalog(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Catalog { platform } = &args.command else {
        unreachable!("execute_catalog called with non-Catalog command");
    };

    let platforms = match platform {
        Some(p) => vec![*p],
        None => Platform::ALL.to_vec(),
    };

    for platform in platforms {
        let output = config.output();
        let _ = output.section(platform.short_name());

        let sizes = unique_sizes(platform)
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = output.field("sizes", &sizes);
        let _ = output.field("folders", &folder_structure(platform).join(", "));

        config.println("  icons:");
        for spec in icons(platform) {
            config.indent(&format!("{:>4}px  {}", spec.size, spec.output_path()));
        }

        config.println("  generated:");
        if platform == Platform::Web {
            let sizes = FAVICON_ICO_SIZES.map(|s| s.to_string()).join("+");
            config.indent(&format!("{}  ({})", FAVICON_ICO_PATH, sizes));
        }
        for path in sidecar_paths(platform) {
            config.indent(path);
        }
    }

    Ok(())
}
