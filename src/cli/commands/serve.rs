//! Serve command implementation.

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;
use crate::server;

/// Run the HTTP export service until interrupted
pub(super) async fn execute_serve(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let export_config = args.export_config();

    let _ = config.output().section("LogoForge export service");
    let _ = config.output().field("bind", &format!("http://{}", export_config.bind));
    let _ = config
        .output()
        .field("timeout", &format!("{}s", export_config.timeout.as_secs()));
    let _ = config.output().field(
        "body limit",
        &format!("{} MiB", export_config.max_body_bytes / (1024 * 1024)),
    );
    let _ = config
        .output()
        .field("deflate", export_config.stream_compression.as_str());
    config.println("");

    server::serve(export_config).await?;

    config.success_println("Export service stopped");
    Ok(())
}
