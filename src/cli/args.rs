//! Command line argument parsing and validation.

use crate::bundler::{CompressionLevel, HexColor, Platform, transform::MAX_PADDING_PERCENT};
use crate::config::{DEFAULT_BIND, ExportConfig};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Icon bundle export for iOS, Android and the Web
#[derive(Parser, Debug)]
#[command(
    name = "logoforge_export",
    version,
    about = "Generate iOS, Android and Web icon bundles from a single logo",
    long_about = "Generate iOS, Android and Web icon bundles from a single logo.

Usage:
  logoforge_export export logo.png --platforms ios,android,web
  logoforge_export serve --bind 0.0.0.0:3000
  logoforge_export catalog --platform android"
)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Show per-file progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress everything except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP export service
    Serve {
        /// Address to listen on
        #[arg(long, env = "LOGOFORGE_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        /// Time budget per export in seconds
        #[arg(long, env = "LOGOFORGE_TIMEOUT_SECS", default_value_t = 60)]
        timeout_secs: u64,

        /// Maximum request body size in MiB
        #[arg(long, env = "LOGOFORGE_MAX_BODY_MB", default_value_t = 25)]
        max_body_mb: usize,

        /// Deflate effort for streamed archives
        #[arg(long, env = "LOGOFORGE_COMPRESSION", default_value = "balanced")]
        compression: CompressionLevel,
    },

    /// Export an icon bundle from a local image file
    Export {
        /// Source logo (PNG, JPEG or WebP)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Comma-separated platforms
        #[arg(long, value_delimiter = ',', default_value = "ios,android,web")]
        platforms: Vec<Platform>,

        /// Background color such as #fff or #1a2b3c
        #[arg(long)]
        background_color: Option<HexColor>,

        /// Padding percentage (0-20)
        #[arg(long, default_value_t = 0.0)]
        padding: f64,

        /// Name written into the web manifest
        #[arg(long)]
        app_name: Option<String>,

        /// Output archive path (defaults to the dated download name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deflate effort
        #[arg(long, default_value = "maximum")]
        compression: CompressionLevel,

        /// Time budget in seconds
        #[arg(long, env = "LOGOFORGE_TIMEOUT_SECS", default_value_t = 60)]
        timeout_secs: u64,
    },

    /// Print the icon size catalog
    Catalog {
        /// Limit output to one platform
        #[arg(long)]
        platform: Option<Platform>,
    },
}

impl Command {
    /// Subcommand name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Serve { .. } => "serve",
            Command::Export { .. } => "export",
            Command::Catalog { .. } => "catalog",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Serve {
                timeout_secs,
                max_body_mb,
                ..
            } => {
                if *timeout_secs == 0 {
                    return Err("--timeout-secs must be at least 1".to_string());
                }
                if *max_body_mb == 0 {
                    return Err("--max-body-mb must be at least 1".to_string());
                }
            }
            Command::Export {
                platforms,
                padding,
                app_name,
                timeout_secs,
                ..
            } => {
                if platforms.is_empty() {
                    return Err("At least one platform must be selected".to_string());
                }
                if !padding.is_finite() || !(0.0..=MAX_PADDING_PERCENT).contains(padding) {
                    return Err("--padding must be between 0 and 20".to_string());
                }
                if let Some(name) = app_name
                    && (name.trim().is_empty() || name.chars().count() > 64)
                {
                    return Err("--app-name must be 1 to 64 characters".to_string());
                }
                if *timeout_secs == 0 {
                    return Err("--timeout-secs must be at least 1".to_string());
                }
            }
            Command::Catalog { .. } => {}
        }

        Ok(())
    }

    /// Service configuration for `serve`, or defaults for other commands.
    pub fn export_config(&self) -> ExportConfig {
        let mut config = ExportConfig::default();
        match &self.command {
            Command::Serve {
                bind,
                timeout_secs,
                max_body_mb,
                compression,
            } => {
                config.bind = *bind;
                config.timeout = Duration::from_secs(*timeout_secs);
                config.max_body_bytes = max_body_mb.saturating_mul(1024 * 1024);
                config.stream_compression = *compression;
            }
            Command::Export {
                compression,
                timeout_secs,
                ..
            } => {
                config.timeout = Duration::from_secs(*timeout_secs);
                config.buffered_compression = *compression;
            }
            Command::Catalog { .. } => {}
        }
        config
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults() {
        let args = Args::try_parse_from(["logoforge_export", "export", "logo.png"]).unwrap();
        assert!(args.validate().is_ok());
        match &args.command {
            Command::Export {
                platforms,
                compression,
                output,
                ..
            } => {
                assert_eq!(platforms, &Platform::ALL.to_vec());
                assert_eq!(*compression, CompressionLevel::Maximum);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_platform_list_and_color() {
        let args = Args::try_parse_from([
            "logoforge_export",
            "export",
            "logo.png",
            "--platforms",
            "web,ios",
            "--background-color",
            "#abc",
        ])
        .unwrap();
        if let Command::Export {
            platforms,
            background_color,
            ..
        } = &args.command
        {
            assert_eq!(platforms, &vec![Platform::Web, Platform::Ios]);
            assert_eq!(background_color.as_ref().unwrap().as_str(), "#abc");
        } else {
            panic!("expected export");
        }
    }

    #[test]
    fn test_rejects_unknown_platform_and_color() {
        assert!(Args::try_parse_from(["logoforge_export", "export", "a.png", "--platforms", "tv"]).is_err());
        assert!(
            Args::try_parse_from(["logoforge_export", "export", "a.png", "--background-color", "red"])
                .is_err()
        );
    }

    #[test]
    fn test_padding_range_validated() {
        let args =
            Args::try_parse_from(["logoforge_export", "export", "a.png", "--padding", "25"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_serve_config() {
        let args = Args::try_parse_from([
            "logoforge_export",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--timeout-secs",
            "5",
            "--max-body-mb",
            "2",
            "--compression",
            "fast",
        ])
        .unwrap();
        let config = args.export_config();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(config.stream_compression, CompressionLevel::Fast);
    }
}
