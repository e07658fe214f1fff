//! Service and export configuration.

use crate::bundler::{Bundler, CompressionLevel, DecodeLimits};
use std::net::SocketAddr;
use std::time::Duration;

/// Default listen address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Configuration shared by the HTTP service and the CLI export command.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Address the HTTP service listens on
    pub bind: SocketAddr,
    /// Time budget for decoding and rendering one export
    pub timeout: Duration,
    /// Deflate effort for streamed archives
    pub stream_compression: CompressionLevel,
    /// Deflate effort for archives built in memory
    pub buffered_compression: CompressionLevel,
    /// Maximum source width or height in pixels
    pub max_image_dimension: u32,
    /// Maximum bytes the decoder may allocate
    pub max_decode_alloc: u64,
    /// Maximum request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let limits = DecodeLimits::default();
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            timeout: Duration::from_secs(60),
            stream_compression: CompressionLevel::Balanced,
            buffered_compression: CompressionLevel::Maximum,
            max_image_dimension: limits.max_dimension,
            max_decode_alloc: limits.max_alloc,
            max_body_bytes: 25 * 1024 * 1024,
        }
    }
}

impl ExportConfig {
    /// Decode limits derived from this configuration.
    pub fn decode_limits(&self) -> DecodeLimits {
        DecodeLimits {
            max_dimension: self.max_image_dimension,
            max_alloc: self.max_decode_alloc,
        }
    }

    /// A bundler using these limits and time budget.
    pub fn bundler(&self) -> Bundler {
        Bundler::new(self.decode_limits(), self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.stream_compression, CompressionLevel::Balanced);
        assert_eq!(config.buffered_compression, CompressionLevel::Maximum);
        assert_eq!(config.max_body_bytes, 25 * 1024 * 1024);
        assert_eq!(config.bundler().timeout(), config.timeout);
        assert_eq!(config.decode_limits(), DecodeLimits::default());
    }
}
