//! Error types for the icon export engine.
//!
//! Provides contextual error chaining, decode-specific variants and
//! conversions from the crates the engine builds on.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **DecodeError**: Distinguishes unsupported, corrupt and oversized input
//! - **bail! macro**: Early return with formatted error messages
//!
//! # Example
//!
//! ```no_run
//! use logoforge_export::bundler::{Context, Result, transform};
//!
//! fn load(bytes: &[u8]) -> Result<transform::SourceImage> {
//!     transform::decode(bytes, &transform::DecodeLimits::default())
//!         .map_err(Into::into)
//!         .context("decoding uploaded logo")
//! }
//! ```

use std::{fmt::Display, io, num};
use thiserror::Error as DeriveError;

/// Errors returned by the export engine.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// The source image could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Image processing error (resizing, PNG encoding).
    #[error("{0}")]
    ImageError(#[from] image::ImageError),

    /// Number conversion error (ICO directory fields).
    #[error("{0}")]
    ConvertError(#[from] num::TryFromIntError),

    /// ZIP archive creation error.
    #[error("{0}")]
    ZipError(#[from] async_zip::error::ZipError),

    /// JSON serialization error (sidecar manifests).
    #[error("{0}")]
    JsonError(#[from] serde_json::error::Error),

    /// Handlebars template rendering error (XML sidecars).
    #[error("{0}")]
    HandleBarsError(#[from] handlebars::RenderError),

    /// Two artifacts were produced for the same archive path.
    #[error("duplicate archive path {0}")]
    DuplicatePath(String),

    /// The export did not finish within its time budget.
    #[error("export did not finish within {0:?}")]
    Timeout(std::time::Duration),

    /// A blocking worker panicked or was cancelled.
    #[error("worker task failed: {0}")]
    TaskFailed(String),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

/// Reasons a source image cannot be turned into a [`SourceImage`](crate::bundler::transform::SourceImage).
#[derive(Debug, Clone, DeriveError, PartialEq, Eq)]
pub enum DecodeError {
    /// Bytes are not a raster format the engine accepts (PNG, JPEG, WebP).
    #[error("unsupported image format{}", .detected.as_deref().map(|f| format!(" ({f})")).unwrap_or_default())]
    UnsupportedFormat {
        /// Format name when one was recognised
        detected: Option<String>,
    },

    /// Bytes look like a supported format but fail to decode.
    #[error("corrupt image data: {reason}")]
    Corrupt {
        /// Decoder message
        reason: String,
    },

    /// Image exceeds the configured dimension or allocation limits.
    #[error("image too large to process: {reason}")]
    TooLarge {
        /// Limit that was hit
        reason: String,
    },
}

impl DecodeError {
    /// Classifies an [`image::ImageError`] raised while decoding.
    pub fn from_image_error(error: image::ImageError) -> Self {
        match error {
            image::ImageError::Limits(e) => DecodeError::TooLarge {
                reason: e.to_string(),
            },
            image::ImageError::Unsupported(e) => DecodeError::UnsupportedFormat {
                detected: Some(e.to_string()),
            },
            other => DecodeError::Corrupt {
                reason: other.to_string(),
            },
        }
    }
}

impl Error {
    /// Returns the decode failure at the root of this error, if any.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Error::Decode(e) => Some(e),
            Error::Context(_, inner) => inner.decode_error(),
            _ => None,
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the engine's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// # Examples
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_preserves_decode_error() {
        let err: Result<()> = Err(Error::Decode(DecodeError::Corrupt {
            reason: "truncated".into(),
        }));
        let err = err.context("decoding logo").unwrap_err();
        assert!(matches!(
            err.decode_error(),
            Some(DecodeError::Corrupt { .. })
        ));
        assert!(err.to_string().starts_with("decoding logo: "));
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = DecodeError::UnsupportedFormat {
            detected: Some("Gif".into()),
        };
        assert_eq!(err.to_string(), "unsupported image format (Gif)");

        let err = DecodeError::UnsupportedFormat { detected: None };
        assert_eq!(err.to_string(), "unsupported image format");
    }

    #[test]
    fn test_option_context() {
        let missing: Option<u32> = None;
        let err = missing.context("no favicon sizes").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "no favicon sizes"));
    }
}
