//! Error taxonomy for export requests.
//!
//! Every failure an export can hit maps onto one [`ExportError`] variant,
//! which in turn has a stable machine-readable code, an HTTP status and a
//! user-facing message. Internal details are logged, never returned.

use axum::http::StatusCode;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Longest internal message that may be shown to a client.
pub const MAX_PUBLIC_MESSAGE_LEN: usize = 200;

const GENERIC_INTERNAL_MESSAGE: &str = "An unexpected error occurred during export. Please try again.";

/// Main error type for export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// Request rejected before any image work started
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Source bytes are not PNG, JPEG or WebP
    #[error("Unsupported image format. Please use PNG, JPEG, or WebP.")]
    UnsupportedFormat {
        /// Decoder detail, logged only
        detail: String,
    },

    /// Source bytes claim a supported format but do not decode
    #[error("The image appears to be corrupted. Please try uploading again.")]
    CorruptImage {
        /// Decoder detail, logged only
        detail: String,
    },

    /// Source exceeds decode limits
    #[error("Image too large to process. Please use a smaller image (max 10MB recommended).")]
    ImageTooLarge {
        /// Limit that was hit, logged only
        detail: String,
    },

    /// Rendering did not finish within the time budget
    #[error("Image processing timed out. Please try with a smaller image.")]
    Timeout {
        /// Budget that expired
        budget: Duration,
    },

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other engine failure
    #[error("Export failed: {0}")]
    Internal(String),
}

/// Request validation failures, one per rejected field condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is not JSON
    #[error("Invalid JSON in request body")]
    InvalidJson,

    /// Body is JSON but not an object
    #[error("Request body is required")]
    MissingBody,

    /// `logoBase64` missing, empty or not a string
    #[error("logoBase64 is required and must be a string")]
    InvalidLogo,

    /// `logoBase64` is not valid base64 or decodes to nothing
    #[error("Invalid base64 image format")]
    InvalidImageFormat,

    /// `platforms` missing or not an array
    #[error("platforms is required and must be an array")]
    InvalidPlatforms,

    /// `platforms` is empty
    #[error("At least one platform must be selected")]
    NoPlatforms,

    /// Unknown entry in `platforms`
    #[error("Invalid platform: {value}. Must be one of: ios, android, web")]
    InvalidPlatform {
        /// Offending entry as received
        value: String,
    },

    /// `backgroundColor` present but not a string
    #[error("backgroundColor must be a string")]
    InvalidBackgroundColor,

    /// `backgroundColor` is not `#rgb`, `#rrggbb` or `#rrggbbaa`
    #[error("backgroundColor must be a valid hex color (e.g., #fff, #ffffff, or #ffffffff)")]
    InvalidHexColor,

    /// `padding` present but not a number
    #[error("padding must be a number")]
    InvalidPaddingType,

    /// `padding` outside `0..=20`
    #[error("padding must be between 0 and 20 (percentage)")]
    InvalidPaddingRange,

    /// `appName` present but not a non-empty string of at most 64 characters
    #[error("appName must be a non-empty string of at most 64 characters")]
    InvalidAppName,
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidJson => "INVALID_JSON",
            ValidationError::MissingBody => "MISSING_BODY",
            ValidationError::InvalidLogo => "INVALID_LOGO",
            ValidationError::InvalidImageFormat => "INVALID_IMAGE_FORMAT",
            ValidationError::InvalidPlatforms => "INVALID_PLATFORMS",
            ValidationError::NoPlatforms => "NO_PLATFORMS",
            ValidationError::InvalidPlatform { .. } => "INVALID_PLATFORM",
            ValidationError::InvalidBackgroundColor => "INVALID_BACKGROUND_COLOR",
            ValidationError::InvalidHexColor => "INVALID_HEX_COLOR",
            ValidationError::InvalidPaddingType => "INVALID_PADDING_TYPE",
            ValidationError::InvalidPaddingRange => "INVALID_PADDING_RANGE",
            ValidationError::InvalidAppName => "INVALID_APP_NAME",
        }
    }
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl From<crate::bundler::Error> for ExportError {
    fn from(error: crate::bundler::Error) -> Self {
        use crate::bundler::{DecodeError, Error};

        if let Some(decode) = error.decode_error() {
            return match decode {
                DecodeError::UnsupportedFormat { .. } => ExportError::UnsupportedFormat {
                    detail: decode.to_string(),
                },
                DecodeError::Corrupt { .. } => ExportError::CorruptImage {
                    detail: decode.to_string(),
                },
                DecodeError::TooLarge { .. } => ExportError::ImageTooLarge {
                    detail: decode.to_string(),
                },
            };
        }

        match error {
            Error::Timeout(budget) => ExportError::Timeout { budget },
            Error::IoError(e) => ExportError::Io(e),
            other => ExportError::Internal(other.to_string()),
        }
    }
}

impl ExportError {
    /// Stable machine-readable code returned to clients.
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::Validation(e) => e.code(),
            ExportError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ExportError::CorruptImage { .. } => "CORRUPT_IMAGE",
            ExportError::ImageTooLarge { .. } => "IMAGE_TOO_LARGE",
            ExportError::Timeout { .. } => "TIMEOUT",
            ExportError::Cli(_) => "CLI_ERROR",
            ExportError::Io(_) | ExportError::Internal(_) => match self.internal_detail() {
                Some(detail) if sanitize_message(&detail).is_some() => "EXPORT_ERROR",
                _ => "INTERNAL_ERROR",
            },
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ExportError::Validation(_)
            | ExportError::UnsupportedFormat { .. }
            | ExportError::CorruptImage { .. } => StatusCode::BAD_REQUEST,
            ExportError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ExportError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ExportError::Cli(_) | ExportError::Io(_) | ExportError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to a client.
    ///
    /// Internal failures are sanitized. When nothing useful survives, a
    /// generic message is used instead.
    pub fn public_message(&self) -> String {
        match self.internal_detail() {
            Some(detail) => match sanitize_message(&detail) {
                Some(safe) => format!("Export failed: {safe}"),
                None => GENERIC_INTERNAL_MESSAGE.to_string(),
            },
            None => self.to_string(),
        }
    }

    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExportError::Timeout { .. })
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ExportError::Validation(ValidationError::InvalidHexColor) => vec![
                "Use a hex color such as #fff, #ffffff or #ffffff80".to_string(),
            ],
            ExportError::Validation(ValidationError::InvalidPlatform { .. })
            | ExportError::Validation(ValidationError::NoPlatforms) => vec![
                "Select at least one of: ios, android, web".to_string(),
            ],
            ExportError::Validation(ValidationError::InvalidPaddingRange) => vec![
                "Choose a padding between 0 and 20 percent".to_string(),
            ],
            ExportError::UnsupportedFormat { .. } => vec![
                "Convert the logo to PNG, JPEG or WebP".to_string(),
                "SVG, GIF and other formats are not accepted".to_string(),
            ],
            ExportError::CorruptImage { .. } => vec![
                "Re-export the logo from your image editor".to_string(),
                "Check that the file was not truncated during upload".to_string(),
            ],
            ExportError::ImageTooLarge { .. } => vec![
                "Downscale the logo; 1024x1024 is enough for every icon".to_string(),
            ],
            ExportError::Timeout { budget } => vec![
                format!("Retry; the export must finish within {:?}", budget),
                "Select fewer platforms or use a smaller source image".to_string(),
            ],
            ExportError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => vec![
                "Check that the input file path exists".to_string(),
            ],
            ExportError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => vec![
                "Check read permission on the input and write permission on the output directory"
                    .to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    fn internal_detail(&self) -> Option<String> {
        match self {
            ExportError::Internal(detail) => Some(detail.clone()),
            ExportError::Io(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z][a-z0-9+.-]*://\S+").expect("URL pattern is valid")
});

static CREDENTIAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:api[_-]?key|access[_-]?key|token|secret|password|passwd|authorization|bearer)\b\s*[:=]?\s*\S+",
    )
    .expect("credential pattern is valid")
});

static OPAQUE_TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9+_-]{32,}={0,2}").expect("token pattern is valid")
});

static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S*[/\\]\S*").expect("path pattern is valid")
});

static WHITESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Makes an internal error message safe to show to a client.
///
/// URLs and credential-like tokens are replaced with `[redacted]`,
/// filesystem-looking tokens are removed and the result is capped at
/// [`MAX_PUBLIC_MESSAGE_LEN`] characters. Returns `None` when nothing
/// meaningful remains.
pub fn sanitize_message(message: &str) -> Option<String> {
    let redacted = URL_PATTERN.replace_all(message, "[redacted]");
    let redacted = CREDENTIAL_PATTERN.replace_all(&redacted, "[redacted]");
    let redacted = OPAQUE_TOKEN_PATTERN.replace_all(&redacted, "[redacted]");
    let stripped = PATH_PATTERN.replace_all(&redacted, "");
    let collapsed = WHITESPACE_PATTERN.replace_all(&stripped, " ");

    let trimmed = collapsed.trim().trim_matches(|c: char| c == ':' || c == ',').trim();
    if !trimmed.chars().any(|c| c.is_alphanumeric()) || trimmed == "[redacted]" {
        return None;
    }

    Some(trimmed.chars().take(MAX_PUBLIC_MESSAGE_LEN).collect())
}
