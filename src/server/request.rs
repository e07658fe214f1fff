//! Export request parsing and validation.
//!
//! The body is parsed as untyped JSON and checked field by field so each
//! failure maps onto its own [`ValidationError`] code. Checks run in a fixed
//! order and the first failure wins; nothing is decoded as an image until
//! every field has passed.

use crate::bundler::{HexColor, Platform, ProcessingOptions};
use crate::error::ValidationError;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Longest accepted `appName`, in characters.
pub const MAX_APP_NAME_LEN: usize = 64;

/// Standard alphabet, padding optional.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

static DATA_URL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/(?:png|jpeg|jpg|gif|webp|svg\+xml);base64,")
        .expect("data URL regex is valid")
});

static BASE64_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").expect("base64 regex is valid"));

/// A validated export request.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Raw logo bytes after base64 decoding.
    pub logo: Vec<u8>,
    /// Requested platforms in request order, duplicates kept.
    pub platforms: Vec<Platform>,
    /// Rendering options.
    pub options: ProcessingOptions,
}

/// Parses and validates a raw request body.
pub fn parse_request(body: &[u8]) -> Result<ExportRequest, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::InvalidJson)?;
    validate_request(&value)
}

/// Validates an already parsed JSON body.
pub fn validate_request(value: &Value) -> Result<ExportRequest, ValidationError> {
    let fields = value.as_object().ok_or(ValidationError::MissingBody)?;

    let logo = match fields.get("logoBase64") {
        Some(Value::String(s)) if !s.is_empty() => decode_logo_base64(s)?,
        _ => return Err(ValidationError::InvalidLogo),
    };

    let platforms = parse_platforms(fields)?;

    let background_color = match fields.get("backgroundColor") {
        None => None,
        Some(Value::String(s)) => Some(
            s.parse::<HexColor>()
                .map_err(|_| ValidationError::InvalidHexColor)?,
        ),
        Some(_) => return Err(ValidationError::InvalidBackgroundColor),
    };

    let padding = match fields.get("padding") {
        None => 0.0,
        Some(Value::Number(n)) => {
            let padding = n.as_f64().ok_or(ValidationError::InvalidPaddingType)?;
            if !padding.is_finite() || !(0.0..=20.0).contains(&padding) {
                return Err(ValidationError::InvalidPaddingRange);
            }
            padding
        }
        Some(_) => return Err(ValidationError::InvalidPaddingType),
    };

    let app_name = match fields.get("appName") {
        None => None,
        Some(Value::String(s))
            if !s.trim().is_empty() && s.chars().count() <= MAX_APP_NAME_LEN =>
        {
            Some(s.clone())
        }
        Some(_) => return Err(ValidationError::InvalidAppName),
    };

    Ok(ExportRequest {
        logo,
        platforms,
        options: ProcessingOptions {
            background_color,
            padding,
            app_name,
        },
    })
}

fn parse_platforms(fields: &Map<String, Value>) -> Result<Vec<Platform>, ValidationError> {
    let entries = match fields.get("platforms") {
        Some(Value::Array(entries)) => entries,
        _ => return Err(ValidationError::InvalidPlatforms),
    };
    if entries.is_empty() {
        return Err(ValidationError::NoPlatforms);
    }

    entries
        .iter()
        .map(|entry| match entry {
            Value::String(s) => s.parse::<Platform>().map_err(|_| ValidationError::InvalidPlatform {
                value: s.clone(),
            }),
            other => Err(ValidationError::InvalidPlatform {
                value: other.to_string(),
            }),
        })
        .collect()
}

/// Decodes a base64 logo, with or without a `data:image/...;base64,` prefix.
///
/// Accepts only the standard alphabet with optional `=` padding. Fails when
/// the text is malformed or decodes to zero bytes.
pub fn decode_logo_base64(text: &str) -> Result<Vec<u8>, ValidationError> {
    let payload = match DATA_URL_PREFIX.find(text) {
        Some(prefix) => &text[prefix.end()..],
        None => text,
    };

    if payload.is_empty() || !BASE64_BODY.is_match(payload) {
        return Err(ValidationError::InvalidImageFormat);
    }

    let bytes = LENIENT_BASE64
        .decode(payload)
        .map_err(|_| ValidationError::InvalidImageFormat)?;
    if bytes.is_empty() {
        return Err(ValidationError::InvalidImageFormat);
    }
    Ok(bytes)
}
