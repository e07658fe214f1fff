//! Route handlers for `/api/export`.

use super::AppState;
use super::request::parse_request;
use super::response::{preflight_response, zip_response};
use crate::bundler::archive::{archive_stream, download_filename};
use crate::error::{ExportError, ValidationError};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::Response;
use bytes::Bytes;
use serde_json::{Value, json};

/// `POST /api/export`: validate, render and stream the archive.
pub async fn export_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ExportError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ExportError::ImageTooLarge {
                detail: rejection.body_text(),
            }
        } else {
            ExportError::Validation(ValidationError::MissingBody)
        }
    })?;

    let request = parse_request(&body)?;
    drop(body);

    log::info!(
        "Export requested: platforms={:?} padding={} background={:?}",
        request.platforms,
        request.options.padding,
        request.options.background_color.as_ref().map(|c| c.as_str())
    );

    let bundle = state
        .config
        .bundler()
        .export(request.logo, request.platforms, request.options)
        .await?;

    let filename = download_filename(chrono::Utc::now().date_naive());
    zip_response(archive_stream(bundle, state.config.stream_compression), &filename)
}

/// `OPTIONS /api/export`: CORS preflight.
pub async fn options_handler() -> Response {
    preflight_response()
}

/// `GET /api/export`: self-describing usage document.
pub async fn docs_handler() -> Json<Value> {
    Json(json!({
        "endpoint": "/api/export",
        "method": "POST",
        "description": "Generate icon bundles for iOS, Android, and Web platforms",
        "request": {
            "body": {
                "logoBase64": {
                    "type": "string",
                    "required": true,
                    "description": "Base64 encoded logo image (PNG, JPEG, or WebP)"
                },
                "platforms": {
                    "type": "array",
                    "required": true,
                    "items": ["ios", "android", "web"],
                    "description": "Platforms to generate icons for"
                },
                "backgroundColor": {
                    "type": "string",
                    "required": false,
                    "description": "Background color in hex format (e.g., #ffffff)"
                },
                "padding": {
                    "type": "number",
                    "required": false,
                    "description": "Padding percentage (0-20)"
                },
                "appName": {
                    "type": "string",
                    "required": false,
                    "description": "Name written into the web manifest (defaults to App)"
                }
            }
        },
        "response": {
            "success": "ZIP file download",
            "error": {
                "status": 400,
                "body": { "error": "Error message", "code": "ERROR_CODE" }
            }
        },
        "zipStructure": {
            "logoforge-icons/": {
                "ios/AppIcon.appiconset/": "Contents.json + PNG files",
                "android/mipmap-*/": "ic_launcher.png, ic_launcher_round.png, ic_launcher_foreground.png",
                "android/mipmap-anydpi-v26/": "ic_launcher.xml, ic_launcher_round.xml",
                "android/values/": "colors.xml",
                "android/": "playstore-icon.png",
                "web/": "favicon.ico, favicon-*.png, apple-touch-icon.png, android-chrome-*.png, mstile-*.png, manifest.json, browserconfig.xml"
            }
        }
    }))
}
