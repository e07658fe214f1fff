#[cfg(test)]
mod tests {
    use async_zip::base::read::seek::ZipFileReader;
    use axum::extract::State;
    use axum::http::{StatusCode, header};
    use axum::response::{IntoResponse, Response};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use bytes::Bytes;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use logoforge_export::bundler::Platform;
    use logoforge_export::bundler::catalog::expected_paths;
    use logoforge_export::server::handlers::{docs_handler, export_handler, options_handler};
    use logoforge_export::server::{AppState, router};
    use logoforge_export::ExportConfig;
    use serde_json::{Value, json};
    use std::io::Cursor;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState {
            config: Arc::new(ExportConfig::default()),
        }
    }

    fn logo_base64() -> String {
        let image = RgbaImage::from_pixel(256, 256, Rgba([10, 120, 200, 255]));
        let mut png = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut png, ImageFormat::Png)
            .unwrap();
        STANDARD.encode(png.into_inner())
    }

    async fn post(body: Value) -> Response {
        let body = Bytes::from(serde_json::to_vec(&body).unwrap());
        export_handler(State(state()), Ok(body)).await.into_response()
    }

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    async fn error_of(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let json = serde_json::from_slice(&body_bytes(response).await).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_malformed_base64_rejected() {
        let (status, body) = error_of(
            post(json!({ "logoBase64": "@@not-base64@@", "platforms": ["web"] })).await,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_IMAGE_FORMAT");
        assert_eq!(body["error"], "Invalid base64 image format");
    }

    #[tokio::test]
    async fn test_empty_platforms_rejected() {
        let (status, body) =
            error_of(post(json!({ "logoBase64": logo_base64(), "platforms": [] })).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "NO_PLATFORMS");
    }

    #[tokio::test]
    async fn test_invalid_json_rejected() {
        let response = export_handler(State(state()), Ok(Bytes::from_static(b"{oops")))
            .await
            .into_response();
        let (status, body) = error_of(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_unsupported_format_rejected() {
        let svg = STANDARD.encode(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>");
        let (status, body) = error_of(
            post(json!({
                "logoBase64": format!("data:image/svg+xml;base64,{svg}"),
                "platforms": ["ios"]
            }))
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_successful_export_streams_zip() {
        let response = post(json!({
            "logoBase64": format!("data:image/png;base64,{}", logo_base64()),
            "platforms": ["web"],
            "backgroundColor": "#ffffff",
            "padding": 5,
            "appName": "Acme"
        }))
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/zip");
        let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"logoforge-icons-"));
        assert!(disposition.ends_with(".zip\""));
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate");
        assert_eq!(headers[header::PRAGMA], "no-cache");
        assert_eq!(headers[header::EXPIRES], "0");

        let zip = body_bytes(response).await.to_vec();
        let reader = ZipFileReader::new(futures_lite::io::Cursor::new(zip)).await.unwrap();
        let names: Vec<String> = reader
            .file()
            .entries()
            .iter()
            .map(|entry| entry.filename().as_str().unwrap().to_string())
            .collect();
        let expected: Vec<String> = expected_paths(Platform::Web)
            .into_iter()
            .map(|path| format!("logoforge-icons/{path}"))
            .collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_preflight() {
        let response = options_handler().await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[tokio::test]
    async fn test_docs_document() {
        let docs = docs_handler().await.0;
        assert_eq!(docs["endpoint"], "/api/export");
        assert_eq!(docs["method"], "POST");
        assert_eq!(docs["request"]["body"]["platforms"]["items"], json!(["ios", "android", "web"]));
        assert!(docs["zipStructure"]["logoforge-icons/"].is_object());
    }

    #[test]
    fn test_router_builds() {
        let _router = router(ExportConfig::default());
    }
}
