#[cfg(test)]
mod tests {
    use async_zip::base::read::seek::ZipFileReader;
    use futures_lite::io::{AsyncReadExt, Cursor as ZipCursor};
    use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
    use logoforge_export::bundler::archive::{ARCHIVE_ROOT, CompressionLevel, archive_to_vec};
    use logoforge_export::bundler::catalog::expected_paths;
    use logoforge_export::bundler::transform::{self, DecodeLimits};
    use logoforge_export::bundler::{Bundler, ExportBundle, Platform, ProcessingOptions};
    use std::io::Cursor;

    fn red_png(size: u32) -> Vec<u8> {
        let image = RgbImage::from_pixel(size, size, Rgb([255, 0, 0]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    async fn export(platforms: Vec<Platform>, options: ProcessingOptions) -> ExportBundle {
        Bundler::default()
            .export(red_png(512), platforms, options)
            .await
            .unwrap()
    }

    fn load(bundle: &ExportBundle, path: &str) -> DynamicImage {
        image::load_from_memory(&bundle.get(path).unwrap().bytes).unwrap()
    }

    fn le_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    #[tokio::test]
    async fn test_web_export_end_to_end() {
        let bundle = export(vec![Platform::Web], ProcessingOptions::default()).await;

        let paths: Vec<&str> = bundle.paths().collect();
        assert_eq!(paths, expected_paths(Platform::Web));

        let ico = &bundle.get("web/favicon.ico").unwrap().bytes;
        assert_eq!(u16::from_le_bytes([ico[4], ico[5]]), 3);
        let mut expected_offset = 6 + 3 * 16;
        for i in 0..3 {
            let entry = 6 + i * 16;
            let len = le_u32(ico, entry + 8);
            assert_eq!(le_u32(ico, entry + 12), expected_offset);
            expected_offset += len;
        }
        assert_eq!(expected_offset as usize, ico.len());

        let chrome = load(&bundle, "web/android-chrome-512x512.png");
        assert_eq!(chrome.dimensions(), (512, 512));
        assert!(!chrome.color().has_alpha());

        let maskable = load(&bundle, "web/android-chrome-512x512-maskable.png").to_rgba8();
        let border = (512.0_f64 * 0.10).round() as u32;
        for (x, y, pixel) in maskable.enumerate_pixels() {
            let inside = x >= border && y >= border && x < 512 - border && y < 512 - border;
            if !inside {
                let transparent = pixel[3] == 0;
                let white = pixel[0] == 255 && pixel[1] == 255 && pixel[2] == 255;
                assert!(transparent || white, "logo bleeds into border at {x},{y}");
            }
        }
    }

    #[tokio::test]
    async fn test_all_platforms_match_catalog() {
        let bundle = export(
            vec![Platform::Android, Platform::Ios, Platform::Web, Platform::Ios],
            ProcessingOptions::default(),
        )
        .await;

        let mut expected = Vec::new();
        for platform in [Platform::Android, Platform::Ios, Platform::Web] {
            expected.extend(expected_paths(platform));
        }
        assert_eq!(bundle.paths().collect::<Vec<_>>(), expected);
    }

    #[tokio::test]
    async fn test_icons_have_exact_dimensions() {
        let options = ProcessingOptions {
            padding: 15.0,
            background_color: Some("#123456".parse().unwrap()),
            ..ProcessingOptions::default()
        };
        let bundle = export(Platform::ALL.to_vec(), options).await;

        for platform in Platform::ALL {
            for spec in logoforge_export::bundler::catalog::icons(platform) {
                let image = load(&bundle, &spec.output_path());
                assert_eq!(image.dimensions(), (spec.size, spec.size), "{}", spec.output_path());
            }
        }
    }

    #[tokio::test]
    async fn test_adaptive_foreground_keeps_transparent_margin() {
        let options = ProcessingOptions {
            background_color: Some("#00ff00".parse().unwrap()),
            ..ProcessingOptions::default()
        };
        let bundle = export(vec![Platform::Android], options).await;

        let foreground = load(&bundle, "android/mipmap-xxxhdpi/ic_launcher_foreground.png");
        assert!(foreground.color().has_alpha());
        let rgba = foreground.to_rgba8();
        let canvas = rgba.width();
        let logo = transform::safe_zone_size(canvas);
        let zone = (canvas - logo) / 2..(canvas - logo) / 2 + logo;
        for (x, y, pixel) in rgba.enumerate_pixels() {
            if !(zone.contains(&x) && zone.contains(&y)) {
                assert_eq!(pixel[3], 0, "opaque pixel at ({x},{y}) outside the safe zone");
            }
        }
        let center = canvas / 2;
        assert_eq!(rgba.get_pixel(center, center)[3], 255);
    }

    #[tokio::test]
    async fn test_identical_inputs_give_identical_archives() {
        let first = export(vec![Platform::Web, Platform::Ios], ProcessingOptions::default()).await;
        let second = export(vec![Platform::Web, Platform::Ios], ProcessingOptions::default()).await;

        let a = archive_to_vec(&first, CompressionLevel::Fast).await.unwrap();
        let b = archive_to_vec(&second, CompressionLevel::Fast).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_archive_contents_round_trip() {
        let bundle = export(vec![Platform::Ios], ProcessingOptions::default()).await;
        let zip = archive_to_vec(&bundle, CompressionLevel::Balanced).await.unwrap();

        let mut reader = ZipFileReader::new(ZipCursor::new(zip)).await.unwrap();
        assert_eq!(reader.file().entries().len(), bundle.len());
        for (i, artifact) in bundle.iter().enumerate() {
            let name = reader.file().entries()[i].filename().as_str().unwrap().to_string();
            assert_eq!(name, format!("{ARCHIVE_ROOT}/{}", artifact.path));

            let mut content = Vec::new();
            reader
                .reader_with_entry(i)
                .await
                .unwrap()
                .read_to_end(&mut content)
                .await
                .unwrap();
            assert_eq!(content, artifact.bytes);
        }
    }

    #[test]
    fn test_zero_padding_matches_plain_resize() {
        let source = transform::decode(&red_png(300), &DecodeLimits::default()).unwrap();
        assert_eq!(
            transform::add_padding(&source, 64, 0.0, None).unwrap(),
            transform::resize_to_square(&source, 64, None).unwrap()
        );
        assert_eq!(
            transform::add_padding(&source, 64, 35.0, None).unwrap(),
            transform::add_padding(&source, 64, 20.0, None).unwrap()
        );
    }

    #[tokio::test]
    async fn test_gif_is_unsupported() {
        let mut gif = Cursor::new(Vec::new());
        DynamicImage::new_rgba8(8, 8)
            .write_to(&mut gif, ImageFormat::Gif)
            .unwrap();

        let err = Bundler::default()
            .export(gif.into_inner(), vec![Platform::Web], ProcessingOptions::default())
            .await
            .unwrap_err();
        let err = logoforge_export::ExportError::from(err);
        assert_eq!(err.code(), "UNSUPPORTED_FORMAT");
    }
}
