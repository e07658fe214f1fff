//! Raster transforms that turn one decoded logo into platform icons.
//!
//! Every function takes the immutable [`SourceImage`] and returns freshly
//! encoded PNG bytes. Nothing here touches the filesystem or shared state,
//! so the same source can be rendered from several threads at once.
//!
//! # Fill rule
//!
//! When the logo does not cover its square (non-square source, padding),
//! the remaining area is filled with:
//!
//! 1. the background color, when one is supplied (output is flattened to RGB)
//! 2. transparent black, when the source has an alpha channel
//! 3. opaque white otherwise (output stays RGB, no alpha is introduced)
//!
//! # Resampling
//!
//! All scaling uses Lanczos3 with contain-fit: the aspect ratio is preserved,
//! nothing is cropped and the result is centered. Sources with an alpha
//! channel are resampled with premultiplied alpha so transparent pixels do
//! not darken anti-aliased edges.

use crate::bundler::color::HexColor;
use crate::bundler::error::{DecodeError, Result};
use image::{
    DynamicImage, ImageFormat, ImageReader, Limits, Rgb, Rgba32FImage, RgbImage, Rgba, RgbaImage,
    imageops::{self, FilterType},
};
use std::io::Cursor;

/// Largest accepted padding percentage.
pub const MAX_PADDING_PERCENT: f64 = 20.0;

/// Resource ceilings applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum width or height in pixels.
    pub max_dimension: u32,
    /// Maximum bytes the decoder may allocate.
    pub max_alloc: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_dimension: 16_384,
            max_alloc: 512 * 1024 * 1024,
        }
    }
}

/// A decoded logo, normalized to RGBA8.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
    format: ImageFormat,
    channels: u8,
    has_alpha: bool,
}

impl SourceImage {
    /// Wraps an already decoded image.
    pub fn from_dynamic(image: DynamicImage, format: ImageFormat) -> Self {
        let color = image.color();
        Self {
            channels: color.channel_count(),
            has_alpha: color.has_alpha(),
            pixels: image.into_rgba8(),
            format,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Channel count of the encoded input.
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Whether the input carried an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Detected input format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

/// Decodes PNG, JPEG or WebP bytes.
///
/// The format is sniffed from magic bytes. Anything else, including formats
/// the `image` crate could decode (GIF, BMP, ...), is rejected.
pub fn decode(bytes: &[u8], limits: &DecodeLimits) -> std::result::Result<SourceImage, DecodeError> {
    let format = image::guess_format(bytes)
        .map_err(|_| DecodeError::UnsupportedFormat { detected: None })?;

    if !matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP
    ) {
        return Err(DecodeError::UnsupportedFormat {
            detected: Some(format!("{format:?}")),
        });
    }

    let mut decode_limits = Limits::default();
    decode_limits.max_image_width = Some(limits.max_dimension);
    decode_limits.max_image_height = Some(limits.max_dimension);
    decode_limits.max_alloc = Some(limits.max_alloc);

    let mut reader = ImageReader::with_format(Cursor::new(bytes), format);
    reader.limits(decode_limits);
    let image = reader.decode().map_err(DecodeError::from_image_error)?;

    log::debug!(
        "Decoded {:?} source {}x{} ({:?})",
        format,
        image.width(),
        image.height(),
        image.color()
    );

    Ok(SourceImage::from_dynamic(image, format))
}

/// Contain-fits the source into a `size`×`size` PNG.
pub fn resize_to_square(
    source: &SourceImage,
    size: u32,
    background: Option<&HexColor>,
) -> Result<Vec<u8>> {
    let canvas = render(source, size, 0, background);
    encode(finish(canvas, source, background))
}

/// Like [`resize_to_square`] but keeps `padding_percent` of `size` empty on each side.
///
/// The percentage is clamped to `0..=20`. A clamped value of zero produces
/// exactly the output of [`resize_to_square`].
pub fn add_padding(
    source: &SourceImage,
    size: u32,
    padding_percent: f64,
    background: Option<&HexColor>,
) -> Result<Vec<u8>> {
    if clamp_padding(padding_percent) == 0.0 {
        return resize_to_square(source, size, background);
    }

    let canvas = render(source, size, padding_pixels(size, padding_percent), background);
    encode(finish(canvas, source, background))
}

/// Renders a square icon and cuts it to a circle of diameter `size`.
///
/// Pixels whose center lies outside the circle become fully transparent.
/// The result always has an alpha channel.
pub fn mask_circular(
    source: &SourceImage,
    size: u32,
    padding_percent: f64,
    background: Option<&HexColor>,
) -> Result<Vec<u8>> {
    let padding_px = if padding_percent > 0.0 {
        padding_pixels(size, padding_percent)
    } else {
        0
    };

    let mut canvas = match finish(render(source, size, padding_px, background), source, background)
    {
        DynamicImage::ImageRgba8(rgba) => rgba,
        other => other.into_rgba8(),
    };

    let center = f64::from(size) / 2.0;
    let radius_sq = center * center;
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - center;
        let dy = f64::from(y) + 0.5 - center;
        if dx * dx + dy * dy > radius_sq {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    encode(DynamicImage::ImageRgba8(canvas))
}

/// Builds an Android adaptive icon foreground layer.
///
/// The logo is fitted into the central 72/108 of a `canvas_size` square and
/// everything outside it is fully transparent. Never flattened.
pub fn composite_adaptive_foreground(source: &SourceImage, canvas_size: u32) -> Result<Vec<u8>> {
    let logo_size = safe_zone_size(canvas_size);
    let logo = render(source, logo_size, 0, None);

    let mut canvas = RgbaImage::from_pixel(canvas_size, canvas_size, Rgba([0, 0, 0, 0]));
    let offset = i64::from((canvas_size - logo_size) / 2);
    imageops::replace(&mut canvas, &logo, offset, offset);

    encode(DynamicImage::ImageRgba8(canvas))
}

/// Edge length of the adaptive safe zone inside a `canvas_size` canvas.
pub fn safe_zone_size(canvas_size: u32) -> u32 {
    let (safe, full) = crate::bundler::catalog::ADAPTIVE_SAFE_ZONE;
    round_dim(f64::from(canvas_size) * f64::from(safe) / f64::from(full)).clamp(1, canvas_size)
}

/// Clamps a padding percentage into `0..=20`, mapping NaN to zero.
pub fn clamp_padding(padding_percent: f64) -> f64 {
    if padding_percent.is_nan() {
        return 0.0;
    }
    padding_percent.clamp(0.0, MAX_PADDING_PERCENT)
}

/// Padding in pixels on each side for a `size` icon.
pub fn padding_pixels(size: u32, padding_percent: f64) -> u32 {
    round_dim(f64::from(size) * clamp_padding(padding_percent) / 100.0)
}

fn round_dim(value: f64) -> u32 {
    // f64::round is half away from zero
    value.round().max(0.0) as u32
}

/// Dimensions of the source contain-fitted into a `bound` square.
fn contain_dimensions(width: u32, height: u32, bound: u32) -> (u32, u32) {
    let scale = f64::from(bound) / f64::from(width.max(height));
    let fit = |edge: u32| round_dim(f64::from(edge) * scale).clamp(1, bound);
    (fit(width), fit(height))
}

fn fill_color(source: &SourceImage, background: Option<&HexColor>) -> Rgba<u8> {
    match background {
        Some(color) => Rgba(color.rgba()),
        None if source.has_alpha => Rgba([0, 0, 0, 0]),
        None => Rgba([255, 255, 255, 255]),
    }
}

/// Fitted logo centered on a filled `size` square with `padding_px` on each side.
fn render(
    source: &SourceImage,
    size: u32,
    padding_px: u32,
    background: Option<&HexColor>,
) -> RgbaImage {
    let inner = size.saturating_sub(padding_px * 2).max(1);
    let (width, height) = contain_dimensions(source.width(), source.height(), inner);

    let logo = if (width, height) == (source.width(), source.height()) {
        source.pixels.clone()
    } else if source.has_alpha {
        resize_premultiplied(&source.pixels, width, height)
    } else {
        imageops::resize(&source.pixels, width, height, FilterType::Lanczos3)
    };

    let mut canvas = RgbaImage::from_pixel(size, size, fill_color(source, background));
    let x = padding_px + (inner - width) / 2;
    let y = padding_px + (inner - height) / 2;
    imageops::replace(&mut canvas, &logo, i64::from(x), i64::from(y));
    canvas
}

/// Lanczos3 resize in premultiplied float space.
///
/// Samples are normalized to `0.0..=1.0`, the range the float resampler clamps to.
fn resize_premultiplied(pixels: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premultiplied = Rgba32FImage::from_fn(pixels.width(), pixels.height(), |x, y| {
        let Rgba([r, g, b, a]) = *pixels.get_pixel(x, y);
        let alpha = f32::from(a) / 255.0;
        let channel = |c: u8| f32::from(c) / 255.0 * alpha;
        Rgba([channel(r), channel(g), channel(b), alpha])
    });
    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    RgbaImage::from_fn(width, height, |x, y| {
        let Rgba([r, g, b, a]) = *resized.get_pixel(x, y);
        let alpha = (a * 255.0).round().clamp(0.0, 255.0) as u8;
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let channel = |c: f32| (c / a * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba([channel(r), channel(g), channel(b), alpha])
    })
}

/// Applies the output channel policy to a rendered canvas.
fn finish(
    canvas: RgbaImage,
    source: &SourceImage,
    background: Option<&HexColor>,
) -> DynamicImage {
    match background {
        Some(color) => DynamicImage::ImageRgb8(flatten(&canvas, color)),
        None if !source.has_alpha => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).into_rgb8()),
        None => DynamicImage::ImageRgba8(canvas),
    }
}

/// Composites the canvas over an opaque background, dropping alpha.
fn flatten(canvas: &RgbaImage, background: &HexColor) -> RgbImage {
    let [red, green, blue, _] = background.rgba();
    let blend = |fg: u8, back: u8, alpha: u32| -> u8 {
        ((u32::from(fg) * alpha + u32::from(back) * (255 - alpha) + 127) / 255) as u8
    };

    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let Rgba([r, g, b, a]) = *canvas.get_pixel(x, y);
        let a = u32::from(a);
        Rgb([blend(r, red, a), blend(g, green, a), blend(b, blue, a)])
    })
}

fn encode(image: DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    fn opaque_red(width: u32, height: u32) -> SourceImage {
        let image = RgbImage::from_pixel(width, height, Rgb([255, 0, 0]));
        SourceImage::from_dynamic(DynamicImage::ImageRgb8(image), ImageFormat::Png)
    }

    fn transparent_dot(size: u32) -> SourceImage {
        let image = RgbaImage::from_fn(size, size, |x, y| {
            if x == size / 2 && y == size / 2 {
                Rgba([0, 0, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        SourceImage::from_dynamic(DynamicImage::ImageRgba8(image), ImageFormat::Png)
    }

    fn load(bytes: &[u8]) -> DynamicImage {
        image::load_from_memory_with_format(bytes, ImageFormat::Png).unwrap()
    }

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(DynamicImage::ImageRgba8(RgbaImage::new(8, 4)));
        let source = decode(&bytes, &DecodeLimits::default()).unwrap();
        assert_eq!((source.width(), source.height()), (8, 4));
        assert!(source.has_alpha());
        assert_eq!(source.channels(), 4);
        assert_eq!(source.format(), ImageFormat::Png);
    }

    #[test]
    fn test_decode_rejects_unknown_bytes() {
        let err = decode(b"definitely not an image", &DecodeLimits::default()).unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedFormat { detected: None });
    }

    #[test]
    fn test_decode_rejects_gif() {
        let err = decode(b"GIF89a\x01\x00\x01\x00\x00\x00\x00;", &DecodeLimits::default())
            .unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat { detected: Some(_) }));
    }

    #[test]
    fn test_decode_truncated_png_is_corrupt() {
        let bytes = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(64, 64)));
        let err = decode(&bytes[..bytes.len() / 2], &DecodeLimits::default()).unwrap_err();
        assert!(matches!(err, DecodeError::Corrupt { .. }));
    }

    #[test]
    fn test_decode_enforces_dimension_limit() {
        let bytes = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(64, 16)));
        let limits = DecodeLimits {
            max_dimension: 32,
            ..DecodeLimits::default()
        };
        let err = decode(&bytes, &limits).unwrap_err();
        assert!(matches!(err, DecodeError::TooLarge { .. }));
    }

    #[test]
    fn test_resize_exact_dimensions_for_non_square_source() {
        let source = opaque_red(300, 100);
        for size in [16, 29, 167, 512] {
            let out = load(&resize_to_square(&source, size, None).unwrap());
            assert_eq!((out.width(), out.height()), (size, size));
        }
    }

    #[test]
    fn test_opaque_source_without_background_has_no_alpha() {
        let source = opaque_red(200, 100);
        let out = load(&resize_to_square(&source, 64, None).unwrap());
        assert!(!out.color().has_alpha());
        // Letterbox is white
        assert_eq!(out.to_rgb8().get_pixel(32, 0), &Rgb([255, 255, 255]));
        assert_eq!(out.to_rgb8().get_pixel(32, 32), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_alpha_source_keeps_transparent_fill() {
        let source = transparent_dot(32);
        let out = load(&resize_to_square(&source, 32, None).unwrap());
        assert!(out.color().has_alpha());
        assert_eq!(out.to_rgba8().get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_background_flattens() {
        let source = transparent_dot(32);
        let color: HexColor = "#00ff00".parse().unwrap();
        let out = load(&resize_to_square(&source, 32, Some(&color)).unwrap());
        assert!(!out.color().has_alpha());
        assert_eq!(out.to_rgb8().get_pixel(0, 0), &Rgb([0, 255, 0]));
    }

    #[test]
    fn test_zero_padding_matches_plain_resize() {
        let source = opaque_red(120, 80);
        let color: HexColor = "#123".parse().unwrap();
        assert_eq!(
            add_padding(&source, 100, 0.0, Some(&color)).unwrap(),
            resize_to_square(&source, 100, Some(&color)).unwrap()
        );
        assert_eq!(
            add_padding(&source, 100, -5.0, None).unwrap(),
            resize_to_square(&source, 100, None).unwrap()
        );
    }

    #[test]
    fn test_padding_above_maximum_is_clamped() {
        let source = opaque_red(64, 64);
        assert_eq!(
            add_padding(&source, 100, 55.0, None).unwrap(),
            add_padding(&source, 100, 20.0, None).unwrap()
        );
    }

    #[test]
    fn test_padding_border_uses_fill() {
        let source = opaque_red(64, 64);
        let color: HexColor = "#0000ff".parse().unwrap();
        let out = load(&add_padding(&source, 100, 10.0, Some(&color)).unwrap()).to_rgb8();
        assert_eq!(out.dimensions(), (100, 100));
        assert_eq!(out.get_pixel(5, 50), &Rgb([0, 0, 255]));
        assert_eq!(out.get_pixel(50, 50), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_circular_mask_clears_corners() {
        let source = opaque_red(64, 64);
        let out = load(&mask_circular(&source, 48, 0.0, None).unwrap());
        assert!(out.color().has_alpha());
        let rgba = out.to_rgba8();
        assert_eq!(rgba.get_pixel(0, 0)[3], 0);
        assert_eq!(rgba.get_pixel(47, 47)[3], 0);
        assert_eq!(rgba.get_pixel(24, 24), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_adaptive_foreground_transparent_outside_safe_zone() {
        let source = opaque_red(64, 64);
        for canvas in [108, 162, 216] {
            let out = load(&composite_adaptive_foreground(&source, canvas).unwrap()).to_rgba8();
            assert_eq!(out.dimensions(), (canvas, canvas));

            let logo = safe_zone_size(canvas);
            let start = (canvas - logo) / 2;
            for (x, y, pixel) in out.enumerate_pixels() {
                let inside = (start..start + logo).contains(&x) && (start..start + logo).contains(&y);
                if !inside {
                    assert_eq!(pixel[3], 0, "pixel ({x},{y}) outside the safe zone");
                }
            }
            let center = canvas / 2;
            assert_eq!(out.get_pixel(center, center)[3], 255);
        }
    }

    #[test]
    fn test_transparent_edges_keep_logo_color() {
        let image = RgbaImage::from_fn(400, 400, |x, _| {
            if x < 200 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let source = SourceImage::from_dynamic(DynamicImage::ImageRgba8(image), ImageFormat::Png);
        let out = load(&resize_to_square(&source, 48, None).unwrap()).to_rgba8();

        let mut edge_pixels = 0;
        for x in 0..48 {
            let pixel = out.get_pixel(x, 24);
            if pixel[3] > 0 {
                assert!(
                    pixel[0] >= 250 && pixel[1] >= 250 && pixel[2] >= 250,
                    "dark fringe at x={x}: {pixel:?}"
                );
            }
            if pixel[3] > 0 && pixel[3] < 255 {
                edge_pixels += 1;
            }
        }
        assert!(edge_pixels > 0);
        assert_eq!(out.get_pixel(47, 24)[3], 0);
    }

    #[test]
    fn test_safe_zone_rounding() {
        assert_eq!(safe_zone_size(108), 72);
        assert_eq!(safe_zone_size(162), 108);
        assert_eq!(safe_zone_size(100), 67);
    }

    #[test]
    fn test_padding_pixels() {
        assert_eq!(padding_pixels(512, 10.0), 51);
        assert_eq!(padding_pixels(192, 10.0), 19);
        assert_eq!(padding_pixels(100, f64::NAN), 0);
    }
}
