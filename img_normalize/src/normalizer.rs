//! Single-image normalization: decode, flatten, downsize, re-encode as JPEG.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use serde::Serialize;
use shared_utils::common_utils::{file_size, percent_reduction, write_atomic_like};
use shared_utils::{is_same_file, safe_delete_original, Result, SiteConfig, SiteError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub new_size: u64,
    /// Percent saved; negative when the re-encode came out larger
    pub reduction: f64,
    pub original_dimensions: (u32, u32),
    pub new_dimensions: (u32, u32),
}

/// Output size for an image: unchanged up to `max_width`, otherwise scaled so
/// the width equals `max_width` and the height is truncated proportionally.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }
    let new_height = (height as u64 * max_width as u64 / width as u64) as u32;
    (max_width, new_height.max(1))
}

/// Where the JPEG for `input` is written. JPEG sources keep their name,
/// anything else gets a `.jpg` extension.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let is_jpeg = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| JPEG_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false);

    if is_jpeg {
        input.to_path_buf()
    } else {
        input.with_extension("jpg")
    }
}

/// Drop the alpha channel by compositing onto opaque white. Images without
/// alpha are converted straight to 8-bit RGB.
///
/// Paletted PNGs arrive here already expanded by the decoder (RGBA when the
/// palette carries transparency), so they take the same path.
pub fn flatten_to_rgb(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        let over_white = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([over_white(r), over_white(g), over_white(b)]));
    }
    out
}

pub fn encode_jpeg(rgb: &RgbImage, quality: u8, path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder.encode_image(rgb).map_err(|source| SiteError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes)
}

fn decode(input: &Path) -> Result<DynamicImage> {
    ImageReader::open(input)
        .map_err(|e| SiteError::io(input, e))?
        .with_guessed_format()
        .map_err(|e| SiteError::io(input, e))?
        .decode()
        .map_err(|source| SiteError::Decode {
            path: input.to_path_buf(),
            source,
        })
}

/// Normalize one image in place.
///
/// The JPEG is written next to the source through a temp file and renamed
/// into place. When the name changes (`a.png` -> `a.jpg`) the source is
/// removed only after the new file checks out. Nothing is written if decoding
/// or encoding fails, or if a different file already sits at the output path.
pub fn normalize_image(input: &Path, config: &SiteConfig) -> Result<NormalizeOutcome> {
    let original_size = file_size(input)?;
    let output = derive_output_path(input);
    let in_place = output == input || is_same_file(input, &output);

    if !in_place && output.exists() {
        return Err(SiteError::OutputExists(output));
    }

    let img = decode(input)?;
    let original_dimensions = (img.width(), img.height());
    debug!(
        path = %input.display(),
        color = ?img.color(),
        width = original_dimensions.0,
        height = original_dimensions.1,
        "Decoded image"
    );

    let rgb = flatten_to_rgb(&img);
    drop(img);

    let (new_width, new_height) =
        target_dimensions(original_dimensions.0, original_dimensions.1, config.max_width);
    let rgb = if (new_width, new_height) != original_dimensions {
        imageops::resize(&rgb, new_width, new_height, FilterType::Lanczos3)
    } else {
        rgb
    };

    let bytes = encode_jpeg(&rgb, config.jpeg_quality, &output)?;
    if bytes.is_empty() {
        return Err(SiteError::OutputInvalid {
            path: output,
            reason: "encoder produced no data".to_string(),
        });
    }
    write_atomic_like(&output, &bytes, input)?;

    if !in_place {
        safe_delete_original(input, &output, 1)?;
    }

    let new_size = file_size(&output)?;
    let outcome = NormalizeOutcome {
        input: input.to_path_buf(),
        output,
        original_size,
        new_size,
        reduction: percent_reduction(original_size, new_size),
        original_dimensions,
        new_dimensions: (new_width, new_height),
    };

    info!(
        input = %outcome.input.display(),
        output = %outcome.output.display(),
        original_size,
        new_size,
        width = new_width,
        height = new_height,
        "Normalized image"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    #[test]
    fn test_target_dimensions() {
        assert_eq!(target_dimensions(800, 600, 1200), (800, 600));
        assert_eq!(target_dimensions(1200, 900, 1200), (1200, 900));
        assert_eq!(target_dimensions(2400, 1600, 1200), (1200, 800));
        // 1000 * 1200 / 3000 = 400, 1001 * 1200 / 3000 = 400.4 -> 400
        assert_eq!(target_dimensions(3000, 1001, 1200), (1200, 400));
        assert_eq!(target_dimensions(5000, 1, 1200), (1200, 1));
    }

    proptest! {
        #[test]
        fn prop_width_bounded_and_aspect_kept(
            width in 1u32..10_000,
            height in 1u32..10_000,
            max_width in 1u32..4_000,
        ) {
            let (w, h) = target_dimensions(width, height, max_width);
            prop_assert!(w <= max_width);
            if width > max_width {
                prop_assert_eq!(w, max_width);
                let exact = height as f64 * max_width as f64 / width as f64;
                prop_assert!((h as f64 - exact).abs() <= 1.0);
            } else {
                prop_assert_eq!((w, h), (width, height));
            }
        }
    }

    #[test]
    fn test_derive_output_path() {
        assert_eq!(derive_output_path(Path::new("a/b.jpg")), PathBuf::from("a/b.jpg"));
        assert_eq!(derive_output_path(Path::new("a/b.JPEG")), PathBuf::from("a/b.JPEG"));
        assert_eq!(derive_output_path(Path::new("a/b.png")), PathBuf::from("a/b.jpg"));
        assert_eq!(derive_output_path(Path::new("a/b.PNG")), PathBuf::from("a/b.jpg"));
        // only the extension changes, not a `.png` elsewhere in the path
        assert_eq!(
            derive_output_path(Path::new("x.png.d/b.png")),
            PathBuf::from("x.png.d/b.jpg")
        );
    }

    #[test]
    fn test_flatten_transparent_becomes_white() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let rgb = flatten_to_rgb(&DynamicImage::ImageRgba8(rgba));

        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_flatten_half_alpha_blends() {
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 128]));

        let rgb = flatten_to_rgb(&DynamicImage::ImageRgba8(rgba));
        let v = rgb.get_pixel(0, 0).0[0];
        assert!((126..=128).contains(&v), "got {}", v);
    }

    #[test]
    fn test_flatten_grayscale_converts() {
        let gray = image::GrayImage::from_pixel(3, 3, image::Luma([77]));
        let rgb = flatten_to_rgb(&DynamicImage::ImageLuma8(gray));
        assert_eq!(rgb.get_pixel(1, 1), &Rgb([77, 77, 77]));
    }

    /// Indexed PNG where palette entry 0 is fully transparent red and
    /// entry 1 is opaque blue.
    fn write_indexed_png(path: &Path, width: u32, height: u32, indices: &[u8]) {
        let file = fs::File::create(path).unwrap();
        let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(vec![255u8, 0, 0, 0, 0, 255]);
        encoder.set_trns(vec![0u8, 255]);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(indices).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_flatten_paletted_transparency_becomes_white() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logo.png");
        write_indexed_png(&path, 2, 1, &[0, 1]);

        let rgb = flatten_to_rgb(&image::open(&path).unwrap());

        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([0, 0, 255]));
    }

    #[test]
    fn test_normalize_paletted_png() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logo.png");
        write_indexed_png(&path, 16, 16, &[0u8; 256]);

        let outcome = normalize_image(&path, &SiteConfig::default()).unwrap();

        assert_eq!(outcome.output, temp.path().join("logo.jpg"));
        let img = image::open(&outcome.output).unwrap().to_rgb8();
        // transparent red must come out white, not red
        for pixel in img.pixels() {
            assert!(pixel.0.iter().all(|c| *c >= 250), "got {:?}", pixel);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let jpg = temp.path().join("a.jpg");
        let source_png = temp.path().join("b.png");
        gradient(1600, 900).save(&jpg).unwrap();
        gradient(40, 30).save(&source_png).unwrap();
        for path in [&jpg, &source_png] {
            fs::set_permissions(path, fs::Permissions::from_mode(0o644)).unwrap();
        }

        normalize_image(&jpg, &SiteConfig::default()).unwrap();
        let renamed = normalize_image(&source_png, &SiteConfig::default()).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&jpg), 0o644);
        assert_eq!(mode(&renamed.output), 0o644);
    }

    #[test]
    fn test_normalize_large_jpeg_in_place() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wide.jpg");
        gradient(2400, 1000).save(&path).unwrap();

        let config = SiteConfig::default();
        let outcome = normalize_image(&path, &config).unwrap();

        assert_eq!(outcome.output, path);
        assert_eq!(outcome.original_dimensions, (2400, 1000));
        assert_eq!(outcome.new_dimensions, (1200, 500));
        let img = image::open(&path).unwrap();
        assert_eq!(img.dimensions(), (1200, 500));
        assert_eq!(outcome.new_size, fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn test_normalize_small_image_keeps_resolution() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("small.jpg");
        gradient(300, 200).save(&path).unwrap();

        let outcome = normalize_image(&path, &SiteConfig::default()).unwrap();

        assert_eq!(outcome.new_dimensions, (300, 200));
        assert_eq!(image::open(&path).unwrap().dimensions(), (300, 200));
    }

    #[test]
    fn test_normalize_png_renames_to_jpg() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("alpha.png");
        RgbaImage::from_pixel(1600, 800, Rgba([200, 10, 10, 100]))
            .save(&path)
            .unwrap();

        let outcome = normalize_image(&path, &SiteConfig::default()).unwrap();

        let expected = temp.path().join("alpha.jpg");
        assert_eq!(outcome.output, expected);
        assert!(!path.exists(), "source png should be gone");
        let img = image::open(&expected).unwrap();
        assert_eq!(img.dimensions(), (1200, 600));
        assert!(!img.color().has_alpha());
    }

    #[test]
    fn test_normalize_refuses_to_clobber_other_file() {
        let temp = TempDir::new().unwrap();
        let png = temp.path().join("a.png");
        let jpg = temp.path().join("a.jpg");
        gradient(50, 50).save(&png).unwrap();
        fs::write(&jpg, b"someone else's file").unwrap();

        let err = normalize_image(&png, &SiteConfig::default()).unwrap_err();

        assert!(matches!(err, SiteError::OutputExists(_)));
        assert!(png.exists());
        assert_eq!(fs::read(&jpg).unwrap(), b"someone else's file");
    }

    #[test]
    fn test_normalize_corrupt_file_leaves_it_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.jpg");
        fs::write(&path, b"definitely not an image").unwrap();

        let err = normalize_image(&path, &SiteConfig::default()).unwrap_err();

        assert!(matches!(err, SiteError::Decode { .. }));
        assert_eq!(fs::read(&path).unwrap(), b"definitely not an image");
    }

    #[test]
    fn test_normalize_respects_configured_width() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("c.jpg");
        gradient(640, 480).save(&path).unwrap();

        let config = SiteConfig::default().with_max_width(320);
        let outcome = normalize_image(&path, &config).unwrap();

        assert_eq!(outcome.new_dimensions, (320, 240));
    }
}
