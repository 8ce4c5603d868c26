//! The per-image darkening transform and its file I/O.

use std::io::Cursor;
use std::path::Path;

use facetprep_common::paths::is_jpeg;
use facetprep_common::{Error, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, ImageReader, RgbImage};

use super::DarknessLevel;

/// Encoder settings for darkened output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality (1-100) for `.jpg`/`.jpeg` destinations.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { jpeg_quality: 95 }
    }
}

/// Scale a single 8-bit sample by `factor`.
///
/// The multiply happens in `f32`, the product is clamped to `[0, 255]` and then
/// truncated toward zero: `255 * 0.9` yields `229`, not `230`.
#[inline]
pub fn scale_sample(value: u8, factor: f32) -> u8 {
    let scaled = f32::from(value) * factor;
    // `as` truncates; NaN maps to 0.
    scaled.clamp(0.0, 255.0) as u8
}

/// Return a copy of `image` with every channel sample scaled by `factor`.
pub fn darken(image: &RgbImage, factor: f32) -> RgbImage {
    let table: [u8; 256] = std::array::from_fn(|v| scale_sample(v as u8, factor));

    let mut out = image.clone();
    for sample in out.iter_mut() {
        *sample = table[usize::from(*sample)];
    }
    out
}

/// Decode `path` as 8-bit RGB. Alpha is dropped and grayscale expanded.
///
/// Failing to open the source counts as a decode failure: either way the
/// image could not be read.
pub fn decode_image(path: &Path) -> Result<RgbImage> {
    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| unreadable(path, e))?
        .decode()
        .map_err(|e| unreadable(path, e))?;
    Ok(image.to_rgb8())
}

fn unreadable(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::decode(format!("{}: {}", path.display(), e))
}

/// Encode `image` to `path`, picking the encoder from the extension.
///
/// `.jpg`/`.jpeg` are written as JPEG at `options.jpeg_quality`; everything
/// else as PNG. Encoding happens in memory, so a failed encode leaves any
/// existing file at `path` untouched.
pub fn save_image(image: &RgbImage, path: &Path, options: &EncodeOptions) -> Result<()> {
    let mut buf = Cursor::new(Vec::new());

    let encoded = if is_jpeg(path) {
        let encoder = JpegEncoder::new_with_quality(&mut buf, options.jpeg_quality);
        image.write_with_encoder(encoder)
    } else {
        image.write_to(&mut buf, ImageFormat::Png)
    };
    encoded.map_err(|e| Error::encode(format!("{}: {}", path.display(), e)))?;

    std::fs::write(path, buf.into_inner())?;
    Ok(())
}

/// Darken one file: decode `src`, scale it by `level` and write it to `dst`.
pub fn darken_file(
    src: &Path,
    dst: &Path,
    level: DarknessLevel,
    options: &EncodeOptions,
) -> Result<()> {
    let image = decode_image(src)?;
    let darkened = darken(&image, level.factor());
    save_image(&darkened, dst, options)
}
