//! Collage composer
//!
//! Resizes the source photo to one passport-size cell, tiles it over a white
//! canvas and encodes the result as a 300 DPI JPEG.

use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, ImageReader, Rgb, RgbImage};

use crate::config::print;
use crate::copies::CopyCount;
use crate::error::{AppError, AppResult};
use crate::layout::CollageLayout;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Opens and decodes the stored photo.
///
/// The format is sniffed from the file content: uploads are stored under a
/// `.jpg` name even when the user sent a PNG document.
pub fn open_source(path: &Path) -> AppResult<DynamicImage> {
    decode_sniffed(path).map_err(|source| AppError::SourceImageUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

fn decode_sniffed(path: &Path) -> Result<DynamicImage, ImageError> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

/// Tiles `source` according to `layout`.
///
/// The photo is stretched to exactly one cell (no crop, no aspect
/// preservation) once, and that single resized copy is pasted into every cell.
pub fn compose(source: &DynamicImage, layout: &CollageLayout) -> AppResult<RgbImage> {
    if source.width() == 0 || source.height() == 0 {
        return Err(AppError::CompositionFailed("source image has no pixels".to_string()));
    }

    let cell = imageops::resize(
        &source.to_rgb8(),
        layout.cell_width,
        layout.cell_height,
        FilterType::CatmullRom,
    );

    let mut canvas = RgbImage::from_pixel(layout.canvas_width, layout.canvas_height, BACKGROUND);
    for (x, y) in layout.cell_origins() {
        imageops::replace(&mut canvas, &cell, i64::from(x), i64::from(y));
    }

    Ok(canvas)
}

/// Encodes the canvas as JPEG tagged with the print DPI
pub fn write_jpeg<W: Write>(canvas: &RgbImage, writer: W) -> AppResult<()> {
    let mut writer = BufWriter::new(writer);
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut writer, print::JPEG_QUALITY);
        encoder.set_pixel_density(PixelDensity::dpi(print::DPI));
        encoder.encode_image(canvas)?;
    }
    writer.flush()?;
    Ok(())
}

/// Opens `source`, composes `copies` tiles and writes the JPEG into `output`.
///
/// Blocking: call from `spawn_blocking` inside async code.
pub fn compose_into<W: Write>(source: &Path, copies: CopyCount, output: W) -> AppResult<CollageLayout> {
    let layout = CollageLayout::new(copies);
    let image = open_source(source)?;
    let canvas = compose(&image, &layout)?;
    write_jpeg(&canvas, output)?;

    log::debug!(
        "Composed {} copies from {}: {}x{} canvas",
        copies,
        source.display(),
        layout.canvas_width,
        layout.canvas_height
    );
    Ok(layout)
}

/// Convenience wrapper writing the collage to a path
pub fn compose_file(source: &Path, copies: CopyCount, output: &Path) -> AppResult<CollageLayout> {
    let file = fs_err::File::create(output)?;
    compose_into(source, copies, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    fn two_tone_source() -> DynamicImage {
        // left half red, right half blue
        let img = RgbaImage::from_fn(40, 60, |x, _| {
            if x < 20 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_compose_canvas_size() {
        let layout = CollageLayout::new(CopyCount::Two);
        let canvas = compose(&two_tone_source(), &layout).unwrap();
        assert_eq!(canvas.dimensions(), (1050, 2700));
    }

    #[test]
    fn test_every_cell_holds_the_resized_photo() {
        let layout = CollageLayout::new(CopyCount::Four);
        let canvas = compose(&two_tone_source(), &layout).unwrap();

        for (x, y) in layout.cell_origins() {
            let left = canvas.get_pixel(x + 100, y + 100);
            let right = canvas.get_pixel(x + layout.cell_width - 100, y + layout.cell_height - 100);
            assert!(left[0] > 200 && left[2] < 50, "left of cell at ({}, {}) is {:?}", x, y, left);
            assert!(right[2] > 200 && right[0] < 50, "right of cell at ({}, {}) is {:?}", x, y, right);
        }
    }

    #[test]
    fn test_transparency_is_dropped() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([10, 20, 30, 0])));
        let layout = CollageLayout::new(CopyCount::Two);
        let canvas = compose(&source, &layout).unwrap();
        // three channels, no alpha
        assert_eq!(canvas.get_pixel(5, 5).0.len(), 3);
    }

    #[test]
    fn test_open_source_missing_file() {
        let err = open_source(Path::new("/definitely/not/here.jpg")).unwrap_err();
        assert!(matches!(err, AppError::SourceImageUnavailable { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_open_source_ignores_misleading_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.jpg");
        two_tone_source().save_with_format(&path, image::ImageFormat::Png).unwrap();

        let image = open_source(&path).unwrap();
        assert_eq!(image.dimensions(), (40, 60));
    }

    #[test]
    fn test_open_source_rejects_non_image_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.jpg");
        std::fs::write(&path, b"plain text, not pixels").unwrap();

        let err = open_source(&path).unwrap_err();
        assert!(matches!(err, AppError::SourceImageUnavailable { .. }));
    }

    #[test]
    fn test_write_jpeg_tags_300_dpi() {
        let canvas = RgbImage::from_pixel(16, 16, BACKGROUND);
        let mut bytes = Vec::new();
        write_jpeg(&canvas, &mut bytes).unwrap();

        // SOI, APP0 "JFIF\0", version, units, x density, y density
        assert_eq!(&bytes[0..4], &[0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(&bytes[6..11], b"JFIF\0");
        assert_eq!(bytes[13], 1, "density unit should be dots per inch");
        assert_eq!(u16::from_be_bytes([bytes[14], bytes[15]]), 300);
        assert_eq!(u16::from_be_bytes([bytes[16], bytes[17]]), 300);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (16, 16));
    }
}
