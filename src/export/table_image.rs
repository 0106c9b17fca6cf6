use std::path::Path;

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::models::{ClientRecord, HEADERS};

/// Side of one glyph in the embedded bitmap font.
const GLYPH_SIZE: u32 = 8;
/// Each font pixel becomes a `SCALE` x `SCALE` block.
const SCALE: u32 = 2;
const CHAR_SIZE: u32 = GLYPH_SIZE * SCALE;
const CELL_PAD_X: u32 = 12;
const CELL_PAD_Y: u32 = 8;
/// Blank border around the table.
const MARGIN: u32 = 10;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const HEADER_FILL: Rgb<u8> = Rgb([230, 230, 230]);
const GRID: Rgb<u8> = Rgb([90, 90, 90]);
const TEXT: Rgb<u8> = Rgb([0, 0, 0]);

/// Render `records` as a table and save it to `path`.
///
/// The format follows the file extension when it is one of the enabled
/// encoders (PNG, JPEG, BMP); any other path is written as PNG.
pub fn export_image(records: &[ClientRecord], path: &Path) -> Result<()> {
    if records.is_empty() {
        warn!("image export requested for an empty table");
        return Err(ClientError::EmptyData);
    }

    let format = output_format(path);
    let table = DynamicImage::ImageRgb8(render_table(records));

    if let Err(err) = table.save_with_format(path, format) {
        warn!(path = %path.display(), error = %err, "image export failed");
        return Err(err.into());
    }

    info!(
        path = %path.display(),
        rows = records.len(),
        width = table.width(),
        height = table.height(),
        "table image written"
    );
    Ok(())
}

/// Encoder for `path`. Extensions the `image` crate knows but this build has
/// no encoder for (gif, tiff, webp, ...) fall back to PNG so nothing is
/// created before an `Unsupported` error.
fn output_format(path: &Path) -> ImageFormat {
    match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp)) => format,
        _ => ImageFormat::Png,
    }
}

/// Draw the header plus one row per record with centered cell text and grid
/// lines. The image is sized to the table plus a fixed margin.
pub fn render_table(records: &[ClientRecord]) -> RgbImage {
    let mut rows: Vec<[String; 4]> = Vec::with_capacity(records.len() + 1);
    rows.push(HEADERS.map(String::from));
    rows.extend(records.iter().map(|record| record.to_row().0));

    let widths: [u32; 4] = std::array::from_fn(|col| {
        let longest = rows
            .iter()
            .map(|row| row[col].chars().count() as u32)
            .max()
            .unwrap_or(0);
        longest * CHAR_SIZE + 2 * CELL_PAD_X
    });
    let row_height = CHAR_SIZE + 2 * CELL_PAD_Y;
    // +1 so the closing grid lines fit.
    let table_width = widths.iter().sum::<u32>() + 1;
    let table_height = row_height * rows.len() as u32 + 1;

    let mut img = RgbImage::from_pixel(
        table_width + 2 * MARGIN,
        table_height + 2 * MARGIN,
        BACKGROUND,
    );

    fill_rect(&mut img, MARGIN, MARGIN, table_width, row_height, HEADER_FILL);

    for (row_idx, row) in rows.iter().enumerate() {
        let top = MARGIN + row_idx as u32 * row_height;
        let mut left = MARGIN;
        for (col, cell) in row.iter().enumerate() {
            let text_width = cell.chars().count() as u32 * CHAR_SIZE;
            let x = left + (widths[col] - text_width) / 2;
            let y = top + CELL_PAD_Y;
            draw_text(&mut img, x, y, cell);
            if row_idx == 0 {
                // Overdraw one pixel to the right for a bold header.
                draw_text(&mut img, x + 1, y, cell);
            }
            left += widths[col];
        }
    }

    for row_idx in 0..=rows.len() as u32 {
        fill_rect(&mut img, MARGIN, MARGIN + row_idx * row_height, table_width, 1, GRID);
    }
    let mut x = MARGIN;
    fill_rect(&mut img, x, MARGIN, 1, table_height, GRID);
    for width in widths {
        x += width;
        fill_rect(&mut img, x, MARGIN, 1, table_height, GRID);
    }

    img
}

fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str) {
    for (idx, ch) in text.chars().enumerate() {
        let origin_x = x + idx as u32 * CHAR_SIZE;
        for (gy, bits) in glyph(ch).iter().enumerate() {
            for gx in 0..GLYPH_SIZE {
                // Bit 0 is the leftmost pixel.
                if bits & (1 << gx) != 0 {
                    fill_rect(
                        img,
                        origin_x + gx * SCALE,
                        y + gy as u32 * SCALE,
                        SCALE,
                        SCALE,
                        TEXT,
                    );
                }
            }
        }
    }
}

/// Fill a rectangle, clipping anything outside the image.
fn fill_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = (x + width).min(img.width());
    let y_end = (y + height).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}
