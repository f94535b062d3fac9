use dxt_rs::{Block, DecompressedBlock, Format, BLOCK_HEIGHT, BLOCK_WIDTH};

use crate::{div_round_up, TextureError};

const CHANNELS: usize = 4;

/// Decompress `width` x `height` pixels of DXT `data` to RGBA8.
///
/// Blocks are stored in row-major order.
/// The decoded rows keep the stored row order, so the first row is the bottom of the image.
/// Pixels from edge blocks outside of `width` x `height` are discarded.
pub fn rgba8_from_dxt(
    width: u32,
    height: u32,
    data: &[u8],
    format: Format,
) -> Result<Vec<u8>, TextureError> {
    let block_size = format.block_size_in_bytes();
    let expected_size = div_round_up(width as usize, BLOCK_WIDTH)
        * div_round_up(height as usize, BLOCK_HEIGHT)
        * block_size;

    if data.len() < expected_size {
        return Err(TextureError::TruncatedData {
            expected: expected_size,
            actual: data.len(),
        });
    }

    let mut rgba = vec![0u8; width as usize * height as usize * CHANNELS];

    let mut block_start = 0;
    for y in (0..height as usize).step_by(BLOCK_HEIGHT) {
        for x in (0..width as usize).step_by(BLOCK_WIDTH) {
            let block_data = &data[block_start..];
            let block = Block::read(block_data, format).ok_or(TextureError::TruncatedData {
                expected: block_start + block_size,
                actual: data.len(),
            })?;

            put_rgba_block(
                &mut rgba,
                block.decompress(),
                x,
                y,
                width as usize,
                height as usize,
            );

            block_start += block_size;
        }
    }

    Ok(rgba)
}

/// Write the block at pixel `x`, `y` of a tightly packed `width` x `height` RGBA surface.
///
/// `width` and `height` are the logical size of the mipmap and not the block aligned canvas,
/// so pixels of edge blocks past the logical size are dropped.
fn put_rgba_block(
    surface: &mut [u8],
    pixels: DecompressedBlock,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) {
    let elements_per_row = CHANNELS * BLOCK_WIDTH.min(width - x);

    for (row, row_pixels) in pixels.iter().enumerate().take(BLOCK_HEIGHT.min(height - y)) {
        let surface_index = ((y + row) * width + x) * CHANNELS;
        let row_bytes: &[u8] = bytemuck::cast_slice(row_pixels);
        surface[surface_index..surface_index + elements_per_row]
            .copy_from_slice(&row_bytes[..elements_per_row]);
    }
}
