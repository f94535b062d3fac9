use crate::{
    bits::{int_log2, interleave_bits},
    TextureError,
};

const BYTES_PER_PIXEL: usize = 4;

/// Returns `true` if pixel data with this logical `width` is stored swizzled.
///
/// Only power of two widths are swizzled, and a width of zero counts as a power of two.
pub fn is_swizzled_width(width: u32) -> bool {
    width & width.wrapping_sub(1) == 0
}

/// The pixel index in swizzled data for the pixel at `x` and `y`.
pub fn swizzled_pixel_index(x: u32, y: u32, width: u32, height: u32) -> u32 {
    interleave_bits(x, y, int_log2(width), int_log2(height))
}

/// Convert swizzled 4 byte per pixel data to row-major order.
pub fn deswizzle_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, TextureError> {
    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if data.len() < expected {
        return Err(TextureError::TruncatedData {
            expected,
            actual: data.len(),
        });
    }

    let mut linear = Vec::with_capacity(expected);
    for y in 0..height {
        for x in 0..width {
            let offset = swizzled_pixel_index(x, y, width, height) as usize * BYTES_PER_PIXEL;
            let end = offset + BYTES_PER_PIXEL;
            // Non power of two heights can map past the end of the data.
            if end > data.len() {
                return Err(TextureError::TruncatedData {
                    expected: end,
                    actual: data.len(),
                });
            }
            linear.extend_from_slice(&data[offset..end]);
        }
    }

    Ok(linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swizzle_rgba8(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
        let mut swizzled = vec![0u8; data.len()];
        for y in 0..height {
            for x in 0..width {
                let linear = (y * width + x) as usize * BYTES_PER_PIXEL;
                let offset = swizzled_pixel_index(x, y, width, height) as usize * BYTES_PER_PIXEL;
                swizzled[offset..offset + BYTES_PER_PIXEL]
                    .copy_from_slice(&data[linear..linear + BYTES_PER_PIXEL]);
            }
        }
        swizzled
    }

    fn pixel_indices(data: &[u8]) -> Vec<u8> {
        data.chunks_exact(4).map(|p| p[0]).collect()
    }

    #[test]
    fn swizzled_widths() {
        assert!(is_swizzled_width(0));
        assert!(is_swizzled_width(1));
        assert!(is_swizzled_width(64));
        assert!(!is_swizzled_width(3));
        assert!(!is_swizzled_width(48));
    }

    #[test]
    fn deswizzle_4x4() {
        // Each pixel stores its swizzled index.
        let data: Vec<u8> = (0..16u8).flat_map(|i| [i, i, i, 255]).collect();
        let linear = deswizzle_rgba8(4, 4, &data).unwrap();
        assert_eq!(
            vec![0, 1, 4, 5, 2, 3, 6, 7, 8, 9, 12, 13, 10, 11, 14, 15],
            pixel_indices(&linear)
        );
    }

    #[test]
    fn deswizzle_4x2() {
        // x0 y0 x1
        let data: Vec<u8> = (0..8u8).flat_map(|i| [i, 0, 0, 0]).collect();
        let linear = deswizzle_rgba8(4, 2, &data).unwrap();
        assert_eq!(vec![0, 1, 4, 5, 2, 3, 6, 7], pixel_indices(&linear));
    }

    #[test]
    fn deswizzle_1x1() {
        let linear = deswizzle_rgba8(1, 1, &[1, 2, 3, 4]).unwrap();
        assert_eq!(vec![1, 2, 3, 4], linear);
    }

    #[test]
    fn deswizzle_then_swizzle_4x4() {
        let data: Vec<u8> = (0..64u8).collect();
        let linear = deswizzle_rgba8(4, 4, &data).unwrap();
        assert_ne!(data, linear);
        assert_eq!(data, swizzle_rgba8(4, 4, &linear));
    }

    #[test]
    fn swizzle_then_deswizzle_16x8() {
        let data: Vec<u8> = (0..16 * 8 * 4).map(|i| (i % 251) as u8).collect();
        let swizzled = swizzle_rgba8(16, 8, &data);
        assert_eq!(data, deswizzle_rgba8(16, 8, &swizzled).unwrap());
    }

    #[test]
    fn deswizzle_not_enough_data() {
        let result = deswizzle_rgba8(4, 4, &[0u8; 60]);
        assert!(matches!(
            result,
            Err(TextureError::TruncatedData {
                expected: 64,
                actual: 60
            })
        ));
    }

    #[test]
    fn deswizzle_non_power_of_two_height() {
        // The height only contributes 1 bit, so the last row wraps around.
        let data: Vec<u8> = (0..12u8).flat_map(|i| [i, 0, 0, 0]).collect();
        let linear = deswizzle_rgba8(4, 3, &data).unwrap();
        assert_eq!(
            vec![0, 1, 4, 5, 2, 3, 6, 7, 0, 1, 4, 5],
            pixel_indices(&linear)
        );
    }
}
