use crate::TextureError;

fn expected_length(
    width: u32,
    height: u32,
    channels: usize,
    data: &[u8],
) -> Result<usize, TextureError> {
    let length = width as usize * height as usize * channels;
    if data.len() < length {
        Err(TextureError::InvalidSurfaceDimensions {
            width,
            height,
            data_length: data.len(),
        })
    } else {
        Ok(length)
    }
}

/// Replicate each gray byte to the red, green and blue channels.
pub fn rgb8_from_gray8(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, TextureError> {
    let length = expected_length(width, height, 1, data)?;
    Ok(data[..length].iter().flat_map(|g| [*g; 3]).collect())
}

/// Reverse the row order of `channels` byte per pixel data
/// and optionally swap the first and third channel of each pixel.
pub fn flip_vertical(
    width: u32,
    height: u32,
    channels: usize,
    data: &[u8],
    swap_red_blue: bool,
) -> Result<Vec<u8>, TextureError> {
    let length = expected_length(width, height, channels, data)?;
    let row_size = width as usize * channels;

    let mut flipped = Vec::with_capacity(length);
    if row_size > 0 {
        for row in data[..length].chunks_exact(row_size).rev() {
            flipped.extend_from_slice(row);
        }
    }

    if swap_red_blue && channels >= 3 {
        swap_channels(&mut flipped, channels);
    }

    Ok(flipped)
}

/// Convert between RGBA and BGRA without changing the row order.
pub fn swap_red_blue_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, TextureError> {
    let length = expected_length(width, height, 4, data)?;
    let mut swapped = data[..length].to_vec();
    swap_channels(&mut swapped, 4);
    Ok(swapped)
}

/// Add an opaque alpha channel to RGB data.
pub fn rgba8_from_rgb8(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, TextureError> {
    let length = expected_length(width, height, 3, data)?;
    let pixels: &[[u8; 3]] = bytemuck::cast_slice(&data[..length]);

    let mut rgba = Vec::with_capacity(pixels.len() * 4);
    for [r, g, b] in pixels {
        rgba.extend_from_slice(&[*r, *g, *b, 255u8]);
    }
    Ok(rgba)
}

fn swap_channels(data: &mut [u8], channels: usize) {
    for pixel in data.chunks_exact_mut(channels) {
        pixel.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_from_gray8_2x1() {
        assert_eq!(
            vec![1, 1, 1, 2, 2, 2],
            rgb8_from_gray8(2, 1, &[1, 2]).unwrap()
        );
    }

    #[test]
    fn rgb8_from_gray8_invalid_length() {
        let result = rgb8_from_gray8(2, 2, &[0u8; 3]);
        assert!(matches!(
            result,
            Err(TextureError::InvalidSurfaceDimensions {
                width: 2,
                height: 2,
                data_length: 3
            })
        ));
    }

    #[test]
    fn flip_vertical_rgb() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        assert_eq!(
            vec![7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5, 6],
            flip_vertical(2, 2, 3, &data, false).unwrap()
        );
    }

    #[test]
    fn flip_vertical_swap_red_blue() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(
            vec![7, 6, 5, 8, 3, 2, 1, 4],
            flip_vertical(1, 2, 4, &data, true).unwrap()
        );
    }

    #[test]
    fn flip_vertical_single_row() {
        let data = [1, 2, 3, 4, 5, 6];
        let flipped = flip_vertical(2, 1, 3, &data, false).unwrap();
        assert_eq!(&data[..], flipped);
    }

    #[test]
    fn flip_vertical_empty() {
        assert!(flip_vertical(0, 4, 4, &[], true).unwrap().is_empty());
    }

    #[test]
    fn flip_vertical_ignores_extra_data() {
        let data = [1, 2, 3, 4, 5, 6, 0, 0];
        assert_eq!(
            vec![4, 5, 6, 1, 2, 3],
            flip_vertical(1, 2, 3, &data, false).unwrap()
        );
    }

    #[test]
    fn swap_red_blue_rgba8_1x2() {
        assert_eq!(
            vec![3, 2, 1, 4, 7, 6, 5, 8],
            swap_red_blue_rgba8(1, 2, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap()
        );
    }

    #[test]
    fn rgba8_from_rgb8_opaque() {
        assert_eq!(
            vec![1, 2, 3, 255, 4, 5, 6, 255],
            rgba8_from_rgb8(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap()
        );
    }

    #[test]
    fn rgba8_from_rgb8_invalid_length() {
        let result = rgba8_from_rgb8(4, 4, &[0u8; 47]);
        assert!(matches!(
            result,
            Err(TextureError::InvalidSurfaceDimensions {
                data_length: 47,
                ..
            })
        ));
    }
}
