use std::ops::Range;

use crate::{bits::int_log2, div_round_up, Attributes, Header, PixelFormat, TextureError};

/// Round `dimension` up to a multiple of `quantization` with a minimum of one unit.
pub fn canvas_dimension(dimension: u32, quantization: u32) -> u32 {
    div_round_up(dimension.max(1) as usize, quantization as usize) as u32 * quantization
}

/// The size in bytes of a `width` x `height` image after rounding up to the canvas size.
pub fn canvas_size(width: u32, height: u32, format: PixelFormat) -> usize {
    let q = format.quantization;
    let blocks_x = (canvas_dimension(width, q) / q) as usize;
    let blocks_y = (canvas_dimension(height, q) / q) as usize;
    blocks_x * blocks_y * format.block_size_in_bytes
}

/// Dimensions for each mip level from repeatedly halving `width` and `height`.
///
/// The chain ends before the level where both dimensions reach zero.
pub fn mip_chain(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    std::iter::successors(Some((width, height)), |(w, h)| Some((w >> 1, h >> 1)))
        .take_while(|(w, h)| !(*w == 0 && *h == 0))
}

/// How the pixel data size was determined before reading any attributes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DataGuess {
    /// A single large frame using the declared data size as is.
    ProceduralFrames,
    /// Six faces with a full mip chain using a sixth of the height.
    CubeMap,
    /// A full mip chain for a single image.
    Mipmaps,
}

/// The amount of pixel data following the header.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DataPlan {
    pub total_size: usize,
    pub base_size: usize,
    pub guess: DataGuess,
}

/// Find the size of the pixel data from the header alone.
///
/// The declared data size is only trusted for textures with a single declared mip level
/// and more data than the base image needs, which covers cycle procedural textures.
/// Any height divisible by 6 is assumed to be a cube map.
/// Both checks can guess wrong for textures that are neither.
pub fn plan_data(header: &Header, format: PixelFormat) -> DataPlan {
    let width = header.width as u32;
    let height = header.height as u32;
    let base_size = canvas_size(width, height, format);

    if header.data_size as usize > base_size && header.mipmaps == 1 {
        tracing::debug!(
            "Using declared data size {} for {width}x{height} texture with base size {base_size}",
            header.data_size
        );
        return DataPlan {
            total_size: header.data_size as usize,
            base_size,
            guess: DataGuess::ProceduralFrames,
        };
    }

    let is_cube_map = height % 6 == 0;
    let face_height = if is_cube_map { height / 6 } else { height };

    let face_size: usize = mip_chain(width, face_height)
        .map(|(w, h)| canvas_size(w, h, format))
        .sum();

    if is_cube_map {
        tracing::debug!("Assuming {width}x{height} texture is a cube map");
        DataPlan {
            total_size: face_size * 6,
            base_size,
            guess: DataGuess::CubeMap,
        }
    } else {
        DataPlan {
            total_size: face_size,
            base_size,
            guess: DataGuess::Mipmaps,
        }
    }
}

/// The dimensions and size of a single mip level.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    /// The width rounded up to the format's quantization.
    pub canvas_width: u32,
    /// The height rounded up to the format's quantization.
    pub canvas_height: u32,
    /// The size in bytes of the stored data.
    pub size: usize,
}

impl MipLevel {
    fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            canvas_width: canvas_dimension(width, format.quantization),
            canvas_height: canvas_dimension(height, format.quantization),
            size: canvas_size(width, height, format),
        }
    }
}

/// The images and mipmaps stored in the pixel data.
///
/// Images are stored one after the other with mipmaps ordered from largest to smallest.
/// Every image uses the same mip levels.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TextureLayout {
    pub images: usize,
    pub mipmaps: Vec<MipLevel>,
    pub is_cube_map: bool,
    /// The combined size in bytes of all images and mipmaps.
    pub total_size: usize,
}

impl TextureLayout {
    pub fn image_count(&self) -> usize {
        self.images
    }

    pub fn mipmap_count(&self) -> usize {
        self.mipmaps.len()
    }

    pub fn total_subimage_count(&self) -> usize {
        self.images * self.mipmaps.len()
    }

    /// The size in bytes of all mipmaps for a single image.
    pub fn image_size(&self) -> usize {
        self.mipmaps.iter().map(|m| m.size).sum()
    }

    /// The byte range in the pixel data for `image` and `mipmap`.
    pub fn range(&self, image: usize, mipmap: usize) -> Option<Range<usize>> {
        if image >= self.images {
            return None;
        }
        let level = self.mipmaps.get(mipmap)?;

        let mip_offset: usize = self.mipmaps[..mipmap].iter().map(|m| m.size).sum();
        let start = image * self.image_size() + mip_offset;
        Some(start..start + level.size)
    }
}

/// Find the final layout using the header and the `cube`, `proceduretype`, `numx`
/// and `numy` attributes.
pub fn plan_layout(
    header: &Header,
    format: PixelFormat,
    attributes: &Attributes,
) -> Result<TextureLayout, TextureError> {
    let mut width = header.width as u32;
    let mut height = header.height as u32;
    let mut mipmap_count = header.mipmaps as u32;
    let mut images = 1;
    let mut is_cube_map = false;

    if attributes.get("cube") == Some("1") {
        tracing::debug!("Splitting {width}x{height} texture into 6 cube map faces");
        is_cube_map = true;
        height /= 6;
        images = 6;
    }

    if attributes.get("proceduretype") == Some("cycle") {
        let numx = attributes.get_u16("numx")?;
        let numy = attributes.get_u16("numy")?;
        for (key, value) in [("numx", numx), ("numy", numy)] {
            if value == 0 {
                return Err(TextureError::Format {
                    key: key.to_string(),
                    value: attributes.get(key).unwrap_or_default().to_string(),
                });
            }
        }

        width /= numx as u32;
        height /= numy as u32;
        images = numx as usize * numy as usize;
        mipmap_count = int_log2(width).min(int_log2(height)) + 1;
        tracing::debug!("Splitting cycle procedure into {images} frames of {width}x{height}");
    }

    // Unlike the canvas, the first mip level can have a size of zero.
    let q = format.quantization;
    let mut mip_width = div_round_up(width as usize, q as usize) as u32 * q;
    let mut mip_height = div_round_up(height as usize, q as usize) as u32 * q;

    let mut mipmaps = Vec::with_capacity(mipmap_count as usize);
    for i in 0..mipmap_count {
        let level = MipLevel::new(mip_width, mip_height, format);
        tracing::trace!(
            "Mipmap {i}: {}x{} canvas {}x{} {} bytes",
            level.width,
            level.height,
            level.canvas_width,
            level.canvas_height,
            level.size
        );
        mipmaps.push(level);

        mip_width >>= 1;
        mip_height >>= 1;
    }

    let image_size: usize = mipmaps.iter().map(|m| m.size).sum();
    Ok(TextureLayout {
        images,
        mipmaps,
        is_cube_map,
        total_size: image_size * images,
    })
}
