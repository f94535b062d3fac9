use std::io::Read;

use crate::{
    dxt::rgba8_from_dxt,
    layout::{plan_data, plan_layout, MipLevel, TextureLayout},
    rgba::{flip_vertical, rgb8_from_gray8, rgba8_from_rgb8, swap_red_blue_rgba8},
    swizzle::{deswizzle_rgba8, is_swizzled_width},
    Attributes, Encoding, Header, PixelFormat, TextureError, HEADER_SIZE,
};

/// The channel order of pixels returned by [Texture::pixels].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "strum",
    derive(strum::Display, strum::EnumString, strum::EnumIter)
)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

/// A single mipmap of an image.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SubImage {
    pub width: u32,
    pub height: u32,
    /// The width of the pixels in `data`.
    pub canvas_width: u32,
    /// The height of the pixels in `data`.
    pub canvas_height: u32,
    /// Uncompressed pixel data with rows stored from bottom to top.
    pub data: Vec<u8>,
}

/// A cube map face, procedural animation frame or the only image of the texture.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Image {
    /// The mipmaps ordered from largest to smallest.
    pub mipmaps: Vec<SubImage>,
}

/// A decoded TPC texture.
///
/// Compressed data is decompressed to RGBA and swizzled BGRA data is converted to row-major order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Texture {
    pub header: Header,
    pub format: PixelFormat,
    pub attributes: Attributes,
    pub layout: TextureLayout,
    pub images: Vec<Image>,
}

impl Texture {
    /// Decode a complete TPC file including the attribute text after the pixel data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let header = Header::read(bytes)?;
        let format = header.pixel_format()?;

        let data_plan = plan_data(&header, format);
        let pixel_end = HEADER_SIZE + data_plan.total_size;
        if bytes.len() < pixel_end {
            return Err(TextureError::TruncatedData {
                expected: pixel_end,
                actual: bytes.len(),
            });
        }

        let text = String::from_utf8_lossy(&bytes[pixel_end..]);
        let attributes = Attributes::parse(&text)?;

        Self::decode(header, &bytes[HEADER_SIZE..pixel_end], attributes)
    }

    /// Read and decode a complete TPC file from `reader`.
    pub fn read<R: Read>(mut reader: R) -> Result<Self, TextureError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Decode the images in `pixel_data` using the layout from `header` and `attributes`.
    ///
    /// Any data after the planned images is ignored.
    pub fn decode(
        header: Header,
        pixel_data: &[u8],
        attributes: Attributes,
    ) -> Result<Self, TextureError> {
        header.validate()?;
        let format = header.pixel_format()?;
        let layout = plan_layout(&header, format, &attributes)?;

        if pixel_data.len() < layout.total_size {
            return Err(TextureError::TruncatedData {
                expected: layout.total_size,
                actual: pixel_data.len(),
            });
        }

        let mut images = Vec::with_capacity(layout.image_count());
        for image in 0..layout.image_count() {
            let mut mipmaps = Vec::with_capacity(layout.mipmap_count());
            for (mipmap, level) in layout.mipmaps.iter().enumerate() {
                let range = layout
                    .range(image, mipmap)
                    .ok_or(TextureError::IndexOutOfRange { image, mipmap })?;
                // Ranges stay within the total size checked above.
                let data = &pixel_data[range];
                mipmaps.push(decode_subimage(level, data, header.encoding, format)?);
            }
            images.push(Image { mipmaps });
        }

        tracing::debug!(
            "Decoded {} {:?} images with {} mipmaps",
            layout.image_count(),
            header.encoding,
            layout.mipmap_count()
        );

        Ok(Self {
            header,
            format,
            attributes,
            layout,
            images,
        })
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn mipmap_count(&self) -> usize {
        self.layout.mipmap_count()
    }

    pub fn is_cube_map(&self) -> bool {
        self.layout.is_cube_map
    }

    /// Returns `true` if the pixel data in the file was block compressed.
    pub fn is_compressed(&self) -> bool {
        self.format.is_compressed()
    }

    /// The encoding of the decoded pixel data.
    ///
    /// Compressed data is always decompressed to [Encoding::Rgba].
    pub fn pixel_encoding(&self) -> Encoding {
        if self.is_compressed() {
            Encoding::Rgba
        } else {
            self.header.encoding
        }
    }

    pub fn get(&self, image: usize, mipmap: usize) -> Option<&SubImage> {
        self.images.get(image)?.mipmaps.get(mipmap)
    }

    fn sub_image(&self, image: usize, mipmap: usize) -> Result<&SubImage, TextureError> {
        self.get(image, mipmap).ok_or(TextureError::IndexOutOfRange { image, mipmap })
    }

    /// The pixels for `image` and `mipmap` as `canvas_width` x `canvas_height` pixels.
    ///
    /// RGB and RGBA data is flipped to rows from top to bottom using the channel `order`.
    /// Gray data is replicated to 3 channels without changing the row order.
    /// BGRA data is only converted to the channel `order`.
    pub fn pixels(
        &self,
        image: usize,
        mipmap: usize,
        order: ChannelOrder,
    ) -> Result<Vec<u8>, TextureError> {
        let sub_image = self.sub_image(image, mipmap)?;

        let width = sub_image.canvas_width;
        let height = sub_image.canvas_height;
        let data = &sub_image.data;
        let swap_red_blue = order == ChannelOrder::Bgr;

        match self.pixel_encoding() {
            Encoding::Gray => rgb8_from_gray8(width, height, data),
            Encoding::Rgb => flip_vertical(width, height, 3, data, swap_red_blue),
            Encoding::Rgba => flip_vertical(width, height, 4, data, swap_red_blue),
            Encoding::Bgra => match order {
                ChannelOrder::Rgb => swap_red_blue_rgba8(width, height, data),
                ChannelOrder::Bgr => Ok(data.clone()),
            },
        }
    }

    /// The pixels for `image` and `mipmap` as RGBA8 with the same row order as [Texture::pixels].
    ///
    /// Gray and RGB data uses an alpha of 255.
    pub fn rgba8(&self, image: usize, mipmap: usize) -> Result<Vec<u8>, TextureError> {
        let pixels = self.pixels(image, mipmap, ChannelOrder::Rgb)?;
        match self.pixel_encoding() {
            Encoding::Gray | Encoding::Rgb => {
                let sub_image = self.sub_image(image, mipmap)?;
                rgba8_from_rgb8(sub_image.canvas_width, sub_image.canvas_height, &pixels)
            }
            Encoding::Rgba | Encoding::Bgra => Ok(pixels),
        }
    }

    /// Convert `image` and `mipmap` to an RGBA image for saving to PNG or other formats.
    #[cfg(feature = "image")]
    pub fn to_image(&self, image: usize, mipmap: usize) -> Result<image::RgbaImage, TextureError> {
        let rgba = self.rgba8(image, mipmap)?;
        let sub_image = self.sub_image(image, mipmap)?;
        let width = sub_image.canvas_width;
        let height = sub_image.canvas_height;

        let data_length = rgba.len();
        image::RgbaImage::from_raw(width, height, rgba).ok_or(
            TextureError::InvalidSurfaceDimensions {
                width,
                height,
                data_length,
            },
        )
    }
}

fn decode_subimage(
    level: &MipLevel,
    data: &[u8],
    encoding: Encoding,
    format: PixelFormat,
) -> Result<SubImage, TextureError> {
    match format.compression.dxt_format() {
        Some(dxt_format) => {
            // The decompressed data no longer needs padding to whole blocks.
            let rgba = rgba8_from_dxt(level.width, level.height, data, dxt_format)?;
            Ok(SubImage {
                width: level.width,
                height: level.height,
                canvas_width: level.width,
                canvas_height: level.height,
                data: rgba,
            })
        }
        None => {
            let data = if encoding == Encoding::Bgra && is_swizzled_width(level.width) {
                tracing::trace!(
                    "Deswizzling {}x{} BGRA mipmap",
                    level.canvas_width,
                    level.canvas_height
                );
                deswizzle_rgba8(level.canvas_width, level.canvas_height, data)?
            } else {
                data.to_vec()
            };

            Ok(SubImage {
                width: level.width,
                height: level.height,
                canvas_width: level.canvas_width,
                canvas_height: level.canvas_height,
                data,
            })
        }
    }
}
