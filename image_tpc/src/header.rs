use bytemuck::{Pod, Zeroable};

use crate::TextureError;

/// The size in bytes of the header at the start of every TPC file.
pub const HEADER_SIZE: usize = 128;

/// The largest supported width or height in pixels.
pub const MAX_DIMENSION: u16 = 0x7FFF;

// All fields are little endian.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawHeader {
    data_size: u32,
    unknown1: u32,
    width: u16,
    height: u16,
    encoding: u8,
    mipmaps: u8,
    reserved: [u8; 114],
}

/// The channels and channel ordering of the stored pixel data.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "strum",
    derive(strum::Display, strum::EnumString, strum::EnumIter)
)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Encoding {
    Gray = 0x01,
    Rgb = 0x02,
    Rgba = 0x04,
    /// Uncompressed BGRA that is swizzled for power of two widths.
    Bgra = 0x0C,
}

impl Encoding {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Gray),
            0x02 => Some(Self::Rgb),
            0x04 => Some(Self::Rgba),
            0x0C => Some(Self::Bgra),
            _ => None,
        }
    }
}

/// The block compression applied to the pixel data.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "strum",
    derive(strum::Display, strum::EnumString, strum::EnumIter)
)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Compression {
    None,
    Dxt1,
    Dxt3,
    Dxt5,
}

impl Compression {
    pub fn dxt_format(&self) -> Option<dxt_rs::Format> {
        match self {
            Compression::None => None,
            Compression::Dxt1 => Some(dxt_rs::Format::Dxt1),
            Compression::Dxt3 => Some(dxt_rs::Format::Dxt3),
            Compression::Dxt5 => Some(dxt_rs::Format::Dxt5),
        }
    }
}

/// The fixed size header of a TPC file.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Header {
    /// The size of the compressed base image or `0` for uncompressed data.
    ///
    /// For cycle procedural textures this is the size of all frames,
    /// and the dimensions and mipmap count do not describe a single frame.
    pub data_size: u32,
    /// Usually `1.0` but the meaning is unknown.
    pub unknown1: f32,
    /// The width of the largest image in pixels.
    pub width: u16,
    /// The height of the largest image in pixels.
    pub height: u16,
    pub encoding: Encoding,
    /// The declared number of mipmaps including the base level.
    pub mipmaps: u8,
}

impl Header {
    /// Parse and validate the header from the first [HEADER_SIZE] bytes of `data`.
    pub fn read(data: &[u8]) -> Result<Self, TextureError> {
        if data.len() < HEADER_SIZE {
            return Err(TextureError::TruncatedData {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }
        let raw: RawHeader = bytemuck::pod_read_unaligned(&data[..HEADER_SIZE]);

        let data_size = u32::from_le(raw.data_size);
        let width = u16::from_le(raw.width);
        let height = u16::from_le(raw.height);
        validate_dimensions(width, height)?;

        let encoding = Encoding::from_u8(raw.encoding).ok_or(TextureError::UnsupportedEncoding {
            encoding: raw.encoding,
            compressed: data_size != 0,
        })?;

        Ok(Self {
            data_size,
            unknown1: f32::from_bits(u32::from_le(raw.unknown1)),
            width,
            height,
            encoding,
            mipmaps: raw.mipmaps,
        })
    }

    /// Write the header to bytes with the reserved bytes set to zero.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let raw = RawHeader {
            data_size: self.data_size.to_le(),
            unknown1: self.unknown1.to_bits().to_le(),
            width: self.width.to_le(),
            height: self.height.to_le(),
            encoding: self.encoding as u8,
            mipmaps: self.mipmaps,
            reserved: [0u8; 114],
        };
        bytemuck::cast(raw)
    }

    pub fn is_compressed(&self) -> bool {
        self.data_size != 0
    }

    pub fn pixel_format(&self) -> Result<PixelFormat, TextureError> {
        PixelFormat::resolve(self.encoding, self.is_compressed())
    }

    pub(crate) fn validate(&self) -> Result<(), TextureError> {
        validate_dimensions(self.width, self.height)
    }
}

fn validate_dimensions(width: u16, height: u16) -> Result<(), TextureError> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        Err(TextureError::InvalidDimensions { width, height })
    } else {
        Ok(())
    }
}

/// The storage size and compression of pixel data.
///
/// Data is stored in blocks of `quantization` x `quantization` pixels.
/// Uncompressed formats use 1x1 pixel blocks.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PixelFormat {
    /// The smallest allowed number of pixels in either dimension.
    pub quantization: u32,
    pub block_size_in_bytes: usize,
    pub compression: Compression,
}

impl PixelFormat {
    /// Find the format for `encoding` with or without compression.
    pub fn resolve(encoding: Encoding, compressed: bool) -> Result<Self, TextureError> {
        let (quantization, block_size_in_bytes, compression) = match (encoding, compressed) {
            (Encoding::Gray, false) => (1, 1, Compression::None),
            (Encoding::Rgb, false) => (1, 3, Compression::None),
            (Encoding::Rgba, false) => (1, 4, Compression::None),
            (Encoding::Bgra, false) => (1, 4, Compression::None),
            (Encoding::Rgb, true) => (4, 8, Compression::Dxt1),
            (Encoding::Rgba, true) => (4, 16, Compression::Dxt5),
            (Encoding::Gray | Encoding::Bgra, true) => {
                return Err(TextureError::UnsupportedEncoding {
                    encoding: encoding as u8,
                    compressed,
                })
            }
        };

        Ok(Self {
            quantization,
            block_size_in_bytes,
            compression,
        })
    }

    /// The average size of a pixel, which is `0.5` for DXT1.
    pub fn bytes_per_pixel(&self) -> f32 {
        self.block_size_in_bytes as f32 / (self.quantization * self.quantization) as f32
    }

    pub fn is_compressed(&self) -> bool {
        self.compression != Compression::None
    }
}
