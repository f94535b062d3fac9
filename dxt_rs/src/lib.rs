#![no_std]
//! A safe, no_std, pure Rust decoder for the S3TC block formats DXT1, DXT3 and DXT5.
//!
//! Blocks are parsed into a [Block] selected explicitly by [Format]
//! and decompressed to a 4x4 grid of RGBA8 pixels in row-major order.
//! Pixel 0 of a block always comes from the lowest bits of its index table.

pub const BLOCK_WIDTH: usize = 4;
pub const BLOCK_HEIGHT: usize = 4;

/// A decompressed 4x4 block indexed as `[row][column]` with RGBA8 pixels.
pub type DecompressedBlock = [[[u8; 4]; BLOCK_WIDTH]; BLOCK_HEIGHT];

/// The supported S3TC block formats.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Format {
    /// RGB with optional punch-through alpha in 8 bytes per block.
    Dxt1,
    /// Explicit 4-bit alpha followed by a color block in 16 bytes per block.
    Dxt3,
    /// Interpolated 8-bit alpha followed by a color block in 16 bytes per block.
    Dxt5,
}

impl Format {
    pub const fn block_size_in_bytes(&self) -> usize {
        match self {
            Format::Dxt1 => 8,
            Format::Dxt3 => 16,
            Format::Dxt5 => 16,
        }
    }
}

/// Two RGB565 endpoints and 2-bit indices for 16 pixels.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ColorBlock {
    pub color0: u16,
    pub color1: u16,
    pub indices: u32,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Dxt1Block {
    pub color: ColorBlock,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Dxt3Block {
    /// One word per pixel row with 4 bits per pixel starting at the lowest bits.
    pub alpha: [u16; 4],
    pub color: ColorBlock,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Dxt5Block {
    pub alpha0: u8,
    pub alpha1: u8,
    /// 3-bit palette indices for 16 pixels in the lower 48 bits.
    pub alpha_indices: u64,
    pub color: ColorBlock,
}

/// A single compressed block of any supported format.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Block {
    Dxt1(Dxt1Block),
    Dxt3(Dxt3Block),
    Dxt5(Dxt5Block),
}

impl Block {
    /// Parse the block at the start of `data` as the given `format`.
    ///
    /// Returns [None] if `data` is shorter than [Format::block_size_in_bytes].
    pub fn read(data: &[u8], format: Format) -> Option<Self> {
        let data = data.get(..format.block_size_in_bytes())?;
        let block = match format {
            Format::Dxt1 => Block::Dxt1(Dxt1Block {
                color: ColorBlock::read(data),
            }),
            Format::Dxt3 => Block::Dxt3(Dxt3Block {
                alpha: [
                    u16::from_le_bytes([data[0], data[1]]),
                    u16::from_le_bytes([data[2], data[3]]),
                    u16::from_le_bytes([data[4], data[5]]),
                    u16::from_le_bytes([data[6], data[7]]),
                ],
                color: ColorBlock::read(&data[8..]),
            }),
            Format::Dxt5 => Block::Dxt5(Dxt5Block {
                alpha0: data[0],
                alpha1: data[1],
                alpha_indices: u64::from_le_bytes([
                    data[2], data[3], data[4], data[5], data[6], data[7], 0, 0,
                ]),
                color: ColorBlock::read(&data[8..]),
            }),
        };
        Some(block)
    }

    pub fn format(&self) -> Format {
        match self {
            Block::Dxt1(_) => Format::Dxt1,
            Block::Dxt3(_) => Format::Dxt3,
            Block::Dxt5(_) => Format::Dxt5,
        }
    }

    /// Decompress the block to RGBA8 pixels.
    pub fn decompress(&self) -> DecompressedBlock {
        match self {
            Block::Dxt1(block) => block.color.decompress(true),
            Block::Dxt3(block) => {
                // DXT3 and DXT5 color blocks only use the four color mode.
                let mut pixels = block.color.decompress(false);
                // Alpha word n belongs to pixel row n with the lowest nibble at x = 0.
                // The rows are not mirrored.
                for (row, alpha) in pixels.iter_mut().zip(block.alpha) {
                    for (x, pixel) in row.iter_mut().enumerate() {
                        pixel[3] = (((alpha >> (4 * x)) & 0x0F) << 4) as u8;
                    }
                }
                pixels
            }
            Block::Dxt5(block) => {
                let mut pixels = block.color.decompress(false);
                let palette = alpha_palette(block.alpha0, block.alpha1);

                let mut indices = block.alpha_indices;
                for row in pixels.iter_mut() {
                    for pixel in row.iter_mut() {
                        pixel[3] = palette[(indices & 0x07) as usize];
                        indices >>= 3;
                    }
                }
                pixels
            }
        }
    }
}

impl ColorBlock {
    fn read(data: &[u8]) -> Self {
        Self {
            color0: u16::from_le_bytes([data[0], data[1]]),
            color1: u16::from_le_bytes([data[2], data[3]]),
            indices: u32::from_le_bytes([data[4], data[5], data[6], data[7]]),
        }
    }

    fn decompress(&self, allow_punch_through: bool) -> DecompressedBlock {
        let palette = color_palette(self.color0, self.color1, allow_punch_through);

        let mut pixels = [[[0u8; 4]; BLOCK_WIDTH]; BLOCK_HEIGHT];
        let mut indices = self.indices;
        for row in pixels.iter_mut() {
            for pixel in row.iter_mut() {
                *pixel = palette[(indices & 0x03) as usize];
                indices >>= 2;
            }
        }
        pixels
    }
}

/// Expand a packed 5-bit R, 6-bit G, 5-bit B color to opaque RGBA8.
///
/// The channels are shifted into the high bits without replicating them,
/// so `0xFFFF` expands to `[248, 252, 248, 255]`.
pub fn rgba8_from_rgb565(color: u16) -> [u8; 4] {
    let r = ((color & 0xF800) >> 8) as u8;
    let g = ((color & 0x07E0) >> 3) as u8;
    let b = ((color & 0x001F) << 3) as u8;
    [r, g, b, 255u8]
}

/// The 4 entry color palette for the endpoints `color0` and `color1`.
///
/// When `allow_punch_through` is `true` and `color0 <= color1`,
/// the third entry is the midpoint and the fourth entry is transparent black.
/// Otherwise the third and fourth entries are 1/3 and 2/3 of the way to `color1`.
pub fn color_palette(color0: u16, color1: u16, allow_punch_through: bool) -> [[u8; 4]; 4] {
    let rgba0 = rgba8_from_rgb565(color0);
    let rgba1 = rgba8_from_rgb565(color1);

    if color0 > color1 || !allow_punch_through {
        [
            rgba0,
            rgba1,
            blend(rgba0, rgba1, 1, 3),
            blend(rgba0, rgba1, 2, 3),
        ]
    } else {
        [rgba0, rgba1, blend(rgba0, rgba1, 1, 2), [0u8; 4]]
    }
}

/// The 8 entry alpha palette for the DXT5 endpoints `alpha0` and `alpha1`.
pub fn alpha_palette(alpha0: u8, alpha1: u8) -> [u8; 8] {
    if alpha0 > alpha1 {
        // 6 interpolated alpha values.
        [
            alpha0,
            alpha1,
            interpolate(alpha0, alpha1, 1, 7), // 6/7*alpha_0 + 1/7*alpha_1
            interpolate(alpha0, alpha1, 2, 7), // 5/7*alpha_0 + 2/7*alpha_1
            interpolate(alpha0, alpha1, 3, 7), // 4/7*alpha_0 + 3/7*alpha_1
            interpolate(alpha0, alpha1, 4, 7), // 3/7*alpha_0 + 4/7*alpha_1
            interpolate(alpha0, alpha1, 5, 7), // 2/7*alpha_0 + 5/7*alpha_1
            interpolate(alpha0, alpha1, 6, 7), // 1/7*alpha_0 + 6/7*alpha_1
        ]
    } else {
        // 4 interpolated alpha values.
        [
            alpha0,
            alpha1,
            interpolate(alpha0, alpha1, 1, 5), // 4/5*alpha_0 + 1/5*alpha_1
            interpolate(alpha0, alpha1, 2, 5), // 3/5*alpha_0 + 2/5*alpha_1
            interpolate(alpha0, alpha1, 3, 5), // 2/5*alpha_0 + 3/5*alpha_1
            interpolate(alpha0, alpha1, 4, 5), // 1/5*alpha_0 + 4/5*alpha_1
            0x00,
            0xFF,
        ]
    }
}

fn blend(a: [u8; 4], b: [u8; 4], weight: u32, total: u32) -> [u8; 4] {
    [
        interpolate(a[0], b[0], weight, total),
        interpolate(a[1], b[1], weight, total),
        interpolate(a[2], b[2], weight, total),
        interpolate(a[3], b[3], weight, total),
    ]
}

// Rounds to nearest with halves rounded up.
fn interpolate(a: u8, b: u8, weight: u32, total: u32) -> u8 {
    (((total - weight) * a as u32 + weight * b as u32 + total / 2) / total) as u8
}
