//! Decode TPC textures to uncompressed pixel data.
//!
//! A TPC file starts with a [Header] followed by the pixel data for every image and mipmap.
//! The remaining bytes are a text block of [Attributes] that can change the layout of the pixel data
//! into cube map faces or the frames of an animated procedural texture.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("texture.tpc")?;
//! let texture = image_tpc::Texture::from_bytes(&bytes)?;
//! let rgba = texture.rgba8(0, 0)?;
//! # Ok(())
//! # }
//! ```
mod attributes;
mod bits;
mod error;
mod header;
mod texture;

pub mod dxt;
pub mod layout;
pub mod rgba;
pub mod swizzle;

pub use attributes::Attributes;
pub use error::TextureError;
pub use header::{Compression, Encoding, Header, PixelFormat, HEADER_SIZE, MAX_DIMENSION};
pub use layout::{MipLevel, TextureLayout};
pub use texture::{ChannelOrder, Image, SubImage, Texture};

pub use dxt_rs;

fn div_round_up(x: usize, d: usize) -> usize {
    (x + d - 1) / d
}
