use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("attribute {key} has an invalid value {value:?}")]
    Format { key: String, value: String },

    #[error("encoding {encoding:#04x} is not supported for compressed: {compressed}")]
    UnsupportedEncoding { encoding: u8, compressed: bool },

    #[error("texture dimensions {width} x {height} exceed the maximum of 32767")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("expected texture to have at least {expected} bytes but found {actual}")]
    TruncatedData { expected: usize, actual: usize },

    #[error("image {image} mipmap {mipmap} is out of range")]
    IndexOutOfRange { image: usize, mipmap: usize },

    #[error("data length {data_length} is not valid for a {width}x{height} image")]
    InvalidSurfaceDimensions {
        width: u32,
        height: u32,
        data_length: usize,
    },

    #[error("error reading texture data")]
    Io(#[from] std::io::Error),
}
