#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::{Arbitrary, Result, Unstructured};
use image_tpc::{Attributes, Header};

#[derive(Debug)]
pub struct TextureInfo {
    header: Header,
    attributes: Vec<(String, String)>,
    pixel_data: Vec<u8>,
}

impl<'a> Arbitrary<'a> for TextureInfo {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        // Limit the dimensions to keep each iteration fast.
        let mut header = Header::arbitrary(u)?;
        header.width = u.int_in_range(0..=256)?;
        header.height = u.int_in_range(0..=256)?;
        let attributes = Vec::arbitrary(u)?;
        let pixel_data = Vec::arbitrary(u)?;
        Ok(Self {
            header,
            attributes,
            pixel_data,
        })
    }
}

fuzz_target!(|input: TextureInfo| {
    let attributes: Attributes = input.attributes.into_iter().collect();
    let _result = image_tpc::Texture::decode(input.header, &input.pixel_data, attributes);
});
