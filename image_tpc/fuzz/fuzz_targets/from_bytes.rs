#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(texture) = image_tpc::Texture::from_bytes(data) {
        for image in 0..texture.image_count() {
            for mipmap in 0..texture.mipmap_count() {
                let _rgba = texture.rgba8(image, mipmap);
            }
        }
    }
});
