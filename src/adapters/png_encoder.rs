use crate::domain::model::Raster;
use crate::utils::error::{Result, SplitError};
use png::{BitDepth, ColorType, Compression, Encoder};

fn encoding_error(err: impl std::fmt::Display) -> SplitError {
    SplitError::EncodingError {
        format: "PNG".to_string(),
        message: err.to_string(),
    }
}

/// Encodes an RGBA raster as an 8-bit PNG.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, raster.width, raster.height);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(Compression::Default);
        let mut writer = encoder.write_header().map_err(encoding_error)?;
        writer.write_image_data(&raster.rgba).map_err(encoding_error)?;
        writer.finish().map_err(encoding_error)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_writes_signature_and_size() {
        let raster = Raster::new(3, 2, vec![255; 3 * 2 * 4]);
        let bytes = encode_png(&raster).unwrap();

        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        // IHDR width/height, big endian
        assert_eq!(&bytes[16..20], &3u32.to_be_bytes());
        assert_eq!(&bytes[20..24], &2u32.to_be_bytes());
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        let raster = Raster {
            width: 4,
            height: 4,
            rgba: vec![0; 8],
        };
        assert!(encode_png(&raster).is_err());
    }
}
