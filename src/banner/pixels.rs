//! RGB5A3 pixel decoding
//!
//! Banner images are stored as 4x4 tiles of big-endian 16-bit texels. A texel
//! with the top bit set is opaque 5:5:5 RGB; otherwise it carries a 3-bit
//! alpha and 4:4:4 RGB. Output pixels are packed `0xAARRGGBB`.

/// Tile edge length in texels
const TILE: usize = 4;

#[inline]
fn convert_3_to_8(v: u16) -> u32 {
    let v = v as u32;
    (v << 5) | (v << 2) | (v >> 1)
}

#[inline]
fn convert_4_to_8(v: u16) -> u32 {
    let v = v as u32;
    (v << 4) | v
}

#[inline]
fn convert_5_to_8(v: u16) -> u32 {
    let v = v as u32;
    (v << 3) | (v >> 2)
}

/// Decode one RGB5A3 texel
///
/// Translucent texels are composited onto black, so the result is always
/// fully opaque.
pub fn decode_5a3(val: u16) -> u32 {
    let (r, g, b) = if val & 0x8000 != 0 {
        (
            convert_5_to_8((val >> 10) & 0x1f),
            convert_5_to_8((val >> 5) & 0x1f),
            convert_5_to_8(val & 0x1f),
        )
    } else {
        let a = convert_3_to_8((val >> 12) & 0x7);
        (
            convert_4_to_8((val >> 8) & 0xf) * a / 255,
            convert_4_to_8((val >> 4) & 0xf) * a / 255,
            convert_4_to_8(val & 0xf) * a / 255,
        )
    };

    (0xFF << 24) | (r << 16) | (g << 8) | b
}

/// Decode a tiled RGB5A3 image into `width * height` packed pixels
///
/// # Panics
/// If `src` is not exactly `width * height * 2` bytes or either dimension is
/// not a multiple of the tile size.
pub fn decode_5a3_image(src: &[u8], width: usize, height: usize) -> Vec<u32> {
    assert_eq!(src.len(), width * height * 2, "RGB5A3 input has wrong length");
    assert!(
        width % TILE == 0 && height % TILE == 0,
        "RGB5A3 dimensions must be multiples of {}",
        TILE
    );

    let mut dst = vec![0u32; width * height];
    let mut texels = src
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));

    for y in (0..height).step_by(TILE) {
        for x in (0..width).step_by(TILE) {
            for iy in 0..TILE {
                for ix in 0..TILE {
                    if let Some(texel) = texels.next() {
                        dst[(y + iy) * width + (x + ix)] = decode_5a3(texel);
                    }
                }
            }
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_texels() {
        assert_eq!(decode_5a3(0xFFFF), 0xFFFF_FFFF);
        assert_eq!(decode_5a3(0x8000), 0xFF00_0000);
        assert_eq!(decode_5a3(0x8000 | (0x1f << 10)), 0xFFFF_0000);
        assert_eq!(decode_5a3(0x8000 | (0x1f << 5)), 0xFF00_FF00);
        assert_eq!(decode_5a3(0x8000 | 0x1f), 0xFF00_00FF);
    }

    #[test]
    fn test_bit_replication() {
        // 0b10000 -> 0b10000100, not 0b10000000
        assert_eq!(decode_5a3(0x8000 | (0b10000 << 10)), 0xFF84_0000);
        // 0b00001 -> 0b00001000
        assert_eq!(decode_5a3(0x8000 | 0b00001), 0xFF00_0008);
        assert_eq!(convert_4_to_8(0xA), 0xAA);
        assert_eq!(convert_3_to_8(7), 0xFF);
        assert_eq!(convert_3_to_8(3), 0x6D);
    }

    #[test]
    fn test_translucent_texels() {
        // Full alpha, full colour
        assert_eq!(decode_5a3(0x7FFF), 0xFFFF_FFFF);
        // Zero alpha blends to black
        assert_eq!(decode_5a3(0x0FFF), 0xFF00_0000);
        // alpha 3 -> 0x6D, red 0xF -> 0xFF * 0x6D / 0xFF
        assert_eq!(decode_5a3(0x3F00), 0xFF6D_0000);
    }

    #[test]
    fn test_tile_order() {
        // 8x4 image = two 4x4 tiles; texel 16 is the first of the second tile
        let mut src = vec![0u8; 8 * 4 * 2];
        src[0..2].copy_from_slice(&0xFC00u16.to_be_bytes());
        src[16 * 2..16 * 2 + 2].copy_from_slice(&0x83E0u16.to_be_bytes());
        src[5 * 2..5 * 2 + 2].copy_from_slice(&0x801Fu16.to_be_bytes());

        let pixels = decode_5a3_image(&src, 8, 4);
        assert_eq!(pixels.len(), 32);
        assert_eq!(pixels[0], 0xFFFF_0000);
        assert_eq!(pixels[4], 0xFF00_FF00);
        // texel 5 of the first tile is row 1, column 1
        assert_eq!(pixels[8 + 1], 0xFF00_00FF);
        assert_eq!(pixels[1], 0xFF00_0000);
    }

    #[test]
    #[should_panic]
    fn test_wrong_length_panics() {
        decode_5a3_image(&[0u8; 10], 4, 4);
    }
}
