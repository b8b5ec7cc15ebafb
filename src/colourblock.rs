// Copyright (c) 2006 Simon Brown <si@sjbrown.co.uk>
// Copyright (c) 2018-2021 Jan Solanti <jhs@psonet.com>
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to	deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
// OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
// SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use core::mem;

use byteorder::{ByteOrder, LittleEndian};

use crate::math::{float_to_int, Vec3};

/// Quantise a colour in [0,1] to 5:6:5 bits
pub fn pack_565(colour: &Vec3) -> u16 {
    let r = float_to_int(31.0 * colour.x(), 31) as u16;
    let g = float_to_int(63.0 * colour.y(), 63) as u16;
    let b = float_to_int(31.0 * colour.z(), 31) as u16;

    (r << 11) | (g << 5) | b
}

/// Expand a 5:6:5 colour to 8 bits per channel by bit replication,
/// with alpha set to opaque
pub fn unpack_565(value: u16) -> [u8; 4] {
    let r = ((value >> 11) & 0x1F) as u8;
    let g = ((value >> 5) & 0x3F) as u8;
    let b = (value & 0x1F) as u8;

    [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2), u8::MAX]
}

fn write_block(a: u16, b: u16, indices: &[u8; 16], block: &mut [u8; 8]) {
    LittleEndian::write_u16(&mut block[0..2], a);
    LittleEndian::write_u16(&mut block[2..4], b);

    // 4 pixels per byte, pixel 0 in the lowest bits
    for (packed, quad) in block[4..].iter_mut().zip(indices.chunks_exact(4)) {
        *packed = quad
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &index)| acc | ((index & 0x03) << (2 * i)));
    }
}

/// Writes a 3-colour block. The endpoints are stored with `low <= high`,
/// which is what signals 3-colour mode to a DXT1 decoder.
pub fn write3(start: &Vec3, end: &Vec3, indices: &[u8; 16], block: &mut [u8; 8]) {
    let mut a = pack_565(start);
    let mut b = pack_565(end);

    let mut remapped = *indices;
    if a > b {
        mem::swap(&mut a, &mut b);
        for index in remapped.iter_mut() {
            *index = match *index {
                0 => 1,
                1 => 0,
                x => x,
            };
        }
    }

    write_block(a, b, &remapped, block);
}

/// Writes a 4-colour block. The endpoints are stored with `low > high`; a
/// degenerate block with equal endpoints uses index 0 everywhere.
pub fn write4(start: &Vec3, end: &Vec3, indices: &[u8; 16], block: &mut [u8; 8]) {
    let mut a = pack_565(start);
    let mut b = pack_565(end);

    let mut remapped = [0u8; 16];
    if a < b {
        mem::swap(&mut a, &mut b);
        for (remapped, index) in remapped.iter_mut().zip(indices) {
            *remapped = (index ^ 0x01) & 0x03;
        }
    } else if a > b {
        remapped = *indices;
    }

    write_block(a, b, &remapped, block);
}

/// Unpacks the 2-bit palette indices of a colour block
pub fn unpack_indices(block: &[u8; 8]) -> [u8; 16] {
    let mut indices = [0u8; 16];
    for (quad, &packed) in indices.chunks_exact_mut(4).zip(&block[4..]) {
        for (i, index) in quad.iter_mut().enumerate() {
            *index = (packed >> (2 * i)) & 0x03;
        }
    }
    indices
}

/// Decompresses a colour block to 4x4 RGBA pixels.
///
/// Under DXT1, `low <= high` selects the 3-colour palette whose last entry
/// is transparent black.
pub fn decompress(block: &[u8; 8], is_dxt1: bool) -> [[u8; 4]; 16] {
    let a = LittleEndian::read_u16(&block[0..2]);
    let b = LittleEndian::read_u16(&block[2..4]);
    let three_colour = is_dxt1 && a <= b;

    let mut codes = [[0u8; 4]; 4];
    codes[0] = unpack_565(a);
    codes[1] = unpack_565(b);

    for i in 0..3 {
        let c = u32::from(codes[0][i]);
        let d = u32::from(codes[1][i]);

        if three_colour {
            codes[2][i] = ((c + d) / 2) as u8;
            codes[3][i] = 0;
        } else {
            codes[2][i] = ((2 * c + d) / 3) as u8;
            codes[3][i] = ((c + 2 * d) / 3) as u8;
        }
    }

    codes[2][3] = u8::MAX;
    codes[3][3] = if three_colour { 0 } else { u8::MAX };

    let mut rgba = [[0u8; 4]; 16];
    for (pixel, index) in rgba.iter_mut().zip(unpack_indices(block)) {
        *pixel = codes[index as usize];
    }

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn colour_565(value: u16) -> Vec3 {
        let r = f32::from((value >> 11) & 0x1F) / 31.0;
        let g = f32::from((value >> 5) & 0x3F) / 63.0;
        let b = f32::from(value & 0x1F) / 31.0;
        Vec3::new(r, g, b)
    }

    fn endpoints(block: &[u8; 8]) -> (u16, u16) {
        (
            LittleEndian::read_u16(&block[0..2]),
            LittleEndian::read_u16(&block[2..4]),
        )
    }

    const INDICES: [u8; 16] = [0, 1, 2, 3, 3, 2, 1, 0, 0, 0, 1, 1, 2, 2, 3, 3];

    #[test]
    fn test_pack_unpack_565() {
        assert_eq!(pack_565(&Vec3::new(1.0, 0.0, 0.0)), 0xF800);
        assert_eq!(pack_565(&Vec3::new(0.0, 1.0, 0.0)), 0x07E0);
        assert_eq!(pack_565(&Vec3::new(0.0, 0.0, 1.0)), 0x001F);
        assert_eq!(unpack_565(0xF800), [255, 0, 0, 255]);
        assert_eq!(unpack_565(0xFFFF), [255, 255, 255, 255]);
        assert_eq!(unpack_565(0x0000), [0, 0, 0, 255]);
    }

    #[test]
    fn test_index_byte_layout() {
        let mut block = [0u8; 8];
        write4(&colour_565(0xFFFF), &colour_565(0x0000), &INDICES, &mut block);
        // lowest two bits hold pixel 0
        assert_eq!(block[4], 0b11_10_01_00);
        assert_eq!(block[5], 0b00_01_10_11);
        assert_eq!(unpack_indices(&block), INDICES);
    }

    #[rstest]
    #[case::ordered(0xF81F, 0x07E0)]
    #[case::swapped(0x07E0, 0xF81F)]
    #[case::grey(0x8410, 0x4208)]
    fn test_write4_round_trip(#[case] start: u16, #[case] end: u16) {
        let mut block = [0u8; 8];
        write4(&colour_565(start), &colour_565(end), &INDICES, &mut block);

        let (low, high) = endpoints(&block);
        assert!(low > high);
        assert_eq!((low, high), (start.max(end), start.min(end)));

        let expected: [u8; 16] = if start > end {
            INDICES
        } else {
            INDICES.map(|i| i ^ 1)
        };
        assert_eq!(unpack_indices(&block), expected);

        // endpoints reconstruct exactly
        let rgba = decompress(&block, true);
        let lookup = |i: u8| expected.iter().position(|&x| x == i).unwrap();
        assert_eq!(rgba[lookup(0)], unpack_565(low));
        assert_eq!(rgba[lookup(1)], unpack_565(high));
    }

    #[test]
    fn test_write4_degenerate_uses_index_zero() {
        let mut block = [0u8; 8];
        let colour = colour_565(0x1234);
        write4(&colour, &colour, &INDICES, &mut block);

        let (low, high) = endpoints(&block);
        assert_eq!(low, high);
        assert_eq!(unpack_indices(&block), [0u8; 16]);
    }

    #[rstest]
    #[case::ordered(0x07E0, 0xF81F)]
    #[case::swapped(0xF81F, 0x07E0)]
    fn test_write3_orders_endpoints(#[case] start: u16, #[case] end: u16) {
        let mut block = [0u8; 8];
        write3(&colour_565(start), &colour_565(end), &INDICES, &mut block);

        let (low, high) = endpoints(&block);
        assert!(low <= high);

        let expected = if start <= end {
            INDICES
        } else {
            INDICES.map(|i| match i {
                0 => 1,
                1 => 0,
                x => x,
            })
        };
        assert_eq!(unpack_indices(&block), expected);
    }

    #[test]
    fn test_decompress_three_colour_palette() {
        // black to white, 3-colour mode
        let block = [0x00, 0x00, 0xFF, 0xFF, 0b11_10_01_00, 0, 0, 0];
        let rgba = decompress(&block, true);
        assert_eq!(rgba[0], [0, 0, 0, 255]);
        assert_eq!(rgba[1], [255, 255, 255, 255]);
        assert_eq!(rgba[2], [127, 127, 127, 255]);
        assert_eq!(rgba[3], [0, 0, 0, 0]);

        // the same block outside of DXT1 always has 4 colours
        let rgba = decompress(&block, false);
        assert_eq!(rgba[2], [85, 85, 85, 255]);
        assert_eq!(rgba[3], [170, 170, 170, 255]);
    }
}
