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

//! The alpha halves of DXT3 and DXT5 blocks.

use byteorder::{ByteOrder, LittleEndian};

use crate::math::float_to_int;

fn enabled(mask: u16, i: usize) -> bool {
    mask & (1 << i) != 0
}

/// Quantises alpha to 4 bits per pixel, two pixels per byte with the even
/// pixel in the low nibble. Disabled pixels are written as 0.
pub fn compress_dxt3(rgba: &[[u8; 4]; 16], mask: u16, block: &mut [u8; 8]) {
    for (i, byte) in block.iter_mut().enumerate() {
        let mut quant = [0u8; 2];
        for (k, quant) in quant.iter_mut().enumerate() {
            let pixel = 2 * i + k;
            if enabled(mask, pixel) {
                let alpha = f32::from(rgba[pixel][3]) * (15.0 / 255.0);
                *quant = float_to_int(alpha, 15) as u8;
            }
        }

        *byte = quant[0] | (quant[1] << 4);
    }
}

/// Widens `[min, max]` to span at least `steps`, pushing `max` up first
fn fix_range(min: &mut i32, max: &mut i32, steps: i32) {
    if *max - *min < steps {
        *max = (*min + steps).min(255);
    }
    if *max - *min < steps {
        *min = (*max - steps).max(0);
    }
}

/// Picks the nearest code for every enabled pixel. Disabled pixels take
/// code 0 and don't contribute to the error.
fn fit_codes(rgba: &[[u8; 4]; 16], mask: u16, codes: &[u8; 8]) -> ([u8; 16], u32) {
    let mut indices = [0u8; 16];
    let mut error = 0;

    for (i, (pixel, index)) in rgba.iter().zip(indices.iter_mut()).enumerate() {
        if !enabled(mask, i) {
            continue;
        }

        let value = i32::from(pixel[3]);
        let mut least = u32::MAX;
        for (j, &code) in codes.iter().enumerate() {
            let dist = (value - i32::from(code)).pow(2) as u32;
            if dist < least {
                least = dist;
                *index = j as u8;
            }
        }

        error += least;
    }

    (indices, error)
}

fn write_block(alpha0: u8, alpha1: u8, indices: &[u8; 16], block: &mut [u8; 8]) {
    block[0] = alpha0;
    block[1] = alpha1;

    // 3 bits per pixel, pixel 0 lowest
    let packed = indices
        .iter()
        .enumerate()
        .fold(0u64, |packed, (i, &index)| packed | (u64::from(index) << (3 * i)));
    LittleEndian::write_u48(&mut block[2..], packed);
}

/// Writes a 5-value block, which requires `alpha0 <= alpha1`
fn write_block5(alpha0: u8, alpha1: u8, indices: &[u8; 16], block: &mut [u8; 8]) {
    if alpha0 > alpha1 {
        let swapped = indices.map(|index| match index {
            0 => 1,
            1 => 0,
            2..=5 => 7 - index,
            _ => index,
        });
        write_block(alpha1, alpha0, &swapped, block);
    } else {
        write_block(alpha0, alpha1, indices, block);
    }
}

/// Writes a 7-value block, which requires `alpha0 > alpha1`
fn write_block7(alpha0: u8, alpha1: u8, indices: &[u8; 16], block: &mut [u8; 8]) {
    if alpha0 < alpha1 {
        let swapped = indices.map(|index| match index {
            0 => 1,
            1 => 0,
            _ => 9 - index,
        });
        write_block(alpha1, alpha0, &swapped, block);
    } else {
        write_block(alpha0, alpha1, indices, block);
    }
}

fn interpolate(alpha0: i32, alpha1: i32, steps: i32, codes: &mut [u8; 8]) {
    for i in 1..steps {
        codes[1 + i as usize] = (((steps - i) * alpha0 + i * alpha1) / steps) as u8;
    }
}

/// Interpolated alpha. Both the 5-value (with explicit 0 and 255) and the
/// 7-value codebooks are fitted; the 5-value one wins ties.
pub fn compress_dxt5(rgba: &[[u8; 4]; 16], mask: u16, block: &mut [u8; 8]) {
    let mut min5 = 255i32;
    let mut max5 = 0i32;
    let mut min7 = 255i32;
    let mut max7 = 0i32;

    for (i, pixel) in rgba.iter().enumerate() {
        if !enabled(mask, i) {
            continue;
        }

        let value = i32::from(pixel[3]);
        min7 = min7.min(value);
        max7 = max7.max(value);

        // 0 and 255 are free in the 5-value codebook
        if value != 0 {
            min5 = min5.min(value);
        }
        if value != 255 {
            max5 = max5.max(value);
        }
    }

    // no valid range found
    if min5 > max5 {
        min5 = max5;
    }
    if min7 > max7 {
        min7 = max7;
    }

    fix_range(&mut min5, &mut max5, 5);
    fix_range(&mut min7, &mut max7, 7);

    let mut codes5 = [0u8; 8];
    codes5[0] = min5 as u8;
    codes5[1] = max5 as u8;
    interpolate(min5, max5, 5, &mut codes5);
    codes5[6] = 0;
    codes5[7] = 255;

    let mut codes7 = [0u8; 8];
    codes7[0] = min7 as u8;
    codes7[1] = max7 as u8;
    interpolate(min7, max7, 7, &mut codes7);

    let (indices5, err5) = fit_codes(rgba, mask, &codes5);
    let (indices7, err7) = fit_codes(rgba, mask, &codes7);

    if err5 <= err7 {
        write_block5(min5 as u8, max5 as u8, &indices5, block);
    } else {
        write_block7(min7 as u8, max7 as u8, &indices7, block);
    }
}

/// Decodes the alpha of a DXT5 block into the fourth channel of `rgba`
pub fn decompress_dxt5(block: &[u8; 8], rgba: &mut [[u8; 4]; 16]) {
    let alpha0 = i32::from(block[0]);
    let alpha1 = i32::from(block[1]);

    let mut codes = [0u8; 8];
    codes[0] = block[0];
    codes[1] = block[1];
    if alpha0 <= alpha1 {
        interpolate(alpha0, alpha1, 5, &mut codes);
        codes[6] = 0;
        codes[7] = 255;
    } else {
        interpolate(alpha0, alpha1, 7, &mut codes);
    }

    let packed = LittleEndian::read_u48(&block[2..]);
    for (i, pixel) in rgba.iter_mut().enumerate() {
        let index = (packed >> (3 * i)) & 0x07;
        pixel[3] = codes[index as usize];
    }
}
