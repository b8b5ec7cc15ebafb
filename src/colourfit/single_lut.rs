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

//! Single colour lookup tables, generated at compile time.
//!
//! For every 8-bit target value each table holds the best quantised endpoint
//! pair (and resulting error) for two palette positions: index 0, the start
//! endpoint itself, and index 1, the first interpolated colour
//! (`(a + b) / 2` for 3-colour blocks, `(2a + b) / 3` for 4-colour blocks).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceBlock {
    pub start: u8,
    pub end: u8,
    pub error: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleColourLookup {
    pub sources: [SourceBlock; 2],
}

pub static LOOKUP_5_3: [SingleColourLookup; 256] = build_lookup(5, 3);
pub static LOOKUP_6_3: [SingleColourLookup; 256] = build_lookup(6, 3);
pub static LOOKUP_5_4: [SingleColourLookup; 256] = build_lookup(5, 4);
pub static LOOKUP_6_4: [SingleColourLookup; 256] = build_lookup(6, 4);

const UNREACHED: u32 = 255;

/// Bit replication from `bits` to 8 bits, as done by the decoder
const fn expand(value: usize, bits: usize) -> usize {
    (value << (8 - bits)) | (value >> (2 * bits - 8))
}

const fn build_lookup(bits: usize, colours: usize) -> [SingleColourLookup; 256] {
    let mut start = [[0u8; 2]; 256];
    let mut end = [[0u8; 2]; 256];
    let mut error = [[UNREACHED; 2]; 256];

    // mark every target value reproduced exactly by some endpoint pair,
    // keeping the first pair found
    let count = 1 << bits;
    let mut value1 = 0;
    while value1 < count {
        let mut value2 = 0;
        while value2 < count {
            let a = expand(value1, bits);
            let b = expand(value2, bits);

            // index 0 only depends on the start endpoint, so keep both equal
            if value1 == value2 && error[a][0] != 0 {
                start[a][0] = value1 as u8;
                end[a][0] = value2 as u8;
                error[a][0] = 0;
            }

            let mid = if colours == 3 {
                (a + b) / 2
            } else {
                (2 * a + b) / 3
            };
            if error[mid][1] != 0 {
                start[mid][1] = value1 as u8;
                end[mid][1] = value2 as u8;
                error[mid][1] = 0;
            }

            value2 += 1;
        }
        value1 += 1;
    }

    // fill the gaps from the neighbours until nothing changes
    loop {
        let mut stable = true;
        let mut index = 0;
        while index < 2 {
            let mut target = 0;
            while target < 256 {
                if target != 255 && error[target][index] > error[target + 1][index] + 1 {
                    start[target][index] = start[target + 1][index];
                    end[target][index] = end[target + 1][index];
                    error[target][index] = error[target + 1][index] + 1;
                    stable = false;
                }
                if target != 0 && error[target][index] > error[target - 1][index] + 1 {
                    start[target][index] = start[target - 1][index];
                    end[target][index] = end[target - 1][index];
                    error[target][index] = error[target - 1][index] + 1;
                    stable = false;
                }
                target += 1;
            }
            index += 1;
        }
        if stable {
            break;
        }
    }

    let empty = SourceBlock {
        start: 0,
        end: 0,
        error: 0,
    };
    let mut table = [SingleColourLookup {
        sources: [empty; 2],
    }; 256];
    let mut target = 0;
    while target < 256 {
        let mut index = 0;
        while index < 2 {
            table[target].sources[index] = SourceBlock {
                start: start[target][index],
                end: end[target][index],
                error: error[target][index] as u8,
            };
            index += 1;
        }
        target += 1;
    }

    table
}
