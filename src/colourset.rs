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

use crate::math::Vec3;
use crate::Format;

/// The deduplicated, weighted colours of a single block
pub struct ColourSet {
    count: usize,
    points: [Vec3; 16],
    weights: [f32; 16],
    remap: [Option<u8>; 16],
    transparent: bool,
}

impl ColourSet {
    /// Builds the minimal point set of a block.
    ///
    /// * `rgba`           - The 16 pixels of the block
    /// * `mask`           - Bit `i` enables pixel `i`
    /// * `format`         - DXT1 treats pixels with alpha < 128 as transparent
    /// * `alpha_weighted` - Scale each pixel's contribution by its alpha
    pub fn new(rgba: &[[u8; 4]; 16], mask: u16, format: Format, alpha_weighted: bool) -> Self {
        let is_dxt1 = format == Format::Dxt1;
        let mut set = ColourSet {
            count: 0,
            points: [Vec3::splat(0.0); 16],
            weights: [0.0; 16],
            remap: [None; 16],
            transparent: false,
        };

        let enabled = |i: usize| mask & (1 << i) != 0;

        for (i, pixel) in rgba.iter().enumerate() {
            // disabled pixels are skipped entirely
            if !enabled(i) {
                continue;
            }

            // DXT1 only has binary alpha
            if is_dxt1 && pixel[3] < 128 {
                set.transparent = true;
                continue;
            }

            // ensure the weight is nonzero even when alpha is zero
            let weight = if alpha_weighted {
                (f32::from(pixel[3]) + 1.0) / 256.0
            } else {
                1.0
            };

            // look for an earlier pixel of the same colour
            let duplicate = (0..i).find_map(|j| {
                let other = &rgba[j];
                let matches = enabled(j)
                    && pixel[..3] == other[..3]
                    && (!is_dxt1 || other[3] >= 128);
                if matches {
                    set.remap[j]
                } else {
                    None
                }
            });

            match duplicate {
                Some(index) => {
                    set.weights[index as usize] += weight;
                    set.remap[i] = Some(index);
                }
                None => {
                    set.points[set.count] = Vec3::new(
                        f32::from(pixel[0]) / 255.0,
                        f32::from(pixel[1]) / 255.0,
                        f32::from(pixel[2]) / 255.0,
                    );
                    set.weights[set.count] = weight;
                    set.remap[i] = Some(set.count as u8);
                    set.count += 1;
                }
            }
        }

        // square root the weights so squared errors become weighted least squares
        for w in set.weights[..set.count].iter_mut() {
            *w = libm::sqrtf(*w);
        }

        set
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points[..self.count]
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights[..self.count]
    }

    /// Whether any enabled pixel was dropped for being transparent
    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Expands per-point indices into per-pixel indices.
    ///
    /// Pixels without a point (disabled or transparent) receive index 3, the
    /// transparent entry of a 3-colour DXT1 palette.
    pub fn remap_indices(&self, source: &[u8], target: &mut [u8; 16]) {
        for (target, remap) in target.iter_mut().zip(self.remap.iter()) {
            *target = match *remap {
                Some(j) => source[j as usize],
                None => 3,
            };
        }
    }
}
