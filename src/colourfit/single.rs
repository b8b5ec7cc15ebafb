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

use crate::colourblock;
use crate::colourset::ColourSet;
use crate::math::{float_to_int, Vec3};
use crate::{Format, Result};

use super::single_lut::*;
use super::ColourFitImpl;

type Lookups = [&'static [SingleColourLookup; 256]; 3];

/// Exact fit for blocks containing a single distinct colour
pub struct SingleColourFit<'a> {
    colourset: &'a ColourSet,
    format: Format,
    colour: [u8; 3],
    best_error: u32,
    best_compressed: [u8; 8],
}

/// The endpoints and palette index reproducing the block colour most closely
struct Candidate {
    start: Vec3,
    end: Vec3,
    index: u8,
    error: u32,
}

impl<'a> SingleColourFit<'a> {
    pub fn new(colourset: &'a ColourSet, format: Format) -> Self {
        debug_assert_eq!(colourset.count(), 1);

        // grab the single colour
        let point = colourset.points()[0];
        let colour = [
            float_to_int(255.0 * point.x(), 255) as u8,
            float_to_int(255.0 * point.y(), 255) as u8,
            float_to_int(255.0 * point.z(), 255) as u8,
        ];

        SingleColourFit {
            colourset,
            format,
            colour,
            best_error: u32::MAX,
            best_compressed: [0u8; 8],
        }
    }

    /// Checks both the endpoint and the interpolated palette entry and keeps
    /// whichever reproduces the colour with less error
    fn compute_endpoints(&self, lookups: Lookups) -> Candidate {
        let mut best = Candidate {
            start: Vec3::splat(0.0),
            end: Vec3::splat(0.0),
            index: 0,
            error: u32::MAX,
        };

        for index in 0..2 {
            let sources: [SourceBlock; 3] = core::array::from_fn(|channel| {
                lookups[channel][self.colour[channel] as usize].sources[index]
            });

            let error: u32 = sources
                .iter()
                .map(|source| u32::from(source.error) * u32::from(source.error))
                .sum();

            if error < best.error {
                best = Candidate {
                    start: Vec3::new(
                        f32::from(sources[0].start) / 31.0,
                        f32::from(sources[1].start) / 63.0,
                        f32::from(sources[2].start) / 31.0,
                    ),
                    end: Vec3::new(
                        f32::from(sources[0].end) / 31.0,
                        f32::from(sources[1].end) / 63.0,
                        f32::from(sources[2].end) / 31.0,
                    ),
                    index: 2 * index as u8,
                    error,
                };
            }
        }

        best
    }

    fn indices(&self, index: u8) -> [u8; 16] {
        let mut indices = [0u8; 16];
        self.colourset.remap_indices(&[index], &mut indices);
        indices
    }
}

impl<'a> ColourFitImpl for SingleColourFit<'a> {
    fn is_dxt1(&self) -> bool {
        self.format == Format::Dxt1
    }

    fn is_transparent(&self) -> bool {
        self.colourset.is_transparent()
    }

    fn best_compressed(&self) -> &[u8; 8] {
        &self.best_compressed
    }

    fn compress3(&mut self) -> Result<()> {
        let best = self.compute_endpoints([&LOOKUP_5_3, &LOOKUP_6_3, &LOOKUP_5_3]);

        if best.error < self.best_error {
            let indices = self.indices(best.index);
            colourblock::write3(&best.start, &best.end, &indices, &mut self.best_compressed);
            self.best_error = best.error;
        }

        Ok(())
    }

    fn compress4(&mut self) -> Result<()> {
        let best = self.compute_endpoints([&LOOKUP_5_4, &LOOKUP_6_4, &LOOKUP_5_4]);

        if best.error < self.best_error {
            let indices = self.indices(best.index);
            colourblock::write4(&best.start, &best.end, &indices, &mut self.best_compressed);
            self.best_error = best.error;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colourfit::ColourFit;

    fn solid(colour: [u8; 4]) -> [[u8; 4]; 16] {
        [colour; 16]
    }

    #[test]
    fn test_exact_colour_uses_equal_endpoints() {
        let rgba = solid([255, 0, 0, 255]);
        let set = ColourSet::new(&rgba, 0xFFFF, Format::Dxt1, false);
        let mut fit = SingleColourFit::new(&set, Format::Dxt1);

        let mut block = [0u8; 8];
        fit.compress(&mut block).unwrap();
        assert_eq!(block, [0x00, 0xF8, 0x00, 0xF8, 0, 0, 0, 0]);
        assert_eq!(fit.best_error, 0);
    }

    #[test]
    fn test_unrepresentable_colour_reconstructs_closely() {
        // 5-bit levels cannot hit 100 exactly, the interpolated entry can get closer
        for format in [Format::Dxt1, Format::Dxt5] {
            let rgba = solid([100, 37, 203, 255]);
            let set = ColourSet::new(&rgba, 0xFFFF, format, false);
            let mut fit = SingleColourFit::new(&set, format);

            let mut block = [0u8; 8];
            fit.compress(&mut block).unwrap();

            let decoded = colourblock::decompress(&block, format == Format::Dxt1);
            for pixel in decoded.iter() {
                for channel in 0..3 {
                    assert!(pixel[channel].abs_diff(rgba[0][channel]) <= 2);
                }
                assert_eq!(pixel[3], 255);
            }
        }
    }

    #[test]
    fn test_four_colour_never_replaces_equal_error() {
        let rgba = solid([0, 0, 0, 255]);
        let set = ColourSet::new(&rgba, 0xFFFF, Format::Dxt1, false);
        let mut fit = SingleColourFit::new(&set, Format::Dxt1);

        fit.compress3().unwrap();
        let three = *fit.best_compressed();
        fit.compress4().unwrap();
        assert_eq!(fit.best_compressed(), &three);
    }

    #[test]
    fn test_transparent_pixels_get_transparent_index() {
        let mut rgba = solid([10, 200, 30, 255]);
        for pixel in rgba[8..].iter_mut() {
            pixel[3] = 0;
        }
        let set = ColourSet::new(&rgba, 0xFFFF, Format::Dxt1, false);
        let mut fit = SingleColourFit::new(&set, Format::Dxt1);

        let mut block = [0u8; 8];
        fit.compress(&mut block).unwrap();
        let indices = colourblock::unpack_indices(&block);
        assert!(indices[8..].iter().all(|&i| i == 3));

        let decoded = colourblock::decompress(&block, true);
        assert!(decoded[8..].iter().all(|pixel| *pixel == [0, 0, 0, 0]));
        assert!(decoded[..8].iter().all(|pixel| pixel[3] == 255));
    }
}
