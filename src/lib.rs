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

//! DXT1, DXT3 and DXT5 (S3TC) texture block compression.
//!
//! Images are split into 4x4 pixel blocks. Each block compresses to 8 bytes
//! (DXT1) or 16 bytes (DXT3/DXT5, alpha followed by colour).

#![cfg_attr(not(feature = "std"), no_std)]

mod alpha;
mod colourblock;
mod colourfit;
mod colourset;
mod error;
pub mod flags;
mod math;

#[cfg(test)]
mod test_data;

use crate::colourfit::{ClusterFit, ColourFit, RangeFit, SingleColourFit};
use crate::colourset::ColourSet;
pub use crate::error::{Error, Result};
pub use crate::flags::storage_requirements;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Format {
    /// Opaque or 1-bit alpha colour, 8 bytes per block
    #[default]
    Dxt1,
    /// Explicit 4-bit alpha, 16 bytes per block
    Dxt3,
    /// Interpolated alpha, 16 bytes per block
    Dxt5,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Fast, low quality
    RangeFit,

    /// Slow, high quality
    #[default]
    ClusterFit,

    /// Very slow, very high quality
    IterativeClusterFit,
}

/// Relative importance of the red, green and blue channels when fitting
pub type ColourWeights = [f32; 3];

pub const COLOUR_WEIGHTS_UNIFORM: ColourWeights = [1.0, 1.0, 1.0];

pub const COLOUR_WEIGHTS_PERCEPTUAL: ColourWeights = [0.2126, 0.7152, 0.0722];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Params {
    /// The compression algorithm to be used
    pub algorithm: Algorithm,

    /// Weigh the relative importance of each colour channel when fitting.
    /// `None` weighs all channels equally.
    pub weights: Option<ColourWeights>,

    /// Weigh colour by alpha during fitting (defaults to false)
    ///
    /// This can significantly increase perceived quality for images that are rendered
    /// using alpha blending.
    pub weigh_colour_by_alpha: bool,
}

/// Returns number of blocks needed for an image of given dimension
pub fn num_blocks(size: usize) -> usize {
    (size + 3) / 4
}

fn check_output(needed: usize, output: &[u8]) -> Result<()> {
    if output.len() < needed {
        return Err(Error::OutputTooSmall {
            needed,
            actual: output.len(),
        });
    }
    Ok(())
}

fn check_input(needed: usize, input: &[u8]) -> Result<()> {
    if input.len() < needed {
        return Err(Error::InputTooSmall {
            needed,
            actual: input.len(),
        });
    }
    Ok(())
}

impl Format {
    /// Returns how many bytes a 4x4 block of pixels will compress into
    pub fn block_size(self) -> usize {
        match self {
            Format::Dxt1 => 8,
            Format::Dxt3 | Format::Dxt5 => 16,
        }
    }

    /// Offset of the colour half within a block
    fn colour_offset(self) -> usize {
        match self {
            Format::Dxt1 => 0,
            Format::Dxt3 | Format::Dxt5 => 8,
        }
    }

    /// Computes the amount of space in bytes needed for an image of given size,
    /// accounting for padding to a multiple of 4x4 pixels
    ///
    /// * `width`  - Width of the uncompressed image
    /// * `height` - Height of the uncompressed image
    pub fn compressed_size(self, width: usize, height: usize) -> usize {
        let blocks = num_blocks(width) * num_blocks(height);
        blocks * self.block_size()
    }

    /// Compresses a 4x4 block of pixels, masking out some pixels e.g. for padding the
    /// image to a multiple of the block size.
    ///
    /// * `rgba`   - The uncompressed block of pixels
    /// * `mask`   - The valid pixel mask, bit `i` enables pixel `i`
    /// * `params` - Additional compressor parameters
    /// * `output` - Storage for the compressed block, at least `block_size()` bytes
    ///
    /// `output` is left untouched on error.
    pub fn compress_block_masked(
        self,
        rgba: &[[u8; 4]; 16],
        mask: u16,
        params: Params,
        output: &mut [u8],
    ) -> Result<()> {
        let block_size = self.block_size();
        check_output(block_size, output)?;

        // compress alpha separately if necessary
        let mut alpha_block = [0u8; 8];
        match self {
            Format::Dxt1 => {}
            Format::Dxt3 => alpha::compress_dxt3(rgba, mask, &mut alpha_block),
            Format::Dxt5 => alpha::compress_dxt5(rgba, mask, &mut alpha_block),
        }

        // create the minimal point set
        let colours = ColourSet::new(rgba, mask, self, params.weigh_colour_by_alpha);
        let weights = params.weights.unwrap_or(COLOUR_WEIGHTS_UNIFORM);

        let mut colour_block = [0u8; 8];
        if colours.count() == 1 {
            // only worth it for blocks of uniform colour, and it needs at least one
            log::trace!("{:?} block: single colour fit", self);
            SingleColourFit::new(&colours, self).compress(&mut colour_block)?;
        } else if params.algorithm == Algorithm::RangeFit || colours.count() == 0 {
            log::trace!("{:?} block: range fit over {} colours", self, colours.count());
            RangeFit::new(&colours, self, weights).compress(&mut colour_block)?;
        } else {
            let iterate = params.algorithm == Algorithm::IterativeClusterFit;
            log::trace!(
                "{:?} block: cluster fit over {} colours, iterate: {}",
                self,
                colours.count(),
                iterate
            );
            ClusterFit::new(&colours, self, weights, iterate).compress(&mut colour_block)?;
        }

        let offset = self.colour_offset();
        if offset != 0 {
            output[..offset].copy_from_slice(&alpha_block);
        }
        output[offset..block_size].copy_from_slice(&colour_block);

        Ok(())
    }

    /// Compresses a 4x4 block of pixels with every pixel enabled
    pub fn compress_block(self, rgba: &[[u8; 4]; 16], params: Params, output: &mut [u8]) -> Result<()> {
        self.compress_block_masked(rgba, 0xFFFF, params, output)
    }

    /// Decompresses a 4x4 block of pixels
    ///
    /// * `block` - The compressed block of pixels, at least `block_size()` bytes
    pub fn decompress_block(self, block: &[u8]) -> Result<[[u8; 4]; 16]> {
        self.check_decompressible()?;
        check_input(self.block_size(), block)?;

        let offset = self.colour_offset();
        let mut colour_block = [0u8; 8];
        colour_block.copy_from_slice(&block[offset..offset + 8]);

        let mut rgba = colourblock::decompress(&colour_block, self == Format::Dxt1);

        if self == Format::Dxt5 {
            let mut alpha_block = [0u8; 8];
            alpha_block.copy_from_slice(&block[..8]);
            alpha::decompress_dxt5(&alpha_block, &mut rgba);
        }

        Ok(rgba)
    }

    fn check_decompressible(self) -> Result<()> {
        if self == Format::Dxt3 {
            // TODO: decode the explicit 4-bit alpha once it can be checked against a reference decoder
            log::warn!("DXT3 decompression requested but not implemented");
            return Err(Error::Unsupported("DXT3 decompression"));
        }
        Ok(())
    }

    /// Compresses an image in memory
    ///
    /// * `rgba`   - The uncompressed pixel data, 4 bytes per pixel in row-major order
    /// * `width`  - The width of the source image
    /// * `height` - The height of the source image
    /// * `params` - Additional compressor parameters
    /// * `output` - Output buffer for the compressed image. Ensure that this has
    ///   at least as much space available as `compressed_size` suggests.
    pub fn compress(
        self,
        rgba: &[u8],
        width: usize,
        height: usize,
        params: Params,
        output: &mut [u8],
    ) -> Result<()> {
        check_input(width * height * 4, rgba)?;
        let size = self.compressed_size(width, height);
        check_output(size, output)?;

        log::debug!("compressing {}x{} image as {:?} with {:?}", width, height, self, params);
        if size == 0 {
            return Ok(());
        }

        let block_size = self.block_size();
        let blocks_wide = num_blocks(width);

        #[cfg(feature = "rayon")]
        let output_rows = output[..size].par_chunks_mut(blocks_wide * block_size);
        #[cfg(not(feature = "rayon"))]
        let output_rows = output[..size].chunks_mut(blocks_wide * block_size);

        output_rows.enumerate().try_for_each(|(y, output_row)| {
            let mut source_rgba = [[0u8; 4]; 16];

            for (x, output_block) in output_row.chunks_mut(block_size).enumerate() {
                // build the 4x4 block of pixels
                let mut mask = 0u16;
                for py in 0..4 {
                    for px in 0..4 {
                        let index = 4 * py + px;

                        // get position in source image
                        let sx = 4 * x + px;
                        let sy = 4 * y + py;

                        // enable pixel if within bounds
                        if sx < width && sy < height {
                            let src_index = 4 * (width * sy + sx);
                            source_rgba[index].copy_from_slice(&rgba[src_index..src_index + 4]);
                            mask |= 1 << index;
                        }
                    }
                }

                self.compress_block_masked(&source_rgba, mask, params, output_block)?;
            }

            Ok(())
        })
    }

    /// Decompresses an image in memory
    ///
    /// * `data`   - The compressed image data
    /// * `width`  - The width of the source image
    /// * `height` - The height of the source image
    /// * `output` - Space to store the decompressed image, 4 bytes per pixel
    pub fn decompress(self, data: &[u8], width: usize, height: usize, output: &mut [u8]) -> Result<()> {
        self.check_decompressible()?;
        check_input(self.compressed_size(width, height), data)?;
        let size = width * height * 4;
        check_output(size, output)?;

        log::debug!("decompressing {}x{} {:?} image", width, height, self);
        if size == 0 {
            return Ok(());
        }

        let blocks_wide = num_blocks(width);
        let block_size = self.block_size();

        // each chunk holds the pixels of one row of blocks
        #[cfg(feature = "rayon")]
        let output_rows = output[..size].par_chunks_mut(width * 4 * 4);
        #[cfg(not(feature = "rayon"))]
        let output_rows = output[..size].chunks_mut(width * 4 * 4);

        output_rows.enumerate().try_for_each(|(y, output_row)| {
            for x in 0..blocks_wide {
                let bidx = (x + y * blocks_wide) * block_size;
                let rgba = self.decompress_block(&data[bidx..bidx + block_size])?;

                // write the decompressed pixels to the correct image location
                for py in 0..4 {
                    for px in 0..4 {
                        let sx = 4 * x + px;
                        let sy = 4 * y + py;

                        if sx < width && sy < height {
                            let dst_index = 4 * (sx + py * width);
                            output_row[dst_index..dst_index + 4].copy_from_slice(&rgba[px + py * 4]);
                        }
                    }
                }
            }

            Ok(())
        })
    }
}
