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

//! Integer flag surface, for callers that configure the codec with a single
//! bit set. Any combination is accepted; see [`Format::from_flags`] and
//! [`Params::from_flags`] for how it is normalised.

use crate::{Algorithm, Format, Params};

pub const DXT1: u32 = 1 << 0;
pub const DXT3: u32 = 1 << 1;
pub const DXT5: u32 = 1 << 2;

pub const COLOUR_CLUSTER_FIT: u32 = 1 << 3;
pub const COLOUR_RANGE_FIT: u32 = 1 << 4;
pub const WEIGHT_COLOUR_BY_ALPHA: u32 = 1 << 7;
pub const COLOUR_ITERATIVE_CLUSTER_FIT: u32 = 1 << 8;

const METHOD_MASK: u32 = DXT1 | DXT3 | DXT5;
const FIT_MASK: u32 = COLOUR_CLUSTER_FIT | COLOUR_RANGE_FIT | COLOUR_ITERATIVE_CLUSTER_FIT;

impl Format {
    /// Picks the format from `flags`. Anything other than exactly one of
    /// `DXT3` or `DXT5` falls back to DXT1.
    pub fn from_flags(flags: u32) -> Self {
        match flags & METHOD_MASK {
            DXT3 => Format::Dxt3,
            DXT5 => Format::Dxt5,
            _ => Format::Dxt1,
        }
    }
}

impl Algorithm {
    /// Anything other than exactly one of the range or iterative fits falls
    /// back to cluster fit.
    pub fn from_flags(flags: u32) -> Self {
        match flags & FIT_MASK {
            COLOUR_RANGE_FIT => Algorithm::RangeFit,
            COLOUR_ITERATIVE_CLUSTER_FIT => Algorithm::IterativeClusterFit,
            _ => Algorithm::ClusterFit,
        }
    }
}

impl Params {
    /// Builds parameters from `flags`, with the default (uniform) channel weights
    pub fn from_flags(flags: u32) -> Self {
        Params {
            algorithm: Algorithm::from_flags(flags),
            weights: None,
            weigh_colour_by_alpha: flags & WEIGHT_COLOUR_BY_ALPHA != 0,
        }
    }
}

/// Number of bytes needed to store an image compressed with the format
/// selected by `flags`
pub fn storage_requirements(width: usize, height: usize, flags: u32) -> usize {
    Format::from_flags(flags).compressed_size(width, height)
}
