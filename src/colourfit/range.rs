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
use crate::math::{Sym3x3, Vec3};
use crate::{ColourWeights, Error, Format, Result};

use super::ColourFitImpl;

/// Fast fit using the extremes of the point set along its principal axis
pub struct RangeFit<'a> {
    colourset: &'a ColourSet,
    format: Format,
    metric: Vec3,
    start: Vec3,
    end: Vec3,
    best_error: f32,
    best_compressed: [u8; 8],
}

impl<'a> RangeFit<'a> {
    pub fn new(colourset: &'a ColourSet, format: Format, metric: ColourWeights) -> Self {
        let values = colourset.points();

        let covariance = Sym3x3::weighted_covariance(values, colourset.weights());
        let principle = covariance.principle_component();

        // the extreme projections become the endpoints, first seen wins on ties
        let mut start = Vec3::splat(0.0);
        let mut end = Vec3::splat(0.0);
        if let Some(&first) = values.first() {
            start = first;
            end = first;
            let mut min = first.dot(&principle);
            let mut max = min;
            for &value in &values[1..] {
                let dot = value.dot(&principle);
                if dot < min {
                    start = value;
                    min = dot;
                } else if dot > max {
                    end = value;
                    max = dot;
                }
            }
        }

        // clamp to [0, 1] and snap to the 5:6:5 grid
        let one = Vec3::splat(1.0);
        let zero = Vec3::splat(0.0);
        let grid = Vec3::new(31.0, 63.0, 31.0);
        let gridrcp = Vec3::new(1.0 / 31.0, 1.0 / 63.0, 1.0 / 31.0);
        let half = Vec3::splat(0.5);
        let snap = |v: Vec3| (grid * one.min(zero.max(v)) + half).truncate() * gridrcp;

        RangeFit {
            colourset,
            format,
            metric: Vec3::new(metric[0], metric[1], metric[2]),
            start: snap(start),
            end: snap(end),
            best_error: f32::MAX,
            best_compressed: [0u8; 8],
        }
    }

    /// Assigns every point to its nearest code. Returns the per-pixel indices
    /// if the total error beats the best so far.
    fn fit_codes(&mut self, codes: &[Vec3]) -> Option<[u8; 16]> {
        let mut closest = [0u8; 16];
        let mut error = 0.0;

        for (value, closest) in self.colourset.points().iter().zip(closest.iter_mut()) {
            let mut dist = f32::MAX;
            for (j, code) in codes.iter().enumerate() {
                let d = (self.metric * (value - code)).length2();
                if d < dist {
                    dist = d;
                    *closest = j as u8;
                }
            }
            error += dist;
        }

        if error < self.best_error {
            self.best_error = error;
            let mut indices = [0u8; 16];
            self.colourset.remap_indices(&closest, &mut indices);
            Some(indices)
        } else {
            None
        }
    }
}

impl<'a> ColourFitImpl for RangeFit<'a> {
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
        let codes = [self.start, self.end, self.start * 0.5 + self.end * 0.5];

        if let Some(indices) = self.fit_codes(&codes) {
            colourblock::write3(&self.start, &self.end, &indices, &mut self.best_compressed);
        }

        Ok(())
    }

    fn compress4(&mut self) -> Result<()> {
        // TODO: 4-colour range fit once there is a reference encoder to validate against
        log::warn!("4-colour range fit requested but not implemented");
        Err(Error::Unsupported("4-colour range fit"))
    }
}
