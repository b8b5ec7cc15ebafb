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
use crate::math::{Sym3x3, Vec3, Vec4};
use crate::{ColourWeights, Format, Result};

use super::ColourFitImpl;

pub const MAX_ITERATIONS: usize = 8;

/// Least squares fit over every contiguous partition of the points ordered
/// along an axis, optionally refining the axis from the best solution.
pub struct ClusterFit<'a> {
    colourset: &'a ColourSet,
    format: Format,
    metric: Vec4,
    iterations: usize,
    principle: Vec3,
    best_error: f32,
    best_compressed: [u8; 8],
}

/// The permutations tried so far within one search, one per iteration
pub struct OrderingCache {
    orders: [[u8; 16]; MAX_ITERATIONS],
}

/// The points of one ordering, premultiplied by their weight, as
/// `(w*r, w*g, w*b, w)`
pub struct WeightedOrdering {
    points: [Vec4; 16],
    total: Vec4,
}

/// Best partition found so far. Groups are `[0,i)`, `[i,j)`, `[j,k)` and
/// `[k,count)`; 3-colour partitions have `j == k`.
#[derive(Clone, Copy)]
struct Partition {
    start: Vec4,
    end: Vec4,
    error: f32,
    iteration: usize,
    cuts: [usize; 3],
}

impl OrderingCache {
    pub fn new() -> Self {
        OrderingCache {
            orders: [[0u8; 16]; MAX_ITERATIONS],
        }
    }

    /// Sorts the points by their projection onto `axis` and records the
    /// permutation for `iteration`. Returns `None` if the permutation equals
    /// one recorded for an earlier iteration.
    pub fn construct(
        &mut self,
        colourset: &ColourSet,
        axis: &Vec3,
        iteration: usize,
    ) -> Option<WeightedOrdering> {
        debug_assert!(iteration < MAX_ITERATIONS);
        let count = colourset.count();
        let values = colourset.points();

        // stable insertion sort on the dot products
        let mut dps = [0f32; 16];
        let order = &mut self.orders[iteration];
        for (i, (dp, value)) in dps.iter_mut().zip(values).enumerate() {
            *dp = value.dot(axis);
            order[i] = i as u8;
        }
        for i in 0..count {
            let mut j = i;
            while j > 0 && dps[j] < dps[j - 1] {
                dps.swap(j, j - 1);
                order.swap(j, j - 1);
                j -= 1;
            }
        }

        // reject orderings we have already searched
        let (previous, current) = self.orders.split_at(iteration);
        let current = &current[0][..count];
        if previous.iter().any(|order| &order[..count] == current) {
            return None;
        }

        let weights = colourset.weights();
        let mut ordering = WeightedOrdering {
            points: [Vec4::splat(0.0); 16],
            total: Vec4::splat(0.0),
        };
        for (point, &j) in ordering.points.iter_mut().zip(current) {
            let j = j as usize;
            *point = Vec4::from_vec3(values[j], 1.0) * Vec4::splat(weights[j]);
            ordering.total += *point;
        }

        Some(ordering)
    }

    pub fn order(&self, iteration: usize) -> &[u8; 16] {
        &self.orders[iteration]
    }
}

const GRID: Vec4 = Vec4::new(31.0, 63.0, 31.0, 0.0);
const GRIDRCP: Vec4 = Vec4::new(1.0 / 31.0, 1.0 / 63.0, 1.0 / 31.0, 0.0);

/// Solves the 2x2 normal equations for the endpoint pair, snaps it to the
/// 5:6:5 grid and returns it with its error. The constant `sum(x^2)` term is
/// left out of the error since only comparisons matter.
#[inline]
fn solve(
    alphax_sum: Vec4,
    betax_sum: Vec4,
    alphabeta_sum: Vec4,
    metric: Vec4,
) -> (Vec4, Vec4, f32) {
    let zero = Vec4::splat(0.0);
    let one = Vec4::splat(1.0);
    let two = Vec4::splat(2.0);
    let half = Vec4::splat(0.5);

    let alpha2_sum = alphax_sum.splat_w();
    let beta2_sum = betax_sum.splat_w();

    // least-squares optimal points
    let factor = alphabeta_sum
        .neg_mul_sub(alphabeta_sum, alpha2_sum * beta2_sum)
        .reciprocal();
    let a = betax_sum.neg_mul_sub(alphabeta_sum, alphax_sum * beta2_sum) * factor;
    let b = alphax_sum.neg_mul_sub(alphabeta_sum, betax_sum * alpha2_sum) * factor;

    // clamp to the grid
    let a = one.min(zero.max(a));
    let b = one.min(zero.max(b));
    let a = GRID.mul_add(a, half).truncate() * GRIDRCP;
    let b = GRID.mul_add(b, half).truncate() * GRIDRCP;

    let e1 = (a * a).mul_add(alpha2_sum, b * b * beta2_sum);
    let e2 = a.neg_mul_sub(alphax_sum, a * b * alphabeta_sum);
    let e3 = b.neg_mul_sub(betax_sum, e2);
    let e4 = two.mul_add(e3, e1);

    // weigh the channels
    let e5 = e4 * metric;
    (a, b, e5.x() + e5.y() + e5.z())
}

/// Tries every split into `start | half | end` groups. Returns whether `best`
/// was improved.
fn enumerate3(
    ordering: &WeightedOrdering,
    count: usize,
    metric: Vec4,
    iteration: usize,
    best: &mut Partition,
) -> bool {
    let zero = Vec4::splat(0.0);
    let half_half2 = Vec4::new(0.5, 0.5, 0.5, 0.25);
    let points = &ordering.points;
    let mut improved = false;

    // first cluster [0,i) is at the start
    let mut part0 = zero;
    for i in 0..count {
        // second cluster [i,j) is halfway along; never leave everything in the first
        let mut part1 = if i == 0 { points[0] } else { zero };
        let jmin = if i == 0 { 1 } else { i };

        for j in jmin..=count {
            // last cluster [j,count) is at the end
            let part2 = ordering.total - part1 - part0;

            let alphax_sum = part1.mul_add(half_half2, part0);
            let betax_sum = part1.mul_add(half_half2, part2);
            let alphabeta_sum = (part1 * half_half2).splat_w();

            let (a, b, error) = solve(alphax_sum, betax_sum, alphabeta_sum, metric);
            if error < best.error {
                *best = Partition {
                    start: a,
                    end: b,
                    error,
                    iteration,
                    cuts: [i, j, j],
                };
                improved = true;
            }

            if j < count {
                part1 += points[j];
            }
        }

        part0 += points[i];
    }

    improved
}

/// Tries every split into `start | 1/3 | 2/3 | end` groups. Returns whether
/// `best` was improved.
fn enumerate4(
    ordering: &WeightedOrdering,
    count: usize,
    metric: Vec4,
    iteration: usize,
    best: &mut Partition,
) -> bool {
    let zero = Vec4::splat(0.0);
    let onethird_onethird2 = Vec4::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 9.0);
    let twothirds_twothirds2 = Vec4::new(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 4.0 / 9.0);
    let twoninths = Vec4::splat(2.0 / 9.0);
    let points = &ordering.points;
    let mut improved = false;

    // first cluster [0,i) is at the start
    let mut part0 = zero;
    for i in 0..count {
        // second cluster [i,j) is one third along
        let mut part1 = zero;

        for j in i..=count {
            // third cluster [j,k) is two thirds along
            let mut part2 = if j == 0 { points[0] } else { zero };
            let kmin = if j == 0 { 1 } else { j };

            for k in kmin..=count {
                // last cluster [k,count) is at the end
                let part3 = ordering.total - part2 - part1 - part0;

                let alphax_sum = part2.mul_add(
                    onethird_onethird2,
                    part1.mul_add(twothirds_twothirds2, part0),
                );
                let betax_sum = part1.mul_add(
                    onethird_onethird2,
                    part2.mul_add(twothirds_twothirds2, part3),
                );
                let alphabeta_sum = twoninths * (part1 + part2).splat_w();

                let (a, b, error) = solve(alphax_sum, betax_sum, alphabeta_sum, metric);
                if error < best.error {
                    *best = Partition {
                        start: a,
                        end: b,
                        error,
                        iteration,
                        cuts: [i, j, k],
                    };
                    improved = true;
                }

                if k < count {
                    part2 += points[k];
                }
            }

            if j < count {
                part1 += points[j];
            }
        }

        part0 += points[i];
    }

    improved
}

type Enumerate = fn(&WeightedOrdering, usize, Vec4, usize, &mut Partition) -> bool;

impl<'a> ClusterFit<'a> {
    pub fn new(
        colourset: &'a ColourSet,
        format: Format,
        metric: ColourWeights,
        iterate: bool,
    ) -> Self {
        let covariance = Sym3x3::weighted_covariance(colourset.points(), colourset.weights());

        ClusterFit {
            colourset,
            format,
            metric: Vec4::new(metric[0], metric[1], metric[2], 1.0),
            iterations: if iterate { MAX_ITERATIONS } else { 1 },
            principle: covariance.principle_component(),
            best_error: f32::MAX,
            best_compressed: [0u8; 8],
        }
    }

    /// Hill-climbs over orderings: each iteration searches all partitions of
    /// the current ordering, then reorders along the axis between the best
    /// endpoints. Stops when an iteration brings no improvement, the axis
    /// yields an ordering already searched, or the iteration cap is reached.
    ///
    /// Returns per-pixel indices and endpoints if the running best was beaten.
    fn search(&self, enumerate: Enumerate) -> Option<([u8; 16], Vec3, Vec3, f32)> {
        let count = self.colourset.count();
        let mut cache = OrderingCache::new();
        let mut best = Partition {
            start: Vec4::splat(0.0),
            end: Vec4::splat(0.0),
            error: self.best_error,
            iteration: 0,
            cuts: [0; 3],
        };

        let mut axis = self.principle;
        for iteration in 0..self.iterations {
            let ordering = match cache.construct(self.colourset, &axis, iteration) {
                Some(ordering) => ordering,
                None => break,
            };

            if !enumerate(&ordering, count, self.metric, iteration, &mut best) {
                break;
            }

            axis = (best.end - best.start).to_vec3();
        }

        if best.error >= self.best_error {
            return None;
        }

        log::trace!(
            "cluster fit: error {} after {} iteration(s)",
            best.error,
            best.iteration + 1
        );

        // map the winning groups back to palette indices
        let order = cache.order(best.iteration);
        let [i, j, k] = best.cuts;
        let mut unordered = [0u8; 16];
        for (m, &point) in order[..count].iter().enumerate() {
            unordered[point as usize] = match m {
                m if m < i => 0,
                m if m < j => 2,
                m if m < k => 3,
                _ => 1,
            };
        }

        let mut indices = [0u8; 16];
        self.colourset.remap_indices(&unordered, &mut indices);

        Some((indices, best.start.to_vec3(), best.end.to_vec3(), best.error))
    }
}

impl<'a> ColourFitImpl for ClusterFit<'a> {
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
        if let Some((indices, start, end, error)) = self.search(enumerate3) {
            colourblock::write3(&start, &end, &indices, &mut self.best_compressed);
            self.best_error = error;
        }
        Ok(())
    }

    fn compress4(&mut self) -> Result<()> {
        if let Some((indices, start, end, error)) = self.search(enumerate4) {
            colourblock::write4(&start, &end, &indices, &mut self.best_compressed);
            self.best_error = error;
        }
        Ok(())
    }
}
