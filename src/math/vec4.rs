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

use core::ops::{Add, AddAssign, Mul, Sub};

use super::Vec3;

/// A 4-lane float vector. The cluster fit keeps RGB in the first three lanes
/// and a weight (or weight product) in `w`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec4 {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn splat(s: f32) -> Self {
        Self::new(s, s, s, s)
    }

    pub fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x(), v.y(), v.z(), w)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn w(&self) -> f32 {
        self.w
    }

    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn splat_x(&self) -> Vec4 {
        Vec4::splat(self.x)
    }

    pub fn splat_y(&self) -> Vec4 {
        Vec4::splat(self.y)
    }

    pub fn splat_z(&self) -> Vec4 {
        Vec4::splat(self.z)
    }

    pub fn splat_w(&self) -> Vec4 {
        Vec4::splat(self.w)
    }

    /// `self * b + c`, evaluated as a separate multiply and add so results
    /// match the scalar reference bit for bit
    pub fn mul_add(&self, b: Vec4, c: Vec4) -> Vec4 {
        *self * b + c
    }

    /// `c - self * b`
    pub fn neg_mul_sub(&self, b: Vec4, c: Vec4) -> Vec4 {
        c - *self * b
    }

    pub fn min(&self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
            self.w.min(other.w),
        )
    }

    pub fn max(&self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
            self.w.max(other.w),
        )
    }

    pub fn reciprocal(&self) -> Vec4 {
        Vec4::new(1.0 / self.x, 1.0 / self.y, 1.0 / self.z, 1.0 / self.w)
    }

    pub fn truncate(&self) -> Vec4 {
        Vec4::new(
            libm::truncf(self.x),
            libm::truncf(self.y),
            libm::truncf(self.z),
            libm::truncf(self.w),
        )
    }
}

macro_rules! vec4_binop {
    ($trait:ident, $fn:ident, $op:tt) => {
        impl $trait for Vec4 {
            type Output = Vec4;

            fn $fn(self, other: Vec4) -> Vec4 {
                Vec4::new(
                    self.x $op other.x,
                    self.y $op other.y,
                    self.z $op other.z,
                    self.w $op other.w,
                )
            }
        }

        impl<'a> $trait<&'a Vec4> for Vec4 {
            type Output = Vec4;

            fn $fn(self, other: &'a Vec4) -> Vec4 {
                self $op *other
            }
        }

        impl $trait<f32> for Vec4 {
            type Output = Vec4;

            fn $fn(self, other: f32) -> Vec4 {
                self $op Vec4::splat(other)
            }
        }
    };
}

vec4_binop!(Add, add, +);
vec4_binop!(Sub, sub, -);
vec4_binop!(Mul, mul, *);

impl AddAssign for Vec4 {
    fn add_assign(&mut self, other: Vec4) {
        *self = *self + other;
    }
}
