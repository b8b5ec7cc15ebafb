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

use core::iter::Sum;
use core::ops::{Add, Div, Mul, Sub};

/// A 3-lane float vector, used for RGB colour points
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(s: f32) -> Self {
        Self { x: s, y: s, z: s }
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

    pub fn dot(&self, other: &Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length2(&self) -> f32 {
        self.dot(self)
    }

    pub fn min(&self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    pub fn max(&self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Rounds each lane towards zero
    pub fn truncate(&self) -> Vec3 {
        Vec3::new(
            libm::truncf(self.x),
            libm::truncf(self.y),
            libm::truncf(self.z),
        )
    }
}

macro_rules! vec3_binop {
    ($trait:ident, $fn:ident, $op:tt) => {
        impl $trait for Vec3 {
            type Output = Vec3;

            fn $fn(self, other: Vec3) -> Vec3 {
                Vec3::new(self.x $op other.x, self.y $op other.y, self.z $op other.z)
            }
        }

        impl<'a> $trait<&'a Vec3> for Vec3 {
            type Output = Vec3;

            fn $fn(self, other: &'a Vec3) -> Vec3 {
                self $op *other
            }
        }

        impl<'a> $trait<Vec3> for &'a Vec3 {
            type Output = Vec3;

            fn $fn(self, other: Vec3) -> Vec3 {
                *self $op other
            }
        }

        impl<'a> $trait for &'a Vec3 {
            type Output = Vec3;

            fn $fn(self, other: &'a Vec3) -> Vec3 {
                *self $op *other
            }
        }

        impl $trait<f32> for Vec3 {
            type Output = Vec3;

            fn $fn(self, other: f32) -> Vec3 {
                Vec3::new(self.x $op other, self.y $op other, self.z $op other)
            }
        }

        impl<'a> $trait<f32> for &'a Vec3 {
            type Output = Vec3;

            fn $fn(self, other: f32) -> Vec3 {
                *self $op other
            }
        }
    };
}

vec3_binop!(Add, add, +);
vec3_binop!(Sub, sub, -);
vec3_binop!(Mul, mul, *);

impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, other: f32) -> Vec3 {
        Vec3::new(self.x / other, self.y / other, self.z / other)
    }
}

impl Sum for Vec3 {
    fn sum<I: Iterator<Item = Vec3>>(iter: I) -> Vec3 {
        iter.fold(Vec3::splat(0.0), |acc, v| acc + v)
    }
}
