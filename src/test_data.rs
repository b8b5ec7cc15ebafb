//! Static block patterns for unit tests, named `<FORMAT>_<PATTERN>`.
//! Patterns in use: `GRAY`, `COLOUR` and `SOLID_RED`.

/// The encoded and decoded values of a single 4x4 block of pixels
#[derive(Clone, Copy)]
pub struct TestDataSet {
    pub format: crate::Format,
    pub encoded: &'static [u8],
    pub decoded: &'static [u8],
}

/// A gray-scale checkerboard starting with 0xFF in the top-left, with the four
/// middle pixels set to 0x7F. Encoded with AMD Compressonator v4.1.5083.
pub const DXT1_GRAY: TestDataSet = TestDataSet {
    format: crate::Format::Dxt1,
    encoded: &[0x00, 0x00, 0xFF, 0xFF, 0x11, 0x68, 0x29, 0x44],
    decoded: &add_alpha_to_rgb(
        &expand_single_to_rgb(&[
            0xFF, 0x00, 0xFF, 0x00, // row 0
            0x00, 0x7F, 0x7F, 0xFF, // row 1
            0xFF, 0x7F, 0x7F, 0x00, // row 2
            0x00, 0xFF, 0x00, 0xFF, // row 3
        ]),
        0xFF,
    ),
};

/// First row in one colour, the second in another, the rest in a third
const COLOUR_BLOCK_RGB: [u8; 4 * 4 * 3] = [
    0xFF, 0x96, 0x4A, 0xFF, 0x96, 0x4A, // row 0, left half
    0xFF, 0x96, 0x4A, 0xFF, 0x96, 0x4A, // row 0, right half
    0xFF, 0x78, 0x34, 0xFF, 0x78, 0x34, // row 1, left half
    0xFF, 0x78, 0x34, 0xFF, 0x78, 0x34, // row 1, right half
    0xFF, 0x69, 0x29, 0xFF, 0x69, 0x29, // row 2, left half
    0xFF, 0x69, 0x29, 0xFF, 0x69, 0x29, // row 2, right half
    0xFF, 0x69, 0x29, 0xFF, 0x69, 0x29, // row 3, left half
    0xFF, 0x69, 0x29, 0xFF, 0x69, 0x29, // row 3, right half
];

/// Like `DXT1_GRAY` but with the middle pixels at 0x55
const GRAY_BLOCK_LUMA: [u8; 4 * 4] = [
    0xFF, 0x00, 0xFF, 0x00, // row 0
    0x00, 0x55, 0x55, 0xFF, // row 1
    0xFF, 0x55, 0x55, 0x00, // row 2
    0x00, 0xFF, 0x00, 0xFF, // row 3
];

/// Encoded with AMD Compressonator v4.1.5083, identical to libsquish
pub const DXT1_COLOUR: TestDataSet = TestDataSet {
    format: crate::Format::Dxt1,
    encoded: &[0xA9, 0xFC, 0x45, 0xFB, 0x00, 0xFF, 0x55, 0x55],
    decoded: &add_alpha_to_rgb(&COLOUR_BLOCK_RGB, 0xFF),
};

/// Pure red everywhere: both endpoints 0xF800, all indices 0
pub const DXT1_SOLID_RED: TestDataSet = TestDataSet {
    format: crate::Format::Dxt1,
    encoded: &[0x00, 0xF8, 0x00, 0xF8, 0x00, 0x00, 0x00, 0x00],
    decoded: &add_alpha_to_rgb(&solid_rgb([0xFF, 0x00, 0x00]), 0xFF),
};

/// `GRAY_BLOCK_LUMA` with an alpha ramp from 0x00 in steps of 0x11
pub const DXT3_GRAY: TestDataSet = TestDataSet {
    format: crate::Format::Dxt3,
    encoded: &[
        0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE, // Alpha
        0xFF, 0xFF, 0x00, 0x00, 0x44, 0x3D, 0x7C, 0x11, // Colour
    ],
    decoded: &add_alpha_ramp_to_rgb(&expand_single_to_rgb(&GRAY_BLOCK_LUMA)),
};

/// `DXT1_COLOUR` with an alpha ramp from 0x00 in steps of 0x11
pub const DXT3_COLOUR: TestDataSet = TestDataSet {
    format: crate::Format::Dxt3,
    encoded: &[
        0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE, // Alpha
        0xA9, 0xFC, 0x45, 0xFB, 0x00, 0xFF, 0x55, 0x55, // Colour
    ],
    decoded: &add_alpha_ramp_to_rgb(&COLOUR_BLOCK_RGB),
};

/// Fills every pixel with the same RGB value
const fn solid_rgb(rgb: [u8; 3]) -> [u8; 4 * 4 * 3] {
    let mut output = [0u8; 4 * 4 * 3];
    let mut i = 0;
    while i < 4 * 4 {
        output[i * 3] = rgb[0];
        output[i * 3 + 1] = rgb[1];
        output[i * 3 + 2] = rgb[2];
        i += 1;
    }
    output
}

/// Expands a single value per pixel into the RGB channels
const fn expand_single_to_rgb(input: &[u8; 4 * 4]) -> [u8; 4 * 4 * 3] {
    let mut output = [0u8; 4 * 4 * 3];
    let mut i = 0;
    // no for loops in const fn
    while i < input.len() {
        output[i * 3] = input[i]; // R
        output[i * 3 + 1] = input[i]; // G
        output[i * 3 + 2] = input[i]; // B
        i += 1;
    }
    output
}

/// Adds a constant alpha to RGB data
const fn add_alpha_to_rgb(input: &[u8; 4 * 4 * 3], alpha: u8) -> [u8; 4 * 4 * 4] {
    let mut output = [0u8; 4 * 4 * 4];
    let mut i = 0;
    while i < 4 * 4 {
        output[i * 4] = input[i * 3];
        output[i * 4 + 1] = input[i * 3 + 1];
        output[i * 4 + 2] = input[i * 3 + 2];
        output[i * 4 + 3] = alpha;
        i += 1;
    }
    output
}

/// Adds a linear alpha ramp from 0x00 at the first pixel to 0xFF at the last
const fn add_alpha_ramp_to_rgb(input: &[u8; 4 * 4 * 3]) -> [u8; 4 * 4 * 4] {
    let mut output = [0u8; 4 * 4 * 4];
    let mut i = 0;
    while i < 4 * 4 {
        output[i * 4] = input[i * 3];
        output[i * 4 + 1] = input[i * 3 + 1];
        output[i * 4 + 2] = input[i * 3 + 2];
        output[i * 4 + 3] = (i * 0x11) as u8;
        i += 1;
    }
    output
}
