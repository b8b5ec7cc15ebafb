use dxtc::flags::{self, storage_requirements};
use dxtc::{Algorithm, Error, Format, Params, COLOUR_WEIGHTS_PERCEPTUAL};
use rstest::rstest;

fn solid_block(colour: [u8; 4]) -> [[u8; 4]; 16] {
    [colour; 16]
}

#[test]
fn solid_red_round_trips_exactly() {
    let rgba = solid_block([255, 0, 0, 255]);
    let format = Format::from_flags(0);
    let params = Params::from_flags(0);

    let mut block = [0u8; 8];
    format.compress_block(&rgba, params, &mut block).unwrap();

    // both endpoints are pure red in 5:6:5, every index 0
    assert_eq!(u16::from_le_bytes([block[0], block[1]]), 0xF800);
    assert_eq!(block[4..], [0, 0, 0, 0]);

    assert_eq!(format.decompress_block(&block).unwrap(), rgba);
}

#[rstest]
#[case(Algorithm::RangeFit)]
#[case(Algorithm::ClusterFit)]
#[case(Algorithm::IterativeClusterFit)]
fn dxt1_punch_through_alpha(#[case] algorithm: Algorithm) {
    let mut rgba = [[0u8; 4]; 16];
    for (i, pixel) in rgba.iter_mut().enumerate() {
        let v = (i * 16) as u8;
        *pixel = if i % 3 == 0 { [v, v, v, 0] } else { [v, 255 - v, 64, 255] };
    }

    let params = Params {
        algorithm,
        ..Params::default()
    };
    let mut block = [0u8; 8];
    Format::Dxt1.compress_block(&rgba, params, &mut block).unwrap();

    let decoded = Format::Dxt1.decompress_block(&block).unwrap();
    for (original, decoded) in rgba.iter().zip(decoded.iter()) {
        if original[3] < 128 {
            assert_eq!(*decoded, [0, 0, 0, 0]);
        } else {
            assert_eq!(decoded[3], 255);
        }
    }
}

#[test]
fn dxt5_alpha_ramp() {
    let mut rgba = [[0u8; 4]; 16];
    for (i, pixel) in rgba.iter_mut().enumerate() {
        *pixel = [90, 180, 45, (i * 17) as u8];
    }

    let mut block = [0u8; 16];
    Format::Dxt5
        .compress_block(&rgba, Params::default(), &mut block)
        .unwrap();

    let decoded = Format::Dxt5.decompress_block(&block).unwrap();
    for (original, decoded) in rgba.iter().zip(decoded.iter()) {
        assert!(original[3].abs_diff(decoded[3]) <= 22);
        for channel in 0..3 {
            assert!(original[channel].abs_diff(decoded[channel]) <= 4);
        }
    }
}

#[test]
fn dxt3_alpha_is_quantised_to_nibbles() {
    let mut rgba = [[0u8; 4]; 16];
    for (i, pixel) in rgba.iter_mut().enumerate() {
        *pixel = [0, 0, 0, (i * 17) as u8];
    }

    let mut block = [0u8; 16];
    Format::Dxt3
        .compress_block(&rgba, Params::default(), &mut block)
        .unwrap();
    assert_eq!(block[..8], [0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE]);

    assert_eq!(
        Format::Dxt3.decompress_block(&block),
        Err(Error::Unsupported("DXT3 decompression"))
    );
}

#[test]
fn masked_pixels_are_ignored() {
    // only the first row is enabled; the rest is noise
    let mut rgba = [[0u8; 4]; 16];
    for (i, pixel) in rgba.iter_mut().enumerate() {
        *pixel = if i < 4 {
            [10, 20, 30, 255]
        } else {
            [(i * 37) as u8, (i * 91) as u8, (i * 13) as u8, 255]
        };
    }

    let mut masked = [0u8; 8];
    Format::Dxt1
        .compress_block_masked(&rgba, 0x000F, Params::default(), &mut masked)
        .unwrap();

    let mut solid = [0u8; 8];
    Format::Dxt1
        .compress_block(&solid_block([10, 20, 30, 255]), Params::default(), &mut solid)
        .unwrap();

    // same endpoints, and the enabled pixels get the same indices
    assert_eq!(masked[..5], solid[..5]);
}

#[test]
fn perceptual_weights_are_accepted() {
    let mut rgba = [[0u8; 4]; 16];
    for (i, pixel) in rgba.iter_mut().enumerate() {
        *pixel = [(i * 15) as u8, (i * 7) as u8, 255 - (i * 15) as u8, 255];
    }

    let params = Params {
        weights: Some(COLOUR_WEIGHTS_PERCEPTUAL),
        ..Params::default()
    };
    let mut block = [0u8; 16];
    Format::Dxt5.compress_block(&rgba, params, &mut block).unwrap();
    let decoded = Format::Dxt5.decompress_block(&block).unwrap();
    assert!(decoded.iter().all(|pixel| pixel[3] == 255));
}

#[test]
fn image_round_trip_with_padding() {
    // 6x5 checker of two colours, not a multiple of the block size
    let (width, height) = (6, 5);
    let mut rgba = vec![0u8; width * height * 4];
    for (i, pixel) in rgba.chunks_mut(4).enumerate() {
        let (x, y) = (i % width, i / width);
        let colour = if (x + y) % 2 == 0 {
            [0, 0, 0, 255]
        } else {
            [255, 255, 255, 255]
        };
        pixel.copy_from_slice(&colour);
    }

    let flags = flags::DXT5 | flags::COLOUR_ITERATIVE_CLUSTER_FIT;
    let format = Format::from_flags(flags);
    let mut compressed = vec![0u8; storage_requirements(width, height, flags)];
    assert_eq!(compressed.len(), 4 * 16);
    format
        .compress(&rgba, width, height, Params::from_flags(flags), &mut compressed)
        .unwrap();

    let mut output = vec![0u8; width * height * 4];
    format.decompress(&compressed, width, height, &mut output).unwrap();
    assert_eq!(output, rgba);
}

#[test]
fn undersized_buffers_are_rejected() {
    let rgba = [0u8; 4 * 4 * 4];
    let mut output = [0u8; 15];
    assert_eq!(
        Format::Dxt5.compress(&rgba, 4, 4, Params::default(), &mut output),
        Err(Error::OutputTooSmall {
            needed: 16,
            actual: 15
        })
    );
    assert_eq!(
        Format::Dxt1.compress_block_masked(&[[0u8; 4]; 16], 0xFFFF, Params::default(), &mut output[..4]),
        Err(Error::OutputTooSmall { needed: 8, actual: 4 })
    );
}
