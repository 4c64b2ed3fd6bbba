// Wavio -- A wav container inspection, decoding and encoding library in Rust
// Copyright (C) 2026 the wavio project authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::io::Cursor;

use wavio::SampleEncoding;

#[test]
fn roundtrip_mono_f32_is_bit_identical() {
    // A mix of exactly representable and rounded values; the float path
    // must reproduce all of them bit for bit.
    let samples: Vec<f32> = (0..512).map(|i| ((i * 37) % 101) as f32 / 101.0 - 0.5).collect();

    let mut stream = Cursor::new(Vec::new());
    wavio::write(&mut stream, 44100, &[&samples[..]]).unwrap();

    let mut decoded = vec![0.0f32; samples.len()];
    wavio::read(&mut stream, &mut [&mut decoded[..]]).unwrap();
    assert_eq!(decoded, samples);
}

#[test]
fn roundtrip_stereo_f32_is_bit_identical() {
    let left: Vec<f32> = (0..256).map(|i| (i as f32 / 256.0).sin()).collect();
    let right: Vec<f32> = left.iter().map(|s| -s).collect();

    let mut stream = Cursor::new(Vec::new());
    wavio::write(&mut stream, 48_000, &[&left[..], &right[..]]).unwrap();

    let mut left_out = vec![0.0f32; 256];
    let mut right_out = vec![0.0f32; 256];
    wavio::read(&mut stream, &mut [&mut left_out[..], &mut right_out[..]]).unwrap();

    assert_eq!(left_out, left);
    assert_eq!(right_out, right);
}

#[test]
fn written_stream_infers_expected_descriptor() {
    let left = [0.0f32; 100];
    let right = [0.0f32; 100];
    let mut stream = Cursor::new(Vec::new());
    wavio::write(&mut stream, 96_000, &[&left[..], &right[..]]).unwrap();

    let descriptor = wavio::infer(&mut stream).unwrap();
    assert_eq!(descriptor.sample_rate, 96_000);
    assert_eq!(descriptor.sample_count, 100);
    assert_eq!(descriptor.channel_count, 2);
    assert_eq!(descriptor.encoding, SampleEncoding::F32);
    // Descriptor header, fmt chunk, fact chunk and the data chunk header.
    assert_eq!(descriptor.data_offset, (12 + 26 + 12 + 8) as u64);
}

#[test]
fn f64_buffers_survive_the_f32_container() {
    // Encoding narrows f64 sources to f32; decoding back into f64 buffers
    // must produce exactly the narrowed values.
    let samples = [0.5f64, -0.125, 0.3, -0.7];
    let mut stream = Cursor::new(Vec::new());
    wavio::write(&mut stream, 22_050, &[&samples[..]]).unwrap();

    let mut decoded = [0.0f64; 4];
    wavio::read(&mut stream, &mut [&mut decoded[..]]).unwrap();

    for (out, orig) in decoded.iter().zip(&samples) {
        assert_eq!(*out, *orig as f32 as f64);
    }
}

#[test]
fn roundtrip_works_on_files_not_just_in_memory() {
    let path = std::env::temp_dir().join("wavio-roundtrip-test.wav");
    let samples: Vec<f32> = (0..64).map(|i| i as f32 / 64.0).collect();

    wavio::write_path(&path, 44100, &[&samples[..]]).unwrap();

    // The on-disk size is fully determined by the frame count: 58 header
    // bytes plus 4 bytes per sample.
    assert_eq!(fs::metadata(&path).unwrap().len(), 58 + 64 * 4);

    let descriptor = wavio::infer_path(&path).unwrap();
    assert_eq!(descriptor.sample_count, 64);

    let mut decoded = vec![0.0f32; 64];
    wavio::read_path(&path, &mut [&mut decoded[..]]).unwrap();
    assert_eq!(decoded, samples);

    let _ = fs::remove_file(&path);
}

#[test]
fn encoded_silence_decodes_to_silence() {
    let silence = [0.0f32; 1000];
    let mut stream = Cursor::new(Vec::new());
    wavio::write(&mut stream, 8000, &[&silence[..]]).unwrap();

    let mut decoded = [1.0f32; 1000];
    wavio::read(&mut stream, &mut [&mut decoded[..]]).unwrap();
    assert!(decoded.iter().all(|&s| s == 0.0));
}
