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
use std::io;
use std::io::Write;
use std::path;
use super::{Error, FloatSample, Result};

/// Extends the functionality of `io::Write` with additional methods.
///
/// The methods may be used on any type that implements `io::Write`.
trait WriteExt: io::Write {
    /// Writes an unsigned 16-bit integer in little endian format.
    fn write_le_u16(&mut self, x: u16) -> io::Result<()>;

    /// Writes an unsigned 32-bit integer in little endian format.
    fn write_le_u32(&mut self, x: u32) -> io::Result<()>;
}

impl<W> WriteExt for W where W: io::Write {
    fn write_le_u16(&mut self, x: u16) -> io::Result<()> {
        self.write_all(&x.to_le_bytes())
    }

    fn write_le_u32(&mut self, x: u32) -> io::Result<()> {
        self.write_all(&x.to_le_bytes())
    }
}

/// The payload size of the fmt chunk the encoder emits, the 18-byte
/// WAVEFORMATEX layout with a zero extension size.
const FMT_CHUNK_LEN: u32 = 18;

/// The payload size of the fact chunk, a single 32-bit sample length.
const FACT_CHUNK_LEN: u32 = 4;

/// Folds per-channel buffers into one flat frame-major f32 buffer.
///
/// Sample `channels[c][frame]` lands at index `frame * n + c`, the exact
/// inverse of deinterleaving. Values are cast to `f32` without rescaling;
/// the buffers are assumed to hold float-domain samples already.
fn interleave<S: FloatSample>(channels: &[&[S]], frames: usize) -> Vec<f32> {
    let n = channels.len();
    let mut flat = Vec::with_capacity(frames * n);
    for frame in 0..frames {
        for channel in channels {
            flat.push(channel[frame].to_f32());
        }
    }
    flat
}

/// Encodes per-channel sample buffers as a 32-bit IEEE float wav stream.
///
/// The emitted container always has the same shape: the RIFF descriptor
/// header, an 18-byte fmt chunk with format code 3 (IEEE float, 32 bits per
/// sample), a fact chunk carrying the total sample count (frames times
/// channels), and the data chunk. Every declared size matches the payload
/// actually written and there are no padding bytes, so encoding the same
/// input always produces the same bytes.
///
/// One channel is written per buffer, in order. At least one buffer is
/// required and all buffers must have the same length. The encode is
/// one-shot and never seeks back over what it wrote, so `writer` does not
/// need to implement `io::Seek`.
pub fn write<W, S>(writer: &mut W, sample_rate: u32, channels: &[&[S]]) -> Result<()>
where
    W: io::Write,
    S: FloatSample,
{
    let frames = match channels.first() {
        Some(first) => first.len(),
        None => return Err(Error::FormatError("at least one channel buffer is required")),
    };
    if channels.iter().any(|c| c.len() != frames) {
        return Err(Error::UnequalBufferLengths);
    }

    let channel_count = channels.len() as u32;
    let sample_total = frames as u32 * channel_count;
    let data_len = sample_total * 4;

    // Everything after the RIFF size field: the WAVE marker plus three
    // chunks, headers included.
    let riff_len = 4 + (8 + FMT_CHUNK_LEN) + (8 + FACT_CHUNK_LEN) + (8 + data_len);

    writer.write_all(b"RIFF")?;
    writer.write_le_u32(riff_len)?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_le_u32(FMT_CHUNK_LEN)?;
    writer.write_le_u16(3)?; // WAVE_FORMAT_IEEE_FLOAT
    writer.write_le_u16(channel_count as u16)?;
    writer.write_le_u32(sample_rate)?;
    writer.write_le_u32(sample_rate * channel_count * 4)?; // byte rate
    writer.write_le_u16(channel_count as u16 * 4)?; // block align
    writer.write_le_u16(32)?; // bits per sample
    writer.write_le_u16(0)?; // extension size

    // Non-PCM formats carry a fact chunk ahead of the data chunk; its
    // payload is the total sample length.
    writer.write_all(b"fact")?;
    writer.write_le_u32(FACT_CHUNK_LEN)?;
    writer.write_le_u32(sample_total)?;

    writer.write_all(b"data")?;
    writer.write_le_u32(data_len)?;

    let flat = interleave(channels, frames);
    let mut data = Vec::with_capacity(flat.len() * 4);
    for sample in &flat {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    writer.write_all(&data)?;

    Ok(())
}

/// Encodes per-channel buffers into a new wav file at `path`.
///
/// This is a convenience wrapper that creates the file, overwriting one
/// that already exists, writes through an `io::BufWriter` and delegates to
/// the stream-based [`write`]. The buffer is flushed before the handle is
/// closed, so an error on the final write is reported rather than lost.
pub fn write_path<P, S>(path: P, sample_rate: u32, channels: &[&[S]]) -> Result<()>
where
    P: AsRef<path::Path>,
    S: FloatSample,
{
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    write(&mut writer, sample_rate, channels)?;
    writer.flush()?;
    Ok(())
}

#[test]
fn interleave_orders_frame_major() {
    let left = [1.0f32, 2.0, 3.0];
    let right = [10.0f32, 20.0, 30.0];
    let flat = interleave(&[&left[..], &right[..]], 3);
    assert_eq!(flat, [1.0, 10.0, 2.0, 20.0, 3.0, 30.0]);
}

#[test]
fn interleave_narrows_f64_sources() {
    let channel = [0.5f64, -0.25];
    let flat = interleave(&[&channel[..]], 2);
    assert_eq!(flat, [0.5f32, -0.25]);
}

/// Encoding a known input must reproduce the container byte for byte.
#[test]
fn write_silence_matches_reference_bytes() {
    let silence = [0.0f32; 4];
    let mut stream = io::Cursor::new(Vec::new());
    write(&mut stream, 48000, &[&silence[..]]).unwrap();

    // 12-byte descriptor, 26-byte fmt chunk, 12-byte fact chunk, 8-byte
    // data header and 16 bytes of samples: 66 bytes counted from the WAVE
    // marker on, 74 in total.
    let expected = b"RIFF\x42\x00\x00\x00WAVE\
fmt \x12\x00\x00\x00\x03\x00\x01\x00\x80\xbb\x00\x00\x00\xee\x02\x00\x04\x00\x20\x00\x00\x00\
fact\x04\x00\x00\x00\x04\x00\x00\x00\
data\x10\x00\x00\x00\
\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
    assert_eq!(&stream.into_inner()[..], &expected[..]);
}

#[test]
fn write_interleaves_stereo_frames() {
    let left = [1.0f32, 3.0];
    let right = [2.0f32, 4.0];
    let mut stream = io::Cursor::new(Vec::new());
    write(&mut stream, 44100, &[&left[..], &right[..]]).unwrap();

    let bytes = stream.into_inner();
    // The data payload is the last 16 bytes: l0 r0 l1 r1 as f32.
    let data = &bytes[bytes.len() - 16..];
    for (i, expected) in [1.0f32, 2.0, 3.0, 4.0].iter().enumerate() {
        let sample = f32::from_le_bytes([
            data[i * 4],
            data[i * 4 + 1],
            data[i * 4 + 2],
            data[i * 4 + 3],
        ]);
        assert_eq!(sample, *expected);
    }
}

#[test]
fn write_rejects_unequal_buffer_lengths() {
    let left = [0.0f32; 2];
    let right = [0.0f32; 3];
    let mut stream = io::Cursor::new(Vec::new());
    match write(&mut stream, 44100, &[&left[..], &right[..]]) {
        Err(Error::UnequalBufferLengths) => {}
        other => panic!("expected UnequalBufferLengths, got {:?}", other),
    }
    // Nothing may have been written before the check.
    assert!(stream.into_inner().is_empty());
}

#[test]
fn write_requires_at_least_one_channel() {
    let mut stream = io::Cursor::new(Vec::new());
    let no_channels: &[&[f32]] = &[];
    match write(&mut stream, 44100, no_channels) {
        Err(Error::FormatError(..)) => {}
        other => panic!("expected FormatError, got {:?}", other),
    }
}
