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

use std::cmp;
use std::fs;
use std::io;
use std::io::SeekFrom;
use std::path;
use super::{Error, FileDescriptor, FloatSample, Result, SampleEncoding};

/// Extends the functionality of `io::Read` with additional methods.
///
/// The methods may be used on any type that implements `io::Read`.
trait ReadExt: io::Read {
    /// Reads 4 bytes and returns them in an array.
    fn read_4_bytes(&mut self) -> io::Result<[u8; 4]>;

    /// Reads two bytes and interprets them as a little-endian 16-bit unsigned integer.
    fn read_le_u16(&mut self) -> io::Result<u16>;

    /// Reads four bytes and interprets them as a little-endian 32-bit unsigned integer.
    fn read_le_u32(&mut self) -> io::Result<u32>;
}

impl<R> ReadExt for R
    where R: io::Read
{
    #[inline(always)]
    fn read_4_bytes(&mut self) -> io::Result<[u8; 4]> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    #[inline(always)]
    fn read_le_u16(&mut self) -> io::Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    #[inline(always)]
    fn read_le_u32(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }
}

/// The different chunks that a wave stream can contain.
enum ChunkKind {
    Fmt,
    Fact,
    Data,
    Unknown,
}

/// Describes the structure of a chunk in the wave stream.
struct ChunkHeader {
    kind: ChunkKind,
    len: u32,
}

/// Reads and validates the 12-byte descriptor header that leads the stream.
fn read_descriptor_header<R: io::Read>(reader: &mut R) -> Result<()> {
    let riff_tag = reader.read_4_bytes()?;
    if &riff_tag != b"RIFF" {
        return Err(Error::BadContainerTag(riff_tag));
    }

    // The overall size field covers everything that follows it. It is not
    // needed to walk the chunks; the walk stops at the data chunk or at the
    // end of the stream.
    let _overall_len = reader.read_le_u32()?;

    let wave_tag = reader.read_4_bytes()?;
    if &wave_tag != b"WAVE" {
        return Err(Error::BadWaveTag(wave_tag));
    }

    Ok(())
}

/// Attempts to read an 8-byte chunk header.
///
/// Returns `None` on a clean end of stream at a chunk boundary. An end of
/// stream in the middle of a header is an error, like any other read
/// failure.
fn read_chunk_header<R: io::Read>(reader: &mut R) -> Result<Option<ChunkHeader>> {
    let mut tag = [0u8; 4];
    let progress = reader.read(&mut tag)?;
    if progress == 0 {
        return Ok(None);
    }
    reader.read_exact(&mut tag[progress..])?;
    let len = reader.read_le_u32()?;

    let kind = match &tag {
        // Some producers write the fmt tag with a trailing null byte
        // instead of the standard trailing space; accept both spellings.
        b"fmt " | b"fmt\0" => ChunkKind::Fmt,
        b"fact" => ChunkKind::Fact,
        b"data" => ChunkKind::Data,
        _ => ChunkKind::Unknown,
    };

    Ok(Some(ChunkHeader { kind, len }))
}

/// The fields that inference consumes from a fmt chunk.
///
/// Byte rate and block align are also stored on disk; they are redundant
/// with the fields below and are discarded while reading.
struct FormatFields {
    format_code: u16,
    channel_count: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

/// The accepted layouts of the fmt chunk payload, keyed by its declared size.
///
/// The 16-byte layout is the base PCMWAVEFORMAT struct. The 18-byte layout
/// appends a two-byte extension size. The 40-byte layout is
/// WAVEFORMATEXTENSIBLE, which moves the real format code into the leading
/// bytes of a sub-format GUID.
enum FormatRecord {
    Base(FormatFields),
    Extended(FormatFields),
    Extensible(FormatFields, [u8; 16]),
}

impl FormatRecord {
    /// Reads the fmt chunk payload whose layout matches the declared size.
    fn read_from<R: io::Read>(reader: &mut R, len: u32) -> Result<FormatRecord> {
        // Reject unknown layouts before consuming any payload bytes.
        if len != 16 && len != 18 && len != 40 {
            return Err(Error::UnsupportedFormatChunkSize(len));
        }

        let format_code = reader.read_le_u16()?;
        let channel_count = reader.read_le_u16()?;
        let sample_rate = reader.read_le_u32()?;
        let _byte_rate = reader.read_le_u32()?;
        let _block_align = reader.read_le_u16()?;
        let bits_per_sample = reader.read_le_u16()?;

        if channel_count == 0 {
            return Err(Error::FormatError("fmt chunk declares zero channels"));
        }

        let fields = FormatFields {
            format_code,
            channel_count,
            sample_rate,
            bits_per_sample,
        };

        if len == 16 {
            return Ok(FormatRecord::Base(fields));
        }

        // The extension size is expected to be 0 for plain PCM and float
        // formats. Nonzero values occur in the wild and are ignored.
        let _extension_size = reader.read_le_u16()?;
        if len == 18 {
            return Ok(FormatRecord::Extended(fields));
        }

        let _valid_bits_per_sample = reader.read_le_u16()?;
        let _channel_mask = reader.read_le_u32()?;
        let mut sub_format = [0u8; 16];
        reader.read_exact(&mut sub_format)?;
        Ok(FormatRecord::Extensible(fields, sub_format))
    }

    /// Consumes the record into channel count, sample rate and encoding.
    ///
    /// For the extensible layout the outer format code must be the 0xFFFE
    /// sentinel and the real code is the first two bytes of the sub-format
    /// GUID. The remainder of the GUID is not inspected.
    fn resolve(self) -> Result<(u16, u32, SampleEncoding)> {
        match self {
            FormatRecord::Base(fields) | FormatRecord::Extended(fields) => {
                let encoding =
                    SampleEncoding::resolve(fields.format_code, fields.bits_per_sample)?;
                Ok((fields.channel_count, fields.sample_rate, encoding))
            }
            FormatRecord::Extensible(fields, sub_format) => {
                if fields.format_code != 0xfffe {
                    return Err(Error::ExtensibleFormatCode(fields.format_code));
                }
                let code = u16::from_le_bytes([sub_format[0], sub_format[1]]);
                let encoding = SampleEncoding::resolve(code, fields.bits_per_sample)?;
                Ok((fields.channel_count, fields.sample_rate, encoding))
            }
        }
    }
}

/// Walks the chunks of a wave stream and infers its sample layout.
///
/// The walk validates the 12-byte descriptor header, then visits sibling
/// chunks in order until it has seen both a fmt chunk and a data chunk. The
/// data chunk terminates the walk; chunks after it are never inspected, and
/// unrecognized chunks before it are skipped without being read. On success
/// the reader is positioned at the first byte of sample data, which is also
/// recorded in the descriptor's `data_offset`.
///
/// Inference always starts from byte 0 of the stream, wherever the reader
/// currently is.
pub fn infer<R>(reader: &mut R) -> Result<FileDescriptor>
    where R: io::Read + io::Seek
{
    // The walk needs a seekable stream to skip chunks. Probing the end also
    // rejects streams that cannot report a length before any chunk is
    // interpreted.
    reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;

    read_descriptor_header(reader)?;

    let mut format: Option<(u16, u32, SampleEncoding)> = None;

    while let Some(header) = read_chunk_header(reader)? {
        match header.kind {
            ChunkKind::Fmt => {
                let record = FormatRecord::read_from(reader, header.len)?;
                // A later fmt chunk overrides an earlier one.
                format = Some(record.resolve()?);
            }
            ChunkKind::Fact => {
                // The fact chunk carries the frame count of non-PCM streams.
                // The data chunk length determines the same value, so the
                // payload is skipped rather than interpreted.
                reader.seek(SeekFrom::Current(header.len as i64))?;
            }
            ChunkKind::Data => {
                let (channel_count, sample_rate, encoding) = match format {
                    Some(resolved) => resolved,
                    None => return Err(Error::DataBeforeFormat),
                };
                let frame_bits = channel_count as u64 * encoding.bits_per_sample() as u64;
                // Truncating division: trailing bytes that do not fill a
                // whole frame are unreachable through the descriptor.
                let sample_count = 8 * header.len as u64 / frame_bits;
                let data_offset = reader.stream_position()?;
                return Ok(FileDescriptor {
                    sample_rate,
                    sample_count,
                    channel_count,
                    data_offset,
                    encoding,
                });
            }
            ChunkKind::Unknown => {
                reader.seek(SeekFrom::Current(header.len as i64))?;
            }
        }
    }

    // The end of the stream was reached before the data chunk. Report the
    // fmt chunk first if both are missing.
    match format {
        None => Err(Error::MissingFormatChunk),
        Some(..) => Err(Error::MissingDataChunk),
    }
}

/// Infers the sample layout of the wav file at `path`.
///
/// This is a convenience wrapper that opens the file, wraps it in an
/// `io::BufReader` and delegates to the stream-based [`infer`]. The file
/// handle is closed when the call returns, on the error paths too.
pub fn infer_path<P: AsRef<path::Path>>(path: P) -> Result<FileDescriptor> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);
    infer(&mut reader)
}

/// Distributes a flat frame-major sample buffer over per-channel buffers.
///
/// `width` is the stored size of one sample in bytes and `decode` converts
/// one stored sample into the destination type. Sample `frame * n + c` of
/// the flat buffer lands in `channels[c][frame]`.
fn deinterleave<S, F>(raw: &[u8], width: usize, channels: &mut [&mut [S]], frames: usize, decode: F)
where
    S: FloatSample,
    F: Fn(&[u8]) -> S,
{
    let n = channels.len();
    for (i, sample) in raw.chunks_exact(width).take(frames * n).enumerate() {
        channels[i % n][i / n] = decode(sample);
    }
}

/// Decodes the sample data of a wave stream into per-channel buffers.
///
/// The stream is inferred from its start, so the reader may be at any
/// position. One buffer must be provided per channel in the stream, all of
/// the same length; both conditions are checked before anything is written
/// to any buffer. When the buffers are shorter than the stream's frame
/// count, only as many frames as fit are decoded and the rest of the data
/// chunk is ignored. When they are longer, the tail keeps its old values.
pub fn read<R, S>(reader: &mut R, channels: &mut [&mut [S]]) -> Result<()>
where
    R: io::Read + io::Seek,
    S: FloatSample,
{
    let buffer_len = match channels.first() {
        Some(first) => first.len(),
        None => 0,
    };
    if channels.iter().any(|c| c.len() != buffer_len) {
        return Err(Error::UnequalBufferLengths);
    }

    let descriptor = infer(reader)?;
    if channels.len() != descriptor.channel_count as usize {
        return Err(Error::ChannelCountMismatch {
            provided: channels.len(),
            required: descriptor.channel_count as usize,
        });
    }

    let frames = cmp::min(descriptor.sample_count, buffer_len as u64) as usize;
    let width = descriptor.encoding.bytes_per_sample() as usize;
    let byte_count = frames * channels.len() * width;

    // The scratch buffer lives only for this call; it is dropped on every
    // exit path below.
    let mut raw = vec![0u8; byte_count];
    reader.seek(SeekFrom::Start(descriptor.data_offset))?;
    reader.read_exact(&mut raw)?;

    match descriptor.encoding {
        SampleEncoding::U8 => {
            deinterleave(&raw, width, channels, frames, |b| S::from_u8(b[0]))
        }
        SampleEncoding::S16 => deinterleave(&raw, width, channels, frames, |b| {
            S::from_i16(i16::from_le_bytes([b[0], b[1]]))
        }),
        SampleEncoding::F32 => deinterleave(&raw, width, channels, frames, |b| {
            S::from_f32(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        }),
        SampleEncoding::F64 => deinterleave(&raw, width, channels, frames, |b| {
            S::from_f64(f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
        }),
    }

    Ok(())
}

/// Decodes the wav file at `path` into per-channel buffers.
///
/// This is a convenience wrapper that opens the file, wraps it in an
/// `io::BufReader` and delegates to the stream-based [`read`]. The file
/// handle is closed when the call returns, on the error paths too.
pub fn read_path<P, S>(path: P, channels: &mut [&mut [S]]) -> Result<()>
where
    P: AsRef<path::Path>,
    S: FloatSample,
{
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);
    read(&mut reader, channels)
}

#[cfg(test)]
use std::io::Cursor;

/// Builds a wave stream from raw (tag, payload) chunk parts.
#[cfg(test)]
fn build_wav(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for &(tag, payload) in chunks {
        body.extend_from_slice(tag);
        body.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        body.extend_from_slice(payload);
    }
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(4 + body.len() as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(&body);
    bytes
}

/// Builds a 16-byte fmt chunk payload with consistent derived fields.
#[cfg(test)]
fn fmt16(format_code: u16, channels: u16, rate: u32, bits: u16) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&format_code.to_le_bytes());
    payload.extend_from_slice(&channels.to_le_bytes());
    payload.extend_from_slice(&rate.to_le_bytes());
    let byte_rate = rate * channels as u32 * bits as u32 / 8;
    payload.extend_from_slice(&byte_rate.to_le_bytes());
    let block_align = channels * bits / 8;
    payload.extend_from_slice(&block_align.to_le_bytes());
    payload.extend_from_slice(&bits.to_le_bytes());
    payload
}

/// Builds a 40-byte extensible fmt chunk payload.
#[cfg(test)]
fn fmt40(outer_code: u16, channels: u16, rate: u32, bits: u16, sub_code: u16) -> Vec<u8> {
    let mut payload = fmt16(outer_code, channels, rate, bits);
    payload.extend_from_slice(&22u16.to_le_bytes()); // extension size
    payload.extend_from_slice(&bits.to_le_bytes()); // valid bits per sample
    payload.extend_from_slice(&3u32.to_le_bytes()); // channel mask
    let mut guid: [u8; 16] = [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xaa, 0x00, 0x38,
        0x9b, 0x71,
    ];
    guid[..2].copy_from_slice(&sub_code.to_le_bytes());
    payload.extend_from_slice(&guid);
    payload
}

#[test]
fn infer_reads_canonical_descriptor() {
    let bytes = build_wav(&[
        (b"fmt ", &fmt16(1, 1, 44100, 16)),
        (b"data", &[1, 0, 2, 0, 3, 0, 4, 0]),
    ]);
    let descriptor = infer(&mut Cursor::new(bytes)).unwrap();

    assert_eq!(descriptor.sample_rate, 44100);
    assert_eq!(descriptor.sample_count, 4);
    assert_eq!(descriptor.channel_count, 1);
    assert_eq!(descriptor.encoding, SampleEncoding::S16);
    // 12-byte descriptor header, 8 + 16 byte fmt chunk, 8-byte data header.
    assert_eq!(descriptor.data_offset, 44);
}

#[test]
fn infer_accepts_null_padded_fmt_tag() {
    let bytes = build_wav(&[
        (b"fmt\0", &fmt16(1, 2, 48000, 8)),
        (b"data", &[0, 0, 0, 0]),
    ]);
    let descriptor = infer(&mut Cursor::new(bytes)).unwrap();

    assert_eq!(descriptor.channel_count, 2);
    assert_eq!(descriptor.encoding, SampleEncoding::U8);
    assert_eq!(descriptor.sample_count, 2);
}

#[test]
fn infer_skips_unknown_chunks() {
    // A LIST chunk between fmt and data must not affect the result.
    let list_payload = b"INFOISFTwavio test";
    let bytes = build_wav(&[
        (b"fmt ", &fmt16(1, 1, 44100, 16)),
        (b"LIST", list_payload),
        (b"data", &[1, 0, 2, 0]),
    ]);
    let descriptor = infer(&mut Cursor::new(bytes)).unwrap();

    assert_eq!(descriptor.sample_rate, 44100);
    assert_eq!(descriptor.sample_count, 2);
    assert_eq!(descriptor.encoding, SampleEncoding::S16);
    let expected_offset = 12 + (8 + 16) + (8 + list_payload.len() as u64) + 8;
    assert_eq!(descriptor.data_offset, expected_offset);
}

#[test]
fn infer_stops_at_data_chunk() {
    // Garbage after the data chunk is never inspected: the walk is over as
    // soon as the data chunk header has been consumed.
    let mut bytes = build_wav(&[
        (b"fmt ", &fmt16(1, 1, 8000, 8)),
        (b"data", &[7, 8]),
    ]);
    bytes.extend_from_slice(b"fmt \xff\xff\xff\xff broken trailer");

    let descriptor = infer(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(descriptor.sample_count, 2);
}

#[test]
fn infer_rejects_bad_container_tags() {
    let mut bytes = build_wav(&[(b"fmt ", &fmt16(1, 1, 8000, 8)), (b"data", &[0])]);
    bytes[..4].copy_from_slice(b"RIFX");
    match infer(&mut Cursor::new(bytes)) {
        Err(Error::BadContainerTag(tag)) => assert_eq!(&tag, b"RIFX"),
        other => panic!("expected BadContainerTag, got {:?}", other),
    }

    let mut bytes = build_wav(&[(b"fmt ", &fmt16(1, 1, 8000, 8)), (b"data", &[0])]);
    bytes[8..12].copy_from_slice(b"AIFF");
    match infer(&mut Cursor::new(bytes)) {
        Err(Error::BadWaveTag(tag)) => {
            assert_eq!(&tag, b"AIFF");
            // The tag must be visible in the rendered message.
            assert!(Error::BadWaveTag(tag).to_string().contains("AIFF"));
        }
        other => panic!("expected BadWaveTag, got {:?}", other),
    }
}

#[test]
fn infer_rejects_data_before_fmt() {
    let bytes = build_wav(&[
        (b"data", &[1, 0, 2, 0]),
        (b"fmt ", &fmt16(1, 1, 44100, 16)),
    ]);
    match infer(&mut Cursor::new(bytes)) {
        Err(Error::DataBeforeFormat) => {}
        other => panic!("expected DataBeforeFormat, got {:?}", other),
    }
}

#[test]
fn infer_names_the_missing_chunk() {
    // Only a fmt chunk: the data chunk is the one missing.
    let bytes = build_wav(&[(b"fmt ", &fmt16(1, 1, 44100, 16))]);
    match infer(&mut Cursor::new(bytes)) {
        Err(Error::MissingDataChunk) => {}
        other => panic!("expected MissingDataChunk, got {:?}", other),
    }

    // Only an unrelated chunk: the fmt chunk is reported first.
    let bytes = build_wav(&[(b"LIST", b"INFO")]);
    match infer(&mut Cursor::new(bytes)) {
        Err(Error::MissingFormatChunk) => {}
        other => panic!("expected MissingFormatChunk, got {:?}", other),
    }

    // An empty chunk list reports the fmt chunk as well.
    let bytes = build_wav(&[]);
    match infer(&mut Cursor::new(bytes)) {
        Err(Error::MissingFormatChunk) => {}
        other => panic!("expected MissingFormatChunk, got {:?}", other),
    }
}

#[test]
fn infer_rejects_unsupported_format_code() {
    // Format code 2 is ADPCM; rejection is independent of the bit depth.
    for bits in [4, 8, 16] {
        let bytes = build_wav(&[
            (b"fmt ", &fmt16(2, 1, 44100, bits)),
            (b"data", &[0, 0, 0, 0]),
        ]);
        match infer(&mut Cursor::new(bytes)) {
            Err(Error::UnsupportedFormat { code: 2, .. }) => {}
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }
}

#[test]
fn infer_rejects_unsupported_fmt_chunk_size() {
    let mut payload = fmt16(1, 1, 44100, 16);
    payload.extend_from_slice(&[0, 0, 0, 0]); // 20 bytes, not a known layout
    let bytes = build_wav(&[(b"fmt ", &payload), (b"data", &[0, 0])]);
    match infer(&mut Cursor::new(bytes)) {
        Err(Error::UnsupportedFormatChunkSize(20)) => {}
        other => panic!("expected UnsupportedFormatChunkSize, got {:?}", other),
    }
}

#[test]
fn infer_resolves_extensible_sub_format() {
    // The outer code is the 0xFFFE sentinel; the real code is the first two
    // bytes of the GUID, here 3 for IEEE float.
    let bytes = build_wav(&[
        (b"fmt ", &fmt40(0xfffe, 2, 48000, 32, 3)),
        (b"data", &[0; 16]),
    ]);
    let descriptor = infer(&mut Cursor::new(bytes)).unwrap();

    assert_eq!(descriptor.channel_count, 2);
    assert_eq!(descriptor.sample_rate, 48000);
    assert_eq!(descriptor.encoding, SampleEncoding::F32);
    assert_eq!(descriptor.sample_count, 2);
}

#[test]
fn infer_rejects_extensible_without_sentinel() {
    let bytes = build_wav(&[
        (b"fmt ", &fmt40(1, 2, 48000, 32, 3)),
        (b"data", &[0; 16]),
    ]);
    match infer(&mut Cursor::new(bytes)) {
        Err(Error::ExtensibleFormatCode(1)) => {
            let message = Error::ExtensibleFormatCode(1).to_string();
            assert!(message.contains("0x0001"));
        }
        other => panic!("expected ExtensibleFormatCode, got {:?}", other),
    }
}

#[test]
fn infer_rejects_zero_channels() {
    let bytes = build_wav(&[
        (b"fmt ", &fmt16(1, 0, 44100, 16)),
        (b"data", &[0, 0]),
    ]);
    match infer(&mut Cursor::new(bytes)) {
        Err(Error::FormatError(..)) => {}
        other => panic!("expected FormatError, got {:?}", other),
    }
}

#[test]
fn infer_uses_truncating_division_for_sample_count() {
    // 5 bytes of 16-bit mono data: two whole frames, one stray byte.
    let bytes = build_wav(&[
        (b"fmt ", &fmt16(1, 1, 44100, 16)),
        (b"data", &[1, 0, 2, 0, 3]),
    ]);
    let descriptor = infer(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(descriptor.sample_count, 2);
}

#[test]
fn infer_lets_a_later_fmt_chunk_override() {
    let bytes = build_wav(&[
        (b"fmt ", &fmt16(1, 1, 22050, 8)),
        (b"fmt ", &fmt16(1, 2, 44100, 16)),
        (b"data", &[0; 8]),
    ]);
    let descriptor = infer(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(descriptor.sample_rate, 44100);
    assert_eq!(descriptor.channel_count, 2);
    assert_eq!(descriptor.encoding, SampleEncoding::S16);
}

#[test]
fn read_decodes_u8_samples() {
    let bytes = build_wav(&[
        (b"fmt ", &fmt16(1, 1, 8000, 8)),
        (b"data", &[0, 128, 255]),
    ]);
    let mut samples = [0.0f32; 3];
    read(&mut Cursor::new(bytes), &mut [&mut samples[..]]).unwrap();
    assert_eq!(samples, [-128.0 / 127.0, 0.0, 1.0]);
}

#[test]
fn read_decodes_s16_stereo_frames() {
    // Two frames, interleaved on disk as l0 r0 l1 r1.
    let mut data = Vec::new();
    for sample in [100i16, -100, 32767, -32768] {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    let bytes = build_wav(&[(b"fmt ", &fmt16(1, 2, 44100, 16)), (b"data", &data)]);

    let mut left = [0.0f32; 2];
    let mut right = [0.0f32; 2];
    read(&mut Cursor::new(bytes), &mut [&mut left[..], &mut right[..]]).unwrap();

    assert_eq!(left, [100.0 / 32767.0, 1.0]);
    assert_eq!(right, [-100.0 / 32767.0, -32768.0 / 32767.0]);
}

#[test]
fn read_decodes_f64_data_into_f64_buffers() {
    let mut data = Vec::new();
    for sample in [0.25f64, -0.125, 1.0] {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    let bytes = build_wav(&[(b"fmt ", &fmt16(3, 1, 96000, 64)), (b"data", &data)]);

    let mut samples = [0.0f64; 3];
    read(&mut Cursor::new(bytes), &mut [&mut samples[..]]).unwrap();
    assert_eq!(samples, [0.25, -0.125, 1.0]);
}

#[test]
fn read_truncates_to_shorter_buffers() {
    let mut data = Vec::new();
    for sample in [1i16, 2, 3, 4] {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    let bytes = build_wav(&[(b"fmt ", &fmt16(1, 1, 44100, 16)), (b"data", &data)]);

    // Two-frame buffer against a four-frame stream: fill exactly two.
    let mut samples = [0.0f32; 2];
    read(&mut Cursor::new(bytes), &mut [&mut samples[..]]).unwrap();
    assert_eq!(samples, [1.0 / 32767.0, 2.0 / 32767.0]);
}

#[test]
fn read_leaves_the_tail_of_longer_buffers() {
    let bytes = build_wav(&[
        (b"fmt ", &fmt16(1, 1, 44100, 16)),
        (b"data", &[0x00, 0x40]), // one frame
    ]);
    let mut samples = [9.0f32; 3];
    read(&mut Cursor::new(bytes), &mut [&mut samples[..]]).unwrap();
    assert_eq!(samples, [16384.0 / 32767.0, 9.0, 9.0]);
}

#[test]
fn read_checks_channel_count_before_touching_buffers() {
    let bytes = build_wav(&[
        (b"fmt ", &fmt16(1, 2, 44100, 16)),
        (b"data", &[0; 8]),
    ]);
    let mut samples = [7.0f32; 2];
    match read(&mut Cursor::new(bytes), &mut [&mut samples[..]]) {
        Err(Error::ChannelCountMismatch { provided: 1, required: 2 }) => {}
        other => panic!("expected ChannelCountMismatch, got {:?}", other),
    }
    // The buffer must not have been written to.
    assert_eq!(samples, [7.0, 7.0]);
}

#[test]
fn read_rejects_unequal_buffer_lengths() {
    let bytes = build_wav(&[
        (b"fmt ", &fmt16(1, 2, 44100, 16)),
        (b"data", &[0; 8]),
    ]);
    let mut left = [7.0f32; 2];
    let mut right = [7.0f32; 3];
    match read(&mut Cursor::new(bytes), &mut [&mut left[..], &mut right[..]]) {
        Err(Error::UnequalBufferLengths) => {}
        other => panic!("expected UnequalBufferLengths, got {:?}", other),
    }
    assert_eq!(left, [7.0, 7.0]);
    assert_eq!(right, [7.0, 7.0, 7.0]);
}

#[test]
fn path_helpers_open_and_close_files() {
    let path = std::env::temp_dir().join("wavio-read-path-test.wav");
    let samples = [0.5f32, -0.5, 0.25, -0.25];
    crate::write_path(&path, 44100, &[&samples[..]]).unwrap();

    let descriptor = infer_path(&path).unwrap();
    assert_eq!(descriptor.sample_rate, 44100);
    assert_eq!(descriptor.sample_count, 4);
    assert_eq!(descriptor.encoding, SampleEncoding::F32);

    let mut decoded = [0.0f32; 4];
    read_path(&path, &mut [&mut decoded[..]]).unwrap();
    assert_eq!(decoded, samples);

    let _ = fs::remove_file(&path);
}
