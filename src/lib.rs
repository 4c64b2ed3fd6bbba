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

//! Wavio, a wav container inspection, decoding and encoding library.
//!
//! Wavio works on whole channels rather than on individual samples: decoding
//! fills one caller-supplied buffer per channel, and encoding takes one
//! buffer per channel and emits a complete 32-bit float wav stream in a
//! single pass. For inspection without decoding, [`infer`] walks the chunks
//! of a stream and reports its sample layout as a [`FileDescriptor`].
//!
//! Examples
//! ========
//!
//! The following example renders a 440 Hz sine wave and encodes it as a mono
//! 32-bit float wav with a sample rate of 44.1 kHz.
//!
//! ```
//! use std::f32::consts::PI;
//! use std::io::Cursor;
//!
//! let samples: Vec<f32> = (0..44100)
//!     .map(|t| (t as f32 / 44100.0 * 440.0 * 2.0 * PI).sin())
//!     .collect();
//!
//! let mut stream = Cursor::new(Vec::new());
//! wavio::write(&mut stream, 44100, &[&samples[..]]).unwrap();
//! ```
//!
//! The following example inspects a stereo stream and pulls its channels
//! apart into separate buffers.
//!
//! ```
//! # use std::io::Cursor;
//! # let (l, r) = (vec![0.5f32; 128], vec![-0.5f32; 128]);
//! # let mut stream = Cursor::new(Vec::new());
//! # wavio::write(&mut stream, 48_000, &[&l[..], &r[..]]).unwrap();
//! let descriptor = wavio::infer(&mut stream).unwrap();
//! assert_eq!(descriptor.channel_count, 2);
//!
//! let mut left = vec![0.0f32; descriptor.sample_count as usize];
//! let mut right = vec![0.0f32; descriptor.sample_count as usize];
//! wavio::read(&mut stream, &mut [&mut left[..], &mut right[..]]).unwrap();
//! ```

#![warn(missing_docs)]

use std::error;
use std::fmt;
use std::io;
use std::result;

mod read;
mod write;

pub use read::{infer, infer_path, read, read_path};
pub use write::{write, write_path};

/// The error type for all operations in Wavio.
#[derive(Debug)]
pub enum Error {
    /// An IO error occurred in the underlying reader or writer.
    Io(io::Error),
    /// The stream does not start with the 'RIFF' container tag.
    BadContainerTag([u8; 4]),
    /// The descriptor header does not carry the 'WAVE' marker.
    BadWaveTag([u8; 4]),
    /// A fmt chunk declared a payload size other than 16, 18 or 40 bytes.
    UnsupportedFormatChunkSize(u32),
    /// The (format code, bits per sample) pair is outside the supported set.
    UnsupportedFormat {
        /// The format code found in the fmt chunk.
        code: u16,
        /// The declared bits per sample.
        bits: u16,
    },
    /// A 40-byte fmt chunk did not carry the 0xFFFE extensible sentinel.
    ExtensibleFormatCode(u16),
    /// A data chunk was encountered before any fmt chunk.
    DataBeforeFormat,
    /// The stream ended without a fmt chunk.
    MissingFormatChunk,
    /// The stream ended without a data chunk.
    MissingDataChunk,
    /// The provided channel buffers do not all have the same length.
    UnequalBufferLengths,
    /// The number of provided channel buffers does not match the stream.
    ChannelCountMismatch {
        /// How many channel buffers the caller passed.
        provided: usize,
        /// How many channels the stream contains.
        required: usize,
    },
    /// Ill-formed wave data was encountered.
    FormatError(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match *self {
            Error::Io(ref err) => err.fmt(f),
            Error::BadContainerTag(tag) => {
                write!(f, "expected 'RIFF' tag at start of stream, got '{}'", tag_string(tag))
            }
            Error::BadWaveTag(tag) => {
                write!(f, "expected 'WAVE' tag in descriptor header, got '{}'", tag_string(tag))
            }
            Error::UnsupportedFormatChunkSize(size) => {
                write!(f, "unsupported format chunk size {}", size)
            }
            Error::UnsupportedFormat { code, bits } => {
                write!(f, "unsupported sample format, code {} with {} bits per sample", code, bits)
            }
            Error::ExtensibleFormatCode(code) => {
                write!(
                    f,
                    "expected format code 0xfffe for an extensible format chunk, got {:#06x}",
                    code
                )
            }
            Error::DataBeforeFormat => {
                f.write_str("encountered a data chunk before any fmt chunk")
            }
            Error::MissingFormatChunk => f.write_str("no fmt chunk found in the stream"),
            Error::MissingDataChunk => f.write_str("no data chunk found in the stream"),
            Error::UnequalBufferLengths => {
                f.write_str("channel buffers have unequal lengths")
            }
            Error::ChannelCountMismatch { provided, required } => {
                write!(
                    f,
                    "provided {} channel buffers, the stream contains {} channels",
                    provided, required
                )
            }
            Error::FormatError(reason) => {
                write!(f, "ill-formed wave stream: {}", reason)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

/// A type for results generated by Wavio where the error type is hard-wired.
pub type Result<T> = result::Result<T, Error>;

/// Renders a 4-byte chunk tag as printable text.
///
/// Tags are ASCII in well-formed streams, but error paths see arbitrary
/// bytes; anything outside the printable range is escaped as `\xNN`. This is
/// the formatter used for tags in error messages.
pub fn tag_string(tag: [u8; 4]) -> String {
    let mut s = String::with_capacity(4);
    for &byte in &tag {
        if (0x20..0x7f).contains(&byte) {
            s.push(byte as char);
        } else {
            s.push_str(&format!("\\x{:02x}", byte));
        }
    }
    s
}

#[test]
fn tag_string_escapes_non_printable_bytes() {
    assert_eq!(tag_string(*b"fmt "), "fmt ");
    assert_eq!(tag_string(*b"data"), "data");
    assert_eq!(tag_string([b'f', b'm', b't', 0x00]), "fmt\\x00");
    assert_eq!(tag_string([0xff, 0xfe, b'a', b'b']), "\\xff\\xfeab");
}

/// How a single sample is stored in the data chunk.
///
/// The encoding is resolved from the (format code, bits per sample) pair
/// found in the fmt chunk. Only linear PCM and IEEE float encodings are
/// supported; compressed codecs are rejected during inference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleEncoding {
    /// 8-bit unsigned PCM. The only unsigned encoding in the wave format.
    U8,
    /// 16-bit signed little-endian PCM.
    S16,
    /// 32-bit IEEE float.
    F32,
    /// 64-bit IEEE float.
    F64,
}

impl SampleEncoding {
    /// Resolves the encoding for a (format code, bits per sample) pair.
    ///
    /// Format code 1 is WAVE_FORMAT_PCM and format code 3 is
    /// WAVE_FORMAT_IEEE_FLOAT. Any pair outside the supported set fails,
    /// naming the pair; this includes compressed codecs such as ADPCM
    /// (format code 2) at every bit depth.
    pub fn resolve(format_code: u16, bits_per_sample: u16) -> Result<SampleEncoding> {
        match (format_code, bits_per_sample) {
            (1, 8) => Ok(SampleEncoding::U8),
            (1, 16) => Ok(SampleEncoding::S16),
            (3, 32) => Ok(SampleEncoding::F32),
            (3, 64) => Ok(SampleEncoding::F64),
            (code, bits) => Err(Error::UnsupportedFormat { code, bits }),
        }
    }

    /// Returns the number of bits used to store one sample.
    pub fn bits_per_sample(self) -> u16 {
        match self {
            SampleEncoding::U8 => 8,
            SampleEncoding::S16 => 16,
            SampleEncoding::F32 => 32,
            SampleEncoding::F64 => 64,
        }
    }

    /// Returns the number of bytes used to store one sample.
    pub fn bytes_per_sample(self) -> u16 {
        self.bits_per_sample() / 8
    }

    /// Returns whether the encoding is integer PCM rather than IEEE float.
    ///
    /// Non-PCM streams conventionally carry a fact chunk ahead of the data
    /// chunk and PCM streams do not. The decoder accepts streams either way;
    /// the encoder emits float data only and therefore always writes one.
    pub fn is_pcm(self) -> bool {
        match self {
            SampleEncoding::U8 | SampleEncoding::S16 => true,
            SampleEncoding::F32 | SampleEncoding::F64 => false,
        }
    }
}

#[test]
fn resolve_accepts_the_supported_encodings() {
    assert_eq!(SampleEncoding::resolve(1, 8).unwrap(), SampleEncoding::U8);
    assert_eq!(SampleEncoding::resolve(1, 16).unwrap(), SampleEncoding::S16);
    assert_eq!(SampleEncoding::resolve(3, 32).unwrap(), SampleEncoding::F32);
    assert_eq!(SampleEncoding::resolve(3, 64).unwrap(), SampleEncoding::F64);
}

#[test]
fn resolve_rejects_adpcm_naming_the_code() {
    // Format code 2 is ADPCM; it must be rejected at every bit depth and
    // the error must identify the code.
    for bits in [4, 8, 16, 32] {
        match SampleEncoding::resolve(2, bits) {
            Err(Error::UnsupportedFormat { code: 2, bits: b }) => assert_eq!(b, bits),
            other => panic!("expected UnsupportedFormat for code 2, got {:?}", other),
        }
    }
    let message = SampleEncoding::resolve(2, 16).unwrap_err().to_string();
    assert!(message.contains("code 2"));
}

#[test]
fn resolve_rejects_unsupported_bit_depths() {
    // The set is closed: PCM is 8 or 16 bits only, float is 32 or 64 only.
    assert!(SampleEncoding::resolve(1, 24).is_err());
    assert!(SampleEncoding::resolve(1, 32).is_err());
    assert!(SampleEncoding::resolve(3, 16).is_err());
    assert!(SampleEncoding::resolve(0, 16).is_err());
}

#[test]
fn pcm_flag_matches_encoding_family() {
    assert!(SampleEncoding::U8.is_pcm());
    assert!(SampleEncoding::S16.is_pcm());
    assert!(!SampleEncoding::F32.is_pcm());
    assert!(!SampleEncoding::F64.is_pcm());
}

/// Describes the sample layout of a wave stream.
///
/// A descriptor is produced by [`infer`], and only from a stream in which
/// both a fmt chunk and a data chunk were found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileDescriptor {
    /// The number of frames per second.
    ///
    /// A common value is 44100, this is 44.1 kHz which is used for CD audio.
    pub sample_rate: u32,

    /// The number of frames per channel stored in the data chunk.
    ///
    /// Computed from the declared data chunk length with truncating integer
    /// division, so trailing bytes that do not fill a whole frame are not
    /// counted.
    pub sample_count: u64,

    /// The number of channels, at least 1.
    pub channel_count: u16,

    /// The byte offset of the first sample byte from the start of the
    /// stream. This points into the data chunk payload, past its header.
    pub data_offset: u64,

    /// How a single sample is stored in the data chunk.
    pub encoding: SampleEncoding,
}

/// A float type that decoded samples can be stored in.
///
/// Via this trait, decoding is generic over `f32` and `f64`. Every supported
/// encoding decodes into either type; `f32` halves the memory for the common
/// case, `f64` keeps the full precision of 64-bit float data.
pub trait FloatSample: Copy {
    /// Decodes an 8-bit unsigned PCM sample.
    ///
    /// The stored range 0-255 is centered by subtracting 128 and scaled by
    /// dividing by 127, so 255 decodes to exactly 1.0.
    //  TODO: revisit this scaling. Dividing by 127 after subtracting 128
    //  puts the decoded minimum slightly below -1.0. Kept as is so that
    //  existing decoded output stays bit-identical.
    fn from_u8(raw: u8) -> Self;

    /// Decodes a 16-bit signed PCM sample by dividing by 32767.
    fn from_i16(raw: i16) -> Self;

    /// Decodes a 32-bit float sample. No rescaling is performed.
    fn from_f32(raw: f32) -> Self;

    /// Decodes a 64-bit float sample. No rescaling is performed.
    fn from_f64(raw: f64) -> Self;

    /// Casts the value to `f32` for encoding, without rescaling.
    ///
    /// The encoder emits 32-bit float data only, so `f64` sources narrow to
    /// the nearest representable `f32`.
    fn to_f32(self) -> f32;
}

impl FloatSample for f32 {
    #[inline(always)]
    fn from_u8(raw: u8) -> f32 {
        (raw as f32 - 128.0) / 127.0
    }

    #[inline(always)]
    fn from_i16(raw: i16) -> f32 {
        raw as f32 / 32767.0
    }

    #[inline(always)]
    fn from_f32(raw: f32) -> f32 {
        raw
    }

    #[inline(always)]
    fn from_f64(raw: f64) -> f32 {
        raw as f32
    }

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self
    }
}

impl FloatSample for f64 {
    #[inline(always)]
    fn from_u8(raw: u8) -> f64 {
        (raw as f64 - 128.0) / 127.0
    }

    #[inline(always)]
    fn from_i16(raw: i16) -> f64 {
        raw as f64 / 32767.0
    }

    #[inline(always)]
    fn from_f32(raw: f32) -> f64 {
        raw as f64
    }

    #[inline(always)]
    fn from_f64(raw: f64) -> f64 {
        raw
    }

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

#[test]
fn decode_u8_is_centered_on_128() {
    assert_eq!(f32::from_u8(128), 0.0);
    assert_eq!(f32::from_u8(255), 1.0);
    // The minimum undershoots -1.0, a consequence of the 128/127 split.
    assert_eq!(f32::from_u8(0), -128.0 / 127.0);
    assert_eq!(f64::from_u8(128), 0.0);
    assert_eq!(f64::from_u8(255), 1.0);
}

#[test]
fn decode_i16_scales_by_32767() {
    assert_eq!(f32::from_i16(0), 0.0);
    assert_eq!(f32::from_i16(32767), 1.0);
    assert_eq!(f32::from_i16(-32768), -32768.0 / 32767.0);
    assert_eq!(f64::from_i16(32767), 1.0);
    assert_eq!(f64::from_i16(-32767), -1.0);
}

#[test]
fn decode_float_is_identity() {
    assert_eq!(f32::from_f32(0.125), 0.125);
    assert_eq!(f64::from_f64(-0.5), -0.5);
    // Width changes cast without rescaling.
    assert_eq!(f64::from_f32(0.25), 0.25);
    assert_eq!(f32::from_f64(0.25), 0.25);
    assert_eq!(0.75f64.to_f32(), 0.75);
}
