//! Typed domain values for negotiation.
//!
//! A candidate set holds plain integer codes so that one set type serves
//! every negotiable dimension (pixel format, sample format, sample rate,
//! channel layout, packing). The types in this module give those codes
//! their meaning: each dimension has a typed representation and a
//! `code()` / `from_code()` pair mapping to and from [`FormatCode`].
//!
//! Codes are only meaningful within their own dimension. A set built from
//! pixel format codes and a set built from sample format codes may contain
//! equal integers; nothing in this crate (or outside it) may compare them.

/// Raw candidate code stored in a format set.
///
/// Wide enough for every dimension, including 64-bit channel layout masks.
pub type FormatCode = i64;

/// Media kind selecting which default format domain applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Video: the pixel format domain.
    Video,
    /// Audio: the sample format domain.
    Audio,
}

// ============================================================================
// Pixel formats
// ============================================================================

/// Pixel formats (color space and memory layout).
///
/// The opaque hardware-surface variants at the end describe data living in
/// an accelerator surface that generic processing nodes cannot inspect;
/// [`PixelFormat::is_opaque`] flags them so the default video domain can
/// leave them out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(u8)]
pub enum PixelFormat {
    /// YUV 4:2:0 planar (Y plane, then U plane, then V plane).
    #[default]
    I420 = 0,
    /// YUV 4:2:0 semi-planar (Y plane, then interleaved UV plane).
    Nv12,
    /// YUV 4:2:0 planar, 10-bit little endian.
    I420_10Le,
    /// YUV 4:2:0 semi-planar, 10-bit.
    P010,
    /// YUV 4:2:2 planar.
    I422,
    /// YUV 4:2:2 packed (Y0 U Y1 V).
    Yuyv,
    /// YUV 4:2:2 packed (U Y0 V Y1).
    Uyvy,
    /// YUV 4:4:4 planar.
    I444,
    /// RGB 8-bit per channel, packed (24 bits/pixel).
    Rgb24,
    /// RGBA 8-bit per channel, packed (32 bits/pixel).
    Rgba,
    /// BGR 8-bit per channel, packed (24 bits/pixel).
    Bgr24,
    /// BGRA 8-bit per channel, packed (32 bits/pixel).
    Bgra,
    /// 8-bit grayscale.
    Gray8,
    /// 16-bit grayscale little endian.
    Gray16Le,
    /// Opaque VA-API surface (hardware decoder output).
    Vaapi,
    /// Opaque VDPAU surface (hardware decoder output).
    Vdpau,
}

impl PixelFormat {
    /// Every known pixel format, in code order.
    pub const ALL: [PixelFormat; 16] = [
        Self::I420,
        Self::Nv12,
        Self::I420_10Le,
        Self::P010,
        Self::I422,
        Self::Yuyv,
        Self::Uyvy,
        Self::I444,
        Self::Rgb24,
        Self::Rgba,
        Self::Bgr24,
        Self::Bgra,
        Self::Gray8,
        Self::Gray16Le,
        Self::Vaapi,
        Self::Vdpau,
    ];

    /// Candidate code for this pixel format.
    #[inline]
    pub const fn code(self) -> FormatCode {
        self as FormatCode
    }

    /// Look up a pixel format by candidate code.
    pub fn from_code(code: FormatCode) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Is this an opaque hardware surface?
    ///
    /// Opaque surfaces cannot be read or written by generic processing
    /// nodes, so they are excluded from the default video domain.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        matches!(self, Self::Vaapi | Self::Vdpau)
    }
}

// ============================================================================
// Sample formats
// ============================================================================

/// Audio sample formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(u8)]
pub enum SampleFormat {
    /// Unsigned 8-bit integer.
    U8 = 0,
    /// Signed 16-bit integer (most common).
    #[default]
    S16,
    /// Signed 32-bit integer.
    S32,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
}

impl SampleFormat {
    /// Every known sample format, in code order.
    pub const ALL: [SampleFormat; 5] = [Self::U8, Self::S16, Self::S32, Self::F32, Self::F64];

    /// Candidate code for this sample format.
    #[inline]
    pub const fn code(self) -> FormatCode {
        self as FormatCode
    }

    /// Look up a sample format by candidate code.
    pub fn from_code(code: FormatCode) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::S16 => "s16",
            Self::S32 => "s32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Resolve a sample format by canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Get bytes per sample.
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::S16 => 2,
            Self::S32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }
}

// ============================================================================
// Channel layouts
// ============================================================================

/// Channel layout bit masks.
///
/// A layout is a `u64` with one bit per speaker position. The composite
/// constants cover the common named layouts; arbitrary masks are accepted
/// everywhere a layout is.
pub mod channels {
    /// Front left speaker.
    pub const FRONT_LEFT: u64 = 0x1;
    /// Front right speaker.
    pub const FRONT_RIGHT: u64 = 0x2;
    /// Front center speaker.
    pub const FRONT_CENTER: u64 = 0x4;
    /// Low-frequency effects channel.
    pub const LOW_FREQUENCY: u64 = 0x8;
    /// Back left speaker.
    pub const BACK_LEFT: u64 = 0x10;
    /// Back right speaker.
    pub const BACK_RIGHT: u64 = 0x20;
    /// Front left-of-center speaker.
    pub const FRONT_LEFT_OF_CENTER: u64 = 0x40;
    /// Front right-of-center speaker.
    pub const FRONT_RIGHT_OF_CENTER: u64 = 0x80;
    /// Back center speaker.
    pub const BACK_CENTER: u64 = 0x100;
    /// Side left speaker.
    pub const SIDE_LEFT: u64 = 0x200;
    /// Side right speaker.
    pub const SIDE_RIGHT: u64 = 0x400;
    /// Left channel of a matrix-encoded stereo downmix.
    pub const STEREO_LEFT: u64 = 0x2000_0000;
    /// Right channel of a matrix-encoded stereo downmix.
    pub const STEREO_RIGHT: u64 = 0x4000_0000;

    /// Mono: front center only.
    pub const MONO: u64 = FRONT_CENTER;
    /// Stereo: front left + right.
    pub const STEREO: u64 = FRONT_LEFT | FRONT_RIGHT;
    /// 4.0: stereo + front center + back center.
    pub const FOUR_POINT_ZERO: u64 = STEREO | FRONT_CENTER | BACK_CENTER;
    /// Quadraphonic: stereo + back left + right.
    pub const QUAD: u64 = STEREO | BACK_LEFT | BACK_RIGHT;
    /// 5.0 with side surrounds.
    pub const FIVE_POINT_ZERO: u64 = STEREO | FRONT_CENTER | SIDE_LEFT | SIDE_RIGHT;
    /// 5.0 with back surrounds.
    pub const FIVE_POINT_ZERO_BACK: u64 = STEREO | FRONT_CENTER | BACK_LEFT | BACK_RIGHT;
    /// 5.1 with side surrounds.
    pub const FIVE_POINT_ONE: u64 = FIVE_POINT_ZERO | LOW_FREQUENCY;
    /// 5.1 with back surrounds.
    pub const FIVE_POINT_ONE_BACK: u64 = FIVE_POINT_ZERO_BACK | LOW_FREQUENCY;
    /// 7.1: 5.1 + back left + right.
    pub const SEVEN_POINT_ONE: u64 = FIVE_POINT_ONE | BACK_LEFT | BACK_RIGHT;
    /// 7.1 wide: 5.1(back) + front left/right-of-center.
    pub const SEVEN_POINT_ONE_WIDE: u64 =
        FIVE_POINT_ONE_BACK | FRONT_LEFT_OF_CENTER | FRONT_RIGHT_OF_CENTER;
    /// Matrix-encoded stereo downmix.
    pub const STEREO_DOWNMIX: u64 = STEREO_LEFT | STEREO_RIGHT;

    /// Canonical layout names, for token parsing.
    pub const NAMES: [(&str, u64); 11] = [
        ("mono", MONO),
        ("stereo", STEREO),
        ("4.0", FOUR_POINT_ZERO),
        ("quad", QUAD),
        ("5.0", FIVE_POINT_ZERO),
        ("5.0(back)", FIVE_POINT_ZERO_BACK),
        ("5.1", FIVE_POINT_ONE),
        ("5.1(back)", FIVE_POINT_ONE_BACK),
        ("7.1", SEVEN_POINT_ONE),
        ("7.1(wide)", SEVEN_POINT_ONE_WIDE),
        ("downmix", STEREO_DOWNMIX),
    ];

    /// Resolve a layout mask by canonical name.
    pub fn from_name(name: &str) -> Option<u64> {
        NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, mask)| *mask)
    }
}

// ============================================================================
// Packing
// ============================================================================

/// Sample packing mode: how multi-channel audio is laid out in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Packing {
    /// Channels interleaved in one buffer.
    #[default]
    Packed = 0,
    /// One buffer per channel.
    Planar = 1,
}

impl Packing {
    /// Candidate code for this packing mode.
    #[inline]
    pub const fn code(self) -> FormatCode {
        self as FormatCode
    }

    /// Look up a packing mode by candidate code.
    pub const fn from_code(code: FormatCode) -> Option<Self> {
        match code {
            0 => Some(Self::Packed),
            1 => Some(Self::Planar),
            _ => None,
        }
    }
}
