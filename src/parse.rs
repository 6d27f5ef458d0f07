//! Scalar token parsers for configuration values.
//!
//! Each function converts one already-isolated configuration token into a
//! typed domain value. Splitting delimiter-separated option strings (for
//! example `"44100,48000"`) into tokens happens upstream; these parsers
//! only ever see a single token, and they never touch a
//! [`crate::set::FormatRegistry`].
//!
//! Failures carry the offending token in
//! [`NegotiationError::InvalidArgument`] so the configuration layer can
//! point at the exact option value.

use crate::error::{NegotiationError, Result};
use crate::format::{channels, Packing, SampleFormat};

/// Parse a sample format token: a canonical name (`"s16"`, `"f32"`, ...)
/// or a bare integer code.
pub fn parse_sample_format(text: &str) -> Result<SampleFormat> {
    if let Some(fmt) = SampleFormat::from_name(text) {
        return Ok(fmt);
    }
    text.parse::<i64>()
        .ok()
        .and_then(SampleFormat::from_code)
        .ok_or_else(|| NegotiationError::invalid_argument("sample format", text))
}

/// Parse a sample rate token.
///
/// Accepts a floating-point literal, but the value must be integral and
/// at least 1 Hz.
pub fn parse_sample_rate(text: &str) -> Result<u32> {
    let rate: f64 = text
        .parse()
        .map_err(|_| NegotiationError::invalid_argument("sample rate", text))?;
    if rate.is_nan() || rate < 1.0 || rate != rate.trunc() || rate > f64::from(u32::MAX) {
        return Err(NegotiationError::invalid_argument("sample rate", text));
    }
    Ok(rate as u32)
}

/// Parse a channel layout token: a canonical layout name (`"stereo"`,
/// `"5.1"`, ...) or a bare decimal speaker mask. A zero mask is invalid.
pub fn parse_channel_layout(text: &str) -> Result<u64> {
    if let Some(mask) = channels::from_name(text) {
        return Ok(mask);
    }
    match text.parse::<u64>() {
        Ok(mask) if mask != 0 => Ok(mask),
        _ => Err(NegotiationError::invalid_argument("channel layout", text)),
    }
}

/// Parse a packing mode token: `0`/`1` or the literals `"packed"` and
/// `"planar"`.
pub fn parse_packing(text: &str) -> Result<Packing> {
    if let Ok(code) = text.parse::<i64>() {
        return Packing::from_code(code)
            .ok_or_else(|| NegotiationError::invalid_argument("packing mode", text));
    }
    match text {
        "packed" => Ok(Packing::Packed),
        "planar" => Ok(Packing::Planar),
        _ => Err(NegotiationError::invalid_argument("packing mode", text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offending_text(err: NegotiationError) -> String {
        match err {
            NegotiationError::InvalidArgument { text, .. } => text,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_sample_format_by_name() {
        assert_eq!(parse_sample_format("s16").unwrap(), SampleFormat::S16);
        assert_eq!(parse_sample_format("f64").unwrap(), SampleFormat::F64);
    }

    #[test]
    fn test_parse_sample_format_by_code() {
        assert_eq!(parse_sample_format("0").unwrap(), SampleFormat::U8);
        assert_eq!(parse_sample_format("3").unwrap(), SampleFormat::F32);
    }

    #[test]
    fn test_parse_sample_format_rejects_bad_tokens() {
        // Out of range, trailing characters, unknown name.
        assert!(parse_sample_format("99").is_err());
        assert!(parse_sample_format("-1").is_err());
        assert!(parse_sample_format("2x").is_err());
        assert_eq!(offending_text(parse_sample_format("pcm").unwrap_err()), "pcm");
    }

    #[test]
    fn test_parse_sample_rate() {
        assert_eq!(parse_sample_rate("48000").unwrap(), 48000);
        assert_eq!(parse_sample_rate("44100.0").unwrap(), 44100);
        assert_eq!(parse_sample_rate("1").unwrap(), 1);
    }

    #[test]
    fn test_parse_sample_rate_rejects_bad_tokens() {
        assert!(parse_sample_rate("48000.5").is_err()); // not integral
        assert!(parse_sample_rate("-1").is_err()); // below 1
        assert!(parse_sample_rate("0.25").is_err());
        assert!(parse_sample_rate("48000Hz").is_err()); // trailing characters
        assert!(parse_sample_rate("NaN").is_err());
        assert!(parse_sample_rate("inf").is_err());
    }

    #[test]
    fn test_parse_channel_layout_by_name() {
        assert_eq!(parse_channel_layout("mono").unwrap(), channels::MONO);
        assert_eq!(
            parse_channel_layout("7.1(wide)").unwrap(),
            channels::SEVEN_POINT_ONE_WIDE
        );
    }

    #[test]
    fn test_parse_channel_layout_by_mask() {
        assert_eq!(parse_channel_layout("3").unwrap(), channels::STEREO);
        assert_eq!(parse_channel_layout("63").unwrap(), 63);
    }

    #[test]
    fn test_parse_channel_layout_rejects_bad_tokens() {
        assert!(parse_channel_layout("0").is_err()); // empty mask
        assert!(parse_channel_layout("3ch").is_err());
        assert_eq!(
            offending_text(parse_channel_layout("surround").unwrap_err()),
            "surround"
        );
    }

    #[test]
    fn test_parse_packing() {
        assert_eq!(parse_packing("0").unwrap(), Packing::Packed);
        assert_eq!(parse_packing("1").unwrap(), Packing::Planar);
        assert_eq!(parse_packing("packed").unwrap(), Packing::Packed);
        assert_eq!(parse_packing("planar").unwrap(), Packing::Planar);
    }

    #[test]
    fn test_parse_packing_rejects_bad_tokens() {
        assert!(parse_packing("7").is_err()); // outside {0, 1}
        assert!(parse_packing("interleaved").is_err());
        assert!(parse_packing("").is_err());
    }
}
