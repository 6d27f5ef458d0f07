//! Default candidate domains.
//!
//! Nodes that accept "anything reasonable" start negotiation from these
//! sets instead of enumerating formats by hand. The pixel domain leaves
//! out opaque hardware surfaces, since a generic node cannot touch data
//! behind them; the sample domain is complete. The channel-layout list is
//! a curated set of common layouts, deliberately not exhaustive.

use crate::error::Result;
use crate::format::{channels, MediaType, Packing, PixelFormat, SampleFormat};
use crate::set::{FormatRegistry, SetId};

/// Every format of the given media kind, as a fresh candidate set.
///
/// For [`MediaType::Video`] this is every pixel format that is not an
/// opaque hardware surface; for [`MediaType::Audio`] it is every sample
/// format.
pub fn all_formats(registry: &mut FormatRegistry, media: MediaType) -> Result<SetId> {
    let mut set = None;
    match media {
        MediaType::Video => {
            for fmt in PixelFormat::ALL {
                if !fmt.is_opaque() {
                    registry.add_format(&mut set, fmt.code())?;
                }
            }
        }
        MediaType::Audio => {
            for fmt in SampleFormat::ALL {
                registry.add_format(&mut set, fmt.code())?;
            }
        }
    }
    // At least one non-opaque format exists per domain, so the set was
    // allocated above.
    debug_assert!(set.is_some());
    match set {
        Some(id) => Ok(id),
        None => registry.from_list(&[]),
    }
}

const DEFAULT_LAYOUTS: [u64; 12] = [
    channels::MONO,
    channels::STEREO,
    channels::FOUR_POINT_ZERO,
    channels::QUAD,
    channels::FIVE_POINT_ZERO,
    channels::FIVE_POINT_ZERO_BACK,
    channels::FIVE_POINT_ONE,
    channels::FIVE_POINT_ONE_BACK,
    channels::FIVE_POINT_ONE | channels::STEREO_DOWNMIX,
    channels::SEVEN_POINT_ONE,
    channels::SEVEN_POINT_ONE_WIDE,
    channels::SEVEN_POINT_ONE | channels::STEREO_DOWNMIX,
];

/// The curated channel-layout domain, as a fresh candidate set.
///
/// Practical defaults (mono through 7.1, including stereo-downmix-flagged
/// variants), not every expressible speaker mask.
pub fn all_channel_layouts(registry: &mut FormatRegistry) -> Result<SetId> {
    let codes: Vec<i64> = DEFAULT_LAYOUTS.iter().map(|&mask| mask as i64).collect();
    registry.from_list(&codes)
}

/// The packing domain: packed and planar.
pub fn all_packing_modes(registry: &mut FormatRegistry) -> Result<SetId> {
    registry.from_list(&[Packing::Packed.code(), Packing::Planar.code()])
}
