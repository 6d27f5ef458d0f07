//! # Converge
//!
//! Format negotiation core for media pipeline graphs.
//!
//! When a processing graph is prepared, every link must settle on a single
//! data representation (pixel format, sample format, sample rate, channel
//! layout, packing mode) that both endpoints can handle. Converge owns the
//! machinery for that: shared candidate sets, their reference bookkeeping,
//! and the intersection-based merge that collapses the sets on either side
//! of a link into one.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     FormatRegistry                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  1. Build one candidate set per link endpoint                │
//! │     (default domains or explicit lists)                      │
//! │  2. Attach each endpoint's owner slot to its set             │
//! │  3. Merge the two sets across each link: intersect the       │
//! │     candidates, transplant every owner to the result         │
//! │  4. Repeat until every link references exactly one set       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The driver that walks the graph and decides which links to merge in what
//! order lives outside this crate, as does splitting configuration strings
//! into individual tokens. Converge only sees single tokens (via the
//! [`parse`] module) and single merge requests.
//!
//! ## Example
//!
//! ```rust
//! use converge::prelude::*;
//!
//! let mut registry = FormatRegistry::new();
//!
//! // Two endpoints propose overlapping pixel format lists.
//! let src = registry.from_list(&[
//!     PixelFormat::I420.code(),
//!     PixelFormat::Rgb24.code(),
//!     PixelFormat::Nv12.code(),
//! ])?;
//! let sink = registry.from_list(&[
//!     PixelFormat::Rgb24.code(),
//!     PixelFormat::Nv12.code(),
//!     PixelFormat::I444.code(),
//! ])?;
//!
//! let src_slot = registry.create_slot();
//! let sink_slot = registry.create_slot();
//! registry.attach(src, src_slot)?;
//! registry.attach(sink, sink_slot)?;
//!
//! // Intersect: both slots now reference the merged set.
//! let merged = registry.merge(src, sink)?;
//! assert_eq!(
//!     registry.candidates(merged)?,
//!     &[PixelFormat::Rgb24.code(), PixelFormat::Nv12.code()],
//! );
//! assert_eq!(registry.slot_target(src_slot)?, Some(merged));
//! assert_eq!(registry.slot_target(sink_slot)?, Some(merged));
//! # Ok::<(), converge::NegotiationError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod defaults;
pub mod error;
pub mod format;
mod merge;
pub mod parse;
pub mod set;

pub use error::{NegotiationError, Result};
pub use format::{FormatCode, MediaType, Packing, PixelFormat, SampleFormat};
pub use set::{FormatRegistry, FormatSet, SetId, SlotId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::defaults::{all_channel_layouts, all_formats, all_packing_modes};
    pub use crate::error::{NegotiationError, Result};
    pub use crate::format::{FormatCode, MediaType, Packing, PixelFormat, SampleFormat};
    pub use crate::parse::{
        parse_channel_layout, parse_packing, parse_sample_format, parse_sample_rate,
    };
    pub use crate::set::{FormatRegistry, FormatSet, SetId, SlotId};
}
