//! A headless parallax image-gallery engine.
//!
//! For adapter-level utilities (clocks, cross-fades, a time-driven controller), see the
//! `parallax-gallery-adapter` crate.
//!
//! This crate holds the state and arithmetic behind a scrolling photo gallery:
//! - a background index chosen from proportional scroll progress, with a parallax offset
//! - simulated infinite scroll: fixed-size batches appended from a cyclic content source after
//!   a fixed latency, one batch in flight at a time
//! - a throttled heuristic that trims the front of the list once it grows long
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - viewport height and document height
//! - scroll offset notifications
//! - visibility reports for an end-of-list sentinel
//! - a clock, by passing `now_ms` and calling `Gallery::tick`
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod background;
mod content;
mod gallery;
mod options;
mod pagination;
mod state;
mod throttle;
mod types;

#[cfg(test)]
mod tests;

pub use background::{BackgroundSelector, parallax_offset, select_background_index};
pub use content::{AssetRef, BackgroundEntry, ContentSource, GalleryEntry};
pub use gallery::Gallery;
pub use options::{GalleryConfig, GalleryOptions, OnChangeCallback};
pub use pagination::{LoadState, Pagination, TrimPolicy, build_batch, trim_count};
pub use state::{FrameState, ScrollState, ViewportState};
pub use throttle::Throttle;
pub use types::{BackgroundLayer, Card, CardLayout, GalleryFrame};
