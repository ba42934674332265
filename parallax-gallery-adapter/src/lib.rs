//! Adapter utilities for the `parallax-gallery` crate.
//!
//! The `parallax-gallery` crate is UI-agnostic and takes time as a plain `now_ms` argument. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A [`Clock`] abstraction, with a manual clock for deterministic tests
//! - Cross-fade helpers for background transitions
//! - A [`Controller`] that ties a gallery, a clock and the cross-fade together
//!
//! This crate is intentionally framework-agnostic (no DOM/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod clock;
mod controller;
mod crossfade;


#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use controller::{Controller, ControllerFrame};
pub use crossfade::{Crossfade, CrossfadeSample, Easing};
