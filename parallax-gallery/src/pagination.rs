use alloc::vec::Vec;

use crate::{ContentSource, GalleryEntry};

/// Whether a (simulated) batch load is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    #[default]
    Idle,
    LoadingBatch {
        /// When the batch lands.
        due_ms: u64,
    },
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::LoadingBatch { .. })
    }
}

/// The `Idle` / `LoadingBatch` state machine behind infinite scrolling.
///
/// Only one batch may be in flight; triggers while loading are dropped, not queued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    state: LoadState,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn deadline(&self) -> Option<u64> {
        match self.state {
            LoadState::Idle => None,
            LoadState::LoadingBatch { due_ms } => Some(due_ms),
        }
    }

    /// `Idle -> LoadingBatch`. Returns `false` if a batch is already pending.
    pub fn begin(&mut self, now_ms: u64, latency_ms: u64) -> bool {
        if self.is_loading() {
            gdebug!(now_ms, due_ms = ?self.deadline(), "batch already loading; trigger ignored");
            return false;
        }
        let due_ms = now_ms.saturating_add(latency_ms);
        gdebug!(now_ms, due_ms, "batch load started");
        self.state = LoadState::LoadingBatch { due_ms };
        true
    }

    /// `LoadingBatch -> Idle` once the latency has elapsed.
    ///
    /// Returns `true` exactly once per batch; the caller appends the batch in the same step.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.state {
            LoadState::LoadingBatch { due_ms } if now_ms >= due_ms => {
                self.state = LoadState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.state = LoadState::Idle;
    }
}

/// Builds the next batch for a list currently holding `current_len` entries.
///
/// Entry `i` is the source entry at `(current_len + i) mod source_len`, re-keyed as
/// `"{source_id}-{current_len + i}"`.
pub fn build_batch(
    content: &ContentSource,
    current_len: usize,
    batch_size: usize,
) -> Vec<GalleryEntry> {
    (0..batch_size)
        .filter_map(|i| content.synthesize(current_len.saturating_add(i)))
        .collect()
}

/// Knobs for the front-trimming heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrimPolicy {
    /// Trimming only happens while the list is longer than this.
    pub threshold: usize,
    /// Estimated height of one card. Real cards vary; this is a rough cut.
    pub approx_item_height: u32,
    /// How many viewports of content above the current position to keep.
    pub retain_viewports: u32,
}

impl Default for TrimPolicy {
    fn default() -> Self {
        Self {
            threshold: 20,
            approx_item_height: 600,
            retain_viewports: 2,
        }
    }
}

/// How many entries to drop from the front of the list.
///
/// `floor((scroll_top - retain_viewports * viewport_height) / approx_item_height)`, clamped to
/// `[0, len]`, and `0` whenever `len <= threshold`.
pub fn trim_count(len: usize, scroll_top: u64, viewport_height: u32, policy: TrimPolicy) -> usize {
    if len <= policy.threshold || policy.approx_item_height == 0 {
        return 0;
    }
    let retained = viewport_height as u64 * policy.retain_viewports as u64;
    // Negative keep-after means we're still near the top; nothing to drop.
    let Some(keep_after) = scroll_top.checked_sub(retained) else {
        return 0;
    };
    let n = keep_after / policy.approx_item_height as u64;
    usize::try_from(n).unwrap_or(usize::MAX).min(len)
}
