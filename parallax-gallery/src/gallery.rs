use alloc::collections::BTreeSet;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::background::{BackgroundSelector, parallax_offset};
use crate::pagination::{Pagination, build_batch, trim_count};
use crate::throttle::Throttle;
use crate::{
    BackgroundEntry, BackgroundLayer, Card, CardLayout, ContentSource, FrameState, GalleryConfig,
    GalleryEntry, GalleryFrame, GalleryOptions, LoadState, ScrollState, ViewportState,
};

/// A headless parallax gallery.
///
/// This type is UI-agnostic:
/// - It does not hold any UI objects or timers.
/// - Your adapter drives it with scroll offsets, geometry, sentinel visibility and `tick(now_ms)`.
/// - Rendering reads [`Gallery::frame`] or [`Gallery::for_each_card`].
///
/// Creating a `Gallery` is the mount; [`Gallery::unmount`] is the teardown. After teardown every
/// event method is a no-op, so late timer callbacks cannot mutate state.
#[derive(Clone, Debug)]
pub struct Gallery {
    options: GalleryOptions,
    entries: Vec<GalleryEntry>,
    scroll_offset: u64,
    viewport_height: u32,
    document_height: u64,
    background: BackgroundSelector,
    pagination: Pagination,
    trim: Throttle<u64>,
    mounted: bool,
    observing_sentinel: bool,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Gallery {
    /// Mounts a gallery with the first `initial_count` entries of the content source.
    pub fn new(options: GalleryOptions) -> Self {
        let entries = initial_entries(&options.content, options.config.initial_count);
        gdebug!(
            entries = entries.len(),
            sources = options.content.entry_count(),
            backgrounds = options.content.background_count(),
            "Gallery::new"
        );
        let mut g = Self {
            entries,
            scroll_offset: 0,
            viewport_height: options.initial_viewport_height,
            document_height: options.initial_document_height,
            background: BackgroundSelector::default(),
            pagination: Pagination::new(),
            trim: Throttle::new(options.config.trim_cooldown_ms),
            mounted: true,
            observing_sentinel: true,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        g.recompute_background();
        g
    }

    pub fn options(&self) -> &GalleryOptions {
        &self.options
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.options.config
    }

    pub fn content(&self) -> &ContentSource {
        &self.options.content
    }

    /// Replaces the options. Visible entries are kept; a new catalogue only affects later batches.
    pub fn set_options(&mut self, options: GalleryOptions) {
        if !self.mounted {
            return;
        }
        self.batch_update(|g| {
            g.options = options;
            g.trim.set_wait_ms(g.options.config.trim_cooldown_ms);
            g.background.clamp_to(g.options.content.background_count());
            g.recompute_background();
            gtrace!(config = ?g.options.config, "Gallery::set_options");
            g.notify();
        });
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut GalleryOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&Gallery) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if !self.mounted {
            return;
        }
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        let out = f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) && self.mounted {
            self.notify_now();
        }
        out
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_observing_sentinel(&self) -> bool {
        self.observing_sentinel
    }

    /// Tears the view down: releases the sentinel observer and cancels both timers.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        gdebug!(
            entries = self.entries.len(),
            loading = self.pagination.is_loading(),
            trim_pending = self.trim.has_pending(),
            "Gallery::unmount"
        );
        self.mounted = false;
        self.observing_sentinel = false;
        self.pagination.cancel();
        self.trim.cancel();
        self.notify_pending.set(false);
    }

    pub fn visible_entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every visible id is distinct. Trimming followed by a batch can break this.
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.entries.iter().all(|e| seen.insert(e.id.as_str()))
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn document_height(&self) -> u64 {
        self.document_height
    }

    pub fn current_background_index(&self) -> usize {
        self.background.current()
    }

    pub fn current_background(&self) -> Option<&BackgroundEntry> {
        self.options.content.background(self.background.current())
    }

    /// Vertical translation of the background layer for the current offset.
    pub fn background_translate_y(&self) -> f32 {
        parallax_offset(self.scroll_offset, self.options.config.parallax_factor)
    }

    pub fn load_state(&self) -> LoadState {
        self.pagination.state()
    }

    pub fn is_loading_more(&self) -> bool {
        self.pagination.is_loading()
    }

    /// The earliest time at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.pagination.deadline(), self.trim.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            viewport_height: self.viewport_height,
            document_height: self.document_height,
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores geometry without touching the trim throttle.
    pub fn restore_viewport_state(&mut self, viewport: ViewportState) {
        self.batch_update(|g| {
            g.set_viewport_height(viewport.viewport_height);
            g.set_document_height(viewport.document_height);
        });
    }

    /// Restores the scroll offset as if a scroll event happened at `now_ms`.
    pub fn restore_scroll_state(&mut self, scroll: ScrollState, now_ms: u64) {
        self.on_scroll(scroll.offset, now_ms);
    }

    pub fn restore_frame_state(&mut self, frame: FrameState, now_ms: u64) {
        self.apply_scroll_frame(
            frame.viewport.viewport_height,
            frame.viewport.document_height,
            frame.scroll.offset,
            now_ms,
        );
    }

    fn recompute_background(&mut self) -> bool {
        let changed = self.background.update(
            self.scroll_offset,
            self.document_height,
            self.viewport_height,
            self.options.content.background_count(),
        );
        if changed {
            self.notify();
        }
        changed
    }

    pub fn set_viewport_height(&mut self, height: u32) -> bool {
        if !self.mounted || self.viewport_height == height {
            return false;
        }
        self.batch_update(|g| {
            g.viewport_height = height;
            g.notify();
            g.recompute_background();
        });
        true
    }

    pub fn set_document_height(&mut self, height: u64) -> bool {
        if !self.mounted || self.document_height == height {
            return false;
        }
        self.batch_update(|g| {
            g.document_height = height;
            g.notify();
            g.recompute_background();
        });
        true
    }

    /// Handles a scroll notification from the host.
    ///
    /// Updates the offset (no debounce), re-selects the background and offers the offset to the
    /// trim throttle. Returns `true` when anything observable changed.
    pub fn on_scroll(&mut self, offset: u64, now_ms: u64) -> bool {
        if !self.mounted {
            return false;
        }
        gtrace!(offset, now_ms, "on_scroll");
        self.batch_update(|g| {
            let mut changed = false;
            if g.scroll_offset != offset {
                g.scroll_offset = offset;
                g.notify();
                changed = true;
            }
            changed |= g.recompute_background();
            if let Some(scroll_top) = g.trim.call(now_ms, offset) {
                changed |= g.apply_trim(scroll_top);
            }
            changed
        })
    }

    /// Applies viewport, document height and scroll offset in a single coalesced update.
    pub fn apply_scroll_frame(
        &mut self,
        viewport_height: u32,
        document_height: u64,
        offset: u64,
        now_ms: u64,
    ) -> bool {
        if !self.mounted {
            return false;
        }
        self.batch_update(|g| {
            let mut changed = g.set_viewport_height(viewport_height);
            changed |= g.set_document_height(document_height);
            changed |= g.on_scroll(offset, now_ms);
            changed
        })
    }

    /// Handles a visibility report for the end-of-list sentinel.
    ///
    /// Starts a batch when `ratio` reaches the threshold and no batch is in flight. Returns `true`
    /// when a batch was started.
    pub fn on_sentinel_visibility(&mut self, ratio: f32, now_ms: u64) -> bool {
        if !self.mounted || !self.observing_sentinel {
            return false;
        }
        // Written this way round so NaN never triggers.
        if !(ratio >= self.options.config.visibility_threshold) {
            return false;
        }
        let started = self
            .pagination
            .begin(now_ms, self.options.config.load_latency_ms);
        if started {
            self.notify();
        }
        started
    }

    /// Runs due timers: completes a pending batch and fires a deferred trim.
    ///
    /// Returns `true` when anything observable changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.mounted {
            return false;
        }
        self.batch_update(|g| {
            let mut changed = false;
            if g.pagination.poll(now_ms) {
                g.append_batch();
                changed = true;
            }
            if let Some(scroll_top) = g.trim.poll(now_ms) {
                gtrace!(scroll_top, now_ms, "trailing trim");
                changed |= g.apply_trim(scroll_top);
            }
            changed
        })
    }

    fn append_batch(&mut self) {
        let current_len = self.entries.len();
        let batch = build_batch(
            &self.options.content,
            current_len,
            self.options.config.batch_size,
        );
        let collisions = batch
            .iter()
            .filter(|b| self.entries.iter().any(|e| e.id == b.id))
            .count();
        if collisions > 0 {
            gwarn!(collisions, current_len, "appended ids collide with visible ids");
        }
        gdebug!(current_len, appended = batch.len(), "batch appended");
        self.entries.extend(batch);
        self.notify();
    }

    fn apply_trim(&mut self, scroll_top: u64) -> bool {
        let n = trim_count(
            self.entries.len(),
            scroll_top,
            self.viewport_height,
            self.options.config.trim,
        );
        if n == 0 {
            return false;
        }
        self.entries.drain(..n);
        gdebug!(
            dropped = n,
            remaining = self.entries.len(),
            scroll_top,
            "trimmed list front"
        );
        self.notify();
        true
    }

    pub fn card_layout(&self, index: usize) -> CardLayout {
        CardLayout::for_position(index)
    }

    /// Iterates visible entries with their card layout, top to bottom.
    pub fn for_each_card(&self, mut f: impl FnMut(usize, &GalleryEntry, CardLayout)) {
        for (i, e) in self.entries.iter().enumerate() {
            f(i, e, CardLayout::for_position(i));
        }
    }

    /// Builds a render description of the current state.
    pub fn frame(&self) -> GalleryFrame {
        let background = (self.options.content.background_count() > 0).then(|| BackgroundLayer {
            index: self.background.current(),
            translate_y: self.background_translate_y(),
        });
        let mut cards = Vec::with_capacity(self.entries.len());
        self.for_each_card(|index, e, layout| {
            cards.push(Card {
                index,
                id: e.id.clone(),
                layout,
            })
        });
        GalleryFrame {
            background,
            cards,
            show_loading: self.pagination.is_loading(),
        }
    }
}

fn initial_entries(content: &ContentSource, count: usize) -> Vec<GalleryEntry> {
    (0..count)
        .filter_map(|i| match content.entries.get(i) {
            Some(e) => Some(e.clone()),
            None => content.synthesize(i),
        })
        .collect()
}
