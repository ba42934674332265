use crate::*;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }
}

fn ids(g: &Gallery) -> Vec<String> {
    g.visible_entries().iter().map(|e| e.id.clone()).collect()
}

fn counting(options: GalleryOptions) -> (Gallery, Arc<AtomicUsize>) {
    let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let g = Gallery::new(options.with_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &Gallery| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    })));
    (g, calls)
}

/// Appends batches until the list holds at least `len` entries.
fn grow_to(g: &mut Gallery, len: usize, now_ms: &mut u64) {
    while g.len() < len {
        assert!(g.on_sentinel_visibility(1.0, *now_ms));
        *now_ms += g.config().load_latency_ms;
        assert!(g.tick(*now_ms));
    }
}

#[test]
fn background_index_is_monotonic_and_in_range() {
    let mut rng = Lcg::new(7);
    for _ in 0..200 {
        let viewport = rng.gen_range_u64(1, 2_000) as u32;
        let document = viewport as u64 + rng.gen_range_u64(1, 50_000);
        let count = rng.gen_range_u64(1, 12) as usize;
        let h = document - viewport as u64;

        let mut prev = 0usize;
        let mut offset = 0u64;
        while offset <= h {
            let idx = select_background_index(offset, document, viewport, count).unwrap();
            assert!(idx < count);
            assert!(idx >= prev, "offset={offset} idx={idx} prev={prev}");
            prev = idx;
            offset += rng.gen_range_u64(1, h / 16 + 2);
        }
        assert_eq!(
            select_background_index(0, document, viewport, count),
            Some(0)
        );
        assert_eq!(
            select_background_index(h, document, viewport, count),
            Some(count - 1)
        );
    }
}

#[test]
fn background_index_clamps_past_max_scroll() {
    assert_eq!(select_background_index(10_000, 1_800, 800, 5), Some(4));
    assert_eq!(select_background_index(u64::MAX, 1_800, 800, 5), Some(4));
}

#[test]
fn background_index_not_computable_without_scrollable_height() {
    assert_eq!(select_background_index(500, 800, 800, 5), None);
    assert_eq!(select_background_index(500, 600, 800, 5), None);
    assert_eq!(select_background_index(500, 2_000, 800, 0), None);

    let mut g = Gallery::new(GalleryOptions::default().with_initial_geometry(800, 4_800));
    g.on_scroll(4_000, 0);
    let before = g.current_background_index();
    assert_eq!(before, 4);

    g.set_document_height(800);
    for off in [0u64, 10, 999, 123_456] {
        g.on_scroll(off, 0);
        assert_eq!(g.current_background_index(), before);
    }
}

#[test]
fn background_selector_only_reports_real_changes() {
    let mut s = BackgroundSelector::default();
    assert!(!s.update(0, 1_800, 800, 5));
    assert!(s.update(500, 1_800, 800, 5));
    assert_eq!(s.current(), 2);
    assert!(!s.update(500, 1_800, 800, 5));
    assert!(!s.update(500, 800, 800, 5));
    assert_eq!(s.current(), 2);
}

#[test]
fn recomputing_with_same_offset_is_idempotent() {
    let (mut g, calls) = counting(GalleryOptions::default().with_initial_geometry(800, 4_800));
    assert!(g.on_scroll(1_700, 0));
    let idx = g.current_background_index();
    let after_first = calls.load(Ordering::Relaxed);
    assert_eq!(after_first, 1);

    assert!(!g.on_scroll(1_700, 1));
    assert_eq!(g.current_background_index(), idx);
    assert_eq!(calls.load(Ordering::Relaxed), after_first);
}

#[test]
fn parallax_moves_at_half_speed() {
    let mut g = Gallery::new(GalleryOptions::default().with_initial_geometry(800, 4_800));
    g.on_scroll(1_000, 0);
    assert_eq!(g.background_translate_y(), 500.0);
    assert_eq!(parallax_offset(0, 0.5), 0.0);
}

#[test]
fn mount_shows_first_slice_of_content() {
    let g = Gallery::new(GalleryOptions::default());
    assert_eq!(ids(&g), ["1", "2", "3"]);
    assert_eq!(g.current_background_index(), 0);
    assert_eq!(g.load_state(), LoadState::Idle);
    assert!(g.is_mounted());
    assert!(g.is_observing_sentinel());

    let g = Gallery::new(GalleryOptions::default().with_initial_count(5));
    assert_eq!(ids(&g), ["1", "2", "3", "1-3", "2-4"]);
}

#[test]
fn one_batch_appends_three_cyclic_entries() {
    let mut g = Gallery::new(GalleryOptions::default());
    assert!(g.on_sentinel_visibility(0.5, 100));
    assert!(g.is_loading_more());
    assert_eq!(g.next_deadline(), Some(600));

    assert!(!g.tick(599));
    assert_eq!(g.len(), 3);

    assert!(g.tick(600));
    assert_eq!(g.len(), 6);
    assert_eq!(&ids(&g)[3..], ["1-3", "2-4", "3-5"]);
    assert!(!g.is_loading_more());

    let src = &g.content().entries[0];
    let copy = &g.visible_entries()[3];
    assert_eq!(copy.title, src.title);
    assert_eq!(copy.author, src.author);
    assert_eq!(copy.date, src.date);
    assert_eq!(copy.description, src.description);
    assert_eq!(copy.image, src.image);
}

#[test]
fn retriggering_while_loading_yields_one_batch() {
    let mut g = Gallery::new(GalleryOptions::default());
    assert!(g.on_sentinel_visibility(1.0, 0));
    assert!(!g.on_sentinel_visibility(1.0, 10));
    assert!(!g.on_sentinel_visibility(1.0, 499));
    assert!(g.tick(500));
    assert_eq!(g.len(), 6);
    assert!(!g.tick(1_000));
    assert_eq!(g.len(), 6);
}

#[test]
fn sentinel_below_threshold_is_ignored() {
    let mut g = Gallery::new(GalleryOptions::default());
    assert!(!g.on_sentinel_visibility(0.05, 0));
    assert!(!g.on_sentinel_visibility(f32::NAN, 0));
    assert!(!g.is_loading_more());
    assert!(g.on_sentinel_visibility(0.1, 0));
}

#[test]
fn ids_stay_unique_while_only_appending() {
    let mut g = Gallery::new(GalleryOptions::default());
    let mut now = 0;
    grow_to(&mut g, 30, &mut now);
    assert_eq!(g.len(), 30);
    assert!(g.has_unique_ids());
}

#[test]
fn trim_drops_prefix_per_heuristic() {
    let policy = TrimPolicy::default();
    assert_eq!(trim_count(25, 4_000, 800, policy), 4);
    assert_eq!(trim_count(20, 4_000, 800, policy), 0);
    assert_eq!(trim_count(25, 1_000, 800, policy), 0);
    assert_eq!(trim_count(21, 1_000_000, 800, policy), 21);

    let mut g = Gallery::new(
        GalleryOptions::default()
            .with_initial_count(25)
            .with_initial_geometry(800, 20_000),
    );
    let before = ids(&g);
    assert!(g.on_scroll(4_000, 0));
    assert_eq!(g.len(), 21);
    assert_eq!(ids(&g), before[4..]);
}

#[test]
fn trim_fires_at_most_once_per_cooldown() {
    let mut g = Gallery::new(
        GalleryOptions::default()
            .with_initial_count(60)
            .with_initial_geometry(800, 100_000),
    );
    // Leading edge trims immediately.
    g.on_scroll(4_000, 0);
    assert_eq!(g.len(), 56);

    // Rapid scrolling inside the window only records the latest offset.
    for (i, off) in [5_000u64, 6_000, 7_000, 8_200].into_iter().enumerate() {
        g.on_scroll(off, 100 + i as u64 * 100);
        assert_eq!(g.len(), 56);
    }
    assert_eq!(g.next_deadline(), Some(1_000));
    assert!(!g.tick(999));
    assert_eq!(g.len(), 56);

    // Trailing edge uses the last offset: (8200 - 1600) / 600 = 11.
    assert!(g.tick(1_000));
    assert_eq!(g.len(), 45);
    assert_eq!(g.next_deadline(), None);
    assert!(!g.tick(5_000));
    assert_eq!(g.len(), 45);
}

#[test]
fn throttle_coalesces_to_leading_and_trailing() {
    let mut t = Throttle::new(1_000);
    assert_eq!(t.call(0, 1), Some(1));
    for (i, now) in [10u64, 200, 500, 999].into_iter().enumerate() {
        assert_eq!(t.call(now, 2 + i), None);
    }
    assert_eq!(t.deadline(), Some(1_000));
    assert_eq!(t.poll(500), None);
    assert_eq!(t.poll(1_000), Some(5));
    assert_eq!(t.poll(1_500), None);

    // The trailing call opened a new window at t=1000.
    assert_eq!(t.call(1_500, 6), None);
    assert_eq!(t.poll(2_000), Some(6));
    assert_eq!(t.call(3_500, 7), Some(7));
}

#[test]
fn throttle_cancel_drops_pending() {
    let mut t = Throttle::new(100);
    assert_eq!(t.call(0, "a"), Some("a"));
    assert_eq!(t.call(50, "b"), None);
    t.cancel();
    assert!(!t.has_pending());
    assert_eq!(t.poll(1_000), None);
    assert_eq!(t.call(60, "c"), Some("c"));
}

#[test]
fn unmount_during_pending_batch_freezes_state() {
    let (mut g, calls) = counting(GalleryOptions::default());
    assert!(g.on_sentinel_visibility(1.0, 0));
    let before_calls = calls.load(Ordering::Relaxed);
    g.unmount();

    assert!(!g.tick(10_000));
    assert_eq!(g.len(), 3);
    assert!(!g.is_loading_more());
    assert!(!g.is_observing_sentinel());
    assert!(!g.on_sentinel_visibility(1.0, 20_000));
    assert!(!g.on_scroll(1_000, 20_000));
    assert!(!g.set_viewport_height(900));
    assert_eq!(g.scroll_offset(), 0);
    assert_eq!(g.next_deadline(), None);
    assert_eq!(calls.load(Ordering::Relaxed), before_calls);
}

#[test]
fn options_are_frozen_after_unmount() {
    let (mut g, calls) = counting(GalleryOptions::default().with_initial_geometry(800, 4_800));
    g.on_scroll(4_000, 0);
    assert_eq!(g.current_background_index(), 4);
    g.unmount();
    let before_calls = calls.load(Ordering::Relaxed);

    let mut content = ContentSource::builtin();
    content.backgrounds.truncate(2);
    g.update_options(|o| {
        o.content = Arc::new(content);
        o.config.trim_cooldown_ms = 5;
    });
    assert_eq!(g.current_background_index(), 4);
    assert_eq!(g.content().background_count(), 5);
    assert_eq!(g.config().trim_cooldown_ms, 1_000);
    assert_eq!(calls.load(Ordering::Relaxed), before_calls);
}

#[test]
fn unmount_cancels_trailing_trim() {
    let mut g = Gallery::new(
        GalleryOptions::default()
            .with_initial_count(30)
            .with_initial_geometry(800, 50_000),
    );
    g.on_scroll(100, 0);
    g.on_scroll(9_000, 10);
    assert!(g.next_deadline().is_some());
    g.unmount();
    assert!(!g.tick(2_000));
    assert_eq!(g.len(), 30);
}

#[test]
fn trim_before_append_changes_cyclic_sources() {
    let mut g = Gallery::new(
        GalleryOptions::default()
            .with_initial_count(25)
            .with_initial_geometry(800, 20_000),
    );
    g.on_scroll(4_000, 0);
    assert_eq!(g.len(), 21);

    assert!(g.on_sentinel_visibility(1.0, 10));
    assert!(g.tick(510));
    // Keys come from the length at append time, so they repeat ids still on screen.
    assert_eq!(&ids(&g)[21..], ["1-21", "2-22", "3-23"]);
    assert!(!g.has_unique_ids());
}

#[test]
fn frame_alternates_layout_and_shows_loading() {
    let mut g = Gallery::new(GalleryOptions::default().with_initial_geometry(800, 2_400));
    let f = g.frame();
    assert_eq!(f.cards.len(), 3);
    assert_eq!(f.cards[0].layout, CardLayout::MediaLeft);
    assert_eq!(f.cards[1].layout, CardLayout::MediaRight);
    assert_eq!(f.cards[2].layout, CardLayout::MediaLeft);
    assert_eq!(f.cards[1].id, "2");
    assert!(!f.show_loading);
    assert_eq!(
        f.background,
        Some(BackgroundLayer {
            index: 0,
            translate_y: 0.0
        })
    );

    g.on_sentinel_visibility(1.0, 0);
    assert!(g.frame().show_loading);
    g.tick(500);
    assert!(!g.frame().show_loading);
    assert_eq!(g.frame().cards.len(), 6);
}

#[test]
fn empty_backgrounds_skip_background_layer() {
    let mut content = ContentSource::builtin();
    content.backgrounds.clear();
    let mut g = Gallery::new(GalleryOptions::new(content).with_initial_geometry(800, 4_000));
    g.on_scroll(3_000, 0);
    assert_eq!(g.current_background_index(), 0);
    assert!(g.current_background().is_none());
    assert!(g.frame().background.is_none());
}

#[test]
fn empty_content_never_panics() {
    let mut g = Gallery::new(GalleryOptions::new(ContentSource::default()));
    assert!(g.is_empty());
    g.on_sentinel_visibility(1.0, 0);
    g.tick(500);
    assert!(g.is_empty());
    assert!(build_batch(&ContentSource::default(), 0, 3).is_empty());
}

#[test]
fn apply_scroll_frame_coalesces_on_change() {
    let (mut g, calls) = counting(GalleryOptions::default());
    assert!(g.apply_scroll_frame(800, 4_800, 2_000, 0));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(g.current_background_index(), 2);
}

#[test]
fn batch_update_is_nestable() {
    let (mut g, calls) = counting(GalleryOptions::default());
    g.batch_update(|g| {
        g.set_viewport_height(800);
        g.batch_update(|g| {
            g.set_document_height(4_800);
            g.on_scroll(10, 0);
        });
    });
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn frame_state_round_trips_geometry() {
    let mut g = Gallery::new(GalleryOptions::default());
    g.apply_scroll_frame(800, 4_800, 3_000, 0);
    let snap = g.frame_state();

    let mut h = Gallery::new(GalleryOptions::default());
    h.restore_frame_state(snap, 0);
    assert_eq!(h.frame_state(), snap);
    assert_eq!(h.current_background_index(), g.current_background_index());
}

#[test]
fn update_options_applies_new_cooldown() {
    let mut g = Gallery::new(
        GalleryOptions::default()
            .with_initial_count(40)
            .with_initial_geometry(800, 60_000),
    );
    g.update_options(|o| o.config.trim_cooldown_ms = 50);
    g.on_scroll(2_200, 0);
    assert_eq!(g.len(), 39);
    g.on_scroll(2_800, 10);
    assert_eq!(g.next_deadline(), Some(50));
    g.tick(50);
    assert_eq!(g.len(), 37);
}

#[test]
fn update_options_clamps_background_after_shrink() {
    let mut g = Gallery::new(GalleryOptions::default().with_initial_geometry(800, 4_800));
    g.on_scroll(4_000, 0);
    assert_eq!(g.current_background_index(), 4);

    let mut content = ContentSource::builtin();
    content.backgrounds.truncate(2);
    g.update_options(|o| o.content = Arc::new(content));
    assert_eq!(g.current_background_index(), 1);
    assert_eq!(g.current_background().map(|b| b.id.to_string()), Some("bg-2".to_string()));
}

#[test]
fn document_height_change_notifies_once() {
    let (mut g, calls) = counting(GalleryOptions::default().with_initial_geometry(800, 4_800));
    g.on_scroll(2_000, 0);
    assert_eq!(g.current_background_index(), 2);
    let before = calls.load(Ordering::Relaxed);

    assert!(g.set_document_height(8_800));
    assert_eq!(g.current_background_index(), 1);
    assert_eq!(calls.load(Ordering::Relaxed), before + 1);
}

#[test]
fn viewport_height_change_notifies_once() {
    let (mut g, calls) = counting(GalleryOptions::default().with_initial_geometry(800, 4_800));
    g.on_scroll(2_000, 0);
    let before = calls.load(Ordering::Relaxed);

    assert!(g.set_viewport_height(2_800));
    assert_eq!(g.current_background_index(), 4);
    assert_eq!(calls.load(Ordering::Relaxed), before + 1);

    assert!(!g.set_viewport_height(2_800));
    assert_eq!(calls.load(Ordering::Relaxed), before + 1);
}

#[test]
fn set_options_notifies_once() {
    let (mut g, calls) = counting(GalleryOptions::default().with_initial_geometry(800, 4_800));
    g.on_scroll(4_000, 0);
    let before = calls.load(Ordering::Relaxed);

    let mut content = ContentSource::builtin();
    content.backgrounds.truncate(3);
    g.update_options(|o| o.content = Arc::new(content));
    assert_eq!(g.current_background_index(), 2);
    assert_eq!(calls.load(Ordering::Relaxed), before + 1);
}
