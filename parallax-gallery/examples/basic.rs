// Example: mount, scroll through the page and load one batch.
use parallax_gallery::{Gallery, GalleryOptions};

fn main() {
    let mut g = Gallery::new(GalleryOptions::default().with_initial_geometry(800, 4_800));
    println!("mounted: {:?}", g.frame());

    for (now_ms, offset) in [(0u64, 0u64), (16, 900), (32, 2_400), (48, 4_000)] {
        g.on_scroll(offset, now_ms);
        println!(
            "t={now_ms}ms offset={offset} background={:?} translate_y={}",
            g.current_background().map(|b| b.name.as_str()),
            g.background_translate_y()
        );
    }

    g.on_sentinel_visibility(0.25, 100);
    println!(
        "loading={} deadline={:?}",
        g.is_loading_more(),
        g.next_deadline()
    );
    g.tick(600);
    let ids: Vec<_> = g.visible_entries().iter().map(|e| e.id.as_str()).collect();
    println!("after batch: {ids:?}");
}
