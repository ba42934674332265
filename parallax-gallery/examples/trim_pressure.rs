// Example: keep loading while scrolling down and watch the front of the list get trimmed.
use parallax_gallery::{Gallery, GalleryOptions};

const ITEM_HEIGHT: u64 = 600;
const VIEWPORT: u32 = 800;

fn main() {
    let mut g = Gallery::new(GalleryOptions::default().with_initial_geometry(VIEWPORT, 0));

    let mut now_ms = 0u64;
    let mut offset = 0u64;
    while now_ms < 30_000 {
        now_ms += 100;
        offset += 450;

        // The host lays the list out; approximate with a fixed card height.
        g.set_document_height(g.len() as u64 * ITEM_HEIGHT + VIEWPORT as u64);
        g.on_scroll(offset, now_ms);

        let bottom = offset + VIEWPORT as u64;
        if bottom + ITEM_HEIGHT >= g.document_height() {
            g.on_sentinel_visibility(1.0, now_ms);
        }
        if g.tick(now_ms) || now_ms % 2_000 == 0 {
            println!(
                "t={now_ms}ms offset={offset} len={} first={:?} loading={} unique_ids={}",
                g.len(),
                g.visible_entries().first().map(|e| e.id.as_str()),
                g.is_loading_more(),
                g.has_unique_ids()
            );
        }
    }
    g.unmount();
}
