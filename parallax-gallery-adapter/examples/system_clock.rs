// Example: drive the controller from wall-clock time, sleeping until the next wake-up.
use std::thread;
use std::time::Duration;

use parallax_gallery::GalleryOptions;
use parallax_gallery_adapter::{Clock, Controller, SystemClock};

fn main() {
    let mut c = Controller::new(
        GalleryOptions::default().with_initial_geometry(800, 2_600),
        SystemClock::new(),
    );

    c.on_sentinel_visibility(1.0);
    c.on_scroll(1_800);

    while let Some(wake) = c.next_wake_ms() {
        let now = c.clock().now_ms();
        thread::sleep(Duration::from_millis(wake.saturating_sub(now)));
        if c.tick() {
            println!(
                "t={}ms len={} loading={} fading={}",
                c.clock().now_ms(),
                c.gallery().len(),
                c.gallery().is_loading_more(),
                c.is_fading()
            );
        }
    }
}
