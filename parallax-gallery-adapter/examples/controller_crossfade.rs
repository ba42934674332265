// Example: a controller driven by a manual clock, printing cross-fade opacities.
use parallax_gallery::GalleryOptions;
use parallax_gallery_adapter::{Clock, Controller, Easing, ManualClock};

fn main() {
    let clock = ManualClock::new(0);
    let mut c = Controller::new(
        GalleryOptions::default().with_initial_geometry(800, 4_800),
        clock.clone(),
    );
    c.set_easing(Easing::EaseInOutCubic);

    c.on_scroll(1_700);
    while c.is_fading() {
        clock.advance(100);
        c.tick();
        let frame = c.frame();
        println!(
            "t={}ms background={:?} crossfade={:?}",
            clock.now_ms(),
            frame.gallery.background,
            frame.crossfade
        );
    }
}
