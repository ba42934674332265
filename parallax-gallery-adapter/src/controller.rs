use parallax_gallery::{Gallery, GalleryFrame, GalleryOptions};

use crate::{Clock, Crossfade, CrossfadeSample, Easing};

/// What a host draws for one frame: the gallery layers plus the background cross-fade.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerFrame {
    pub gallery: GalleryFrame,
    /// `None` when no fade is running; draw `gallery.background` fully opaque.
    pub crossfade: Option<CrossfadeSample>,
}

/// A framework-neutral controller that wraps a [`Gallery`] and a [`Clock`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport` / `on_document_height` / `on_scroll` when the layout or scroll position changes
/// - `on_sentinel_visibility` when the end-of-list marker's visibility changes
/// - `tick()` on every frame or when [`Controller::next_wake_ms`] comes due
///
/// Time is read from the clock, so tests can swap in a [`crate::ManualClock`].
#[derive(Clone, Debug)]
pub struct Controller<C> {
    g: Gallery,
    clock: C,
    fade: Option<Crossfade>,
    easing: Easing,
}

impl<C: Clock> Controller<C> {
    pub fn new(options: GalleryOptions, clock: C) -> Self {
        Self::from_gallery(Gallery::new(options), clock)
    }

    pub fn from_gallery(g: Gallery, clock: C) -> Self {
        Self {
            g,
            clock,
            fade: None,
            easing: Easing::default(),
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.g
    }

    pub fn gallery_mut(&mut self) -> &mut Gallery {
        &mut self.g
    }

    pub fn into_gallery(self) -> Gallery {
        self.g
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn crossfade(&self) -> Option<Crossfade> {
        self.fade
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn observe_background(&mut self, before: usize, now_ms: u64) {
        let after = self.g.current_background_index();
        if after == before {
            return;
        }
        let duration_ms = self.g.config().crossfade_ms;
        match self.fade.as_mut() {
            Some(fade) if !fade.is_done(now_ms) => {
                fade.retarget(now_ms, after, duration_ms);
                if fade.from == fade.to {
                    // Back on the layer that was still mostly visible; nothing to fade.
                    atrace!(index = after, now_ms, "crossfade cancelled");
                    self.fade = None;
                } else {
                    atrace!(to = after, now_ms, "crossfade retargeted");
                }
            }
            _ => {
                adebug!(from = before, to = after, now_ms, "crossfade started");
                self.fade = Some(Crossfade::new(
                    before,
                    after,
                    now_ms,
                    duration_ms,
                    self.easing,
                ));
            }
        }
    }

    pub fn on_viewport(&mut self, viewport_height: u32) -> bool {
        let now_ms = self.clock.now_ms();
        let before = self.g.current_background_index();
        let changed = self.g.set_viewport_height(viewport_height);
        self.observe_background(before, now_ms);
        changed
    }

    pub fn on_document_height(&mut self, document_height: u64) -> bool {
        let now_ms = self.clock.now_ms();
        let before = self.g.current_background_index();
        let changed = self.g.set_document_height(document_height);
        self.observe_background(before, now_ms);
        changed
    }

    /// Call this when the UI reports a scroll offset change.
    pub fn on_scroll(&mut self, offset: u64) -> bool {
        let now_ms = self.clock.now_ms();
        let before = self.g.current_background_index();
        let changed = self.g.on_scroll(offset, now_ms);
        self.observe_background(before, now_ms);
        changed
    }

    /// Applies geometry and offset together (e.g. a resize that also moved the scroll position).
    pub fn apply_scroll_frame(
        &mut self,
        viewport_height: u32,
        document_height: u64,
        offset: u64,
    ) -> bool {
        let now_ms = self.clock.now_ms();
        let before = self.g.current_background_index();
        let changed = self
            .g
            .apply_scroll_frame(viewport_height, document_height, offset, now_ms);
        self.observe_background(before, now_ms);
        changed
    }

    pub fn on_sentinel_visibility(&mut self, ratio: f32) -> bool {
        let now_ms = self.clock.now_ms();
        self.g.on_sentinel_visibility(ratio, now_ms)
    }

    /// Advances the controller.
    ///
    /// Runs the gallery's due timers and retires a finished cross-fade. Returns `true` when
    /// the host should redraw.
    pub fn tick(&mut self) -> bool {
        let now_ms = self.clock.now_ms();
        let changed = self.g.tick(now_ms);
        let fading = match self.fade {
            Some(fade) if fade.is_done(now_ms) => {
                self.fade = None;
                true
            }
            Some(_) => true,
            None => false,
        };
        changed || fading
    }

    /// The earliest time a `tick` is needed: a gallery timer or the end of the running fade.
    pub fn next_wake_ms(&self) -> Option<u64> {
        let fade_end = self
            .fade
            .map(|f| f.start_ms.saturating_add(f.duration_ms));
        match (self.g.next_deadline(), fade_end) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Tears down the gallery and drops any running fade.
    pub fn unmount(&mut self) {
        self.fade = None;
        self.g.unmount();
    }

    pub fn frame(&self) -> ControllerFrame {
        let now_ms = self.clock.now_ms();
        ControllerFrame {
            gallery: self.g.frame(),
            crossfade: self
                .fade
                .filter(|f| !f.is_done(now_ms))
                .map(|f| f.sample(now_ms)),
        }
    }
}
