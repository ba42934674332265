use alloc::sync::Arc;

use crate::gallery::Gallery;
use crate::{ContentSource, TrimPolicy};

/// A callback fired when the gallery's observable state changes (the host re-renders).
pub type OnChangeCallback = Arc<dyn Fn(&Gallery) + Send + Sync>;

/// Plain tuning knobs, separate from content and callbacks.
///
/// With `feature = "serde"`, this can be loaded from a config file. Missing fields fall back to
/// their defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GalleryConfig {
    /// How many entries are shown on mount.
    pub initial_count: usize,
    /// Entries appended per pagination batch.
    pub batch_size: usize,
    /// Simulated load latency for one batch.
    pub load_latency_ms: u64,
    /// Minimum visible ratio of the sentinel that triggers a load.
    pub visibility_threshold: f32,
    /// Minimum time between two trim passes.
    pub trim_cooldown_ms: u64,
    pub trim: TrimPolicy,
    /// Background speed relative to the content.
    pub parallax_factor: f32,
    /// Duration of the background cross-fade. Used by adapters.
    pub crossfade_ms: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            initial_count: 3,
            batch_size: 3,
            load_latency_ms: 500,
            visibility_threshold: 0.1,
            trim_cooldown_ms: 1000,
            trim: TrimPolicy::default(),
            parallax_factor: 0.5,
            crossfade_ms: 700,
        }
    }
}

/// Configuration for [`crate::Gallery`].
///
/// Cheap to clone: the content is shared via `Arc`, so adapters can tweak a knob and call
/// `Gallery::set_options` without copying the catalogue.
pub struct GalleryOptions {
    pub content: Arc<ContentSource>,
    pub config: GalleryConfig,
    /// Optional callback fired after each coalesced state change.
    pub on_change: Option<OnChangeCallback>,
    /// Initial viewport height, if already known at mount.
    pub initial_viewport_height: u32,
    /// Initial document height, if already known at mount.
    pub initial_document_height: u64,
}

impl Clone for GalleryOptions {
    fn clone(&self) -> Self {
        Self {
            content: Arc::clone(&self.content),
            config: self.config,
            on_change: self.on_change.clone(),
            initial_viewport_height: self.initial_viewport_height,
            initial_document_height: self.initial_document_height,
        }
    }
}

impl GalleryOptions {
    pub fn new(content: ContentSource) -> Self {
        Self::from_shared(Arc::new(content))
    }

    pub fn from_shared(content: Arc<ContentSource>) -> Self {
        Self {
            content,
            config: GalleryConfig::default(),
            on_change: None,
            initial_viewport_height: 0,
            initial_document_height: 0,
        }
    }

    pub fn with_config(mut self, config: GalleryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_initial_count(mut self, initial_count: usize) -> Self {
        self.config.initial_count = initial_count;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    pub fn with_load_latency_ms(mut self, latency_ms: u64) -> Self {
        self.config.load_latency_ms = latency_ms;
        self
    }

    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.config.visibility_threshold = threshold;
        self
    }

    pub fn with_trim_cooldown_ms(mut self, cooldown_ms: u64) -> Self {
        self.config.trim_cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_trim_policy(mut self, trim: TrimPolicy) -> Self {
        self.config.trim = trim;
        self
    }

    pub fn with_parallax_factor(mut self, factor: f32) -> Self {
        self.config.parallax_factor = factor;
        self
    }

    pub fn with_crossfade_ms(mut self, crossfade_ms: u64) -> Self {
        self.config.crossfade_ms = crossfade_ms;
        self
    }

    /// Sets the viewport and document heights applied on mount.
    pub fn with_initial_geometry(mut self, viewport_height: u32, document_height: u64) -> Self {
        self.initial_viewport_height = viewport_height;
        self.initial_document_height = document_height;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Gallery) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self::new(ContentSource::builtin())
    }
}

impl core::fmt::Debug for GalleryOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GalleryOptions")
            .field("entries", &self.content.entry_count())
            .field("backgrounds", &self.content.background_count())
            .field("config", &self.config)
            .field("initial_viewport_height", &self.initial_viewport_height)
            .field("initial_document_height", &self.initial_document_height)
            .finish_non_exhaustive()
    }
}
