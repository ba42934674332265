/// A lightweight, serializable snapshot of the current viewport geometry.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub viewport_height: u32,
    /// Total height of the scrollable document, including the viewport.
    pub document_height: u64,
}

impl ViewportState {
    /// `document_height - viewport_height`, or `0` when nothing scrolls.
    pub fn scrollable_height(&self) -> u64 {
        self.document_height
            .saturating_sub(self.viewport_height as u64)
    }
}

/// A lightweight, serializable snapshot of the current scroll state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: u64,
}

/// A combined snapshot of viewport + scroll state.
///
/// Entries are not part of the snapshot; they are rebuilt from the content source on mount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub viewport: ViewportState,
    pub scroll: ScrollState,
}
