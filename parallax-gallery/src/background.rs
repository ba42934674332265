/// Maps a scroll offset to a background index by proportional scroll progress.
///
/// With `H = document_height - viewport_height`, the index is `floor(offset / H * count)`,
/// clamped to `count - 1`. The top of the page selects the first background and the bottom
/// selects the last, regardless of document length.
///
/// Returns `None` when progress cannot be computed (`H == 0` or `count == 0`).
pub fn select_background_index(
    scroll_offset: u64,
    document_height: u64,
    viewport_height: u32,
    count: usize,
) -> Option<usize> {
    let scrollable = document_height.saturating_sub(viewport_height as u64);
    if scrollable == 0 || count == 0 {
        return None;
    }
    // Exact floor(offset * count / H) without going through floats.
    let raw = (scroll_offset as u128).saturating_mul(count as u128) / scrollable as u128;
    let last = count - 1;
    Some(if raw > last as u128 { last } else { raw as usize })
}

/// Vertical translation of the background layer for a given scroll offset.
pub fn parallax_offset(scroll_offset: u64, factor: f32) -> f32 {
    scroll_offset as f32 * factor
}

/// Tracks the current background index and only moves it on a real change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackgroundSelector {
    current: usize,
}

impl BackgroundSelector {
    pub fn new(current: usize) -> Self {
        Self { current }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Recomputes the index from geometry. Returns `true` when the index changed.
    pub fn update(
        &mut self,
        scroll_offset: u64,
        document_height: u64,
        viewport_height: u32,
        count: usize,
    ) -> bool {
        let Some(index) =
            select_background_index(scroll_offset, document_height, viewport_height, count)
        else {
            gtrace!(
                document_height,
                viewport_height,
                count,
                "background index not computable"
            );
            return false;
        };
        if index == self.current {
            return false;
        }
        if index >= count {
            gwarn!(index, count, "background index out of bounds");
            return false;
        }
        gdebug!(from = self.current, to = index, "background changed");
        self.current = index;
        true
    }

    /// Pulls the index back into range after the background list shrank.
    pub(crate) fn clamp_to(&mut self, count: usize) {
        if count == 0 {
            self.current = 0;
        } else if self.current >= count {
            self.current = count - 1;
        }
    }
}
