use alloc::string::String;
use alloc::vec::Vec;

/// Which side of a card the image sits on. Cards alternate by list position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardLayout {
    MediaLeft,
    MediaRight,
}

impl CardLayout {
    pub fn for_position(index: usize) -> Self {
        if index % 2 == 0 {
            Self::MediaLeft
        } else {
            Self::MediaRight
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// Position in the visible list (top to bottom).
    pub index: usize,
    pub id: String,
    pub layout: CardLayout,
}

/// The parallax layer drawn behind the cards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackgroundLayer {
    pub index: usize,
    /// Vertical translation (scroll offset times the parallax factor).
    pub translate_y: f32,
}

/// Everything a host needs to draw one frame of the gallery.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalleryFrame {
    /// `None` when there are no backgrounds.
    pub background: Option<BackgroundLayer>,
    pub cards: Vec<Card>,
    pub show_loading: bool,
}
