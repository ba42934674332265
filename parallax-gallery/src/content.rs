use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// An opaque reference to an image asset (path, URL, bundle key).
///
/// The gallery never resolves it; that is the host's job.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetRef {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalleryEntry {
    pub id: String,
    pub image: AssetRef,
    pub title: String,
    pub author: String,
    /// Calendar date as authored (e.g. `2024-03-15`); not parsed.
    pub date: String,
    pub description: String,
}

impl GalleryEntry {
    /// Returns a copy of this entry with a different id. All other fields are kept verbatim.
    pub fn with_id(&self, id: String) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackgroundEntry {
    pub id: String,
    pub image: AssetRef,
    pub name: String,
}

/// The fixed catalogue a gallery draws from.
///
/// `entries` is treated as a cyclic list by pagination, so it never runs out. `backgrounds` is
/// indexed by the background selector; it may be empty, in which case no background is drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentSource {
    pub entries: Vec<GalleryEntry>,
    pub backgrounds: Vec<BackgroundEntry>,
}

impl ContentSource {
    pub fn new(entries: Vec<GalleryEntry>, backgrounds: Vec<BackgroundEntry>) -> Self {
        Self {
            entries,
            backgrounds,
        }
    }

    /// The stock demo catalogue: three photographs and five backgrounds.
    pub fn builtin() -> Self {
        let entries = vec![
            entry(
                "1",
                "gallery/aurora.jpg",
                "Aurora over the Fjord",
                "Ingrid Solberg",
                "2023-11-02",
                "Green curtains of light folding over the water at Lyngen.",
            ),
            entry(
                "2",
                "gallery/dunes.jpg",
                "Erg Chebbi at Dawn",
                "Youssef Amrani",
                "2024-01-18",
                "First light raking across the ridges of the Saharan dunes.",
            ),
            entry(
                "3",
                "gallery/canopy.jpg",
                "Under the Canopy",
                "Lucia Ferreira",
                "2024-05-07",
                "Looking straight up through the cloud forest of Monteverde.",
            ),
        ];
        let backgrounds = vec![
            background("bg-1", "backgrounds/dusk.jpg", "Dusk"),
            background("bg-2", "backgrounds/night.jpg", "Night"),
            background("bg-3", "backgrounds/nebula.jpg", "Nebula"),
            background("bg-4", "backgrounds/ocean.jpg", "Deep Ocean"),
            background("bg-5", "backgrounds/dawn.jpg", "Dawn"),
        ];
        Self::new(entries, backgrounds)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn background_count(&self) -> usize {
        self.backgrounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn background(&self, index: usize) -> Option<&BackgroundEntry> {
        self.backgrounds.get(index)
    }

    /// Returns `entries[index mod len]`, or `None` when there are no entries.
    pub fn entry_cyclic(&self, index: usize) -> Option<&GalleryEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(index % self.entries.len())
    }

    /// Builds the synthetic entry for list position `index`: the cyclic source entry with id
    /// `"{source_id}-{index}"`.
    pub fn synthesize(&self, index: usize) -> Option<GalleryEntry> {
        let src = self.entry_cyclic(index)?;
        Some(src.with_id(format!("{}-{}", src.id, index)))
    }
}

fn entry(
    id: &str,
    image: &str,
    title: &str,
    author: &str,
    date: &str,
    description: &str,
) -> GalleryEntry {
    GalleryEntry {
        id: id.to_owned(),
        image: AssetRef::from(image),
        title: title.to_owned(),
        author: author.to_owned(),
        date: date.to_owned(),
        description: description.to_owned(),
    }
}

fn background(id: &str, image: &str, name: &str) -> BackgroundEntry {
    BackgroundEntry {
        id: id.to_owned(),
        image: AssetRef::from(image),
        name: name.to_owned(),
    }
}
