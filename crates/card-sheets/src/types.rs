use std::fmt;
use std::sync::Arc;

use base64::Engine;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardSheetError {
    #[error("no entries to lay out")]
    NoEntries,
    #[error("page {width_pt}x{height_pt}pt cannot fit a single card")]
    PageTooSmall { width_pt: f32, height_pt: f32 },
    #[error("invalid image data: {0}")]
    InvalidImage(String),
    #[error("manifest error: {0}")]
    Manifest(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CardSheetError>;

/// Points per millimeter.
pub const PT_PER_MM: f32 = 2.83465;

/// Uniform top/bottom page margin in points.
pub const MARGIN_PT: f32 = 10.0;

/// Gap between adjacent cards in points.
pub const SPACING_PT: f32 = 10.0;

/// Cards laid side by side on every row.
pub const COLUMNS: usize = 2;

/// Upper bound on per-entry copy count.
pub const MAX_COPIES: u32 = 10;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn name(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Selectable output page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSizeOption {
    #[default]
    A4,
    A5,
}

impl PageSizeOption {
    /// Fixed page dimensions in points. A5 is a literal 595x420 landscape
    /// sheet (half an A4 cut across), not derived from ISO A5.
    pub fn config(self) -> PageConfig {
        match self {
            PageSizeOption::A4 => PageConfig {
                width_pt: 595.0,
                height_pt: 842.0,
                orientation: Orientation::Portrait,
            },
            PageSizeOption::A5 => PageConfig {
                width_pt: 595.0,
                height_pt: 420.0,
                orientation: Orientation::Landscape,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSizeOption::A4 => "A4",
            PageSizeOption::A5 => "A5",
        }
    }
}

/// Resolved page dimensions for one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    pub width_pt: f32,
    pub height_pt: f32,
    pub orientation: Orientation,
}

/// Physical card size in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl CardSize {
    /// National ID card dimensions.
    pub const ID_CARD: CardSize = CardSize {
        width_mm: 99.5,
        height_mm: 68.0,
    };

    pub fn width_pt(self) -> f32 {
        self.width_mm * PT_PER_MM
    }

    pub fn height_pt(self) -> f32 {
        self.height_mm * PT_PER_MM
    }
}

/// Raster payload (JPEG or PNG bytes) for one side of a card.
///
/// Clones share the underlying buffer, so an image repeated across several
/// copies and the duplicated page set is stored once.
#[derive(Clone, PartialEq, Eq)]
pub struct CardImage {
    data: Arc<[u8]>,
}

impl CardImage {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::from(bytes.into()),
        }
    }

    /// Decode a `data:image/...;base64,` URI, the form in which camera and
    /// gallery sources deliver images.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let (_, payload) = uri.split_once(";base64,").ok_or_else(|| {
            CardSheetError::InvalidImage("expected a base64 data URI".to_string())
        })?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| CardSheetError::InvalidImage(format!("base64 payload: {e}")))?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Identity of the shared buffer; clones of the same acquisition map to
    /// the same handle without comparing contents.
    pub(crate) fn handle(&self) -> *const u8 {
        self.data.as_ptr()
    }
}

impl fmt::Debug for CardImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardImage")
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// One customer's front/back pair plus the requested copy count.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: u32,
    pub name: String,
    pub copies: u32,
    pub front_image: CardImage,
    pub back_image: CardImage,
}

impl Entry {
    /// Copies are clamped to `1..=MAX_COPIES`.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        copies: u32,
        front_image: CardImage,
        back_image: CardImage,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            copies: copies.clamp(1, MAX_COPIES),
            front_image,
            back_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_dimensions() {
        let a4 = PageSizeOption::A4.config();
        assert_eq!(a4.width_pt, 595.0);
        assert_eq!(a4.height_pt, 842.0);
        assert_eq!(a4.orientation, Orientation::Portrait);

        let a5 = PageSizeOption::A5.config();
        assert_eq!(a5.width_pt, 595.0);
        assert_eq!(a5.height_pt, 420.0);
        assert_eq!(a5.orientation, Orientation::Landscape);
    }

    #[test]
    fn test_card_size_in_points() {
        let card = CardSize::ID_CARD;
        assert!((card.width_pt() - 282.05).abs() < 0.01);
        assert!((card.height_pt() - 192.76).abs() < 0.01);
    }

    #[test]
    fn test_data_uri_roundtrip() {
        use base64::Engine;

        let payload = vec![0xffu8, 0xd8, 0xff, 0xe0, 0x12, 0x34];
        let uri = format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&payload)
        );

        let image = CardImage::from_data_uri(&uri).unwrap();
        assert_eq!(image.as_bytes(), payload.as_slice());
    }

    #[test]
    fn test_data_uri_rejects_missing_marker() {
        let result = CardImage::from_data_uri("not a data uri");
        assert!(matches!(result, Err(CardSheetError::InvalidImage(_))));
    }

    #[test]
    fn test_data_uri_rejects_bad_base64() {
        let result = CardImage::from_data_uri("data:image/png;base64,!!!not-base64!!!");
        assert!(matches!(result, Err(CardSheetError::InvalidImage(_))));
    }

    #[test]
    fn test_copies_clamped() {
        let image = CardImage::from_bytes(vec![1, 2, 3]);
        let low = Entry::new(1, "a", 0, image.clone(), image.clone());
        assert_eq!(low.copies, 1);
        let high = Entry::new(2, "b", 99, image.clone(), image);
        assert_eq!(high.copies, MAX_COPIES);
    }

    #[test]
    fn test_cloned_images_share_a_handle() {
        let image = CardImage::from_bytes(vec![9, 9, 9]);
        let clone = image.clone();
        assert_eq!(image.handle(), clone.handle());

        let other = CardImage::from_bytes(vec![9, 9, 9]);
        assert_eq!(image, other);
        assert_ne!(image.handle(), other.handle());
    }
}
