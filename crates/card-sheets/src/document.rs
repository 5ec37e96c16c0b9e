//! Placement sequence and pagination.

use crate::layout::{LayoutGeometry, calculate_layout, calculate_position};
use crate::types::{
    CardImage, CardSheetError, CardSize, Entry, PageConfig, PageSizeOption, Result,
};

/// One image placed on a page.
///
/// Coordinates are in points from the top-left corner of the page;
/// conversion to PDF's bottom-up space happens at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub image: CardImage,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetPage {
    pub placements: Vec<Placement>,
}

/// The finished page sequence for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetDocument {
    pub page: PageConfig,
    pub geometry: LayoutGeometry,
    pub pages: Vec<SheetPage>,
}

impl SheetDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lay out every entry onto pages, then append the duplicate page set.
///
/// Entries are flattened in input order; each copy contributes the front
/// image followed by the back image, so a three-copy entry yields
/// F,B,F,B,F,B before the next entry begins. A page break is inserted
/// whenever the running slot index reaches the page capacity. Once all
/// images are placed, a content-identical copy of the whole page sequence
/// is appended, so every physical page exists twice in the output.
pub fn build_document(entries: &[Entry], page_size: PageSizeOption) -> Result<SheetDocument> {
    if entries.is_empty() {
        return Err(CardSheetError::NoEntries);
    }

    let page = page_size.config();
    let geometry = calculate_layout(page, CardSize::ID_CARD)?;

    let mut pages = Vec::new();
    let mut current = SheetPage::default();
    let mut slot = 0usize;

    for entry in entries {
        for _ in 0..entry.copies {
            for image in [&entry.front_image, &entry.back_image] {
                if slot >= geometry.cards_per_page {
                    pages.push(std::mem::take(&mut current));
                    slot = 0;
                }
                let (x, y) = calculate_position(&geometry, slot);
                current.placements.push(Placement {
                    image: image.clone(),
                    x,
                    y,
                    width: geometry.card_width_pt,
                    height: geometry.card_height_pt,
                });
                slot += 1;
            }
        }
    }
    pages.push(current);

    // Duplicate set: a verbatim copy of every rendered page, in order,
    // appended after the originals.
    let originals = pages.clone();
    pages.extend(originals);

    Ok(SheetDocument {
        page,
        geometry,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(tag: u8) -> CardImage {
        CardImage::from_bytes(vec![tag, tag, tag])
    }

    fn entry(id: u32, copies: u32) -> Entry {
        Entry::new(
            id,
            format!("customer {id}"),
            copies,
            image(id as u8 * 2),
            image(id as u8 * 2 + 1),
        )
    }

    #[test]
    fn test_copies_alternate_front_and_back() {
        let entries = vec![entry(1, 3)];
        let doc = build_document(&entries, PageSizeOption::A4).unwrap();

        let placed: Vec<&CardImage> = doc.pages[0].placements.iter().map(|p| &p.image).collect();
        assert_eq!(placed.len(), 6);
        for pair in placed.chunks(2) {
            assert_eq!(pair[0], &entries[0].front_image);
            assert_eq!(pair[1], &entries[0].back_image);
        }
    }

    #[test]
    fn test_entries_flatten_in_input_order() {
        let entries = vec![entry(1, 1), entry(2, 2)];
        let doc = build_document(&entries, PageSizeOption::A4).unwrap();

        let placed = &doc.pages[0].placements;
        assert_eq!(placed.len(), 6);
        assert_eq!(placed[0].image, entries[0].front_image);
        assert_eq!(placed[1].image, entries[0].back_image);
        assert_eq!(placed[2].image, entries[1].front_image);
        assert_eq!(placed[5].image, entries[1].back_image);
    }

    #[test]
    fn test_full_a4_page_doubles_to_two() {
        // 4 single-copy entries = 8 images = exactly one A4 page
        let entries: Vec<Entry> = (1..=4).map(|id| entry(id, 1)).collect();
        let doc = build_document(&entries, PageSizeOption::A4).unwrap();

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].placements.len(), 8);
        assert_eq!(doc.pages[1], doc.pages[0]);
    }

    #[test]
    fn test_overflow_starts_a_new_page() {
        // 5 single-copy entries = 10 images = 8 + 2 across two pages
        let entries: Vec<Entry> = (1..=5).map(|id| entry(id, 1)).collect();
        let doc = build_document(&entries, PageSizeOption::A4).unwrap();

        assert_eq!(doc.page_count(), 4);
        assert_eq!(doc.pages[0].placements.len(), 8);
        assert_eq!(doc.pages[1].placements.len(), 2);

        // The overflow page restarts at the first grid cell
        let first = &doc.pages[1].placements[0];
        assert_eq!(first.x, doc.geometry.horizontal_margin_pt);
        assert_eq!(first.y, doc.geometry.margin_pt);
    }

    #[test]
    fn test_duplicate_half_matches_original_half() {
        let entries: Vec<Entry> = (1..=5).map(|id| entry(id, 2)).collect();
        let doc = build_document(&entries, PageSizeOption::A4).unwrap();

        let n = doc.page_count() / 2;
        assert_eq!(doc.page_count(), n * 2);
        for k in 0..n {
            assert_eq!(doc.pages[n + k], doc.pages[k]);
        }
    }

    #[test]
    fn test_empty_entries_rejected() {
        let result = build_document(&[], PageSizeOption::A4);
        assert!(matches!(result, Err(CardSheetError::NoEntries)));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let entries: Vec<Entry> = (1..=3).map(|id| entry(id, 2)).collect();
        let first = build_document(&entries, PageSizeOption::A5).unwrap();
        let second = build_document(&entries, PageSizeOption::A5).unwrap();

        assert_eq!(first.page_count(), second.page_count());
        for (a, b) in first.pages.iter().zip(&second.pages) {
            for (pa, pb) in a.placements.iter().zip(&b.placements) {
                assert_eq!((pa.x, pa.y), (pb.x, pb.y));
            }
        }
    }

    #[test]
    fn test_a5_repartitions_the_same_entries() {
        // 3 entries, 6 images: one A4 page (capacity 8) but two A5 pages
        // (capacity 4). Total placements are unchanged.
        let entries: Vec<Entry> = (1..=3).map(|id| entry(id, 1)).collect();

        let a4 = build_document(&entries, PageSizeOption::A4).unwrap();
        let a5 = build_document(&entries, PageSizeOption::A5).unwrap();

        assert_eq!(a4.page_count(), 2);
        assert_eq!(a5.page_count(), 4);

        let count = |doc: &SheetDocument| -> usize {
            doc.pages.iter().map(|p| p.placements.len()).sum()
        };
        assert_eq!(count(&a4), 12);
        assert_eq!(count(&a5), 12);
    }
}
