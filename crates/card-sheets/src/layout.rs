//! Page grid geometry.
//!
//! Pure arithmetic mapping a page size and card size to a two-column grid
//! and per-slot coordinates. Geometry is recomputed for every generation
//! call; nothing here is cached.

use crate::types::{COLUMNS, CardSheetError, CardSize, MARGIN_PT, PageConfig, Result, SPACING_PT};

/// Derived per-page layout constants for one page/card pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub columns: usize,
    pub margin_pt: f32,
    pub spacing_pt: f32,
    /// Left inset that centers the column block; negative when the cards
    /// are wider than the page.
    pub horizontal_margin_pt: f32,
    pub rows_per_page: usize,
    pub cards_per_page: usize,
    pub card_width_pt: f32,
    pub card_height_pt: f32,
}

/// Compute the grid geometry for `card` on `page`.
///
/// Fails when the page cannot fit even one row of cards between its top
/// and bottom margins.
pub fn calculate_layout(page: PageConfig, card: CardSize) -> Result<LayoutGeometry> {
    let card_width_pt = card.width_pt();
    let card_height_pt = card.height_pt();

    let total_width = card_width_pt * COLUMNS as f32 + SPACING_PT * (COLUMNS as f32 - 1.0);
    let horizontal_margin_pt = (page.width_pt - total_width) / 2.0;

    let available_height = page.height_pt - 2.0 * MARGIN_PT;
    let rows_per_page =
        ((available_height + SPACING_PT) / (card_height_pt + SPACING_PT)).floor() as usize;
    let cards_per_page = COLUMNS * rows_per_page;

    if cards_per_page == 0 {
        return Err(CardSheetError::PageTooSmall {
            width_pt: page.width_pt,
            height_pt: page.height_pt,
        });
    }

    Ok(LayoutGeometry {
        columns: COLUMNS,
        margin_pt: MARGIN_PT,
        spacing_pt: SPACING_PT,
        horizontal_margin_pt,
        rows_per_page,
        cards_per_page,
        card_width_pt,
        card_height_pt,
    })
}

/// Top-left corner of the grid cell at `slot`.
///
/// `slot` is the 0-based index within the current page, already reduced
/// modulo `cards_per_page` by the caller. The y coordinate grows downward
/// from the top edge of the page.
pub fn calculate_position(geometry: &LayoutGeometry, slot: usize) -> (f32, f32) {
    let row = slot / geometry.columns;
    let col = slot % geometry.columns;

    let x =
        geometry.horizontal_margin_pt + col as f32 * (geometry.card_width_pt + geometry.spacing_pt);
    let y = geometry.margin_pt + row as f32 * (geometry.card_height_pt + geometry.spacing_pt);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Orientation, PageSizeOption};

    #[test]
    fn test_a4_grid() {
        let layout = calculate_layout(PageSizeOption::A4.config(), CardSize::ID_CARD).unwrap();

        assert_eq!(layout.columns, 2);
        assert_eq!(layout.rows_per_page, 4);
        assert_eq!(layout.cards_per_page, 8);
        assert!(layout.horizontal_margin_pt > 0.0);
    }

    #[test]
    fn test_a5_grid() {
        let layout = calculate_layout(PageSizeOption::A5.config(), CardSize::ID_CARD).unwrap();

        assert_eq!(layout.rows_per_page, 2);
        assert_eq!(layout.cards_per_page, 4);
        // Same width as A4, so the horizontal inset is unchanged
        let a4 = calculate_layout(PageSizeOption::A4.config(), CardSize::ID_CARD).unwrap();
        assert_eq!(layout.horizontal_margin_pt, a4.horizontal_margin_pt);
    }

    #[test]
    fn test_slot_positions() {
        let layout = calculate_layout(PageSizeOption::A4.config(), CardSize::ID_CARD).unwrap();

        let (x0, y0) = calculate_position(&layout, 0);
        assert_eq!(x0, layout.horizontal_margin_pt);
        assert_eq!(y0, MARGIN_PT);

        // Slot 1 sits one column to the right, same row
        let (x1, y1) = calculate_position(&layout, 1);
        assert_eq!(x1, layout.horizontal_margin_pt + layout.card_width_pt + SPACING_PT);
        assert_eq!(y1, y0);

        // Slot 2 wraps to the second row, first column
        let (x2, y2) = calculate_position(&layout, 2);
        assert_eq!(x2, x0);
        assert_eq!(y2, MARGIN_PT + layout.card_height_pt + SPACING_PT);
    }

    #[test]
    fn test_page_too_small_fails_fast() {
        let page = PageConfig {
            width_pt: 595.0,
            height_pt: 100.0,
            orientation: Orientation::Landscape,
        };
        let result = calculate_layout(page, CardSize::ID_CARD);
        assert!(matches!(result, Err(CardSheetError::PageTooSmall { .. })));
    }

    #[test]
    fn test_wide_cards_center_with_negative_inset() {
        let page = PageConfig {
            width_pt: 400.0,
            height_pt: 842.0,
            orientation: Orientation::Portrait,
        };
        let layout = calculate_layout(page, CardSize::ID_CARD).unwrap();
        assert!(layout.horizontal_margin_pt < 0.0);
        assert_eq!(layout.cards_per_page, 8);
    }
}
