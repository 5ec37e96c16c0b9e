use crate::layout::calculate_layout;
use crate::types::{CardSheetError, CardSize, Entry, PageSizeOption, Result};

/// Counts describing one prospective generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetStatistics {
    /// Number of entries in the batch
    pub entries: usize,
    /// Sum of per-entry copy counts
    pub total_copies: usize,
    /// Image placements, two per copy (front and back)
    pub placements: usize,
    /// Grid capacity of one page for the chosen page size
    pub cards_per_page: usize,
    /// Pages before the duplicate set is appended
    pub pages: usize,
    /// Final page count, after duplication
    pub output_pages: usize,
}

/// Calculate layout statistics without building the document.
///
/// Must agree with [`crate::build_document`] for the same input.
pub fn calculate_statistics(
    entries: &[Entry],
    page_size: PageSizeOption,
) -> Result<SheetStatistics> {
    if entries.is_empty() {
        return Err(CardSheetError::NoEntries);
    }

    let geometry = calculate_layout(page_size.config(), CardSize::ID_CARD)?;

    let total_copies: usize = entries.iter().map(|e| e.copies as usize).sum();
    let placements = 2 * total_copies;
    let pages = (placements + geometry.cards_per_page - 1) / geometry.cards_per_page;

    Ok(SheetStatistics {
        entries: entries.len(),
        total_copies,
        placements,
        cards_per_page: geometry.cards_per_page,
        pages,
        output_pages: pages * 2,
    })
}
