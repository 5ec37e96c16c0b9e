use card_async_runtime::CardUpdate;
use card_sheets::{Entry, PageSizeOption};
use tokio::sync::mpsc;

pub async fn handle_generate(
    entries: Vec<Entry>,
    page_size: PageSizeOption,
    update_tx: &mpsc::UnboundedSender<CardUpdate>,
) {
    match card_sheets::generate(&entries, page_size).await {
        Ok(bytes) => {
            let page_count = card_sheets::calculate_statistics(&entries, page_size)
                .map(|stats| stats.output_pages)
                .unwrap_or_default();
            log::info!("generated {page_count} pages ({} bytes)", bytes.len());
            let _ = update_tx.send(CardUpdate::SheetsGenerated { bytes, page_count });
        }
        Err(e) => {
            log::error!("generation failed: {e}");
            let _ = update_tx.send(CardUpdate::Error {
                message: format!("Failed to generate PDF: {e}"),
            });
        }
    }
}
