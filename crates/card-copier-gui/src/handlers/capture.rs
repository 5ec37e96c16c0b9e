use card_async_runtime::{CaptureMode, CardUpdate, ImageSlot};
use tokio::sync::mpsc;

use crate::platform::ImageSource;

pub async fn handle_capture(
    mode: CaptureMode,
    slot: ImageSlot,
    source: &ImageSource,
    update_tx: &mpsc::UnboundedSender<CardUpdate>,
) {
    match source.acquire(mode).await {
        Some(image) => {
            log::info!("captured {} image ({} bytes)", slot.name(), image.len());
            let _ = update_tx.send(CardUpdate::ImageCaptured { slot, image });
        }
        None => {
            log::info!("{} capture cancelled", slot.name());
            let _ = update_tx.send(CardUpdate::CaptureCancelled { slot });
        }
    }
}
