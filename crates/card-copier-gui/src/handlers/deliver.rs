use card_async_runtime::CardUpdate;
use tokio::sync::mpsc;

use crate::platform::{DeliveryOutcome, DocumentSink};

pub async fn handle_deliver(
    bytes: Vec<u8>,
    filename: String,
    sink: &DocumentSink,
    update_tx: &mpsc::UnboundedSender<CardUpdate>,
) {
    match sink.deliver(&bytes, &filename).await {
        Ok(DeliveryOutcome::Delivered(path)) => {
            log::info!("delivered {} bytes to {}", bytes.len(), path.display());
            let _ = update_tx.send(CardUpdate::SheetsDelivered {
                destination: path.display().to_string(),
            });
        }
        Ok(DeliveryOutcome::Cancelled) => {
            log::info!("delivery cancelled");
            let _ = update_tx.send(CardUpdate::DeliveryFailed {
                message: "save cancelled".to_string(),
            });
        }
        Err(e) => {
            log::error!("delivery failed: {e}");
            let _ = update_tx.send(CardUpdate::DeliveryFailed {
                message: e.to_string(),
            });
        }
    }
}
