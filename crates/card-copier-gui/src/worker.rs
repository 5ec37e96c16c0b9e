use card_async_runtime::{CardCommand, CardUpdate};
use tokio::sync::mpsc;

use crate::handlers;
use crate::platform::{self, Platform};

/// Async worker task that processes card commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<CardCommand>,
    update_tx: mpsc::UnboundedSender<CardUpdate>,
) {
    let platform = platform::detect();
    log::info!("worker started on {} platform", platform.name());

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &platform, &update_tx).await;
    }
}

async fn process_command(
    cmd: CardCommand,
    platform: &Platform,
    update_tx: &mpsc::UnboundedSender<CardUpdate>,
) {
    match cmd {
        CardCommand::CaptureImage { mode, slot } => {
            handlers::capture::handle_capture(mode, slot, platform.image_source(), update_tx)
                .await;
        }
        CardCommand::GenerateSheets { entries, page_size } => {
            handlers::generate::handle_generate(entries, page_size, update_tx).await;
        }
        CardCommand::DeliverSheets { bytes, filename } => {
            handlers::deliver::handle_deliver(bytes, filename, platform.document_sink(), update_tx)
                .await;
        }
    }
}
