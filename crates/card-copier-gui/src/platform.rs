//! Capability interfaces for image acquisition and document delivery.
//!
//! The worker depends only on these types; the concrete behavior is chosen
//! once at startup based on what the host can actually do. Cancellation is
//! signalled in-band (`None` / `Cancelled`), never as an error.

use std::path::PathBuf;

use card_async_runtime::CaptureMode;
use card_sheets::CardImage;

/// Produces an image for one side of a card, or nothing when the user
/// backs out.
pub enum ImageSource {
    /// Interactive file dialogs, standing in for both camera capture and
    /// gallery picking on the desktop.
    Dialog,
    /// No display available; every capture resolves as cancelled.
    Headless,
}

impl ImageSource {
    pub async fn acquire(&self, mode: CaptureMode) -> Option<CardImage> {
        match self {
            ImageSource::Dialog => {
                let title = match mode {
                    CaptureMode::Camera => "Take card photo",
                    CaptureMode::Gallery => "Choose card photo",
                };
                let file = rfd::AsyncFileDialog::new()
                    .set_title(title)
                    .add_filter("Images", &["jpg", "jpeg", "png"])
                    .pick_file()
                    .await?;
                Some(CardImage::from_bytes(file.read().await))
            }
            ImageSource::Headless => None,
        }
    }
}

/// Accepts a finished document.
pub enum DocumentSink {
    /// Ask the user where to save the file.
    SaveDialog,
    /// Persist to a cache-scoped file and hand its location to the share
    /// mechanism.
    CacheDir,
}

pub enum DeliveryOutcome {
    Delivered(PathBuf),
    Cancelled,
}

impl DocumentSink {
    pub async fn deliver(&self, bytes: &[u8], filename: &str) -> anyhow::Result<DeliveryOutcome> {
        match self {
            DocumentSink::SaveDialog => {
                let Some(file) = rfd::AsyncFileDialog::new()
                    .set_title("Save copy sheets")
                    .set_file_name(filename)
                    .save_file()
                    .await
                else {
                    return Ok(DeliveryOutcome::Cancelled);
                };
                let path = file.path().to_path_buf();
                tokio::fs::write(&path, bytes).await?;
                Ok(DeliveryOutcome::Delivered(path))
            }
            DocumentSink::CacheDir => {
                let path = std::env::temp_dir().join(filename);
                tokio::fs::write(&path, bytes).await?;
                Ok(DeliveryOutcome::Delivered(path))
            }
        }
    }
}

/// Capabilities resolved by the startup probe.
pub struct Platform {
    image_source: ImageSource,
    document_sink: DocumentSink,
    name: &'static str,
}

impl Platform {
    pub fn image_source(&self) -> &ImageSource {
        &self.image_source
    }

    pub fn document_sink(&self) -> &DocumentSink {
        &self.document_sink
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Probe the host once at worker startup.
pub fn detect() -> Platform {
    if has_display() {
        Platform {
            image_source: ImageSource::Dialog,
            document_sink: DocumentSink::SaveDialog,
            name: "interactive",
        }
    } else {
        Platform {
            image_source: ImageSource::Headless,
            document_sink: DocumentSink::CacheDir,
            name: "headless",
        }
    }
}

#[cfg(target_os = "linux")]
fn has_display() -> bool {
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}

#[cfg(not(target_os = "linux"))]
fn has_display() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_dir_sink_writes_the_blob() {
        let sink = DocumentSink::CacheDir;
        let filename = "card-copier-sink-test.pdf";
        let payload = b"%PDF-1.7 test payload".to_vec();

        let outcome = sink.deliver(&payload, filename).await.unwrap();
        match outcome {
            DeliveryOutcome::Delivered(path) => {
                let written = std::fs::read(&path).unwrap();
                assert_eq!(written, payload);
                let _ = std::fs::remove_file(path);
            }
            DeliveryOutcome::Cancelled => panic!("cache delivery cannot be cancelled"),
        }
    }

    #[tokio::test]
    async fn test_headless_capture_resolves_cancelled() {
        let source = ImageSource::Headless;
        assert!(source.acquire(CaptureMode::Camera).await.is_none());
        assert!(source.acquire(CaptureMode::Gallery).await.is_none());
    }
}
