//! Message types shared between the UI and its async worker.

// Re-export types from the core crate
pub use card_sheets::{CardImage, Entry, PageSizeOption, SheetStatistics};

/// Which acquisition device a capture request should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Camera,
    Gallery,
}

/// Which side of the card an acquired image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Front,
    Back,
}

impl ImageSlot {
    pub fn name(self) -> &'static str {
        match self {
            ImageSlot::Front => "front",
            ImageSlot::Back => "back",
        }
    }
}

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum CardCommand {
    CaptureImage {
        mode: CaptureMode,
        slot: ImageSlot,
    },
    GenerateSheets {
        entries: Vec<Entry>,
        page_size: PageSizeOption,
    },
    DeliverSheets {
        bytes: Vec<u8>,
        filename: String,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum CardUpdate {
    ImageCaptured {
        slot: ImageSlot,
        image: CardImage,
    },
    CaptureCancelled {
        slot: ImageSlot,
    },
    SheetsGenerated {
        bytes: Vec<u8>,
        page_count: usize,
    },
    SheetsDelivered {
        destination: String,
    },
    /// The document was built but could not be handed off; reported
    /// separately from generation errors.
    DeliveryFailed {
        message: String,
    },
    Error {
        message: String,
    },
}
