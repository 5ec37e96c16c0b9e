use card_async_runtime::{CardCommand, CardUpdate, ImageSlot};
use card_sheets::{CardImage, DEFAULT_FILENAME, Entry, PageSizeOption};
use eframe::egui;
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::views;

/// Form fields for the entry being composed.
pub struct EntryForm {
    pub name: String,
    pub copies: u32,
    pub front: Option<CardImage>,
    pub back: Option<CardImage>,
    pub front_texture: Option<egui::TextureHandle>,
    pub back_texture: Option<egui::TextureHandle>,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            copies: 1,
            front: None,
            back: None,
            front_texture: None,
            back_texture: None,
        }
    }
}

impl EntryForm {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.front.is_some() && self.back.is_some()
    }

    pub fn missing_images(&self) -> bool {
        self.front.is_none() || self.back.is_none()
    }

    pub fn clear(&mut self) {
        *self = EntryForm::default();
    }
}

/// Application state owned by the UI thread.
#[derive(Default)]
pub struct AppState {
    pub entries: Vec<Entry>,
    pub next_id: u32,
    pub page_size: PageSizeOption,
    pub form: EntryForm,
    pub generating: bool,
    pub show_reset_confirm: bool,
}

impl AppState {
    /// Move the completed form into a new entry. Incomplete forms are
    /// rejected here, before the layout engine can ever see them.
    pub fn add_entry_from_form(&mut self) -> bool {
        if !self.form.is_complete() {
            return false;
        }
        let (Some(front), Some(back)) = (self.form.front.take(), self.form.back.take()) else {
            return false;
        };
        self.next_id += 1;
        let entry = Entry::new(
            self.next_id,
            self.form.name.trim(),
            self.form.copies,
            front,
            back,
        );
        self.entries.push(entry);
        self.form.clear();
        true
    }

    pub fn remove_entry(&mut self, id: u32) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Discard all entries and start the id sequence over. Id reuse after
    /// a reset is intentional; nothing from before the reset survives.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.next_id = 0;
        self.form.clear();
        self.generating = false;
    }
}

pub struct CardCopierApp {
    state: AppState,
    status: String,
    logger: AppLogger,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<CardCommand>,
    update_rx: mpsc::UnboundedReceiver<CardUpdate>,

    // Runtime handle
    _tokio_handle: tokio::runtime::Handle,
}

impl CardCopierApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            state: AppState::default(),
            status: String::new(),
            logger,
            command_tx,
            update_rx,
            _tokio_handle: tokio_handle,
        }
    }

    fn apply_update(&mut self, ctx: &egui::Context, update: CardUpdate) {
        match update {
            CardUpdate::ImageCaptured { slot, image } => {
                let texture = texture_from_image(ctx, slot.name(), &image);
                match slot {
                    ImageSlot::Front => {
                        self.state.form.front = Some(image);
                        self.state.form.front_texture = texture;
                    }
                    ImageSlot::Back => {
                        self.state.form.back = Some(image);
                        self.state.form.back_texture = texture;
                    }
                }
                self.status = format!("Added {} photo", slot.name());
            }
            CardUpdate::CaptureCancelled { slot } => {
                self.status = format!("No {} photo selected", slot.name());
            }
            CardUpdate::SheetsGenerated { bytes, page_count } => {
                self.status = format!("Generated {page_count} pages, saving…");
                let _ = self.command_tx.send(CardCommand::DeliverSheets {
                    bytes,
                    filename: DEFAULT_FILENAME.to_string(),
                });
            }
            CardUpdate::SheetsDelivered { destination } => {
                self.state.generating = false;
                self.status = format!("PDF ready → {destination}");
            }
            CardUpdate::DeliveryFailed { message } => {
                self.state.generating = false;
                self.status = format!("PDF generated but not delivered: {message}");
            }
            CardUpdate::Error { message } => {
                self.state.generating = false;
                self.status = format!("Error: {message}");
            }
        }
    }
}

impl eframe::App for CardCopierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process all pending updates from worker
        while let Ok(update) = self.update_rx.try_recv() {
            self.apply_update(ctx, update);
            ctx.request_repaint();
        }

        if self.state.generating {
            // Poll for worker updates while a generation is outstanding
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Card Copier");
                ui.small("Front/back copy sheets, every page printed twice");
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if !self.status.is_empty() {
                ui.label(&self.status);
            }
            ui.collapsing("Activity log", |ui| {
                for entry in self.logger.get_entries().iter().rev().take(20) {
                    ui.weak(format!(
                        "{} [{}] {}",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.level,
                        entry.message
                    ));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                views::show_page_size_selector(ui, &mut self.state);
                ui.separator();

                views::show_stats_card(ui, &self.state);
                ui.separator();

                views::show_entry_form(ui, &mut self.state, &self.command_tx, &mut self.status);
                ui.separator();

                views::show_entry_list(ui, &mut self.state, &mut self.status);
                ui.separator();

                views::show_actions(ui, &mut self.state, &self.command_tx, &mut self.status);
            });
        });

        if self.state.show_reset_confirm {
            egui::Window::new("Reset everything?")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("All entries and photos will be discarded.");
                    ui.horizontal(|ui| {
                        if ui.button("Reset").clicked() {
                            self.state.reset();
                            self.state.show_reset_confirm = false;
                            self.status = "All entries cleared".to_string();
                        }
                        if ui.button("Cancel").clicked() {
                            self.state.show_reset_confirm = false;
                        }
                    });
                });
        }
    }
}

/// Decode an acquired image into a texture for the form thumbnails.
fn texture_from_image(
    ctx: &egui::Context,
    name: &str,
    image: &CardImage,
) -> Option<egui::TextureHandle> {
    let decoded = match image::load_from_memory(image.as_bytes()) {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("could not decode {name} preview: {e}");
            return None;
        }
    };
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Some(ctx.load_texture(name, color_image, egui::TextureOptions::default()))
}
