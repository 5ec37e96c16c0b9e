use card_async_runtime::{CaptureMode, CardCommand, ImageSlot};
use card_sheets::MAX_COPIES;
use eframe::egui;
use tokio::sync::mpsc;

use crate::app::AppState;

pub fn show_entry_form(
    ui: &mut egui::Ui,
    state: &mut AppState,
    command_tx: &mpsc::UnboundedSender<CardCommand>,
    status: &mut String,
) {
    ui.heading("New entry");

    ui.horizontal(|ui| {
        ui.label("Name:");
        ui.text_edit_singleline(&mut state.form.name);
    });
    ui.horizontal(|ui| {
        ui.label("Copies:");
        ui.add(egui::Slider::new(&mut state.form.copies, 1..=MAX_COPIES));
    });

    ui.columns(2, |columns| {
        show_capture_slot(
            &mut columns[0],
            ImageSlot::Front,
            state.form.front_texture.as_ref(),
            command_tx,
        );
        show_capture_slot(
            &mut columns[1],
            ImageSlot::Back,
            state.form.back_texture.as_ref(),
            command_tx,
        );
    });

    ui.horizontal(|ui| {
        let can_add = state.form.is_complete();
        if ui
            .add_enabled(can_add, egui::Button::new("Add entry"))
            .clicked()
            && state.add_entry_from_form()
        {
            *status = "Entry added".to_string();
        }

        if state.form.missing_images() {
            ui.weak("Front and back photos are required");
        } else if state.form.name.trim().is_empty() {
            ui.weak("Enter a name");
        }
    });
}

fn show_capture_slot(
    ui: &mut egui::Ui,
    slot: ImageSlot,
    texture: Option<&egui::TextureHandle>,
    command_tx: &mpsc::UnboundedSender<CardCommand>,
) {
    ui.label(match slot {
        ImageSlot::Front => "Front",
        ImageSlot::Back => "Back",
    });

    match texture {
        Some(texture) => {
            let size = texture.size_vec2();
            let scale = (120.0 / size.x).min(90.0 / size.y).min(1.0);
            ui.image((texture.id(), size * scale));
        }
        None => {
            ui.weak("No photo");
        }
    }

    ui.horizontal(|ui| {
        if ui.button("📷 Camera").clicked() {
            let _ = command_tx.send(CardCommand::CaptureImage {
                mode: CaptureMode::Camera,
                slot,
            });
        }
        if ui.button("🖼 Gallery").clicked() {
            let _ = command_tx.send(CardCommand::CaptureImage {
                mode: CaptureMode::Gallery,
                slot,
            });
        }
    });
}

pub fn show_entry_list(ui: &mut egui::Ui, state: &mut AppState, status: &mut String) {
    ui.heading(format!("Entries ({})", state.entries.len()));

    let mut removed = None;
    for entry in &state.entries {
        ui.horizontal(|ui| {
            ui.label(format!("#{} {}", entry.id, entry.name));
            ui.weak(format!("{} copies", entry.copies));
            if ui.small_button("Remove").clicked() {
                removed = Some(entry.id);
            }
        });
    }

    if let Some(id) = removed {
        state.remove_entry(id);
        *status = "Entry removed".to_string();
    }
}

pub fn show_actions(
    ui: &mut egui::Ui,
    state: &mut AppState,
    command_tx: &mpsc::UnboundedSender<CardCommand>,
    status: &mut String,
) {
    ui.horizontal(|ui| {
        let can_generate = !state.entries.is_empty() && !state.generating;
        let label = if state.generating {
            "Generating…"
        } else {
            "Generate PDF"
        };
        if ui
            .add_enabled(can_generate, egui::Button::new(label))
            .clicked()
        {
            state.generating = true;
            *status = "Generating copy sheets…".to_string();
            let _ = command_tx.send(CardCommand::GenerateSheets {
                entries: state.entries.clone(),
                page_size: state.page_size,
            });
        }

        if ui
            .add_enabled(!state.entries.is_empty(), egui::Button::new("Reset all"))
            .clicked()
        {
            state.show_reset_confirm = true;
        }
    });

    if state.entries.is_empty() {
        ui.weak("Add at least one entry before generating");
    }
}
