use card_sheets::{PageSizeOption, calculate_statistics};
use eframe::egui;

use crate::app::AppState;

pub fn show_page_size_selector(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("Page size:");
        for option in [PageSizeOption::A4, PageSizeOption::A5] {
            ui.selectable_value(&mut state.page_size, option, option.name());
        }
    });

    let config = state.page_size.config();
    ui.small(format!(
        "{:.0} × {:.0} pt, {}",
        config.width_pt,
        config.height_pt,
        config.orientation.name()
    ));
}

pub fn show_stats_card(ui: &mut egui::Ui, state: &AppState) {
    ui.group(|ui| {
        if state.entries.is_empty() {
            ui.label("No entries yet");
            ui.weak("Add a card below to get started");
            return;
        }

        match calculate_statistics(&state.entries, state.page_size) {
            Ok(stats) => {
                ui.horizontal(|ui| {
                    ui.label(format!("Entries: {}", stats.entries));
                    ui.separator();
                    ui.label(format!("Copies: {}", stats.total_copies));
                    ui.separator();
                    ui.label(format!("Output pages: {}", stats.output_pages));
                });
            }
            Err(e) => {
                ui.label(format!("Layout error: {e}"));
            }
        }
    });
}
