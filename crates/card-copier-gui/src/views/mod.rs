mod entries;
mod settings;

pub use entries::{show_actions, show_entry_form, show_entry_list};
pub use settings::{show_page_size_selector, show_stats_card};
