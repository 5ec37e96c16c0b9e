//! Card copy sheet generation.
//!
//! Lays out front/back photographs of ID cards on fixed-size pages,
//! duplicates the rendered page set so every physical page exists twice,
//! and renders the result to PDF.

pub mod document;
pub mod layout;
mod manifest;
mod pdf;
mod stats;
mod types;

pub use document::{Placement, SheetDocument, SheetPage, build_document};
pub use layout::{LayoutGeometry, calculate_layout, calculate_position};
pub use manifest::load_manifest;
pub use pdf::{DEFAULT_FILENAME, generate, generate_pdf_bytes, generate_to_file, render_document};
pub use stats::{SheetStatistics, calculate_statistics};
pub use types::*;
