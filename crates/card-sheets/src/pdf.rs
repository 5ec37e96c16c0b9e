//! PDF rendering of a laid-out sheet document.

use std::path::Path;

use printpdf::*;

use crate::document::{SheetDocument, build_document};
use crate::types::{CardImage, CardSheetError, Entry, PageConfig, PageSizeOption, Result};

/// Default name for a delivered document.
pub const DEFAULT_FILENAME: &str = "CNIC_Copies.pdf";

const DOCUMENT_TITLE: &str = "CNIC Copies";

struct EmbeddedImage {
    handle: *const u8,
    id: XObjectId,
    width_px: usize,
    height_px: usize,
}

/// Render `document` into PDF bytes.
///
/// Every distinct image buffer is registered as one XObject and referenced
/// by all placements that share it, so the duplicated page set reuses the
/// embedded data instead of carrying a second copy.
pub fn render_document(document: &SheetDocument) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new(DOCUMENT_TITLE);
    let mut embedded: Vec<EmbeddedImage> = Vec::new();

    for page in &document.pages {
        let mut ops = Vec::new();

        for placement in &page.placements {
            let index = embed_image(&mut doc, &mut embedded, &placement.image)?;
            let image = &embedded[index];

            // Layout coordinates are top-down; PDF space is bottom-up.
            let y_pdf = document.page.height_pt - placement.y - placement.height;

            ops.push(Op::UseXobject {
                id: image.id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(placement.x)),
                    translate_y: Some(Pt(y_pdf)),
                    rotate: None,
                    scale_x: Some(placement.width / image.width_px as f32),
                    scale_y: Some(placement.height / image.height_px as f32),
                    // At 72 dpi one pixel is one point, so the scale factors
                    // above map the bitmap onto the placement rectangle.
                    dpi: Some(72.0),
                },
            });
        }

        doc.pages.push(PdfPage {
            media_box: page_rect(&document.page),
            trim_box: page_rect(&document.page),
            crop_box: page_rect(&document.page),
            ops,
        });
    }

    let mut warnings = Vec::new();
    Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
}

fn page_rect(page: &PageConfig) -> Rect {
    Rect {
        x: Pt(0.0),
        y: Pt(0.0),
        width: Pt(page.width_pt),
        height: Pt(page.height_pt),
    }
}

fn embed_image(
    doc: &mut PdfDocument,
    embedded: &mut Vec<EmbeddedImage>,
    image: &CardImage,
) -> Result<usize> {
    let handle = image.handle();
    if let Some(index) = embedded.iter().position(|e| e.handle == handle) {
        return Ok(index);
    }

    let mut warnings = Vec::new();
    let raw = RawImage::decode_from_bytes(image.as_bytes(), &mut warnings)
        .map_err(|e| CardSheetError::InvalidImage(e.to_string()))?;
    if raw.width == 0 || raw.height == 0 {
        return Err(CardSheetError::InvalidImage(
            "image has zero pixel dimensions".to_string(),
        ));
    }

    let id = doc.add_image(&raw);
    embedded.push(EmbeddedImage {
        handle,
        id,
        width_px: raw.width,
        height_px: raw.height,
    });
    Ok(embedded.len() - 1)
}

/// Build the placement sequence and render it in one step.
pub fn generate_pdf_bytes(entries: &[Entry], page_size: PageSizeOption) -> Result<Vec<u8>> {
    let document = build_document(entries, page_size)?;
    render_document(&document)
}

/// Async front end; composition is CPU-bound, so it runs on a blocking task.
pub async fn generate(entries: &[Entry], page_size: PageSizeOption) -> Result<Vec<u8>> {
    let entries = entries.to_vec();
    tokio::task::spawn_blocking(move || generate_pdf_bytes(&entries, page_size)).await?
}

pub async fn generate_to_file(
    entries: &[Entry],
    page_size: PageSizeOption,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let bytes = generate(entries, page_size).await?;
    tokio::fs::write(output_path.as_ref(), bytes).await?;
    Ok(())
}
