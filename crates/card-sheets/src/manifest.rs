//! CSV manifests for batch generation.
//!
//! Rows are `name,copies,front,back` with a header line. Image fields are
//! file paths resolved relative to the manifest, or inline
//! `data:image/...;base64,` URIs as exported by camera tooling.

use std::path::Path;

use crate::types::{CardImage, CardSheetError, Entry, Result};

struct ManifestRow {
    name: String,
    copies: u32,
    front: String,
    back: String,
}

/// Load a manifest and the image files it references.
///
/// Rows missing either image are rejected here, so the layout engine only
/// ever sees complete entries. Ids are assigned in row order starting at 1.
pub async fn load_manifest(path: impl AsRef<Path>) -> Result<Vec<Entry>> {
    let path = path.as_ref().to_owned();
    let contents = tokio::fs::read_to_string(&path).await?;
    let base = path.parent().map(Path::to_path_buf).unwrap_or_default();

    // CSV parsing is CPU-bound, spawn blocking
    let rows = tokio::task::spawn_blocking(move || parse_rows(&contents)).await??;

    let mut entries = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let front = load_image(&base, &row.front).await?;
        let back = load_image(&base, &row.back).await?;
        entries.push(Entry::new(
            index as u32 + 1,
            row.name,
            row.copies,
            front,
            back,
        ));
    }
    Ok(entries)
}

async fn load_image(base: &Path, field: &str) -> Result<CardImage> {
    if field.starts_with("data:") {
        CardImage::from_data_uri(field)
    } else {
        Ok(CardImage::from_bytes(
            tokio::fs::read(base.join(field)).await?,
        ))
    }
}

fn parse_rows(contents: &str) -> Result<Vec<ManifestRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(contents.as_bytes());
    let mut rows = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line = index + 2; // header occupies line 1

        if record.len() < 4 {
            return Err(CardSheetError::Manifest(format!(
                "row {line}: expected name,copies,front,back"
            )));
        }

        let name = record[0].trim().to_string();
        let copies: u32 = record[1].trim().parse().map_err(|_| {
            CardSheetError::Manifest(format!("row {line}: copies must be a number"))
        })?;
        let front = record[2].trim();
        let back = record[3].trim();
        if front.is_empty() || back.is_empty() {
            return Err(CardSheetError::Manifest(format!(
                "row {line}: both front and back images are required"
            )));
        }

        rows.push(ManifestRow {
            name,
            copies,
            front: front.to_string(),
            back: back.to_string(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let rows = parse_rows(
            "name,copies,front,back\n\
             Ali,2,ali_front.jpg,ali_back.jpg\n\
             Sara,1,sara_front.jpg,sara_back.jpg\n",
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ali");
        assert_eq!(rows[0].copies, 2);
        assert_eq!(rows[1].front, "sara_front.jpg");
    }

    #[test]
    fn test_missing_image_rejected() {
        let result = parse_rows("name,copies,front,back\nAli,2,ali_front.jpg,\n");
        assert!(matches!(result, Err(CardSheetError::Manifest(_))));
    }

    #[test]
    fn test_bad_copy_count_rejected() {
        let result = parse_rows("name,copies,front,back\nAli,lots,f.jpg,b.jpg\n");
        assert!(matches!(result, Err(CardSheetError::Manifest(_))));
    }

    #[test]
    fn test_short_row_rejected() {
        let result = parse_rows("name,copies,front,back\nAli,2\n");
        assert!(matches!(result, Err(CardSheetError::Manifest(_))));
    }
}
