//! Packs the copy and posters into an in-memory ZIP.

use std::io::{Cursor, Write};

use base64::Engine;
use base64::engine::general_purpose;
use zip::CompressionMethod;
use zip::write::{FileOptions, ZipWriter};

use crate::constants::COPY_ENTRY_NAME;
use crate::copy::CopyBlock;
use crate::error::CampaignError;
use crate::poster::PosterResult;

/// Contents of `copy.txt`.
pub fn copy_text(copy: &CopyBlock) -> String {
    format!("TITLE: {}\nCAPTION: {}", copy.title, copy.caption)
}

/// Archive name for the `position`th successful poster, counting from 1.
pub fn poster_entry_name(position: usize) -> String {
    format!("poster_{position}.png")
}

/// Builds the ZIP: `copy.txt` first, then one entry per poster numbered 1..=K.
pub fn pack_zip(copy: &CopyBlock, posters: &[PosterResult]) -> Result<Vec<u8>, CampaignError> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        zip.start_file(COPY_ENTRY_NAME, options)?;
        zip.write_all(copy_text(copy).as_bytes())?;

        for (idx, poster) in posters.iter().enumerate() {
            zip.start_file(poster_entry_name(idx + 1), options)?;
            zip.write_all(&poster.image.data)?;
        }

        zip.finish()?;
    }
    Ok(buffer)
}

/// [`pack_zip`], base64 encoded for a JSON response.
pub fn pack(copy: &CopyBlock, posters: &[PosterResult]) -> Result<String, CampaignError> {
    let bytes = pack_zip(copy, posters)?;
    Ok(general_purpose::STANDARD.encode(bytes))
}
