//! One-shot CSV snapshot of a filtered university collection.

use crate::core::list_literal::encode_list;
use crate::core::normalizer::{
    COUNTRY_COLUMN, DOMAINS_COLUMN, NAME_COLUMN, STATE_COLUMN, WEB_PAGES_COLUMN,
};
use crate::domain::model::University;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::io::Write;

pub const EXPORT_FILENAME: &str = "filtered_universities.csv";

/// 以 UTF-8 CSV 寫出，list 欄位寫成 list literal 以便重新讀回
pub fn export_csv<W: Write>(universities: &[University], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        NAME_COLUMN,
        COUNTRY_COLUMN,
        STATE_COLUMN,
        DOMAINS_COLUMN,
        WEB_PAGES_COLUMN,
    ])?;

    for u in universities {
        csv_writer.write_record([
            u.name.as_str(),
            u.country.as_str(),
            u.state_province.as_deref().unwrap_or(""),
            encode_list(&u.domains).as_str(),
            encode_list(&u.web_pages).as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn export_bytes(universities: &[University]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    export_csv(universities, &mut buffer)?;
    Ok(buffer)
}

/// Writes the snapshot through `storage` and returns where it landed.
pub fn export_to_storage<S: Storage>(
    storage: &S,
    filename: &str,
    universities: &[University],
) -> Result<String> {
    let data = export_bytes(universities)?;
    let path = storage.write_file(filename, &data)?;
    tracing::info!("💾 Exported {} universities to {}", universities.len(), path);
    Ok(path)
}
