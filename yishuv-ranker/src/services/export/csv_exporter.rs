//! CSV export of selected municipalities

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::yishuv::{FieldId, Municipality};

/// UTF-8 byte order mark, so spreadsheet apps detect the encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Exported columns, in order
pub const EXPORT_COLUMNS: [FieldId; 29] = FieldId::ALL;

/// Default file name for an export of `count` municipalities
pub fn default_file_name(count: usize) -> String {
    format!("ישובים_{}_נבחרים.csv", count)
}

/// Write the header and one row per municipality. Missing values are empty
/// cells; fields holding a comma, quote or newline are quoted.
pub fn write_csv<W: Write>(mut writer: W, rows: &[&Municipality]) -> Result<()> {
    if rows.is_empty() {
        anyhow::bail!("Nothing to export: no municipalities selected");
    }

    writer
        .write_all(UTF8_BOM)
        .context("Failed to write byte order mark")?;

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(EXPORT_COLUMNS.iter().map(|c| c.label()))
        .context("Failed to write CSV header")?;

    for m in rows {
        let record: Vec<String> = EXPORT_COLUMNS
            .iter()
            .map(|c| m.field(*c).to_text().unwrap_or_default())
            .collect();
        wtr.write_record(&record)
            .with_context(|| format!("Failed to write row for {} ({})", m.name, m.code))?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Export to a file on disk
pub fn export_to_path(rows: &[&Municipality], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_csv(file, rows)?;

    log::info!("CSV file exported to: {} ({} rows)", path.display(), rows.len());
    Ok(())
}
