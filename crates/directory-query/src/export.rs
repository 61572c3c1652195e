//! CSV export of the visible result set.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use directory_model::{EXPORT_HEADERS, Record};

use crate::error::ExportError;

/// Write `records` as CSV with the export header. Returns the row count.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPORT_HEADERS)?;
    let mut rows = 0;
    for record in records {
        let employees = record.employees.to_string();
        let founded = record.founded.to_string();
        csv.write_record([
            record.name.as_str(),
            record.location.as_str(),
            record.industry.as_str(),
            employees.as_str(),
            founded.as_str(),
        ])?;
        rows += 1;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(rows)
}

/// Render `records` as a CSV string.
pub fn to_csv_string<'a, I>(records: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    // Every field came from a `str`, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `records` to a CSV file at `path`.
pub fn export_to_path<'a, I>(path: &Path, records: I) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    let rows = write_csv(&mut writer, records)?;
    writer.flush().map_err(io_error)?;
    info!(path = %path.display(), rows, "exported CSV");
    Ok(rows)
}
