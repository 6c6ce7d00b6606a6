use crate::domain::presentation::Row;
use crate::error::{AppError, AppResult};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Lazily read rows, in file order
pub type Rows = Box<dyn Iterator<Item = AppResult<Row>> + Send>;

/// Reads script/transcript rows from a CSV file with a header row.
///
/// Every call to [`CsvRowSource::rows`] reopens the file, so the sequence can
/// be consumed more than once.
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    path: PathBuf,
}

impl CsvRowSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file and validate its header.
    ///
    /// Cells are looked up by header name. A record shorter than the header
    /// reads its missing cells as empty, and extra cells are ignored. Rows
    /// with an empty `script` or `transcript` are skipped.
    pub fn rows(&self) -> AppResult<Rows> {
        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let headers = reader.headers()?;
        let script = self.column_index(headers, "script")?;
        let transcript = self.column_index(headers, "transcript")?;

        let rows = reader
            .into_records()
            .map(move |record| -> AppResult<Row> {
                let record = record?;
                Ok(Row {
                    script: record.get(script).unwrap_or_default().to_string(),
                    transcript: record.get(transcript).unwrap_or_default().to_string(),
                })
            })
            .filter(|record| match record {
                Ok(row) => !row.script.is_empty() && !row.transcript.is_empty(),
                Err(_) => true,
            });

        Ok(Box::new(rows))
    }

    fn column_index(&self, headers: &csv::StringRecord, column: &str) -> AppResult<usize> {
        headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| {
                AppError::Format(format!(
                    "{}: missing '{}' column",
                    self.path.display(),
                    column
                ))
            })
    }

    /// Number of usable rows in the file
    pub fn count(&self) -> AppResult<usize> {
        let mut count = 0;
        for row in self.rows()? {
            row?;
            count += 1;
        }
        Ok(count)
    }
}
