use crate::domain::model::RawCourseRow;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{PickerError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

const REQUIRED_COLUMNS: [&str; 2] = ["Code", "Course"];

/// A catalog stored as CSV, or as TSV when the file ends in `.tsv`.
#[derive(Debug, Clone)]
pub struct DelimitedFileCatalog {
    path: PathBuf,
    delimiter: u8,
}

impl DelimitedFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let delimiter = delimiter_for(&path);
        Self { path, delimiter }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Reads catalog rows from any reader with a header line.
pub fn read_rows_from<R: Read>(reader: R, delimiter: u8) -> Result<Vec<RawCourseRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(PickerError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<RawCourseRow>() {
        rows.push(record?);
    }

    tracing::debug!("Read {} catalog rows", rows.len());
    Ok(rows)
}

impl CatalogSource for DelimitedFileCatalog {
    fn describe(&self) -> String {
        format!("file '{}'", self.path.display())
    }

    fn read_rows(&self) -> Result<Vec<RawCourseRow>> {
        let file = std::fs::File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PickerError::CatalogNotFound {
                path: self.path.display().to_string(),
            },
            _ => PickerError::IoError(e),
        })?;
        read_rows_from(file, self.delimiter)
    }
}
