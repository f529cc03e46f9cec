use std::path::{Path, PathBuf};

use crate::error::ClientError;

/// In-memory tabular data, uploaded as a CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Fails when its width differs from the header.
    pub fn push_row<I, S>(&mut self, row: I) -> Result<(), ClientError>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let row: Vec<String> = row.into_iter().map(|cell| cell.to_string()).collect();
        if row.len() != self.columns.len() {
            return Err(ClientError::Csv(format!(
                "row has {} cells but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn with_row<I, S>(mut self, row: I) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.push_row(row)?;
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Comma separated text with a header line and no index column.
    pub fn to_csv_string(&self) -> Result<String, ClientError> {
        let bytes = self.to_csv_bytes()?;
        String::from_utf8(bytes).map_err(|e| ClientError::Csv(e.to_string()))
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, ClientError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| ClientError::Csv(e.to_string()))
    }
}

/// File content attached to a create or update request.
///
/// Either a file on disk, sent as is, or a table serialized to CSV before upload.
#[derive(Debug, Clone, PartialEq)]
pub enum Blob {
    Path(PathBuf),
    Table(Table),
}

/// A part of a multipart request, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Blob {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Blob::Path(path.into())
    }

    /// Load the blob content. An empty path is rejected before touching the filesystem.
    pub fn to_file_part(&self) -> Result<FilePart, ClientError> {
        match self {
            Blob::Path(path) if path.as_os_str().is_empty() => Err(
                ClientError::InvalidAttachment("attachment path is empty".to_string()),
            ),
            Blob::Path(path) => {
                let bytes = std::fs::read(path)?;
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "upload".to_string());
                Ok(FilePart {
                    file_name,
                    mime: "application/octet-stream",
                    bytes,
                })
            }
            Blob::Table(table) => Ok(FilePart {
                file_name: "data.csv".to_string(),
                mime: "text/csv",
                bytes: table.to_csv_bytes()?,
            }),
        }
    }
}

impl From<Table> for Blob {
    fn from(table: Table) -> Self {
        Blob::Table(table)
    }
}

impl From<PathBuf> for Blob {
    fn from(path: PathBuf) -> Self {
        Blob::Path(path)
    }
}

impl From<&Path> for Blob {
    fn from(path: &Path) -> Self {
        Blob::Path(path.to_path_buf())
    }
}

impl From<&str> for Blob {
    fn from(path: &str) -> Self {
        Blob::Path(PathBuf::from(path))
    }
}
