//! Raw rectangular tables of text cells, loaded from CSV exports.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Rows of text cells exactly as exported. Row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Parse CSV text. Rows may have differing lengths; nothing is treated
    /// as a header by the reader.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.context("reading CSV record")?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header and data rows, or `None` when there is no data row or the
    /// header has no cells
    pub fn split_header(&self) -> Option<(&[String], &[Vec<String>])> {
        if self.rows.len() < 2 {
            return None;
        }
        let (header, data) = self.rows.split_first()?;
        if header.is_empty() {
            return None;
        }
        Some((header.as_slice(), data))
    }
}

/// Load a CSV export from disk.
pub fn read_table(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    RawTable::from_reader(file).with_context(|| format!("parsing {}", path.display()))
}
