//! Core data types shared by the pipelines and the output sink.

use std::path::PathBuf;

/// One row of the PEP index table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    /// Status part of the abbreviation (type marker already dropped); may be empty.
    pub code: String,
    /// Absolute link to the PEP's own page.
    pub link: String,
}

/// A PEP whose own page disagrees with its index abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub link: String,
    pub status: String,
    pub expected: Vec<String>,
}

/// Tabular pipeline result: a header row followed by data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Header followed by every data row.
    pub fn all_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// What a pipeline produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rows to hand to the output sink.
    Table(ResultTable),
    /// A file written as a side effect.
    Saved(PathBuf),
}
