//! `fit`/`transform` contract and the column transformers.

use crate::model::Value;
use crate::{Error, Result};

use super::Table;

/// A preprocessing step: learn from a table, then reshape tables.
///
/// `labels` is the optional target column of a supervised dataset. Neither
/// transformer in this module looks at it.
pub trait Transformer {
    fn fit(&mut self, table: &Table, labels: Option<&[Value]>) -> Result<&mut Self>;

    fn transform(&self, table: &Table, labels: Option<&[Value]>) -> Result<Table>;

    fn fit_transform(&mut self, table: &Table, labels: Option<&[Value]>) -> Result<Table> {
        self.fit(table, labels)?;
        self.transform(table, labels)
    }
}

// ============================================================================
// ColumnSelector
// ============================================================================

/// Keeps only the named columns, in the order they were named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelector {
    columns: Vec<String>,
}

impl ColumnSelector {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { columns: columns.into_iter().map(Into::into).collect() }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Transformer for ColumnSelector {
    fn fit(&mut self, _table: &Table, _labels: Option<&[Value]>) -> Result<&mut Self> {
        Ok(self)
    }

    fn transform(&self, table: &Table, _labels: Option<&[Value]>) -> Result<Table> {
        let missing = table.missing(&self.columns);
        if !missing.is_empty() {
            return Err(Error::MissingColumns { columns: missing });
        }

        let selected = self
            .columns
            .iter()
            .filter_map(|name| table.column(name).cloned())
            .collect();
        Table::from_columns(selected)
    }
}

// ============================================================================
// ColumnDropper
// ============================================================================

/// Removes the named columns and keeps the rest in their original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDropper {
    columns: Vec<String>,
}

impl ColumnDropper {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { columns: columns.into_iter().map(Into::into).collect() }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Transformer for ColumnDropper {
    fn fit(&mut self, _table: &Table, _labels: Option<&[Value]>) -> Result<&mut Self> {
        Ok(self)
    }

    fn transform(&self, table: &Table, _labels: Option<&[Value]>) -> Result<Table> {
        let missing = table.missing(&self.columns);
        if !missing.is_empty() {
            return Err(Error::MissingColumns { columns: missing });
        }

        let kept = table
            .columns()
            .iter()
            .filter(|column| !self.columns.contains(&column.name))
            .cloned()
            .collect();
        Table::from_columns(kept)
    }
}
