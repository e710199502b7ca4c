//! Tabular datasets and column transformers.
//!
//! A [`Table`] is an ordered list of named, equal-length columns. The
//! [`Transformer`] contract mirrors the usual preprocessing `fit`/`transform`
//! pair; [`ColumnSelector`] and [`ColumnDropper`] reshape a table by column
//! name and learn nothing during `fit`.

pub mod transform;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::model::Value;
use crate::{Error, Result};

pub use transform::{ColumnDropper, ColumnSelector, Transformer};

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered collection of uniquely named, equal-length columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, rejecting duplicate names and ragged columns.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        {
            let mut seen = HashSet::with_capacity(columns.len());
            for column in &columns {
                if !seen.insert(column.name.as_str()) {
                    return Err(Error::ShapeMismatch(format!("duplicate column '{}'", column.name)));
                }
            }
        }
        if let Some(first) = columns.first() {
            if let Some(ragged) = columns.iter().find(|c| c.len() != first.len()) {
                return Err(Error::ShapeMismatch(format!(
                    "column '{}' has {} rows, expected {}",
                    ragged.name,
                    ragged.len(),
                    first.len()
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Append a column.
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.columns.push(column);
        Self::from_columns(self.columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Names in `names` that are not columns of this table.
    pub(crate) fn missing(&self, names: &[String]) -> Vec<String> {
        names
            .iter()
            .filter(|name| self.column(name).is_none())
            .cloned()
            .collect()
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            columns: Vec<Column>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Table::from_columns(raw.columns).map_err(serde::de::Error::custom)
    }
}
