use crate::error::{GainsError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record: column name -> cell text, in header order.
pub type Row = IndexMap<String, String>;

/// An ordered table of rows sharing the header's columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build a dataset from a header and positional rows.
    /// Missing trailing cells become `""`, extra cells are dropped.
    pub fn from_records(headers: &[String], records: Vec<Vec<String>>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                let mut cells = record.into_iter();
                let mut row = Row::with_capacity(headers.len());
                for header in headers {
                    // Duplicate headers collapse into one key; the later cell wins.
                    row.insert(header.clone(), cells.next().unwrap_or_default());
                }
                row
            })
            .collect();
        Self { rows }
    }

    /// Create a Dataset from a JSON array of flat objects
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value.as_array().ok_or_else(|| {
            GainsError::InvalidDataset("input data must be a JSON array of objects".to_string())
        })?;

        let Some(first) = array.first() else {
            return Ok(Self::default());
        };

        // Extract headers from the first object
        let first_obj = first.as_object().ok_or_else(|| {
            GainsError::InvalidDataset("items in array must be objects".to_string())
        })?;
        let headers: Vec<String> = first_obj.keys().cloned().collect();

        let mut rows = Vec::with_capacity(array.len());
        for item in array {
            let obj = item.as_object().ok_or_else(|| {
                GainsError::InvalidDataset("items in array must be objects".to_string())
            })?;

            let mut row = Row::with_capacity(headers.len());
            for header in &headers {
                let cell = match obj.get(header) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    Some(Value::Null) | None => String::new(),
                    _ => {
                        return Err(GainsError::InvalidDataset(format!(
                            "unsupported value type for field '{header}'"
                        )))
                    }
                };
                row.insert(header.clone(), cell);
            }
            rows.push(row);
        }

        Ok(Self { rows })
    }

    pub fn to_json(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| {
                    Value::Object(
                        row.iter()
                            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in header order, taken from the first row.
    pub fn column_names(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.rows.first().is_some_and(|row| row.contains_key(column))
    }

    /// Non-empty cells of one column, in row order.
    ///
    /// Each column is filtered on its own, so two columns of the same dataset
    /// can yield lists of different lengths.
    pub fn column_values(&self, column: &str) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(column))
            .filter(|cell| !cell.is_empty())
            .cloned()
            .collect()
    }

    pub fn cell(&self, row_index: usize, column: &str) -> Option<&str> {
        self.rows
            .get(row_index)
            .and_then(|row| row.get(column))
            .map(String::as_str)
    }

    /// Rewrite one cell in place.
    ///
    /// An out-of-range row or an unknown column leaves the dataset untouched
    /// and returns `false`.
    pub fn update_cell(&mut self, row_index: usize, column: &str, value: impl Into<String>) -> bool {
        match self.rows.get_mut(row_index).and_then(|row| row.get_mut(column)) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => {
                tracing::debug!(row_index, column, "ignoring edit outside the dataset");
                false
            }
        }
    }

    /// Copying variant of [`Dataset::update_cell`].
    #[must_use]
    pub fn with_cell(&self, row_index: usize, column: &str, value: impl Into<String>) -> Self {
        let mut updated = self.clone();
        updated.update_cell(row_index, column, value);
        updated
    }
}
