use crate::data::Dataset;
use serde::Serialize;

/// Share of non-empty cells that must parse as numbers for a column to count
/// as numeric.
pub const NUMERIC_SHARE: f64 = 0.8;

/// Outcome of a dataset check.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

pub fn is_numeric(cell: &str) -> bool {
    cell.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

/// Whether enough of `column`'s non-empty cells are numbers.
pub fn is_mostly_numeric(dataset: &Dataset, column: &str) -> bool {
    let values = dataset.column_values(column);
    let numeric = values.iter().filter(|v| is_numeric(v)).count();
    numeric as f64 >= values.len() as f64 * NUMERIC_SHARE
}

/// Check that `dataset` can feed a linear regression.
pub fn validate_for_linear_regression(dataset: &Dataset) -> ValidationReport {
    if dataset.is_empty() {
        return ValidationReport::from_errors(vec!["No data available".to_string()]);
    }

    let mut errors = Vec::new();
    let columns = dataset.column_names();

    if columns.len() < 2 {
        errors.push("At least 2 columns are required for linear regression".to_string());
    }

    for column in &columns {
        if !is_mostly_numeric(dataset, column) {
            errors.push(format!("Column \"{column}\" contains mostly non-numeric values"));
        }
    }

    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "dataset not suitable for regression");
    }
    ValidationReport::from_errors(errors)
}
