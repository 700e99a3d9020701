use crate::data::Dataset;
use crate::error::{GainsError, Result};
use crate::kind::VisualizationKind;
use chrono::NaiveDate;
use std::path::Path;

/// Serialize `dataset` back to CSV, quoting only fields that need it.
pub fn write_csv(dataset: &Dataset) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let columns = dataset.column_names();
    if columns.is_empty() {
        return Ok(String::new());
    }
    writer.write_record(&columns)?;
    for row in dataset.rows() {
        writer.write_record(columns.iter().map(|c| row.get(c).map_or("", String::as_str)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| GainsError::CsvWrite(csv::Error::from(err.into_error())))?;
    // Every field came from a String, so the output is valid UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// File name offered when saving a script, e.g. `bar_chart_2024-03-01.R`.
pub fn suggested_script_name(kind: VisualizationKind, date: NaiveDate) -> String {
    format!("{}_{}.R", kind.id().replace('-', "_"), date.format("%Y-%m-%d"))
}

pub fn write_script(path: &Path, code: &str) -> Result<()> {
    std::fs::write(path, code).map_err(|source| GainsError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = code.len(), "wrote R script");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_reader::parse_csv;

    #[test]
    fn test_write_csv_quotes_when_needed() {
        let ds = parse_csv("name,note\nplain,\"a, b\"\nq,\"say \"\"hi\"\"\"\n");
        let text = write_csv(&ds).unwrap();
        assert_eq!(text, "name,note\nplain,\"a, b\"\nq,\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_write_csv_round_trip() {
        let ds = parse_csv("x,y,label\n1,2,\"multi\nline\"\n3,,z\n");
        assert_eq!(parse_csv(&write_csv(&ds).unwrap()), ds);
    }

    #[test]
    fn test_write_empty_dataset() {
        assert_eq!(write_csv(&Dataset::default()).unwrap(), "");
    }

    #[test]
    fn test_suggested_script_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            suggested_script_name(VisualizationKind::LinearRegression, date),
            "linear_regression_2024-03-01.R"
        );
        assert_eq!(suggested_script_name(VisualizationKind::BoxPlot, date), "box_plot_2024-03-01.R");
    }

    #[test]
    fn test_write_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.R");
        write_script(&path, "plot(model)").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "plot(model)");
    }
}
