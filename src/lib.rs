// Library exports for gains

pub mod csv_reader;
pub mod data;
pub mod error;
pub mod kind;
pub mod logging;
pub mod parser;
pub mod selection;
pub mod session;
pub mod validate;

// Code generation
pub mod codegen;
pub mod export;
pub mod preprocessor;
pub mod templates;

pub use codegen::{generate, ArgumentDescriptor, DataEntry, GeneratedArtifact};
pub use data::{Dataset, Row};
pub use error::{GainsError, Result};
pub use kind::VisualizationKind;
pub use selection::{Role, RoleSelection, SlotLayout};
pub use session::Session;

use serde::Deserialize;

/// What the command line prints to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// The R script
    #[serde(rename = "r")]
    #[default]
    R,
    /// The argument panel as JSON
    #[serde(rename = "arguments")]
    Arguments,
    /// The whole artifact as JSON
    #[serde(rename = "json")]
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputOptions {
    #[serde(default, rename = "type")]
    pub format: OutputFormat,
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool { true }

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::R,
            pretty: true,
        }
    }
}

impl OutputOptions {
    /// Render `artifact` in the configured format.
    pub fn render(&self, artifact: &GeneratedArtifact) -> Result<String> {
        let text = match self.format {
            OutputFormat::R => return Ok(artifact.code_text.clone()),
            OutputFormat::Arguments if self.pretty => serde_json::to_string_pretty(&artifact.arguments)?,
            OutputFormat::Arguments => serde_json::to_string(&artifact.arguments)?,
            OutputFormat::Json if self.pretty => serde_json::to_string_pretty(artifact)?,
            OutputFormat::Json => serde_json::to_string(artifact)?,
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_options_from_json() {
        let options: OutputOptions = serde_json::from_str(r#"{"type": "arguments"}"#).unwrap();
        assert_eq!(options.format, OutputFormat::Arguments);
        assert!(options.pretty);

        let options: OutputOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.format, OutputFormat::R);
    }

    #[test]
    fn test_render_formats() {
        let artifact = codegen::default_artifact(VisualizationKind::BarChart).unwrap();

        let r = OutputOptions::default().render(&artifact).unwrap();
        assert_eq!(r, artifact.code_text);

        let options = OutputOptions { format: OutputFormat::Json, pretty: false };
        let json: serde_json::Value = serde_json::from_str(&options.render(&artifact).unwrap()).unwrap();
        assert_eq!(json["codeText"], serde_json::Value::String(artifact.code_text.clone()));

        let options = OutputOptions { format: OutputFormat::Arguments, pretty: false };
        let json: serde_json::Value = serde_json::from_str(&options.render(&artifact).unwrap()).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(artifact.arguments.len()));
    }
}
