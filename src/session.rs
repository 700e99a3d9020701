//! Working state of one editing session.
//!
//! Holds the current visualization kind, dataset and role selection, and
//! applies the same transitions the data table offers: import, kind switch,
//! header clicks and cell edits. Nothing here touches storage; callers that
//! persist projects serialize the session themselves.

use crate::codegen::{self, GeneratedArtifact};
use crate::csv_reader::parse_csv;
use crate::data::Dataset;
use crate::error::Result;
use crate::kind::VisualizationKind;
use crate::selection::{Role, RoleSelection};
use crate::validate::{validate_for_linear_regression, ValidationReport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub kind: VisualizationKind,
    pub dataset: Dataset,
    pub roles: RoleSelection,
}

impl Session {
    pub fn new(kind: VisualizationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Replace the dataset with freshly parsed `text` and auto-select roles.
    pub fn import_csv(&mut self, text: &str) {
        self.import_dataset(parse_csv(text));
    }

    pub fn import_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        if !self.dataset.is_empty() {
            self.roles = RoleSelection::auto_select(self.kind, &self.dataset.column_names());
        }
        tracing::info!(
            kind = %self.kind,
            rows = self.dataset.len(),
            columns = self.dataset.column_names().len(),
            "imported dataset"
        );
    }

    /// Switch visualization, resetting every role and auto-selecting anew.
    pub fn switch_kind(&mut self, kind: VisualizationKind) {
        self.kind = kind;
        self.roles = RoleSelection::auto_select(kind, &self.dataset.column_names());
        tracing::debug!(%kind, "switched visualization");
    }

    pub fn click_column(&mut self, column: &str) {
        self.roles.click(self.kind, column);
    }

    pub fn assign(&mut self, role: Role, column: &str) -> Result<bool> {
        self.roles.assign(self.kind, role, column)
    }

    pub fn unassign(&mut self, role: Role, column: &str) -> bool {
        self.roles.unassign(role, column)
    }

    /// Rewrite one cell; out-of-range edits are ignored.
    pub fn edit_cell(&mut self, row_index: usize, column: &str, value: impl Into<String>) -> bool {
        self.dataset.update_cell(row_index, column, value)
    }

    pub fn columns(&self) -> Vec<String> {
        self.dataset.column_names()
    }

    pub fn is_selection_complete(&self) -> bool {
        self.roles.is_complete(self.kind)
    }

    pub fn artifact(&self) -> Result<GeneratedArtifact> {
        codegen::generate(self.kind, &self.dataset, &self.roles)
    }

    pub fn description(&self) -> String {
        codegen::describe(self.kind, &self.roles)
    }

    pub fn validation(&self) -> ValidationReport {
        validate_for_linear_regression(&self.dataset)
    }
}
