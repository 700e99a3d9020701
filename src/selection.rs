//! Column role selection.
//!
//! A [`RoleSelection`] records which dataset columns play which part in a
//! visualization. It is mutated through explicit assignment or through the
//! one-click toggle policy used by the data table header ([`RoleSelection::click`]).

use crate::error::{GainsError, Result};
use crate::kind::VisualizationKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic part a column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Response,
    Predictor,
    Category,
    Value,
    Time,
    X,
    Y,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Response,
        Role::Predictor,
        Role::Category,
        Role::Value,
        Role::Time,
        Role::X,
        Role::Y,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Role::Response => "response",
            Role::Predictor => "predictor",
            Role::Category => "category",
            Role::Value => "value",
            Role::Time => "time",
            Role::X => "x",
            Role::Y => "y",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = GainsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        // Accept the plural spelling used in selection summaries
        let wanted = if wanted.eq_ignore_ascii_case("predictors") {
            "predictor"
        } else {
            wanted
        };
        Role::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GainsError::UnknownRole(wanted.to_string()))
    }
}

/// Shape of the role slots a kind exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLayout {
    /// One exclusive response plus a set of predictors.
    Regression,
    /// Two single-column slots; the first is the one replaced when both are full.
    Pair(Role, Role),
    /// One single-column slot.
    Single(Role),
}

impl SlotLayout {
    pub fn for_kind(kind: VisualizationKind) -> Self {
        match kind {
            VisualizationKind::LinearRegression => SlotLayout::Regression,
            VisualizationKind::BarChart | VisualizationKind::PieChart => {
                SlotLayout::Pair(Role::Category, Role::Value)
            }
            VisualizationKind::LineChart => SlotLayout::Pair(Role::Time, Role::Value),
            VisualizationKind::DotPlot => SlotLayout::Pair(Role::X, Role::Y),
            VisualizationKind::Histogram
            | VisualizationKind::DensityPlot
            | VisualizationKind::BoxPlot => SlotLayout::Single(Role::Value),
        }
    }

    pub fn roles(self) -> Vec<Role> {
        match self {
            SlotLayout::Regression => vec![Role::Response, Role::Predictor],
            SlotLayout::Pair(a, b) => vec![a, b],
            SlotLayout::Single(role) => vec![role],
        }
    }

    pub fn contains(self, role: Role) -> bool {
        self.roles().contains(&role)
    }
}

/// Which columns hold which roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub predictors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

impl RoleSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column held by a single-column role. Always `None` for predictors.
    pub fn column(&self, role: Role) -> Option<&str> {
        match role {
            Role::Response => self.response.as_deref(),
            Role::Predictor => None,
            Role::Category => self.category.as_deref(),
            Role::Value => self.value.as_deref(),
            Role::Time => self.time.as_deref(),
            Role::X => self.x.as_deref(),
            Role::Y => self.y.as_deref(),
        }
    }

    fn slot_mut(&mut self, role: Role) -> Option<&mut Option<String>> {
        match role {
            Role::Response => Some(&mut self.response),
            Role::Predictor => None,
            Role::Category => Some(&mut self.category),
            Role::Value => Some(&mut self.value),
            Role::Time => Some(&mut self.time),
            Role::X => Some(&mut self.x),
            Role::Y => Some(&mut self.y),
        }
    }

    /// Whether `column` currently holds `role`.
    pub fn holds(&self, role: Role, column: &str) -> bool {
        match role {
            Role::Predictor => self.predictors.iter().any(|p| p == column),
            _ => self.column(role) == Some(column),
        }
    }

    /// Roles of `kind` that `column` currently holds.
    pub fn roles_of(&self, kind: VisualizationKind, column: &str) -> Vec<Role> {
        SlotLayout::for_kind(kind)
            .roles()
            .into_iter()
            .filter(|role| self.holds(*role, column))
            .collect()
    }

    /// Give `column` the `role` within `kind`.
    ///
    /// Single-column roles replace their previous column and vacate any other
    /// role of the same kind that `column` held. Assigning the response evicts
    /// the column from the predictors; assigning a predictor never evicts the
    /// response, so adding the current response as a predictor is refused.
    ///
    /// Returns whether the selection changed.
    pub fn assign(&mut self, kind: VisualizationKind, role: Role, column: &str) -> Result<bool> {
        let layout = SlotLayout::for_kind(kind);
        if !layout.contains(role) {
            return Err(GainsError::RoleNotApplicable {
                role: role.to_string(),
                kind: kind.to_string(),
            });
        }

        if role == Role::Predictor {
            if self.holds(Role::Response, column) {
                tracing::warn!(column, "clear the response before using it as a predictor");
                return Ok(false);
            }
            if self.holds(Role::Predictor, column) {
                return Ok(false);
            }
            self.predictors.push(column.to_string());
            return Ok(true);
        }

        if self.holds(role, column) {
            return Ok(false);
        }

        for other in layout.roles() {
            if other != role && other != Role::Predictor && self.holds(other, column) {
                self.clear(other);
            }
        }
        if role == Role::Response {
            self.predictors.retain(|p| p != column);
        }
        if let Some(slot) = self.slot_mut(role) {
            *slot = Some(column.to_string());
        }
        tracing::trace!(%kind, %role, column, "assigned column");
        Ok(true)
    }

    /// Remove `column` from `role`. Returns whether anything changed.
    pub fn unassign(&mut self, role: Role, column: &str) -> bool {
        if role == Role::Predictor {
            let before = self.predictors.len();
            self.predictors.retain(|p| p != column);
            return self.predictors.len() != before;
        }
        if self.holds(role, column) {
            self.clear(role);
            true
        } else {
            false
        }
    }

    /// Empty a role entirely.
    pub fn clear(&mut self, role: Role) {
        match self.slot_mut(role) {
            Some(slot) => *slot = None,
            None => self.predictors.clear(),
        }
    }

    /// Apply one header click on `column` under `kind`'s toggle policy.
    ///
    /// Pair kinds: a column in either slot is unassigned from it; otherwise it
    /// fills the first empty slot, and when both are full it replaces the
    /// first slot while the second is kept.
    ///
    /// Linear regression: clicking the response clears it, clicking a
    /// predictor removes it, anything else becomes the response.
    pub fn click(&mut self, kind: VisualizationKind, column: &str) {
        match SlotLayout::for_kind(kind) {
            SlotLayout::Regression => {
                if self.holds(Role::Response, column) {
                    self.response = None;
                } else if self.holds(Role::Predictor, column) {
                    self.predictors.retain(|p| p != column);
                } else {
                    self.predictors.retain(|p| p != column);
                    self.response = Some(column.to_string());
                }
            }
            SlotLayout::Pair(first, second) => {
                if self.holds(first, column) {
                    self.clear(first);
                } else if self.holds(second, column) {
                    self.clear(second);
                } else if self.column(first).is_some() && self.column(second).is_none() {
                    self.set(second, column);
                } else {
                    self.set(first, column);
                }
            }
            SlotLayout::Single(role) => {
                if self.holds(role, column) {
                    self.clear(role);
                } else {
                    self.set(role, column);
                }
            }
        }
        tracing::trace!(%kind, column, selection = ?self, "column clicked");
    }

    fn set(&mut self, role: Role, column: &str) {
        if let Some(slot) = self.slot_mut(role) {
            *slot = Some(column.to_string());
        }
    }

    /// Whether every role `kind` requires has a column.
    pub fn is_complete(&self, kind: VisualizationKind) -> bool {
        match SlotLayout::for_kind(kind) {
            SlotLayout::Regression => self.response.is_some() && !self.predictors.is_empty(),
            SlotLayout::Pair(a, b) => self.column(a).is_some() && self.column(b).is_some(),
            SlotLayout::Single(role) => self.column(role).is_some(),
        }
    }

    /// Only the roles relevant to `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: VisualizationKind) -> RoleSelection {
        let mut projected = RoleSelection::default();
        for role in SlotLayout::for_kind(kind).roles() {
            match role {
                Role::Predictor => projected.predictors = self.predictors.clone(),
                _ => projected.set_opt(role, self.column(role)),
            }
        }
        projected
    }

    fn set_opt(&mut self, role: Role, column: Option<&str>) {
        if let Some(slot) = self.slot_mut(role) {
            *slot = column.map(str::to_string);
        }
    }

    /// Default selection after a dataset is loaded or the kind changes.
    ///
    /// Regression takes the first column as response and the rest as
    /// predictors; pair kinds take the first two columns. Both need at least
    /// two columns. Single-slot kinds take the first column.
    pub fn auto_select(kind: VisualizationKind, columns: &[String]) -> RoleSelection {
        let mut selection = RoleSelection::default();
        match SlotLayout::for_kind(kind) {
            SlotLayout::Regression if columns.len() >= 2 => {
                selection.response = Some(columns[0].clone());
                selection.predictors = columns[1..].to_vec();
            }
            SlotLayout::Pair(a, b) if columns.len() >= 2 => {
                selection.set(a, &columns[0]);
                selection.set(b, &columns[1]);
            }
            SlotLayout::Single(role) if !columns.is_empty() => {
                selection.set(role, &columns[0]);
            }
            _ => {}
        }
        selection
    }
}
