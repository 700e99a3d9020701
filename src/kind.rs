use crate::error::GainsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visualizations the code generator knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizationKind {
    #[default]
    LinearRegression,
    BarChart,
    LineChart,
    DotPlot,
    PieChart,
    Histogram,
    DensityPlot,
    BoxPlot,
}

impl VisualizationKind {
    pub const ALL: [VisualizationKind; 8] = [
        VisualizationKind::LinearRegression,
        VisualizationKind::BarChart,
        VisualizationKind::LineChart,
        VisualizationKind::DotPlot,
        VisualizationKind::PieChart,
        VisualizationKind::Histogram,
        VisualizationKind::DensityPlot,
        VisualizationKind::BoxPlot,
    ];

    /// Stable kebab-case identifier, e.g. `bar-chart`.
    pub fn id(self) -> &'static str {
        match self {
            VisualizationKind::LinearRegression => "linear-regression",
            VisualizationKind::BarChart => "bar-chart",
            VisualizationKind::LineChart => "line-chart",
            VisualizationKind::DotPlot => "dot-plot",
            VisualizationKind::PieChart => "pie-chart",
            VisualizationKind::Histogram => "histogram",
            VisualizationKind::DensityPlot => "density-plot",
            VisualizationKind::BoxPlot => "box-plot",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            VisualizationKind::LinearRegression => "Linear Regression",
            VisualizationKind::BarChart => "Bar Chart",
            VisualizationKind::LineChart => "Line Chart",
            VisualizationKind::DotPlot => "Dot Plot",
            VisualizationKind::PieChart => "Pie Chart",
            VisualizationKind::Histogram => "Histogram",
            VisualizationKind::DensityPlot => "Density Plot",
            VisualizationKind::BoxPlot => "Box Plot",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            VisualizationKind::LinearRegression => {
                "A model that estimates the relationship between a scalar response."
            }
            VisualizationKind::BarChart => {
                "Visualize the frequency or proportion of categories using bars."
            }
            VisualizationKind::LineChart => "Display trends over time or sequential data.",
            VisualizationKind::DotPlot => "Visualize paired values with a scatter-style dot plot.",
            VisualizationKind::PieChart => {
                "Display proportional data as slices of a circular chart."
            }
            VisualizationKind::Histogram => {
                "Show how numeric values are distributed across bins."
            }
            VisualizationKind::DensityPlot => {
                "Show a smoothed estimate of a numeric distribution."
            }
            VisualizationKind::BoxPlot => {
                "Summarize a numeric column by its median, quartiles and outliers."
            }
        }
    }
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for VisualizationKind {
    type Err = GainsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        VisualizationKind::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GainsError::UnknownKind(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for kind in VisualizationKind::ALL {
            assert_eq!(kind.id().parse::<VisualizationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "scatter-3d".parse::<VisualizationKind>().unwrap_err();
        assert!(matches!(err, GainsError::UnknownKind(ref k) if k == "scatter-3d"));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&VisualizationKind::DensityPlot).unwrap();
        assert_eq!(json, "\"density-plot\"");
        let kind: VisualizationKind = serde_json::from_str("\"box-plot\"").unwrap();
        assert_eq!(kind, VisualizationKind::BoxPlot);
    }
}
