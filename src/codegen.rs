//! R code and argument-panel generation.
//!
//! Every kind has one R skeleton (see [`crate::templates`]) and one builder
//! that turns its inputs into template bindings plus the argument list shown
//! next to the code. The inputs come either from dataset columns or, when no
//! dataset is loaded or the selection is incomplete, from an embedded worked
//! example. Both paths go through the same builder, so the example artifact
//! and a generated one always share their layout.

use crate::data::Dataset;
use crate::error::Result;
use crate::kind::VisualizationKind;
use crate::preprocessor::expand_placeholders;
use crate::selection::{Role, RoleSelection, SlotLayout};
use crate::templates::template_for;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Output types
// =============================================================================

/// Generated R code together with its argument panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    #[serde(rename = "codeText")]
    pub code_text: String,
    pub arguments: Vec<ArgumentDescriptor>,
}

/// Marker serialized as `"type": "data"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataTag {
    Data,
}

/// One labelled value list inside a composite argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    pub label: String,
    pub value: String,
}

/// One row of the argument panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentDescriptor {
    Data {
        name: String,
        #[serde(rename = "type")]
        tag: DataTag,
        data: Vec<DataEntry>,
    },
    Value {
        name: String,
        value: String,
        #[serde(rename = "readOnly")]
        read_only: bool,
    },
}

impl ArgumentDescriptor {
    pub fn value(name: &str, value: impl Into<String>, read_only: bool) -> Self {
        ArgumentDescriptor::Value {
            name: name.to_string(),
            value: value.into(),
            read_only,
        }
    }

    pub fn data(name: &str, data: Vec<DataEntry>) -> Self {
        ArgumentDescriptor::Data {
            name: name.to_string(),
            tag: DataTag::Data,
            data,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ArgumentDescriptor::Data { name, .. } | ArgumentDescriptor::Value { name, .. } => name,
        }
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// Column values extracted for one kind.
#[derive(Debug, Clone)]
enum ChartInput {
    Regression {
        response: NamedValues,
        predictors: Vec<NamedValues>,
    },
    Pair {
        first: NamedValues,
        second: NamedValues,
    },
    Single(NamedValues),
}

#[derive(Debug, Clone)]
struct NamedValues {
    column: String,
    values: Vec<String>,
}

impl NamedValues {
    fn from_dataset(dataset: &Dataset, column: &str) -> Self {
        Self {
            column: column.to_string(),
            values: dataset.column_values(column),
        }
    }

    fn example(column: &str, values: &[&str]) -> Self {
        Self {
            column: column.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Pull the selected columns out of `dataset`, or `None` when the dataset is
/// empty or `roles` does not satisfy `kind`.
fn extract(kind: VisualizationKind, dataset: &Dataset, roles: &RoleSelection) -> Option<ChartInput> {
    if dataset.is_empty() || !roles.is_complete(kind) {
        return None;
    }

    let input = match SlotLayout::for_kind(kind) {
        SlotLayout::Regression => ChartInput::Regression {
            response: NamedValues::from_dataset(dataset, roles.response.as_deref()?),
            predictors: roles
                .predictors
                .iter()
                .map(|column| NamedValues::from_dataset(dataset, column))
                .collect(),
        },
        SlotLayout::Pair(a, b) => ChartInput::Pair {
            first: NamedValues::from_dataset(dataset, roles.column(a)?),
            second: NamedValues::from_dataset(dataset, roles.column(b)?),
        },
        SlotLayout::Single(role) => {
            ChartInput::Single(NamedValues::from_dataset(dataset, roles.column(role)?))
        }
    };

    // A dot plot with nothing left on either axis falls back to the example
    if kind == VisualizationKind::DotPlot {
        if let ChartInput::Pair { first, second } = &input {
            if first.values.is_empty() || second.values.is_empty() {
                return None;
            }
        }
    }

    Some(input)
}

fn example_input(kind: VisualizationKind) -> ChartInput {
    match kind {
        VisualizationKind::LinearRegression => ChartInput::Regression {
            response: NamedValues::example("y", &["5", "7", "8", "6", "9"]),
            predictors: vec![
                NamedValues::example("x1", &["1", "2", "3", "4", "5"]),
                NamedValues::example("x2", &["2", "3", "4", "5", "6"]),
            ],
        },
        VisualizationKind::BarChart => ChartInput::Pair {
            first: NamedValues::example("category", &["A", "B", "C", "D", "E"]),
            second: NamedValues::example("value", &["23", "45", "56", "78", "32"]),
        },
        VisualizationKind::LineChart => ChartInput::Pair {
            first: NamedValues::example("time", &["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]),
            second: NamedValues::example(
                "value",
                &["12", "15", "18", "22", "25", "23", "28", "32", "30", "35"],
            ),
        },
        VisualizationKind::DotPlot => ChartInput::Pair {
            first: NamedValues::example("X Values", &["1", "2", "3", "4", "5", "6"]),
            second: NamedValues::example("Y Values", &["2.5", "3.1", "4.8", "3.6", "5.2", "4.9"]),
        },
        VisualizationKind::PieChart => ChartInput::Pair {
            first: NamedValues::example("category", &["Algo", "DS", "Java", "C", "C++", "Python"]),
            second: NamedValues::example("value", &["210", "450", "250", "100", "50", "90"]),
        },
        VisualizationKind::Histogram | VisualizationKind::DensityPlot | VisualizationKind::BoxPlot => {
            ChartInput::Single(NamedValues::example(
                "Values",
                &["2.3", "3.1", "3.8", "4.2", "4.5", "5.0", "5.1", "5.6", "6.2", "6.8", "7.4", "8.1"],
            ))
        }
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Template bindings and argument panel for one artifact.
struct Plan {
    bindings: HashMap<&'static str, String>,
    arguments: Vec<ArgumentDescriptor>,
}

impl Plan {
    fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            arguments: Vec::new(),
        }
    }

    fn bind(&mut self, key: &'static str, value: impl Into<String>) {
        self.bindings.insert(key, value.into());
    }

    /// Bind a value that is also an editable argument.
    fn bind_argument(&mut self, key: &'static str, name: &str, value: &str) {
        self.bind(key, value);
        self.arguments.push(ArgumentDescriptor::value(name, value, false));
    }
}

fn join(values: &[String]) -> String {
    values.join(", ")
}

/// Category labels wrapped in double quotes. Embedded quotes are not escaped.
fn quote_labels(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// R literal for one dot-plot value: a bare number when the cell parses as a
/// finite number, otherwise a quoted string with `"` escaped.
///
/// NOTE: only the dot plot distinguishes numbers from strings; every other
/// kind pastes cells verbatim. Kept as is so existing scripts stay stable.
/// Numbers are always written in positional notation (`1e21` comes out as
/// `1000000000000000000000`), which R reads as the same value.
fn r_literal(value: &str) -> String {
    match parse_number(value.trim()) {
        Some(n) if n.is_finite() => {
            if n == 0.0 {
                "0".to_string()
            } else {
                n.to_string()
            }
        }
        _ => format!("\"{}\"", value.replace('"', "\\\"")),
    }
}

/// Decimal, or unsigned `0x`/`0o`/`0b` integer.
fn parse_number(text: &str) -> Option<f64> {
    let radix = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return text.parse::<f64>().ok(),
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return None;
    }
    // Digit by digit so values wider than u64 still come out as a float
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

fn r_literals(values: &[String]) -> String {
    values.iter().map(|v| r_literal(v)).collect::<Vec<_>>().join(", ")
}

fn regression_plan(response: &NamedValues, predictors: &[NamedValues], example: bool) -> Plan {
    let mut plan = Plan::new();

    let mut lines = Vec::with_capacity(predictors.len() + 3);
    if example {
        lines.push("# Initialize data".to_string());
    }
    lines.push("df <- data.frame(".to_string());
    let last = predictors.len().saturating_sub(1);
    let response_comma = if predictors.is_empty() { "" } else { "," };
    lines.push(format!(
        "  {} = c({}){}",
        response.column,
        join(&response.values),
        response_comma
    ));
    for (idx, predictor) in predictors.iter().enumerate() {
        let comma = if idx == last { "" } else { "," };
        lines.push(format!(
            "  {} = c({}){}",
            predictor.column,
            join(&predictor.values),
            comma
        ));
    }
    lines.push(")".to_string());

    let predictor_names: Vec<&str> = predictors.iter().map(|p| p.column.as_str()).collect();
    let formula = format!("{} ~ {}", response.column, predictor_names.join(" + "));

    plan.bind("data_frame", lines.join("\n"));
    plan.bind("formula", formula.clone());

    let data = std::iter::once(response)
        .chain(predictors.iter())
        .map(|series| DataEntry {
            label: format!("{}:", series.column),
            value: join(&series.values),
        })
        .collect();
    plan.arguments.push(ArgumentDescriptor::value("Formula", formula, true));
    plan.arguments.push(ArgumentDescriptor::data("df (Initialize data)", data));
    plan
}

fn bar_plan(categories: &NamedValues, values: &NamedValues, example: bool) -> Plan {
    let mut plan = Plan::new();
    plan.bind("categories", quote_labels(&categories.values));
    plan.bind("values", join(&values.values));
    plan.arguments.push(ArgumentDescriptor::value("Categories", join(&categories.values), !example));
    plan.arguments.push(ArgumentDescriptor::value("Values", join(&values.values), !example));
    plan.bind_argument("title", "Main Title", if example { "Bar Chart Example" } else { "Bar Chart" });
    plan.bind_argument("x_label", "X-axis Label", "Categories");
    plan.bind_argument("y_label", "Y-axis Label", "Values");
    plan
}

fn line_plan(time: &NamedValues, values: &NamedValues, example: bool) -> Plan {
    let mut plan = Plan::new();
    plan.bind("time_points", join(&time.values));
    plan.bind("values", join(&values.values));
    plan.arguments.push(ArgumentDescriptor::value("Time Points", join(&time.values), !example));
    plan.arguments.push(ArgumentDescriptor::value("Values", join(&values.values), !example));
    plan.bind_argument("title", "Main Title", if example { "Line Chart Example" } else { "Line Chart" });
    plan.bind_argument("x_label", "X-axis Label", "Time Points");
    plan.bind_argument("y_label", "Y-axis Label", "Values");
    plan.bind_argument("line_color", "Line Color", "blue");
    plan
}

fn dot_plan(x: &NamedValues, y: &NamedValues, example: bool) -> Plan {
    let mut plan = Plan::new();
    plan.bind("x_values", r_literals(&x.values));
    plan.bind("y_values", r_literals(&y.values));
    // The panel shows the raw cells, the code the formatted literals
    plan.arguments.push(ArgumentDescriptor::value("X Values", join(&x.values), !example));
    plan.arguments.push(ArgumentDescriptor::value("Y Values", join(&y.values), !example));
    plan.bind_argument("title", "Main Title", if example { "Dot Plot Example" } else { "Dot Plot" });
    plan.bind_argument("x_label", "X-axis Label", &x.column);
    plan.bind_argument("y_label", "Y-axis Label", &y.column);
    plan.bind_argument("point_color", "Point Color", "darkgreen");
    // Shown in the panel only; base `plot()` here does not take it
    plan.arguments.push(ArgumentDescriptor::value("Point Size", "1.2", false));
    plan
}

fn pie_plan(categories: &NamedValues, values: &NamedValues, example: bool) -> Plan {
    let mut plan = Plan::new();
    plan.bind("vector_note", if example { "the number of articles" } else { "values" });
    plan.bind("values", join(&values.values));
    plan.bind("categories", quote_labels(&categories.values));
    plan.arguments.push(ArgumentDescriptor::value("Categories", join(&categories.values), !example));
    plan.arguments.push(ArgumentDescriptor::value("Values", join(&values.values), !example));
    plan.bind_argument(
        "title",
        "Main Title",
        if example { "Articles on GeeksforGeeks" } else { "Pie Chart" },
    );
    plan.bind_argument("output_file", "Output File", "piechart.png");
    plan.bind_argument("colors", "Colors", "white");
    plan.bind_argument("title_color", "Title Color", "darkgreen");
    plan
}

fn histogram_plan(values: &NamedValues, example: bool) -> Plan {
    let mut plan = Plan::new();
    plan.bind("values", join(&values.values));
    plan.arguments.push(ArgumentDescriptor::value("Values", join(&values.values), !example));
    plan.bind_argument("title", "Main Title", if example { "Histogram Example" } else { "Histogram" });
    plan.bind_argument("x_label", "X-axis Label", &values.column);
    plan.bind_argument("y_label", "Y-axis Label", "Frequency");
    plan.bind_argument("fill_color", "Fill Color", "lightblue");
    plan.bind_argument("breaks", "Breaks", "Sturges");
    plan
}

fn density_plan(values: &NamedValues, example: bool) -> Plan {
    let mut plan = Plan::new();
    plan.bind("values", join(&values.values));
    plan.arguments.push(ArgumentDescriptor::value("Values", join(&values.values), !example));
    plan.bind_argument(
        "title",
        "Main Title",
        if example { "Density Plot Example" } else { "Density Plot" },
    );
    plan.bind_argument("x_label", "X-axis Label", &values.column);
    plan.bind_argument("y_label", "Y-axis Label", "Density");
    plan.bind_argument("line_color", "Line Color", "purple");
    plan
}

fn box_plan(values: &NamedValues, example: bool) -> Plan {
    let mut plan = Plan::new();
    plan.bind("values", join(&values.values));
    plan.arguments.push(ArgumentDescriptor::value("Values", join(&values.values), !example));
    plan.bind_argument("title", "Main Title", if example { "Box Plot Example" } else { "Box Plot" });
    plan.bind_argument("y_label", "Y-axis Label", &values.column);
    plan.bind_argument("fill_color", "Fill Color", "orange");
    plan.bind_argument("border_color", "Border Color", "brown");
    plan
}

fn build_plan(kind: VisualizationKind, input: &ChartInput, example: bool) -> Plan {
    match (kind, input) {
        (_, ChartInput::Regression { response, predictors }) => {
            regression_plan(response, predictors, example)
        }
        (VisualizationKind::LineChart, ChartInput::Pair { first, second }) => {
            line_plan(first, second, example)
        }
        (VisualizationKind::DotPlot, ChartInput::Pair { first, second }) => {
            dot_plan(first, second, example)
        }
        (VisualizationKind::PieChart, ChartInput::Pair { first, second }) => {
            pie_plan(first, second, example)
        }
        (_, ChartInput::Pair { first, second }) => bar_plan(first, second, example),
        (VisualizationKind::DensityPlot, ChartInput::Single(values)) => {
            density_plan(values, example)
        }
        (VisualizationKind::BoxPlot, ChartInput::Single(values)) => box_plan(values, example),
        (_, ChartInput::Single(values)) => histogram_plan(values, example),
    }
}

fn plan_for(kind: VisualizationKind, dataset: &Dataset, roles: &RoleSelection) -> Plan {
    match extract(kind, dataset, roles) {
        Some(input) => {
            tracing::debug!(%kind, rows = dataset.len(), "generating from dataset");
            build_plan(kind, &input, false)
        }
        None => {
            tracing::debug!(%kind, "using example artifact");
            build_plan(kind, &example_input(kind), true)
        }
    }
}

fn render(kind: VisualizationKind, plan: Plan) -> Result<GeneratedArtifact> {
    let code_text = expand_placeholders(template_for(kind), &plan.bindings)?;
    Ok(GeneratedArtifact {
        code_text,
        arguments: plan.arguments,
    })
}

// =============================================================================
// Public API
// =============================================================================

/// Generate R code and arguments for `kind` from `dataset` and `roles`.
///
/// An empty dataset or an incomplete selection yields the kind's example
/// artifact. The error case is limited to a template referencing an unbound
/// placeholder.
pub fn generate(
    kind: VisualizationKind,
    dataset: &Dataset,
    roles: &RoleSelection,
) -> Result<GeneratedArtifact> {
    render(kind, plan_for(kind, dataset, roles))
}

/// The code half of [`generate`].
pub fn generate_code(kind: VisualizationKind, dataset: &Dataset, roles: &RoleSelection) -> Result<String> {
    generate(kind, dataset, roles).map(|artifact| artifact.code_text)
}

/// The argument half of [`generate`].
pub fn generate_arguments(
    kind: VisualizationKind,
    dataset: &Dataset,
    roles: &RoleSelection,
) -> Vec<ArgumentDescriptor> {
    plan_for(kind, dataset, roles).arguments
}

/// The embedded example artifact for `kind`.
pub fn default_artifact(kind: VisualizationKind) -> Result<GeneratedArtifact> {
    render(kind, build_plan(kind, &example_input(kind), true))
}

/// One-sentence summary of what the generated code does.
pub fn describe(kind: VisualizationKind, roles: &RoleSelection) -> String {
    if !roles.is_complete(kind) {
        return "Generated R code based on your data and selections.".to_string();
    }
    let col = |role: Role| roles.column(role).unwrap_or_default();
    match kind {
        VisualizationKind::LinearRegression => format!(
            "Generated R code for linear regression using {} as response variable and {} as predictors.",
            col(Role::Response),
            roles.predictors.join(", ")
        ),
        VisualizationKind::BarChart | VisualizationKind::PieChart => format!(
            "Generated R code for {} using {} as categories and {} as values.",
            kind.display_name().to_lowercase(),
            col(Role::Category),
            col(Role::Value)
        ),
        VisualizationKind::LineChart => format!(
            "Generated R code for line chart using {} as time points and {} as values.",
            col(Role::Time),
            col(Role::Value)
        ),
        VisualizationKind::DotPlot => format!(
            "Generated R code for dot plot using {} on the x-axis and {} on the y-axis.",
            col(Role::X),
            col(Role::Y)
        ),
        VisualizationKind::Histogram | VisualizationKind::DensityPlot | VisualizationKind::BoxPlot => {
            format!(
                "Generated R code for {} using {} as values.",
                kind.display_name().to_lowercase(),
                col(Role::Value)
            )
        }
    }
}
