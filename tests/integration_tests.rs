use gains::codegen::{self, default_artifact, generate, generate_arguments};
use gains::csv_reader::{parse_csv, read_csv_from_path};
use gains::export::write_csv;
use gains::{
    parser, ArgumentDescriptor, Dataset, Role, RoleSelection, Session, VisualizationKind,
};
use proptest::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Run the gains binary with `args`, feeding `stdin` when given
fn run_gains(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gains"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn gains");

    if let Some(mut handle) = child.stdin.take() {
        if let Some(text) = stdin {
            handle
                .write_all(text.as_bytes())
                .expect("Failed to write to stdin");
        }
    }

    child.wait_with_output().expect("Failed to wait for gains")
}

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
        .display()
        .to_string()
}

fn fruit_dataset() -> Dataset {
    read_csv_from_path(Path::new(&fixture("fruit.csv"))).expect("Failed to read fixture")
}

fn selection(expr: &str) -> (VisualizationKind, RoleSelection) {
    parser::parse_roles(expr).expect("Failed to parse role expression")
}

// =============================================================================
// CSV parsing
// =============================================================================

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9]",
        "[a-zA-Z0-9][a-zA-Z0-9 ,\"]{0,8}[a-zA-Z0-9]",
    ]
}

fn table() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    prop::collection::btree_set("[a-z]{1,6}", 1..5).prop_flat_map(|headers| {
        let width = headers.len();
        let rows = prop::collection::vec(prop::collection::vec(cell(), width), 1..6);
        (Just(headers.into_iter().collect::<Vec<_>>()), rows)
    })
}

proptest! {
    #[test]
    fn prop_csv_round_trip((headers, records) in table()) {
        let original = Dataset::from_records(&headers, records);
        let text = write_csv(&original).unwrap();
        let parsed = parse_csv(&text);

        prop_assert_eq!(parsed.column_names(), headers);
        prop_assert_eq!(parsed, original);
    }
}

#[test]
fn test_blank_header_gets_placeholder() {
    let ds = parse_csv(",b\n1,2\n");
    let columns = ds.column_names();
    assert_eq!(columns.len(), 2);
    assert!(columns[0].starts_with("col_"));
    assert_eq!(columns[0].len(), 8);
    assert_eq!(columns[1], "b");
    assert_eq!(ds.cell(0, &columns[0]), Some("1"));
}

#[test]
fn test_escaped_quotes_and_embedded_delimiters() {
    let ds = parse_csv("quote,n\n\"he said \"\"hi\"\", twice\",1\n");
    assert_eq!(ds.cell(0, "quote"), Some("he said \"hi\", twice"));
    assert_eq!(ds.cell(0, "n"), Some("1"));
}

#[test]
fn test_line_endings_are_equivalent() {
    let lf = parse_csv("a,b\n1,2\n3,4\n");
    assert_eq!(parse_csv("a,b\r\n1,2\r\n3,4\r\n"), lf);
    assert_eq!(parse_csv("a,b\r1,2\r3,4\r"), lf);
    assert_eq!(parse_csv("\n\na,b\n\n1,2\n , \n3,4"), lf);
}

#[test]
fn test_ragged_rows() {
    let ds = parse_csv("a,b\n1\n2,3,4\n");
    assert_eq!(ds.cell(0, "b"), Some(""));
    assert_eq!(ds.cell(1, "b"), Some("3"));
    assert_eq!(ds.rows()[1].len(), 2);
}

// =============================================================================
// Code generation
// =============================================================================

#[test]
fn test_default_artifacts_are_fully_expanded() {
    for kind in VisualizationKind::ALL {
        let artifact = default_artifact(kind).unwrap();
        assert!(!artifact.code_text.contains("${"), "{kind} left a placeholder");
        assert!(!artifact.arguments.is_empty(), "{kind} has no arguments");
        assert_eq!(generate(kind, &Dataset::default(), &RoleSelection::new()).unwrap(), artifact);
    }
}

#[test]
fn test_incomplete_selection_yields_default() {
    let (kind, roles) = selection("bar-chart(category: fruit)");
    let artifact = generate(kind, &fruit_dataset(), &roles).unwrap();
    assert_eq!(artifact, default_artifact(kind).unwrap());
}

#[test]
fn test_columns_are_filtered_independently() {
    let (kind, roles) = selection("bar-chart(category: fruit, value: count)");
    let code = codegen::generate_code(kind, &fruit_dataset(), &roles).unwrap();
    assert!(code.contains(r#"categories <- c("apple", "banana", "kiwi, gold")"#), "{code}");
    assert!(code.contains("values <- c(3, 7)"), "{code}");
}

#[test]
fn test_regression_matches_example_layout() {
    let ds = read_csv_from_path(Path::new(&fixture("regression.csv"))).unwrap();
    let (kind, roles) = selection("linear-regression(response: y, predictor: x1 + x2)");
    let artifact = generate(kind, &ds, &roles).unwrap();

    // The example dataset is the same as the fixture, minus the comment line
    let example = default_artifact(kind).unwrap();
    assert_eq!(
        Some(artifact.code_text.as_str()),
        example.code_text.strip_prefix("# Initialize data\n")
    );
    assert!(artifact.code_text.contains("formula = y ~ x1 + x2,"));
}

#[test]
fn test_arguments_agree_with_code() {
    let ds = parse_csv("score,hours,sleep\n80,5,7\n90,6,8\n");
    let (kind, roles) = selection("linear-regression(response: score, predictor: hours + sleep)");
    let artifact = generate(kind, &ds, &roles).unwrap();

    let formula = artifact
        .arguments
        .iter()
        .find_map(|arg| match arg {
            ArgumentDescriptor::Value { name, value, read_only } if name == "Formula" => {
                assert!(*read_only);
                Some(value.clone())
            }
            _ => None,
        })
        .expect("Formula argument");
    assert_eq!(formula, "score ~ hours + sleep");
    assert!(artifact.code_text.contains(&format!("formula = {formula},")));
    assert_eq!(generate_arguments(kind, &ds, &roles), artifact.arguments);
}

#[test]
fn test_dot_plot_literals() {
    let ds = parse_csv("x,y\n1.50,-0\nabc,\"say \"\"hi\"\"\"\n");
    let (kind, roles) = selection("dot-plot(x: x, y: y)");
    let code = codegen::generate_code(kind, &ds, &roles).unwrap();
    assert!(code.contains(r#"x_values <- c(1.5, "abc")"#), "{code}");
    assert!(code.contains(r#"y_values <- c(0, "say \"hi\"")"#), "{code}");
}

#[test]
fn test_dot_plot_with_empty_axis_falls_back() {
    let ds = parse_csv("x,y\n1,\n2,\n");
    let (kind, roles) = selection("dot-plot(x: x, y: y)");
    assert_eq!(generate(kind, &ds, &roles).unwrap(), default_artifact(kind).unwrap());
}

#[test]
fn test_artifact_json_shape() {
    let artifact = default_artifact(VisualizationKind::LinearRegression).unwrap();
    let json = serde_json::to_value(&artifact).unwrap();
    assert!(json["codeText"].is_string());
    assert_eq!(json["arguments"][0]["readOnly"], serde_json::Value::Bool(true));
    assert_eq!(json["arguments"][1]["type"], "data");
    assert_eq!(json["arguments"][1]["data"][0]["label"], "y:");
}

// =============================================================================
// Role selection and session
// =============================================================================

#[test]
fn test_regression_click_asymmetry() {
    let kind = VisualizationKind::LinearRegression;
    let mut roles = RoleSelection::auto_select(kind, &["y".into(), "a".into(), "b".into()]);

    // A predictor click removes the predictor, it never becomes the response
    roles.click(kind, "a");
    assert_eq!(roles.response.as_deref(), Some("y"));
    assert_eq!(roles.predictors, vec!["b".to_string()]);

    // A fresh column becomes the response
    roles.click(kind, "a");
    assert_eq!(roles.response.as_deref(), Some("a"));

    // Response assignment evicts from predictors, not the other way round
    assert!(roles.assign(kind, Role::Response, "b").unwrap());
    assert!(roles.predictors.is_empty());
    assert!(!roles.assign(kind, Role::Predictor, "b").unwrap());
    assert_eq!(roles.response.as_deref(), Some("b"));
}

#[test]
fn test_session_flow() {
    let mut session = Session::new(VisualizationKind::PieChart);
    session.import_csv(&fs::read_to_string(fixture("fruit.csv")).unwrap());
    assert!(session.is_selection_complete());
    assert_eq!(session.roles.category.as_deref(), Some("fruit"));

    // Out-of-range edits leave the dataset untouched
    let before = session.dataset.clone();
    assert!(!session.edit_cell(99, "count", "1"));
    assert_eq!(session.dataset, before);

    assert!(session.edit_cell(1, "count", "4"));
    let code = session.artifact().unwrap().code_text;
    assert!(code.contains("c(3, 4, 7)"), "{code}");

    session.switch_kind(VisualizationKind::Histogram);
    assert_eq!(session.roles.value.as_deref(), Some("fruit"));
    assert!(session.roles.category.is_none());
}

#[test]
fn test_session_serializes() {
    let mut session = Session::new(VisualizationKind::DotPlot);
    session.import_csv("a,b\n1,2\n");
    let json = serde_json::to_string(&session).unwrap();
    let restored: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, session);
}

// =============================================================================
// Command line
// =============================================================================

#[test]
fn test_cli_reads_file() {
    let output = run_gains(
        &["bar-chart(category: fruit, value: count)", "--input", &fixture("fruit.csv")],
        None,
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("barplot("));
    assert!(stdout.contains(r#"categories <- c("apple", "banana", "kiwi, gold")"#));
}

#[test]
fn test_cli_json_from_stdin() {
    let output = run_gains(
        &["histogram(value: n)", "--format", "json", "--compact"],
        Some("n\n1\n2\n3\n"),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["codeText"].as_str().unwrap().contains("c(1, 2, 3)"));
    assert_eq!(json["arguments"][0]["name"], "Values");
}

#[test]
fn test_cli_auto_and_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("plot.R");
    let csv_out = dir.path().join("data.csv");

    let output = run_gains(
        &[
            "line-chart()",
            "--auto",
            "--output",
            script.to_str().unwrap(),
            "--export-csv",
            csv_out.to_str().unwrap(),
        ],
        Some("t,v\r\n1,10\r\n2,20\r\n"),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let written = fs::read_to_string(&script).unwrap();
    assert_eq!(written.trim_end(), String::from_utf8_lossy(&output.stdout).trim_end());
    assert!(written.contains("time_points <- c(1, 2)"));
    assert_eq!(fs::read_to_string(&csv_out).unwrap(), "t,v\n1,10\n2,20\n");
}

#[test]
fn test_cli_example_needs_no_input() {
    let output = run_gains(&["pie-chart()", "--example"], None);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        default_artifact(VisualizationKind::PieChart).unwrap().code_text
    );
}

#[test]
fn test_cli_rejects_bad_expression() {
    let output = run_gains(&["violin(value: a)"], Some("a\n1\n"));
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("role expression"));
}
