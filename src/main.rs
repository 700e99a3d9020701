use anyhow::{Context, Result};
use clap::Parser;
use gains::csv_reader;
use gains::export;
use gains::logging::{init_logging, LogConfig};
use gains::{codegen, parser, OutputFormat, OutputOptions, Role, Session, SlotLayout, VisualizationKind};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gains")]
#[command(about = "Generate R code for common visualizations from CSV data", long_about = None)]
struct Args {
    /// Role expression (e.g., 'bar-chart(category: fruit, value: count)')
    roles: String,

    /// CSV file to read; stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// What to print on stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::R)]
    format: OutputFormat,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,

    /// Also write the R script to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the R script to the current directory under a dated name
    #[arg(long, conflicts_with = "output")]
    save: bool,

    /// Write the normalized dataset back out as CSV
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Pick roles from the dataset's first columns, ignoring the expression's bindings
    #[arg(long)]
    auto: bool,

    /// Print the built-in example instead of reading any data
    #[arg(long, conflicts_with_all = ["input", "auto"])]
    example: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&LogConfig::from_verbosity(args.verbose)).context("Failed to set up logging")?;

    let (kind, selection) =
        parser::parse_roles(&args.roles).context("Failed to parse role expression")?;

    let mut session = Session::new(kind);
    if !args.example {
        let dataset = match &args.input {
            Some(path) => csv_reader::read_csv_from_path(path),
            None => csv_reader::read_csv_from_stdin(),
        }
        .context("Failed to read CSV")?;
        session.import_dataset(dataset);
        if !args.auto {
            session.roles = selection;
        }
        warn_unknown_columns(&session);
        if kind == VisualizationKind::LinearRegression {
            for error in session.validation().errors {
                tracing::warn!("{error}");
            }
        }
    }

    let artifact = if args.example {
        codegen::default_artifact(kind)
    } else {
        session.artifact()
    }
    .context("Failed to generate R code")?;

    tracing::info!("{}", session.description());

    if let Some(path) = &args.export_csv {
        let text = export::write_csv(&session.dataset).context("Failed to serialize dataset")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
    }

    let script_path = if args.save {
        Some(PathBuf::from(export::suggested_script_name(
            kind,
            chrono::Local::now().date_naive(),
        )))
    } else {
        args.output.clone()
    };
    if let Some(path) = script_path {
        export::write_script(&path, &artifact.code_text).context("Failed to save R script")?;
    }

    let options = OutputOptions {
        format: args.format,
        pretty: !args.compact,
    };
    let text = options.render(&artifact).context("Failed to render output")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{text}").context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}

/// Bound columns missing from the dataset still generate, but with no values.
fn warn_unknown_columns(session: &Session) {
    let columns = session.columns();
    let roles = &session.roles;
    for role in SlotLayout::for_kind(session.kind).roles() {
        let bound: Vec<&str> = match role {
            Role::Predictor => roles.predictors.iter().map(String::as_str).collect(),
            _ => roles.column(role).into_iter().collect(),
        };
        for column in bound {
            if !columns.iter().any(|c| c == column) {
                tracing::warn!(%role, column, "column not found in dataset");
            }
        }
    }
}
