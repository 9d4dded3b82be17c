#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::Parser;
use sensapp_expr::config::{self, load_configuration};
use sensapp_expr::expression::{EvaluationOptions, Evaluator, Expr, Scope};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing::event;

/// Evaluate an instant vector expression tree against a scope of values.
#[derive(Debug, Parser)]
#[command(name = "sensapp-expr", version)]
struct Cli {
    /// JSON expression tree, or `-` to read it from stdin
    #[arg(short, long)]
    expression: PathBuf,

    /// JSON object mapping variable names to scalars and vectors
    #[arg(short, long)]
    scope: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

fn read_expression(path: &Path) -> Result<Expr> {
    let source = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read expression from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read expression file {}", path.display()))?
    };
    serde_json::from_str(&source).context("Failed to parse expression tree")
}

fn read_scope(path: Option<&Path>) -> Result<Scope> {
    let Some(path) = path else {
        return Ok(Scope::new());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scope file {}", path.display()))?;
    serde_json::from_str(&source).context("Failed to parse scope")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    load_configuration().context("Failed to load configuration")?;
    let config = config::get().context("Failed to get configuration")?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .init();

    let expression = read_expression(&cli.expression)?;
    let scope = read_scope(cli.scope.as_deref())?;

    let evaluator = Evaluator::new(EvaluationOptions::from(config.as_ref()));
    let result = match evaluator.evaluate(&expression, &scope) {
        Ok(result) => result,
        Err(err) => {
            event!(Level::ERROR, "Evaluation failed: {}", err);
            return Err(err).context("Failed to evaluate expression");
        }
    };

    let output = if cli.pretty || config.pretty_output {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .context("Failed to serialize result")?;
    println!("{}", output);

    Ok(())
}
