use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use filter_engine::{
    CompiledCondition, DocumentFilterCompiler, FilterCompiler, compile_condition, resolve,
};
use model::execution::{binding::Binding, expr::ConditionExpr};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "docfilter",
    version = "0.0.1",
    about = "Document filter compiler"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Pretty-print JSON output")]
    pretty: bool,

    #[arg(
        long,
        global = true,
        help = "Log filter, e.g. `debug` or `filter_engine=trace`; defaults to RUST_LOG, then `info`"
    )]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    // Initialize logger; stdout is reserved for JSON output
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile { condition, output } => {
            let expr = load_condition(&condition).await?;
            let compiled = DocumentFilterCompiler::compile(&expr)?;
            info!(
                "Compiled {} with {} runtime variable(s)",
                condition,
                compiled.required_variables().len()
            );
            output::emit(&compiled, cli.pretty, output).await?;
        }
        Commands::Resolve { compiled, binding } => {
            let source = tokio::fs::read_to_string(&compiled).await?;
            let compiled: CompiledCondition = serde_json::from_str(&source)?;
            let binding = load_binding(&binding).await?;
            let document = resolve(&compiled, &binding)?;
            output::emit(&document, cli.pretty, None).await?;
        }
        Commands::Check { condition, binding } => {
            let expr = match condition {
                Some(path) => Some(load_condition(&path).await?),
                None => None,
            };
            let compiled = compile_condition(expr.as_ref())?;
            let binding = match binding {
                Some(path) => load_binding(&path).await?,
                None => Binding::new(),
            };
            let document = resolve(&compiled, &binding)?;
            output::emit(&document, cli.pretty, None).await?;
        }
    }

    Ok(())
}

async fn load_condition(path: &str) -> Result<ConditionExpr, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&source)?)
}

async fn load_binding(path: &str) -> Result<Binding, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    let json = serde_json::from_str(&source)?;
    Ok(Binding::from_json(json)?)
}
