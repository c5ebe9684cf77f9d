//! ai-classifier: command-line form provider for the AI system checklist.
//!
//! Usage:
//!   ai-classifier classify --input answers.json
//!   ai-classifier classify --input - --format markdown
//!   ai-classifier wizard --export
//!   ai-classifier template
//!   ai-classifier definition

use std::io::Read;
use std::path::PathBuf;

use ai_system_classifier::config::{self, Config, RuntimeConfig};
use ai_system_classifier::export::{self, ExportFormat};
use ai_system_classifier::wizard::Wizard;
use ai_system_classifier::{AI_SYSTEM_DEFINITION, AnswerSet, engine_from_config, render};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ai-classifier")]
#[command(about = "Classify a solution against the EU AI Act AI-system definition", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an answer set from a JSON file (or `-` for stdin)
    Classify {
        #[arg(short, long, default_value = "-")]
        input: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,
        /// Also write the JSON and Markdown exports
        #[arg(long)]
        export: bool,
        /// Export directory; overrides export.output_dir
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Answer the questionnaire interactively
    Wizard {
        #[arg(long)]
        export: bool,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print an empty answer set to fill in
    Template,
    /// Print the AI system definition used by the checklist
    Definition,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Summary,
    Json,
    Markdown,
}

fn main() -> Result<()> {
    config::load_env_file();
    let runtime = RuntimeConfig::load_from_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&runtime.log_level)
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Classify {
            input,
            format,
            export,
            out_dir,
        } => classify(&config, &input, format, export, out_dir),
        Commands::Wizard { export, out_dir } => wizard(&config, export, out_dir),
        Commands::Template => {
            println!("{}", serde_json::to_string_pretty(&AnswerSet::default())?);
            Ok(())
        }
        Commands::Definition => {
            println!("{AI_SYSTEM_DEFINITION}");
            Ok(())
        }
    }
}

fn classify(
    config: &Config,
    input: &str,
    format: OutputFormat,
    export: bool,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read answers from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))?
    };
    let answers = AnswerSet::from_json_str(&raw)?;

    let engine = engine_from_config(config);
    let evaluation = engine.evaluate(&answers);
    let assessment = evaluation.assessment(&answers);

    match (format, &assessment) {
        (OutputFormat::Summary, _) => print!("{}", render::summary(&evaluation)),
        (OutputFormat::Json, Some(a)) => {
            println!("{}", export::render(a, ExportFormat::Json, &config.app)?)
        }
        (OutputFormat::Markdown, Some(a)) => {
            println!("{}", export::render(a, ExportFormat::Markdown, &config.app)?)
        }
        // Nothing to export yet; show what the engine is waiting for.
        (OutputFormat::Json, None) => {
            println!("{}", serde_json::to_string_pretty(&evaluation)?)
        }
        (OutputFormat::Markdown, None) => print!("{}", render::summary(&evaluation)),
    }

    if export {
        write_exports(config, assessment.as_ref(), out_dir)?;
    }
    if !evaluation.is_terminal() {
        std::process::exit(2);
    }
    Ok(())
}

fn wizard(config: &Config, export: bool, out_dir: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut wizard = Wizard::new(engine_from_config(config), stdin.lock(), std::io::stdout());
    let assessment = wizard.run()?;
    if export {
        write_exports(config, Some(&assessment), out_dir)?;
    }
    Ok(())
}

fn write_exports(
    config: &Config,
    assessment: Option<&ai_system_classifier::Assessment>,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let Some(assessment) = assessment else {
        anyhow::bail!("No verdict yet; nothing to export");
    };
    let dir = out_dir.unwrap_or_else(|| config.export.output_dir.clone());
    for path in export::export_to_directory(assessment, &config.app, &config.export, &dir)? {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}
