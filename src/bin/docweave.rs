use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dialoguer::Select;
use docweave::{
    Buffer, CONFIG_FILE, Documenter, MODEL_CHOICES, Position, Settings, Span, Target,
    language_for_extension,
};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(
    name = "dw",
    about = "Generate documentation comments for source files",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and insert a documentation comment into a source file
    Doc {
        /// Source file to document
        file: PathBuf,

        /// Cursor line, zero-based; line 0 column 0 documents the whole module
        #[clap(short, long, default_value_t = 0)]
        line: usize,

        /// Cursor column, zero-based
        #[clap(short, long, default_value_t = 0)]
        column: usize,

        /// Document an explicit selection, as START_LINE:START_COL:END_LINE:END_COL
        #[clap(short, long, value_name = "SPAN")]
        select: Option<String>,

        /// Write the result here instead of editing the file in place
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change the configured generation model
    Model {
        /// Model identifier; prompts interactively when omitted
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Doc {
            file,
            line,
            column,
            select,
            output,
        } => run_doc(file, line, column, select, output),
        Command::Model { name } => run_model(name),
    }
}

fn run_doc(
    file: PathBuf,
    line: usize,
    column: usize,
    select: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = Settings::load(Path::new("."))?;

    let extension = file.extension().and_then(OsStr::to_str).unwrap_or_default();
    let Some(language) = language_for_extension(extension) else {
        bail!("unsupported file extension: {}", file.display());
    };

    let content =
        fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
    let mut buffer = Buffer::new(&content);

    let target = match select {
        Some(span) => Target::Selection(parse_span(&span)?),
        None => Target::Cursor(Position::new(line, column)),
    };

    let documenter = Documenter::from_settings(&settings)?;
    let inserted_at = documenter.document(&mut buffer, target, language)?;

    let destination = output.unwrap_or(file);
    fs::write(&destination, buffer.text())
        .with_context(|| format!("writing {}", destination.display()))?;
    println!(
        "Inserted documentation comment at line {} of {}",
        inserted_at + 1,
        destination.display()
    );
    Ok(())
}

fn run_model(name: Option<String>) -> Result<()> {
    let dir = Path::new(".");
    let mut settings = Settings::load_or_default(dir)?;

    if settings.model.is_empty() {
        println!("No model configured");
    } else {
        println!("Current model: {}", settings.model);
    }

    let chosen = match name {
        Some(name) if MODEL_CHOICES.contains(&name.as_str()) => name,
        Some(name) => bail!(
            "unknown model {name}; choose one of: {}",
            MODEL_CHOICES.join(", ")
        ),
        None => {
            let index = Select::new()
                .with_prompt("Select a model")
                .items(MODEL_CHOICES)
                .default(0)
                .interact()?;
            MODEL_CHOICES[index].to_string()
        }
    };

    settings.model = chosen;
    settings.save(dir)?;
    println!("Model set to {} in {}", settings.model, CONFIG_FILE);
    Ok(())
}

fn parse_span(raw: &str) -> Result<Span> {
    let parts: Vec<usize> = raw
        .split(':')
        .map(|part| part.parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("invalid selection span: {raw}"))?;
    match parts.as_slice() {
        &[start_line, start_col, end_line, end_col] => Ok(Span::new(
            Position::new(start_line, start_col),
            Position::new(end_line, end_col),
        )),
        _ => bail!("selection span must be START_LINE:START_COL:END_LINE:END_COL"),
    }
}
