//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use wordbook_core::config::CONFIG_FILE_NAME;
use wordbook_core::{convert_file, Book, BookConfig, Toc};

/// Default output directory for `convert`
pub const DEFAULT_OUTPUT_DIR: &str = "gitbook_output";

/// Output format for the `toc` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TocFormat {
    /// Indented outline
    #[default]
    Text,
    /// JSON tree
    Json,
}

#[derive(Parser)]
#[command(name = "wordbook")]
#[command(author, version, about = "Turn Word documents into Markdown books", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a DOCX file into a GitBook-style book
    Convert(ConvertArgs),

    /// Print the table of contents of a DOCX file
    Toc {
        /// Input DOCX file
        input: PathBuf,

        /// Deepest heading level listed (1-6)
        #[arg(long)]
        max_toc_level: Option<u8>,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: TocFormat,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Arguments of the `convert` command
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Input DOCX file
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Book title (defaults to the document title)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Book description (defaults to the document subject)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Book language code
    #[arg(short, long)]
    pub language: Option<String>,

    /// Deepest heading level listed in SUMMARY.md (1-6)
    #[arg(long)]
    pub max_toc_level: Option<u8>,

    /// Directory for extracted images, relative to the output directory
    #[arg(long)]
    pub assets_dir: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Remove the output directory before writing
    #[arg(long)]
    pub clean: bool,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert(args) => {
            convert_command(&args)?;
        }
        Commands::Toc {
            input,
            max_toc_level,
            format,
            config,
        } => {
            let output = toc_command(&input, max_toc_level, format, config.as_deref())?;
            print!("{}", output);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the convert command
pub fn convert_command(args: &ConvertArgs) -> Result<Book> {
    println!("wordbook v{}", wordbook_core::VERSION);
    println!("Converting: {}", args.input.display());

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(title) = &args.title {
        config.book.title = Some(title.clone());
    }
    if let Some(description) = &args.description {
        config.book.description = Some(description.clone());
    }
    if let Some(language) = &args.language {
        config.book.language = language.clone();
    }
    if let Some(level) = args.max_toc_level {
        config.toc.max_level = level;
    }
    if let Some(dir) = &args.assets_dir {
        config.assets.dir = dir.clone();
    }
    config.validate().context("Invalid options")?;

    if args.clean && contains_input(&args.output, &args.input) {
        anyhow::bail!(
            "Refusing to clean {}: it contains the input file",
            args.output.display()
        );
    }

    let book = convert_file(&args.input, &config)
        .with_context(|| format!("Failed to convert document: {}", args.input.display()))?;

    write_book(&book, &args.output, args.clean)?;

    println!();
    println!("Conversion complete: {}", args.output.display());
    println!("  {} chapters", book.report.chapters);
    println!("  {} images", book.report.assets);
    println!("  {} table of contents entries", book.report.toc_entries);
    if !book.report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &book.report.warnings {
            println!("  - {}", warning);
        }
    }

    Ok(book)
}

fn contains_input(output_dir: &Path, input: &Path) -> bool {
    match (output_dir.canonicalize(), input.canonicalize()) {
        (Ok(dir), Ok(input)) => input.starts_with(dir),
        _ => false,
    }
}

/// Write every file of a book below `output_dir`
pub fn write_book(book: &Book, output_dir: &Path, clean: bool) -> Result<()> {
    if clean && output_dir.exists() {
        fs::remove_dir_all(output_dir).with_context(|| {
            format!("Failed to clean output directory: {}", output_dir.display())
        })?;
    }

    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    for file in book.files() {
        let path = file
            .path
            .split('/')
            .fold(output_dir.to_path_buf(), |path, part| path.join(part));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &file.contents)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        debug!("Wrote {}", path.display());
    }

    Ok(())
}

/// Execute the toc command, returning the rendered table of contents
pub fn toc_command(
    input: &Path,
    max_toc_level: Option<u8>,
    format: TocFormat,
    config_path: Option<&Path>,
) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let mut config = load_config(config_path)?;
    if let Some(level) = max_toc_level {
        config.toc.max_level = level;
    }
    config.validate().context("Invalid options")?;

    let book = convert_file(input, &config)
        .with_context(|| format!("Failed to read document: {}", input.display()))?;

    match format {
        TocFormat::Text => Ok(toc_outline(&book.toc)),
        TocFormat::Json => {
            let mut json = serde_json::to_string_pretty(&book.toc.roots)
                .context("Failed to serialize table of contents")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Indented outline, one entry per line
fn toc_outline(toc: &Toc) -> String {
    let mut output = String::new();
    toc.walk(|node, depth| {
        output.push_str(&"  ".repeat(depth - 1));
        output.push_str(&format!("{} ({})\n", node.title, node.link()));
    });
    output
}

/// Load settings from a config file or use defaults
fn load_config(config_path: Option<&Path>) -> Result<BookConfig> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            BookConfig::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        }
        None => {
            let candidate = Path::new(CONFIG_FILE_NAME);
            if candidate.exists() {
                let content = fs::read_to_string(candidate)?;
                if let Ok(config) = BookConfig::from_toml_str(&content) {
                    debug!("Using {}", candidate.display());
                    return Ok(config);
                }
            }
            Ok(BookConfig::default())
        }
    }
}
