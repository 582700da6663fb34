//! Asciimage: decode ASCIImage character grids into vector elements.
//!
//! An ASCIImage is a small grid of characters where marks (`1`-`9`, `A`-`Z`,
//! `a`-`z` without `o`) anchor geometry. Marks that follow each other in that
//! order trace a path, a mark written twice is a line and a mark written
//! three or more times outlines an ellipse. The grid can be given as bare
//! text or wrapped in a YAML document that also carries styling metadata.
//!
//! Decoding produces an [`ir::Image`]: the grid size, the elements, and the
//! metadata to style each of them. Drawing the image is left to a renderer.
//!
//! # Modules
//!
//! - [`ir`]: Grid, mark catalog, classification, metadata and input formats
//! - [`validation`]: Checks decoded images for likely mistakes
//! - [`inspect`]: Summary reports for decoded images
//! - [`logging`]: `tracing` subscriber setup used by the CLI
//! - [`error`]: Error types for asciimage operations
//!
//! # Example
//!
//! ```
//! use asciimage::ir::{DocumentMetadata, ElementKind, InputFormat, Source};
//!
//! let source = Source::from("fill: red\nimage: |\n  A . A\n  . 1 .\n");
//! let image = asciimage::parse(&source, InputFormat::Auto, &DocumentMetadata::default()).unwrap();
//!
//! assert_eq!(image.elements[0].kind(), ElementKind::Point);
//! assert_eq!(image.elements[1].kind(), ElementKind::Line);
//! assert_eq!(image.effective(1).fill(), Some("red"));
//! ```

pub mod error;
pub mod inspect;
pub mod ir;
pub mod logging;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

pub use error::AsciimageError;
pub use ir::source::parse;

use ir::metadata::keys;
use ir::{DocumentMetadata, Image, InputFormat, Source};
use logging::LogFormat;

/// The asciimage CLI application.
#[derive(Parser)]
#[command(name = "asciimage")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log filter (trace, debug, info, warn, error, or tracing directives).
    #[arg(long, global = true, env = "ASCIIMAGE_LOG")]
    log_level: Option<String>,

    /// Log output format ('compact', 'pretty', or 'json').
    #[arg(long, global = true, default_value = "compact")]
    log_format: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Decode an image and print its elements.
    Parse(ParseArgs),
    /// Print a summary report for an image.
    Inspect(InspectArgs),
    /// Check an image for errors and warnings.
    Validate(ValidateArgs),
}

/// Input selection shared by every subcommand.
#[derive(clap::Args)]
struct InputArgs {
    /// Input file ('-' for stdin).
    input: PathBuf,

    /// Input format ('auto', 'text', or 'yaml').
    #[arg(long, default_value = "auto")]
    format: String,

    /// Metadata to apply on top of the document, as KEY=VALUE.
    /// Use N.KEY=VALUE to target element N.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
}

/// Arguments for the parse subcommand.
#[derive(clap::Args)]
struct ParseArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Write the JSON image to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the asciimage CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), AsciimageError> {
    let cli = Cli::parse();

    let log_format: LogFormat = cli.log_format.parse()?;
    // A subscriber may already be installed when embedded; keep going.
    if let Err(err) = logging::init_logging(cli.log_level.as_deref(), log_format) {
        eprintln!("warning: {}", err);
    }

    match cli.command {
        Some(Commands::Parse(args)) => run_parse(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            println!("asciimage {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Decode ASCIImage character grids into vector elements.");
            println!();
            println!("Run 'asciimage --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the parse subcommand.
fn run_parse(args: ParseArgs) -> Result<(), AsciimageError> {
    let image = load_image(&args.input)?;

    match (args.output.as_str(), &args.out) {
        ("json", Some(path)) => {
            ir::io_json::write_image_json(path, &image)?;
            info!(path = %path.display(), "wrote image JSON");
        }
        ("json", None) => {
            let json = ir::io_json::to_json_string(&image).map_err(|source| {
                AsciimageError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{}", json);
        }
        ("text", _) => print!("{}", format_image_text(&image)),
        (other, _) => {
            return Err(AsciimageError::UnsupportedFormat(format!(
                "output '{}' (supported: text, json)",
                other
            )));
        }
    }

    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), AsciimageError> {
    let image = load_image(&args.input)?;
    let report = inspect::inspect_image(&image, &inspect::InspectOptions::default());

    match args.output.as_str() {
        "json" => print_json(&serde_json::to_value(&report).map_err(|source| {
            AsciimageError::JsonWrite {
                path: PathBuf::from("<stdout>"),
                source,
            }
        })?),
        _ => print!("{}", report),
    }

    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), AsciimageError> {
    let image = load_image(&args.input)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_image(&image, &opts);

    match args.output.as_str() {
        "json" => print_json(&report.to_json_value()),
        _ => print!("{}", report),
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(AsciimageError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(_) => println!("{}", value),
    }
}

/// Reads, decodes and returns the image named by the input arguments.
fn load_image(args: &InputArgs) -> Result<Image, AsciimageError> {
    let format: InputFormat = args.format.parse()?;
    let metadata = metadata_from_assignments(&args.set)?;
    let text = ir::io_text::read_input(&args.input)?;

    debug!(input = %args.input.display(), %format, "decoding image");
    parse(&Source::Text(text), format, &metadata)
}

/// Builds the caller metadata layer from `KEY=VALUE` assignments.
///
/// `N.KEY=VALUE` targets element `N`. Values are read as YAML scalars, so
/// `true` and `2.5` keep their types.
pub fn metadata_from_assignments<S: AsRef<str>>(
    assignments: &[S],
) -> Result<DocumentMetadata, AsciimageError> {
    let mut mapping = Mapping::new();

    for raw in assignments {
        let raw = raw.as_ref();
        let invalid = |message: &str| AsciimageError::InvalidOverride {
            raw: raw.to_string(),
            message: message.to_string(),
        };

        let (key, value) = raw.split_once('=').ok_or_else(|| invalid("expected KEY=VALUE"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(invalid("key is empty"));
        }
        let value = scalar_value(value);

        match key.split_once('.') {
            Some((index, option))
                if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) =>
            {
                let index: u64 = index.parse().map_err(|_| invalid("element index too large"))?;
                if option.is_empty() {
                    return Err(invalid("option name is empty"));
                }
                let entry = mapping
                    .entry(Value::from(index))
                    .or_insert_with(|| Value::Mapping(Mapping::new()));
                if let Value::Mapping(properties) = entry {
                    properties.insert(Value::from(option), value);
                }
            }
            _ => {
                mapping.insert(Value::from(key), value);
            }
        }
    }

    Ok(DocumentMetadata::from_mapping(&mapping))
}

fn scalar_value(raw: &str) -> Value {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(value @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => value,
        _ => Value::from(raw),
    }
}

/// Plain-text listing of an image: a header, then one line per element with
/// its effective styling.
pub fn format_image_text(image: &Image) -> String {
    let mut out = format!(
        "image {}x{}, {} element(s)\n",
        image.rows,
        image.cols,
        image.elements.len()
    );

    for (index, element) in image.elements.iter().enumerate() {
        let props = image.effective(index);
        let mut style = Vec::new();
        if let Some(fill) = props.fill() {
            style.push(format!("{}={}", keys::FILL, fill));
        }
        if let Some(stroke) = props.stroke() {
            style.push(format!("{}={}", keys::STROKE, stroke));
        }
        if let Some(width) = props.stroke_width() {
            style.push(format!("{}={}", keys::STROKE_WIDTH, width));
        }
        if props.is_open() {
            style.push(keys::OPEN.to_string());
        }
        if props.is_aliased() {
            style.push(keys::ALIASED.to_string());
        }

        out.push_str(&format!("{:>3}  {}  [{}]\n", index, element, style.join(" ")));
    }

    out
}
