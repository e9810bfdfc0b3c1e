//! `jsontree` CLI: parse JSON documents and inspect the resulting tree.
//!
//! ## Usage
//!
//! ```sh
//! # Print the node/value outline of a document (stdin → stdout)
//! echo '{"name":"Alice","tags":["a","b"]}' | jsontree inspect
//!
//! # Outline from file to file
//! jsontree inspect -i data.json -o data.outline
//!
//! # Count what the tree holds (nodes, values, strings, arrays) as JSON
//! jsontree stats -i data.json -o data.stats.json
//!
//! # Parser options from a JSON file, overridden by flags
//! jsontree inspect -i data.json --config parse.json --max-depth 8 --strict
//! ```
//!
//! Log output goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use std::fmt::Write as _;
use std::io::{self, Read, Write as _};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jsontree_core::{Document, ParseOptions, Payload, Precision, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsontree",
    version,
    about = "Parse JSON into a jsontree node/value tree"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an indented outline of the parsed tree
    Inspect {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Parse, free the tree, and report what was released
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// JSON file holding parser options (fields of `ParseOptions`)
    #[arg(long)]
    config: Option<String>,
    /// Deepest allowed object nesting below the root
    #[arg(long)]
    max_depth: Option<usize>,
    /// Reject bare words other than true, false and null
    #[arg(long)]
    strict: bool,
    /// Reject repeated member names within one object
    #[arg(long)]
    reject_duplicates: bool,
    /// Ignore content after the root object closes
    #[arg(long)]
    allow_trailing: bool,
    /// Store fractional numbers as 32-bit floats
    #[arg(long)]
    single_precision: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            input,
            output,
            options,
        } => {
            let options = build_options(&options)?;
            let input = read_input(input.as_deref())?;
            let doc = input.parse(&options)?;
            write_output(output.as_deref(), outline(&doc))?;
        }
        Commands::Stats {
            input,
            output,
            options,
        } => {
            let options = build_options(&options)?;
            let input = read_input(input.as_deref())?;
            let doc = input.parse(&options)?;
            let diagnostics = doc.diagnostics().len();
            let released = jsontree_core::free(doc);
            let report = serde_json::json!({
                "bytes": input.text.len(),
                "diagnostics": diagnostics,
                "released": released,
            });
            write_output(output.as_deref(), serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Merge the `--config` file (if any) with the individual flags.
///
/// Flags only ever tighten or switch on behaviour, so a flag that is absent
/// leaves the config file's value alone.
fn build_options(args: &OptionArgs) -> Result<ParseOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid parser options in {}", path))?
        }
        None => ParseOptions::default(),
    };

    if let Some(depth) = args.max_depth {
        options.max_depth = depth;
    }
    if args.strict {
        options.strict_literals = true;
    }
    if args.reject_duplicates {
        options.reject_duplicate_keys = true;
    }
    if args.allow_trailing {
        options.allow_trailing_content = true;
    }
    if args.single_precision {
        options.precision = Precision::Single;
    }
    tracing::debug!(?options, "parser options");
    Ok(options)
}

/// Render the tree as one `name: kind payload` line per value.
///
/// Walks with an explicit stack of member iterators so that any depth the
/// parser accepted can be printed.
fn outline(doc: &Document) -> String {
    let mut out = String::new();
    let Some(root) = doc.root() else {
        return out;
    };
    let _ = writeln!(out, "{}", root.name());

    let mut stack: Vec<(std::slice::Iter<'_, Value>, usize)> = vec![(root.values().iter(), 1)];
    while let Some((members, depth)) = stack.last_mut() {
        let depth = *depth;
        let Some(value) = members.next() else {
            stack.pop();
            continue;
        };
        outline_line(value, depth, &mut out);
        match value.payload() {
            Payload::Array(arr) => stack.push((arr.iter(), depth + 1)),
            Payload::Object(node) => stack.push((node.values().iter(), depth + 1)),
            _ => {}
        }
    }
    out
}

fn outline_line(value: &Value, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let name = value.name();
    let _ = match value.payload() {
        Payload::Null(word) if word == "null" => writeln!(out, "{indent}{name}: null"),
        Payload::Null(word) => writeln!(out, "{indent}{name}: null ({word})"),
        Payload::Boolean(b) => writeln!(out, "{indent}{name}: boolean {b}"),
        Payload::Number(n) => writeln!(out, "{indent}{name}: number {n}"),
        Payload::Float(f) => writeln!(out, "{indent}{name}: float {f}"),
        Payload::Double(d) => writeln!(out, "{indent}{name}: double {d}"),
        Payload::String(s) => writeln!(out, "{indent}{name}: string {s:?}"),
        Payload::Array(arr) => writeln!(out, "{indent}{name}: array ({} elements)", arr.len()),
        Payload::Object(node) => writeln!(out, "{indent}{name}: object ({} members)", node.len()),
    };
}

/// Document text together with the label used in error messages.
struct Input {
    source: String,
    text: String,
}

impl Input {
    /// Parse the text, locating any failure as `source:line:column`.
    fn parse(&self, options: &ParseOptions) -> Result<Document> {
        jsontree_core::parse_with(&self.text, options).map_err(|err| {
            let position = err.position(&self.text);
            anyhow::Error::new(err).context(format!("Failed to parse {}:{}", self.source, position))
        })
    }
}

fn read_input(path: Option<&str>) -> Result<Input> {
    let (source, text) = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path))?;
            (path.to_string(), text)
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read from stdin")?;
            ("<stdin>".to_string(), text)
        }
    };
    tracing::debug!(source = %source, bytes = text.len(), "read input");
    Ok(Input { source, text })
}

/// Write `content` to the file or stdout, ending it with a newline.
fn write_output(path: Option<&str>, mut content: String) -> Result<()> {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout"),
    }
}
