mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use menudef_core::{CompileOptions, DuplicateNamePolicy, compile, to_pretty_json};
use menudef_diagnostics::Diagnostic;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::render::{Format, print_summary, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "compilemenu",
    version,
    about = "Compile a menu definition file into Z80 assembly menu tables"
)]
struct Cli {
    /// Menu definition file (e.g. menudef.txt).
    filename: PathBuf,

    /// Output assembly file. Defaults to the input path with an `.asm`
    /// extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dump the parsed and the annotated menu tree as JSON to stderr.
    #[arg(long)]
    debug: bool,

    /// Which nodes may share a display name.
    #[arg(long, value_enum, default_value_t = DuplicateNames::SameKind)]
    duplicate_names: DuplicateNames,

    /// Diagnostic format: "pretty" for coloured source snippets on stderr,
    /// "json" for a JSON array on stdout. Defaults to "pretty" when stderr
    /// is a TTY, "json" otherwise.
    #[arg(long, value_parser = ["pretty", "json"])]
    error_format: Option<String>,
}

/// Duplicate display name policy.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DuplicateNames {
    /// Leaves of the same kind may share a name.
    SameKind,
    /// Any two leaves may share a name.
    AnyLeaf,
    /// Every name must be unique.
    Strict,
}

impl From<DuplicateNames> for DuplicateNamePolicy {
    fn from(d: DuplicateNames) -> Self {
        match d {
            DuplicateNames::SameKind => DuplicateNamePolicy::SameKindLeaves,
            DuplicateNames::AnyLeaf => DuplicateNamePolicy::AnyLeaves,
            DuplicateNames::Strict => DuplicateNamePolicy::Strict,
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    let format = Format::resolve_or_detect(cli.error_format.as_deref());

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.filename));
    cmd_compile(&cli, &output, format)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_compile(cli: &Cli, output: &Path, format: Format) -> Result<()> {
    let filename = cli.filename.display().to_string();

    info!("Reading {filename}");
    let source = read_source(&cli.filename)?;

    let options = CompileOptions {
        source_name: source_name(&cli.filename),
        duplicate_names: cli.duplicate_names.into(),
        snapshot_parsed: cli.debug,
    };

    let compilation = match compile(&source, &options) {
        Ok(c) => c,
        Err(err) => {
            let diagnostics = vec![Diagnostic::from(err)];
            render_diagnostics(&source, &filename, &diagnostics, format);
            if format == Format::Pretty {
                print_summary(&diagnostics);
            }
            process::exit(1);
        }
    };

    if !compilation.warnings.is_empty() {
        render_diagnostics(&source, &filename, &compilation.warnings, format);
    }

    if cli.debug {
        if let Some(parsed) = &compilation.parsed {
            eprintln!("==== Parsed menu tree");
            eprintln!("{}", to_pretty_json(parsed));
        }
        eprintln!("==== Annotated menu tree");
        eprintln!("{}", to_pretty_json(&compilation.file));
    }

    info!("Generating {}", output.display());
    write_output(output, &compilation.assembly)?;
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("failed to write '{}'", path.display()))
}

/// `menudef.txt` -> `menudef.asm`, keeping the directory.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("asm")
}

/// Name quoted in the generated header: the input's file name.
fn source_name(input: &Path) -> String {
    input
        .file_name()
        .map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned())
}
