use clap::{ArgAction, Parser, Subcommand};
use flowmark_codegen::CompilerOutput;
use flowmark_parser::ParseError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowmark")]
#[command(about = "flowmark: diagram notation to Mermaid flowchart compiler")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a source file to a markdown file with a mermaid flowchart
    Build {
        /// Input source file
        path: PathBuf,

        /// Output file (defaults to the input name with a .md extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a source file for errors without generating output
    Check {
        /// Input source file
        path: PathBuf,
    },

    /// Compile a source file and print the markdown to stdout
    Print {
        /// Input source file
        path: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("reading {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("writing {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Build { path, output } => cmd_build(&path, output),
        Command::Check { path } => cmd_check(&path),
        Command::Print { path } => cmd_print(&path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn cmd_build(path: &Path, output: Option<PathBuf>) -> Result<(), CliError> {
    let compiled = compile_file(path)?;
    let out_path = output.unwrap_or_else(|| default_output_path(path));

    // Nothing is written unless the whole document compiled
    std::fs::write(&out_path, &compiled.document).map_err(|source| CliError::Write {
        path: out_path.clone(),
        source,
    })?;

    tracing::info!(output = %out_path.display(), "wrote flowchart");
    eprintln!("Built: {}", out_path.display());
    Ok(())
}

fn cmd_check(path: &Path) -> Result<(), CliError> {
    let compiled = compile_file(path)?;
    eprintln!("OK: {} ({} statements)", path.display(), compiled.lines.len());
    Ok(())
}

fn cmd_print(path: &Path) -> Result<(), CliError> {
    let compiled = compile_file(path)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(compiled.document.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|source| CliError::Write {
            path: PathBuf::from("<stdout>"),
            source,
        })
}

fn compile_file(path: &Path) -> Result<CompilerOutput, CliError> {
    let source = read_source(path)?;
    let lines = flowmark_lexer::source_lines(&source);
    tracing::info!(path = %path.display(), lines = lines.len(), "read source");

    let program = flowmark_parser::Parser::parse_lines(&lines).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(flowmark_codegen::compile(&program))
}

fn read_source(path: &Path) -> Result<String, CliError> {
    if !path.exists() {
        return Err(CliError::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// `<stem>.md` next to the input, or `<stem>.mermaid.md` when the input is
/// itself a `.md` file.
fn default_output_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == "md") {
        input.with_extension("mermaid.md")
    } else {
        input.with_extension("md")
    }
}
