#![forbid(unsafe_code)]

//! CGDL CLI - read, validate and stream CGDL documents.
//!
//! # Commands
//!
//! - `read`: Read a document and print the resulting graph snapshot as JSON
//! - `validate`: Read a document and report diagnostics
//! - `stream`: Feed stdin line by line and print one outcome record per line

use std::borrow::Cow;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use cgdl_core::{DiagnosticLevel, NodeKey, ReaderOptions, parse_reader_options_value};
use cgdl_reader::{ReadResult, Reader, read_summary_json, read_text};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// CGDL CLI - read, validate and stream CGDL documents.
#[derive(Debug, Parser)]
#[command(
    name = "cgdl-cli",
    version,
    about = "CGDL CLI - read, validate and stream CGDL documents",
    long_about = "Incremental reader for the CGDL line format.\n\n\
        Lines build a graph of classes, nodes, properties and outgoing edges;\n\
        malformed lines become diagnostics instead of aborting the read."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Reader options as a JSON object (camelCase keys)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging (can be repeated for more detail: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read a document and print the graph snapshot as JSON.
    Read {
        /// Input file path or "-" for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Print only node/edge/diagnostic counts
        #[arg(long)]
        summary: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Read a document and report diagnostics.
    Validate {
        /// Input file path or "-" for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Output as JSON (structured diagnostics)
        #[arg(long)]
        json: bool,

        /// Exit with non-zero status on warnings (not just errors)
        #[arg(long)]
        strict_warnings: bool,
    },

    /// Read stdin line by line, printing one JSON outcome record per line.
    Stream,
}

#[derive(Debug, Serialize)]
struct ValidateResult {
    valid: bool,
    node_count: usize,
    edge_count: usize,
    warnings: Vec<DiagnosticRecord>,
    errors: Vec<DiagnosticRecord>,
}

#[derive(Debug, Serialize)]
struct DiagnosticRecord {
    line: usize,
    code: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct StreamRecord<'a> {
    line: usize,
    outcome: &'static str,
    node: Option<&'a str>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let options = load_options(cli.config.as_deref())?;

    match cli.command {
        Command::Read {
            input,
            summary,
            pretty,
        } => cmd_read(&input, &options, summary, pretty),

        Command::Validate {
            input,
            json,
            strict_warnings,
        } => cmd_validate(&input, &options, json, strict_warnings),

        Command::Stream => cmd_stream(options),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

// Invalid UTF-8 is replaced with U+FFFD rather than failing the read.
fn load_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    } else if Path::new(input).exists() {
        let bytes = std::fs::read(input).context(format!("Failed to read file: {input}"))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    } else {
        // Treat as inline document text
        Ok(input.to_string())
    }
}

fn load_options(config: Option<&str>) -> Result<ReaderOptions> {
    let Some(path) = config else {
        return Ok(ReaderOptions::default());
    };

    let raw = std::fs::read_to_string(path).context(format!("Failed to read config: {path}"))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).context(format!("Config is not valid JSON: {path}"))?;
    let parsed = parse_reader_options_value(&value);

    for message in &parsed.warnings {
        warn!("Config warning: {message}");
    }
    for error in &parsed.errors {
        warn!(
            field = %error.field,
            value = %error.value,
            "Config error, default kept: {}",
            error.message
        );
    }
    debug!(options = ?parsed.options, "reader options loaded");

    Ok(parsed.options)
}

fn read_document(input: &str, options: &ReaderOptions) -> Result<ReadResult> {
    let source = load_input(input)?;
    let result = read_text(&source, options);
    info!(
        lines = result.outcomes.len(),
        nodes = result.graph.len(),
        edges = result.graph.edge_count(),
        "document read"
    );
    Ok(result)
}

// =============================================================================
// Command: read
// =============================================================================

fn cmd_read(input: &str, options: &ReaderOptions, summary: bool, pretty: bool) -> Result<()> {
    let result = read_document(input, options)?;

    let output = if summary {
        if pretty {
            let value: serde_json::Value = serde_json::from_str(&read_summary_json(&result))?;
            serde_json::to_string_pretty(&value)?
        } else {
            read_summary_json(&result)
        }
    } else if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    println!("{output}");

    for (level, entry) in result.diagnostics.iter() {
        match level {
            DiagnosticLevel::Warning => warn!("line {}: {}", entry.line_number, entry.message),
            DiagnosticLevel::Error => error!("line {}: {}", entry.line_number, entry.message),
        }
    }

    Ok(())
}

// =============================================================================
// Command: validate
// =============================================================================

fn cmd_validate(
    input: &str,
    options: &ReaderOptions,
    json_output: bool,
    strict_warnings: bool,
) -> Result<()> {
    let read = read_document(input, options)?;
    let diagnostics = &read.diagnostics;

    let to_records = |entries: &[cgdl_core::DiagnosticEntry]| -> Vec<DiagnosticRecord> {
        entries
            .iter()
            .map(|entry| DiagnosticRecord {
                line: entry.line_number,
                code: entry.code.as_str(),
                message: entry.message.clone(),
            })
            .collect()
    };

    let valid = !diagnostics.has_errors() && (!strict_warnings || !diagnostics.has_warnings());

    let result = ValidateResult {
        valid,
        node_count: read.graph.len(),
        edge_count: read.graph.edge_count(),
        warnings: to_records(&diagnostics.warnings),
        errors: to_records(&diagnostics.errors),
    };

    if json_output {
        let output = serde_json::to_string_pretty(&result)?;
        println!("{output}");
    } else {
        if result.valid {
            println!("✓ Valid CGDL document");
        } else {
            println!("✗ Invalid CGDL document");
        }

        println!("  Nodes: {}", result.node_count);
        println!("  Edges: {}", result.edge_count);

        if !result.errors.is_empty() {
            println!("\nErrors:");
            for err in &result.errors {
                println!("  [{}] {} (line {})", err.code, err.message, err.line);
            }
        }

        if !result.warnings.is_empty() {
            println!("\nWarnings:");
            for warn in &result.warnings {
                println!("  [{}] {} (line {})", warn.code, warn.message, warn.line);
            }
        }
    }

    if !result.valid {
        std::process::exit(1);
    }

    Ok(())
}

// =============================================================================
// Command: stream
// =============================================================================

fn cmd_stream(options: ReaderOptions) -> Result<()> {
    let mut reader = Reader::new(options);
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        let read = stdin
            .read_until(b'\n', &mut buffer)
            .context("Failed to read from stdin")?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let decoded = String::from_utf8_lossy(&buffer);
        if let Cow::Owned(_) = decoded {
            debug!(line_number, "invalid UTF-8 replaced");
        }
        let line = decoded.trim_end_matches(['\n', '\r']);

        let before = reader.diagnostics().counts();
        let outcome = reader.feed_numbered(line, line_number);
        let record = StreamRecord {
            line: line_number,
            outcome: outcome.as_str(),
            node: reader.state().current_node_key().map(NodeKey::as_str),
        };
        serde_json::to_writer(&mut stdout, &record)?;
        writeln!(stdout)?;
        stdout.flush()?;

        let diagnostics = reader.diagnostics();
        for entry in &diagnostics.warnings[before.warnings..] {
            warn!("line {}: {}", entry.line_number, entry.message);
        }
        for entry in &diagnostics.errors[before.errors..] {
            error!("line {}: {}", entry.line_number, entry.message);
        }
    }

    let result = reader.finish();
    info!(
        lines = result.outcomes.len(),
        nodes = result.graph.len(),
        warnings = result.diagnostics.counts().warnings,
        errors = result.diagnostics.counts().errors,
        "stream finished"
    );

    Ok(())
}
