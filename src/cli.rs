//! Minimal CLI: schema → record tables → document file
use std::path::PathBuf;
use clap::Parser;
use colored::Colorize;

use crate::error::DocsError;
use crate::render::OutputFormat;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// document every record type reachable from an Avro schema as a field table
#[derive(Parser, Debug)]
#[command(name = "avro-docs", version)]
pub struct CommandLineInterface {
    /// Avro schema file (.avsc)
    #[arg(short, long)]
    schema: PathBuf,

    /// output path prefix; the format suffix (.html / .md) is appended
    #[arg(short, long)]
    output: PathBuf,

    /// document format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// more diagnostics on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// only print errors
    #[arg(short, long)]
    quiet: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: Vec<String>,
    pub output: PathBuf,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_logging(&self) {
        crate::logging::init(self.verbose, self.quiet);
    }

    /// Nothing is written unless every earlier step succeeded.
    pub fn run(&self) -> Result<Option<RunSummary>, DocsError> {
        // debug path
        if self.no_op {
            eprintln!("{self:#?}");
            return Ok(None)
        }

        // 1) input must exist before anything else happens
        if !self.schema.exists() {
            return Err(DocsError::InputNotFound { path: self.schema.clone() });
        }

        // 2) parse & discover
        let document = crate::parse::parse_file(&self.schema)?;
        let records = crate::collect::collect_root(&document)?;
        tracing::info!(schema = %self.schema.display(), records = records.len(), "collected record schemas");
        if !self.quiet {
            println!("{}", format!("Extracted {} record schemas.", records.len()).green());
        }
        let names: Vec<String> = records.names().map(str::to_owned).collect();

        // 3) render & write
        let body = crate::render::render(records).emit(self.format);
        let output = crate::output::output_path(&self.output, self.format);
        crate::output::write_document(&output, &body)?;
        tracing::info!(output = %output.display(), "wrote documentation");

        Ok(Some(RunSummary { records: names, output }))
    }
}
