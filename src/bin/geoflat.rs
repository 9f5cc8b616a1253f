//! geoflat: Flatten GeoJSON feature properties into table rows
//!
//! Reads a FeatureCollection, tags every feature with a sequential id and
//! prints one JSON object per feature on stdout.
//!
//! Usage:
//!   # Read from file, output rows to stdout
//!   geoflat regions.geojson
//!
//!   # Read from stdin, every column on every row
//!   cat regions.geojson | geoflat --fill-missing
//!
//!   # Also keep the id-tagged collection for joining rows back to shapes
//!   geoflat regions.geojson --emit-document regions.tagged.geojson

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use geoflat::{FlattenConfig, Flattener, RowWriter, Table};
use log::debug;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

#[derive(Parser, Debug)]
#[command(name = "geoflat")]
#[command(about = "Flatten GeoJSON feature properties into table rows", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Key the sequential identifier is written under (default: "id")
    #[arg(long)]
    id_field: Option<String>,

    /// Identifier of the first feature (default: 0)
    #[arg(long)]
    start_id: Option<u64>,

    /// Only write the identifier into properties, not onto the feature itself
    #[arg(long)]
    no_tag_feature: bool,

    /// Emit every column on every row, null where a feature lacks it
    #[arg(long)]
    fill_missing: bool,

    /// Write the id-tagged GeoJSON document to this path
    #[arg(long, value_name = "PATH")]
    emit_document: Option<String>,

    /// Print the type summary of each column to stderr
    #[arg(long)]
    types: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Build config
    let mut config = FlattenConfig::default();
    if let Some(id_field) = args.id_field {
        config.id_field = id_field;
    }
    if let Some(start_id) = args.start_id {
        config.start_id = start_id;
    }
    config.tag_feature = !args.no_tag_feature;

    let reader = if let Some(file_path) = &args.input {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open input: {}", file_path))?;
        Box::new(BufReader::new(file)) as Box<dyn Read>
    } else {
        Box::new(std::io::stdin()) as Box<dyn Read>
    };

    let document = read_document(reader)?;
    let flattened = Flattener::new(config)
        .flatten(document)
        .context("Failed to flatten feature collection")?;

    if flattened.table.is_empty() {
        eprintln!("Warning: No features found in input");
    }

    let stdout = std::io::stdout();
    let mut writer = RowWriter::new(BufWriter::new(stdout.lock())).fill_missing(args.fill_missing);
    writer.write_table(&flattened.table)?;
    writer.flush()?;

    if args.types {
        print_column_types(&flattened.table)?;
    }

    if let Some(path) = args.emit_document {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create document output: {}", path))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &flattened.document)
            .context("Failed to serialize tagged document")?;
        out.flush().context("Failed to flush document output")?;
        debug!("wrote tagged document to {}", path);
    }

    Ok(())
}

/// Parse the whole input, SIMD-accelerated where possible
fn read_document(reader: Box<dyn Read>) -> Result<Value> {
    let mut content = Vec::new();
    let mut buf_reader = BufReader::new(reader);
    buf_reader
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    // simd-json parses in place, so keep the original bytes for the fallback
    let mut scratch = content.clone();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!("simd-json rejected input ({}), retrying with serde_json", e);
            serde_json::from_slice(&content).context("Failed to parse GeoJSON document")
        }
    }
}

fn print_column_types(table: &Table) -> Result<()> {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();

    for (name, summary) in table.column_types() {
        let types: Vec<&str> = summary.types.iter().map(|t| t.as_str()).collect();
        let label = if types.is_empty() {
            String::from("null")
        } else {
            types.join("|")
        };
        let mixed = if summary.is_mixed() { " (mixed)" } else { "" };
        writeln!(out, "{}: {}{}, {} null", name, label, mixed, summary.null_count)?;
    }
    Ok(())
}
