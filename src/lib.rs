//! Flattened documentation for Avro-style schemas.
//!
//! [`parse`] turns schema text into a [`schema::SchemaDocument`], [`collect`]
//! finds every record type reachable from the root record (through arrays,
//! maps and unions, cycles included), and [`render`] lays each one out as a
//! table of field name, field type and documentation.
pub mod cli;
pub mod collect;
pub mod error;
pub mod extract;
pub mod logging;
pub mod output;
pub mod parse;
pub mod render;
pub mod schema;

pub use collect::{collect, collect_root, RecordSet};
pub use error::{DocsError, SchemaParseError};
pub use extract::extract;
pub use render::{render, Document, DocumentBlock, OutputFormat, Row};
pub use schema::{Field, Name, RecordSchema, Schema, SchemaDocument};

/// Schema text straight to a rendered document.
pub fn document_schema(src: &str, format: OutputFormat) -> Result<String, DocsError> {
    let document = parse::parse_str(src).map_err(|source| DocsError::Parse {
        path: "<inline>".into(),
        source,
    })?;
    let records = collect_root(&document)?;
    Ok(render(records).emit(format))
}
