//! Record list → documentation tables.
use std::fmt::Write as _;

use crate::schema::RecordSchema;

pub const COLUMN_LABELS: [&str; 3] = ["Field Name", "Field Type", "Documentation"];
pub const MISSING_DOC: &str = "None provided.";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Html,
    Markdown,
}

impl OutputFormat {
    /// File suffix appended to the output prefix.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub type_name: String,
    pub documentation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBlock {
    pub heading: String,
    pub description: Option<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<DocumentBlock>,
}

// ————————————————————————————————————————————————————————————————————————————
// BUILD
// ————————————————————————————————————————————————————————————————————————————

/// One block per record, in the given order; rows follow field declaration order.
pub fn render<'a>(records: impl IntoIterator<Item = &'a RecordSchema>) -> Document {
    Document { blocks: records.into_iter().map(DocumentBlock::from_record).collect() }
}

impl DocumentBlock {
    pub fn from_record(record: &RecordSchema) -> Self {
        let rows = record.fields.iter().map(|field| Row {
            name: field.name.clone(),
            type_name: field.schema.to_string(),
            documentation: field.doc.clone().unwrap_or_else(|| MISSING_DOC.to_owned()),
        }).collect();
        Self {
            heading: record.name.fullname().to_owned(),
            description: record.doc.clone(),
            rows,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// EMIT
// ————————————————————————————————————————————————————————————————————————————

impl Document {
    pub fn emit(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Html => self.to_html(),
            OutputFormat::Markdown => self.to_markdown(),
        }
    }

    /// Indented HTML page; each block is a `<div>` with a heading and a table.
    pub fn to_html(&self) -> String {
        let mut out = HtmlWriter::default();
        out.open("html");
        out.open("body");
        for block in &self.blocks {
            out.open("div");
            out.leaf("h3", &block.heading);
            if let Some(description) = &block.description {
                out.leaf("p", description);
            }
            out.open("table");
            out.open("tbody");
            out.open("tr");
            for label in COLUMN_LABELS {
                out.leaf("th", label);
            }
            out.close("tr");
            for row in &block.rows {
                out.open("tr");
                out.leaf("td", &row.name);
                out.leaf("td", &row.type_name);
                out.leaf("td", &row.documentation);
                out.close("tr");
            }
            out.close("tbody");
            out.close("table");
            out.void("br");
            out.void("br");
            out.close("div");
        }
        out.close("body");
        out.close("html");
        out.into_string()
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 { out.push('\n'); }
            let _ = writeln!(out, "### {}\n", block.heading);
            if let Some(description) = &block.description {
                let _ = writeln!(out, "{}\n", description.trim());
            }
            let _ = writeln!(out, "| {} |", COLUMN_LABELS.join(" | "));
            out.push_str("| --- | --- | --- |\n");
            for row in &block.rows {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} |",
                    escape_cell(&row.name),
                    escape_cell(&row.type_name),
                    escape_cell(&row.documentation),
                );
            }
        }
        out
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Default)]
struct HtmlWriter {
    out: String,
    depth: usize,
}

impl HtmlWriter {
    fn indent(&mut self) {
        for _ in 0..self.depth { self.out.push_str("    "); }
    }
    fn open(&mut self, tag: &str) {
        self.indent();
        let _ = writeln!(self.out, "<{tag}>");
        self.depth += 1;
    }
    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        let _ = writeln!(self.out, "</{tag}>");
    }
    fn leaf(&mut self, tag: &str, text: &str) {
        self.indent();
        let _ = writeln!(self.out, "<{tag}>{}</{tag}>", escape_html(text));
    }
    fn void(&mut self, tag: &str) {
        self.indent();
        let _ = writeln!(self.out, "<{tag}>");
    }
    fn into_string(self) -> String { self.out }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

// pipes would split the cell; newlines would end the row
fn escape_cell(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ").replace('|', "\\|")
}
