//! Avro-style JSON schema text → [`SchemaDocument`].
//!
//! Only as much of the schema language as documentation needs: the full set of
//! type kinds, namespaces and name resolution, and the structural checks that
//! keep the type tree well formed. Defaults, aliases and sort orders are
//! accepted and ignored.
use std::collections::{HashMap, HashSet};
use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{DocsError, SchemaParseError};
use crate::schema::{EnumSchema, Field, FixedSchema, Name, NamedSchema, RecordSchema, Schema, SchemaDocument};

type Result<T> = std::result::Result<T, SchemaParseError>;

static NAME_COMPONENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("name pattern compiles")
});

// ————————————————————————————————————————————————————————————————————————————
// ENTRY POINTS
// ————————————————————————————————————————————————————————————————————————————

pub fn parse_str(src: &str) -> Result<SchemaDocument> {
    let value = serde_json::from_str::<Value>(src)?;
    parse_value(value)
}

pub fn parse_value(value: Value) -> Result<SchemaDocument> {
    let mut parser = Parser::default();
    let root = parser.parse(value, None)?;
    Ok(parser.finish(root))
}

/// Reads and parses one schema file.
pub fn parse_file(path: &Path) -> std::result::Result<SchemaDocument, DocsError> {
    let src = std::fs::read_to_string(path).map_err(|source| DocsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_str(&src).map_err(|source| DocsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        named_types = document.named.len(),
        "parsed schema document"
    );
    Ok(document)
}

// ————————————————————————————————————————————————————————————————————————————
// RAW ATTRIBUTE SHAPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Deserialize)]
struct RawRecord {
    name: String,
    namespace: Option<String>,
    doc: Option<String>,
    fields: Vec<RawField>,
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: Value,
    doc: Option<String>,
}

#[derive(Deserialize)]
struct RawEnum {
    name: String,
    namespace: Option<String>,
    doc: Option<String>,
    symbols: Vec<String>,
}

#[derive(Deserialize)]
struct RawFixed {
    name: String,
    namespace: Option<String>,
    doc: Option<String>,
    size: u64,
}

#[derive(Deserialize)]
struct RawArray {
    items: Value,
}

#[derive(Deserialize)]
struct RawMap {
    values: Value,
}

/// Deserialize with JSON-path context in error messages.
fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| SchemaParseError::Attribute {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

// ————————————————————————————————————————————————————————————————————————————
// PARSER
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy)]
enum Kind {
    Record,
    Enum,
    Fixed,
}

#[derive(Default)]
struct Parser {
    /// Every named type by full name, in declaration order.
    declared: IndexMap<String, Kind>,
    /// Completed definitions. A record is declared before its fields are
    /// parsed but only defined once they all are.
    defined: HashMap<String, NamedSchema>,
}

impl Parser {
    fn parse(&mut self, value: Value, enclosing_ns: Option<&str>) -> Result<Schema> {
        match value {
            Value::String(type_name) => self.resolve(&type_name, enclosing_ns),
            Value::Array(members) => self.parse_union(members, enclosing_ns),
            Value::Object(map) => self.parse_object(map, enclosing_ns),
            other => Err(SchemaParseError::UnsupportedForm(other.to_string())),
        }
    }

    fn parse_object(&mut self, mut map: Map<String, Value>, enclosing_ns: Option<&str>) -> Result<Schema> {
        let type_name = match map.remove("type") {
            None => return Err(SchemaParseError::MissingType),
            Some(Value::String(type_name)) => type_name,
            // `{"type": {...}}` and `{"type": [...]}` wrap a nested schema
            Some(nested) => return self.parse(nested, enclosing_ns),
        };
        let logical_type = match map.get("logicalType") {
            Some(Value::String(logical)) => Some(logical.clone()),
            _ => None,
        };

        let base = match type_name.as_str() {
            "record" | "error" => return self.parse_record(map, enclosing_ns),
            "enum" => return self.parse_enum(map, enclosing_ns),
            "array" => {
                let raw: RawArray = from_value_with_path(Value::Object(map))?;
                return Ok(Schema::Array(Box::new(self.parse(raw.items, enclosing_ns)?)));
            }
            "map" => {
                let raw: RawMap = from_value_with_path(Value::Object(map))?;
                return Ok(Schema::Map(Box::new(self.parse(raw.values, enclosing_ns)?)));
            }
            "fixed" => self.parse_fixed(map, enclosing_ns)?,
            other => self.resolve(other, enclosing_ns)?,
        };

        Ok(match (logical_type, base) {
            (Some(logical_type), base @ (Schema::Fixed(_) | Schema::Int | Schema::Long | Schema::Bytes | Schema::String)) => {
                Schema::Logical { logical_type, base: Box::new(base) }
            }
            (_, base) => base,
        })
    }

    fn parse_union(&mut self, members: Vec<Value>, enclosing_ns: Option<&str>) -> Result<Schema> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(members.len());
        for member in members {
            let member = self.parse(member, enclosing_ns)?;
            if matches!(member, Schema::Union(_)) {
                return Err(SchemaParseError::NestedUnion);
            }
            let key = member.union_key();
            if !seen.insert(key.clone()) {
                return Err(SchemaParseError::DuplicateUnionMember(key));
            }
            out.push(member);
        }
        Ok(Schema::Union(out))
    }

    fn parse_record(&mut self, map: Map<String, Value>, enclosing_ns: Option<&str>) -> Result<Schema> {
        let raw: RawRecord = from_value_with_path(Value::Object(map))?;
        let name = qualify(&raw.name, raw.namespace.as_deref(), enclosing_ns)?;
        self.declare(&name, Kind::Record)?;

        let mut field_names = HashSet::new();
        let mut fields = Vec::with_capacity(raw.fields.len());
        for raw_field in raw.fields {
            validate_component(&raw_field.name)?;
            if !field_names.insert(raw_field.name.clone()) {
                return Err(SchemaParseError::DuplicateField {
                    record: name.fullname().to_owned(),
                    field: raw_field.name,
                });
            }
            // nested named types inherit the record's namespace
            let schema = self.parse(raw_field.ty, name.namespace())?;
            fields.push(Field { name: raw_field.name, schema, doc: raw_field.doc });
        }

        self.define(NamedSchema::Record(RecordSchema { name: name.clone(), doc: raw.doc, fields }));
        Ok(Schema::Record(name))
    }

    fn parse_enum(&mut self, map: Map<String, Value>, enclosing_ns: Option<&str>) -> Result<Schema> {
        let raw: RawEnum = from_value_with_path(Value::Object(map))?;
        let name = qualify(&raw.name, raw.namespace.as_deref(), enclosing_ns)?;
        for symbol in &raw.symbols {
            validate_component(symbol)?;
        }
        self.declare(&name, Kind::Enum)?;
        self.define(NamedSchema::Enum(EnumSchema { name: name.clone(), doc: raw.doc, symbols: raw.symbols }));
        Ok(Schema::Enum(name))
    }

    fn parse_fixed(&mut self, map: Map<String, Value>, enclosing_ns: Option<&str>) -> Result<Schema> {
        let raw: RawFixed = from_value_with_path(Value::Object(map))?;
        let name = qualify(&raw.name, raw.namespace.as_deref(), enclosing_ns)?;
        self.declare(&name, Kind::Fixed)?;
        self.define(NamedSchema::Fixed(FixedSchema { name: name.clone(), doc: raw.doc, size: raw.size }));
        Ok(Schema::Fixed(name))
    }

    /// Primitive name, or a reference to a type declared earlier in the document.
    fn resolve(&self, type_name: &str, enclosing_ns: Option<&str>) -> Result<Schema> {
        if let Some(primitive) = Schema::primitive(type_name) {
            return Ok(primitive);
        }
        let qualified = match enclosing_ns {
            Some(ns) if !type_name.contains('.') => Some(format!("{ns}.{type_name}")),
            _ => None,
        };
        for candidate in qualified.as_deref().into_iter().chain([type_name]) {
            if let Some(kind) = self.declared.get(candidate) {
                let name = Name::from_fullname(candidate);
                return Ok(match kind {
                    Kind::Record => Schema::Record(name),
                    Kind::Enum => Schema::Enum(name),
                    Kind::Fixed => Schema::Fixed(name),
                });
            }
        }
        Err(SchemaParseError::UnknownType(type_name.to_owned()))
    }

    fn declare(&mut self, name: &Name, kind: Kind) -> Result<()> {
        if self.declared.contains_key(name.fullname()) {
            return Err(SchemaParseError::Redefined(name.fullname().to_owned()));
        }
        tracing::trace!(name = %name, ?kind, "declared named type");
        self.declared.insert(name.fullname().to_owned(), kind);
        Ok(())
    }

    fn define(&mut self, named: NamedSchema) {
        self.defined.insert(named.name().fullname().to_owned(), named);
    }

    fn finish(mut self, root: Schema) -> SchemaDocument {
        let named = self.declared
            .into_keys()
            .filter_map(|fullname| self.defined.remove(&fullname).map(|def| (fullname, def)))
            .collect();
        SchemaDocument { root, named }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// A dotted name is already a full name; otherwise the explicit namespace wins
/// over the enclosing one.
fn qualify(raw_name: &str, namespace: Option<&str>, enclosing_ns: Option<&str>) -> Result<Name> {
    let name = if raw_name.contains('.') {
        Name::from_fullname(raw_name)
    } else {
        Name::new(raw_name, namespace.or(enclosing_ns))
    };
    for component in name.fullname().split('.') {
        validate_component(component)
            .map_err(|_| SchemaParseError::InvalidName(name.fullname().to_owned()))?;
    }
    Ok(name)
}

fn validate_component(component: &str) -> Result<()> {
    if NAME_COMPONENT.is_match(component) {
        Ok(())
    } else {
        Err(SchemaParseError::InvalidName(component.to_owned()))
    }
}
