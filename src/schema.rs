//! Parsed schema tree. Read-only once the parser hands it over.
//!
//! Named types (records, enums, fixed) appear in the tree as [`Name`] handles;
//! their definitions live once in [`SchemaDocument::named`]. That is what lets a
//! record refer to itself, or to a record that refers back to it, without the
//! tree owning a cycle.
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

// ————————————————————————————————————————————————————————————————————————————
// NAMES
// ————————————————————————————————————————————————————————————————————————————

/// Namespace-qualified name. Identity is the full name.
#[derive(Debug, Clone)]
pub struct Name {
    name: String,
    namespace: Option<String>,
    fullname: String,
}

impl Name {
    /// An empty namespace is the null namespace.
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        let name = name.into();
        let namespace = namespace.filter(|ns| !ns.is_empty()).map(str::to_owned);
        let fullname = match &namespace {
            Some(ns) => format!("{ns}.{name}"),
            None => name.clone(),
        };
        Self { name, namespace, fullname }
    }

    /// Splits a dotted full name at its last dot.
    pub fn from_fullname(fullname: &str) -> Self {
        match fullname.rsplit_once('.') {
            Some((ns, name)) => Self::new(name, Some(ns)),
            None => Self::new(fullname, None),
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn namespace(&self) -> Option<&str> { self.namespace.as_deref() }
    pub fn fullname(&self) -> &str { &self.fullname }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool { self.fullname == other.fullname }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) { self.fullname.hash(state) }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fullname)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE TREE
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Array(Box<Schema>),      // element type
    Map(Box<Schema>),        // value type; keys are always strings
    Union(Vec<Schema>),      // members in declared order
    Record(Name),
    Enum(Name),
    Fixed(Name),
    Logical {
        logical_type: String,
        base: Box<Schema>,
    },
}

impl Schema {
    pub fn primitive(type_name: &str) -> Option<Self> {
        Some(match type_name {
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "bytes" => Self::Bytes,
            "string" => Self::String,
            _ => return None,
        })
    }

    /// Key used to reject unions carrying the same kind twice. Named types are
    /// keyed by full name, everything else by its kind.
    pub(crate) fn union_key(&self) -> String {
        match self {
            Self::Record(name) | Self::Enum(name) | Self::Fixed(name) => name.fullname().to_owned(),
            Self::Array(_) => "array".into(),
            Self::Map(_) => "map".into(),
            Self::Union(_) => "union".into(),
            Self::Logical { base, .. } => base.union_key(),
            other => other.to_string(),
        }
    }
}

/// Canonical type rendering used in documentation tables.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean => f.write_str("boolean"),
            Self::Int => f.write_str("int"),
            Self::Long => f.write_str("long"),
            Self::Float => f.write_str("float"),
            Self::Double => f.write_str("double"),
            Self::Bytes => f.write_str("bytes"),
            Self::String => f.write_str("string"),
            Self::Array(items) => write!(f, "array<{items}>"),
            Self::Map(values) => write!(f, "map<{values}>"),
            Self::Union(members) => {
                f.write_str("union<")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{member}")?;
                }
                f.write_str(">")
            }
            Self::Record(name) | Self::Enum(name) | Self::Fixed(name) => write!(f, "{name}"),
            Self::Logical { logical_type, base } => write!(f, "{base} ({logical_type})"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    pub doc: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecordSchema {
    pub name: Name,
    pub doc: Option<String>,
    pub fields: Vec<Field>,  // declaration order
}

#[derive(Debug, Clone)]
pub struct EnumSchema {
    pub name: Name,
    pub doc: Option<String>,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FixedSchema {
    pub name: Name,
    pub doc: Option<String>,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub enum NamedSchema {
    Record(RecordSchema),
    Enum(EnumSchema),
    Fixed(FixedSchema),
}

impl NamedSchema {
    pub fn name(&self) -> &Name {
        match self {
            Self::Record(r) => &r.name,
            Self::Enum(e) => &e.name,
            Self::Fixed(x) => &x.name,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DOCUMENT
// ————————————————————————————————————————————————————————————————————————————

/// One parsed schema document: the root type plus every named definition,
/// keyed by full name in definition order.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    pub root: Schema,
    pub named: IndexMap<String, NamedSchema>,
}

impl SchemaDocument {
    pub fn record(&self, name: &Name) -> Option<&RecordSchema> {
        match self.named.get(name.fullname()) {
            Some(NamedSchema::Record(record)) => Some(record),
            _ => None,
        }
    }

    pub fn root_record(&self) -> Option<&RecordSchema> {
        match &self.root {
            Schema::Record(name) => self.record(name),
            _ => None,
        }
    }
}
