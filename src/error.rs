use std::path::PathBuf;

/// Anything that makes a schema document unusable. Raised by [`crate::parse`].
#[derive(Debug, thiserror::Error)]
pub enum SchemaParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Attribute decoding failed; `path` is the JSON path inside the schema object.
    #[error("at JSON path {path} → {message}")]
    Attribute { path: String, message: String },

    #[error("schema object has no `type` attribute")]
    MissingType,

    #[error("unsupported schema form: {0}")]
    UnsupportedForm(String),

    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("named type `{0}` is defined more than once")]
    Redefined(String),

    #[error("invalid name `{0}`")]
    InvalidName(String),

    #[error("record `{record}` declares field `{field}` more than once")]
    DuplicateField { record: String, field: String },

    #[error("unions may not immediately contain other unions")]
    NestedUnion,

    #[error("union contains `{0}` more than once")]
    DuplicateUnionMember(String),
}

/// Failures of the schema → document pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("{} does not exist.", path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse schema {}: {source}", path.display())]
    Parse { path: PathBuf, source: SchemaParseError },

    #[error("root schema must be a record, found `{found}`")]
    RootNotRecord { found: String },

    #[error("failed to write {}: {source}", path.display())]
    OutputWrite { path: PathBuf, source: std::io::Error },
}
