use crate::schema::{Name, Schema};

/// Record types a declared field type denotes, directly or through one level
/// of array/map unwrapping, or through any union member.
///
/// Arrays of arrays, maps of unions and similar deeper wrappings are not
/// followed. An empty result means the type references no record.
pub fn extract(schema: &Schema) -> Vec<&Name> {
    match schema {
        Schema::Record(name) => vec![name],
        Schema::Array(items) => match items.as_ref() {
            Schema::Record(name) => vec![name],
            _ => Vec::new(),
        },
        Schema::Map(values) => match values.as_ref() {
            Schema::Record(name) => vec![name],
            _ => Vec::new(),
        },
        Schema::Union(members) => members.iter().flat_map(extract).collect(),
        _ => Vec::new(),
    }
}
