//! Reachable-record discovery.
//!
//! Records are reported in the order a depth-first, field-declaration-order
//! walk first meets them. A record is marked as seen the moment it is found,
//! before anything reachable from it is explored, so cycles of any length
//! (self references included) visit each record exactly once.
//!
//! The walk keeps an explicit stack of reference cursors, one per record being
//! explored, instead of recursing; deeply chained schemas cost heap, not call
//! stack.
use std::vec;

use indexmap::IndexMap;

use crate::error::DocsError;
use crate::extract::extract;
use crate::schema::{Name, RecordSchema, SchemaDocument};

/// Distinct records in discovery order, keyed by full name.
#[derive(Debug, Default, Clone)]
pub struct RecordSet<'a> {
    records: IndexMap<&'a str, &'a RecordSchema>,
}

impl<'a> RecordSet<'a> {
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn contains(&self, fullname: &str) -> bool {
        self.records.contains_key(fullname)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a RecordSchema> + '_ {
        self.records.values().copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.records.keys().copied()
    }

    /// Returns false if a record with the same full name is already present.
    fn insert(&mut self, record: &'a RecordSchema) -> bool {
        self.records.insert(record.name.fullname(), record).is_none()
    }
}

impl<'a> IntoIterator for RecordSet<'a> {
    type Item = &'a RecordSchema;
    type IntoIter = indexmap::map::IntoValues<&'a str, &'a RecordSchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_values()
    }
}

/// Every record reachable from `root`'s fields. `root` itself is included only
/// when some reachable field refers back to it.
pub fn collect<'a>(document: &'a SchemaDocument, root: &'a RecordSchema) -> RecordSet<'a> {
    let mut found = RecordSet::default();
    let mut stack: Vec<vec::IntoIter<&'a Name>> = vec![references(root).into_iter()];

    while let Some(cursor) = stack.last_mut() {
        let Some(name) = cursor.next() else {
            stack.pop();
            continue;
        };
        if found.contains(name.fullname()) {
            continue;
        }
        let Some(record) = document.record(name) else {
            tracing::warn!(record = %name, "reference to undefined record skipped");
            continue;
        };
        found.insert(record);
        tracing::debug!(record = %name, depth = stack.len(), "discovered record");
        stack.push(references(record).into_iter());
    }

    found
}

/// [`collect`] starting from the document's root, which must be a record.
pub fn collect_root(document: &SchemaDocument) -> Result<RecordSet<'_>, DocsError> {
    let root = document.root_record().ok_or_else(|| DocsError::RootNotRecord {
        found: document.root.to_string(),
    })?;
    Ok(collect(document, root))
}

/// Referenced records of every field, flattened in declaration order.
fn references(record: &RecordSchema) -> Vec<&Name> {
    record.fields.iter().flat_map(|field| extract(&field.schema)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, NamedSchema, Schema};

    fn rec(name: &str) -> Schema {
        Schema::Record(Name::new(name, None))
    }

    fn array(items: Schema) -> Schema {
        Schema::Array(Box::new(items))
    }

    /// Builds a document whose root is the first record listed.
    fn document(records: Vec<(&str, Vec<(&str, Schema)>)>) -> SchemaDocument {
        let root = rec(records[0].0);
        let named = records
            .into_iter()
            .map(|(name, fields)| {
                let record = RecordSchema {
                    name: Name::new(name, None),
                    doc: None,
                    fields: fields
                        .into_iter()
                        .map(|(field, schema)| Field { name: field.into(), schema, doc: None })
                        .collect(),
                };
                (name.to_owned(), NamedSchema::Record(record))
            })
            .collect();
        SchemaDocument { root, named }
    }

    fn discovered(document: &SchemaDocument) -> Vec<&str> {
        collect_root(document).unwrap().names().collect()
    }

    #[test]
    fn order_example_discovers_depth_first() {
        let doc = document(vec![
            ("Order", vec![("customer", rec("Customer")), ("items", array(rec("LineItem")))]),
            ("Customer", vec![("email", Schema::String)]),
            ("LineItem", vec![("product", rec("Product")), ("quantity", Schema::Int)]),
            ("Product", vec![("sku", Schema::String)]),
        ]);
        assert_eq!(discovered(&doc), ["Customer", "LineItem", "Product"]);
    }

    #[test]
    fn self_reference_terminates_with_one_entry() {
        let doc = document(vec![("A", vec![("children", array(rec("A")))])]);
        assert_eq!(discovered(&doc), ["A"]);
    }

    #[test]
    fn mutual_cycle_visits_each_once() {
        let doc = document(vec![
            ("A", vec![("b", rec("B"))]),
            ("B", vec![("a", rec("A")), ("again", rec("B"))]),
        ]);
        // root A is reported where the walk first comes back to it
        assert_eq!(discovered(&doc), ["B", "A"]);
    }

    #[test]
    fn root_without_back_reference_is_excluded() {
        let doc = document(vec![
            ("Root", vec![("x", Schema::Long), ("leaf", rec("Leaf"))]),
            ("Leaf", vec![]),
        ]);
        assert_eq!(discovered(&doc), ["Leaf"]);
    }

    #[test]
    fn nullable_union_reference_counted_once() {
        let doc = document(vec![
            ("A", vec![
                ("maybe_b", Schema::Union(vec![Schema::Null, rec("B")])),
                ("b_by_key", Schema::Map(Box::new(rec("B")))),
            ]),
            ("B", vec![]),
        ]);
        assert_eq!(discovered(&doc), ["B"]);
    }

    #[test]
    fn subtree_explored_before_next_field() {
        let doc = document(vec![
            ("Root", vec![("first", rec("X")), ("second", rec("Z"))]),
            ("X", vec![("y", rec("Y"))]),
            ("Y", vec![("z", rec("Z"))]),
            ("Z", vec![("x", rec("X"))]),
        ]);
        assert_eq!(discovered(&doc), ["X", "Y", "Z"]);
    }

    #[test]
    fn repeated_collection_is_identical() {
        let doc = document(vec![
            ("A", vec![("b", rec("B")), ("c", Schema::Union(vec![rec("C"), rec("B")]))]),
            ("B", vec![("c", array(rec("C"))), ("a", rec("A"))]),
            ("C", vec![("b", rec("B"))]),
        ]);
        let first = discovered(&doc);
        for _ in 0..5 {
            assert_eq!(discovered(&doc), first);
        }
        assert_eq!(first, ["B", "C", "A"]);
    }

    #[test]
    fn long_chains_do_not_recurse() {
        const LEN: usize = 50_000;
        let names: Vec<String> = (0..LEN).map(|i| format!("R{i}")).collect();
        let doc = document(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let next = &names[(i + 1) % LEN];
                    (name.as_str(), vec![("next", rec(next))])
                })
                .collect(),
        );
        let found = collect_root(&doc).unwrap();
        assert_eq!(found.len(), LEN);
        assert_eq!(found.names().next(), Some("R1"));
        assert_eq!(found.names().last(), Some("R0"));
    }

    #[test]
    fn no_duplicates_across_dense_graph() {
        let names: Vec<String> = (0..12).map(|i| format!("N{i}")).collect();
        let doc = document(
            names
                .iter()
                .map(|name| {
                    let fields = names
                        .iter()
                        .map(|target| ("f", Schema::Union(vec![Schema::Null, rec(target)])))
                        .collect();
                    (name.as_str(), fields)
                })
                .collect(),
        );
        let found = collect_root(&doc).unwrap();
        let mut seen = std::collections::HashSet::new();
        assert!(found.names().all(|name| seen.insert(name)));
        assert_eq!(found.len(), names.len());
    }

    #[test]
    fn dangling_reference_is_skipped() {
        let doc = document(vec![("A", vec![("ghost", rec("Ghost")), ("b", rec("B"))]), ("B", vec![])]);
        assert_eq!(discovered(&doc), ["B"]);
    }

    #[test]
    fn non_record_root_is_an_error() {
        let doc = SchemaDocument { root: Schema::Array(Box::new(Schema::Int)), named: IndexMap::new() };
        let err = collect_root(&doc).unwrap_err();
        assert!(matches!(err, DocsError::RootNotRecord { found } if found == "array<int>"));
    }
}
