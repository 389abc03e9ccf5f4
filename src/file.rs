//! Structured config files: TOML, YAML and JSON.
//!
//! A file is never decoded straight into the destination. Its document is parsed
//! into a generic `serde_json::Value` tree, a scratch record `T::default()` is
//! filled from that tree using the source's tags as keys, and only then does the
//! [merge](crate::merge) copy the tagged fields across. Fields that carry no tag
//! for this format keep whatever an earlier source gave them.
//!
//! Lookups follow the tags strictly:
//!
//! - a leaf reads `tree[tag]` of the current table; a missing key leaves the
//!   scratch value at its default;
//! - a nested record descends into `tree[tag]` only when it has a tag for the
//!   format (a missing or non-table entry still descends, with nothing to read).
//!
//! Type mismatches between the document and the field (a string where an integer
//! is expected) are decode errors, and so is a document root or a tagged record
//! entry that is not a table. A record entry that is `null` counts as missing.
//! An empty document (or a YAML file holding only `null`) is skipped entirely
//! and leaves the destination untouched.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::field::{Cascade, FieldInfo, Leaf};
use crate::merge;
use crate::types::{SourceKind, Verbosity, note};
use crate::walk::{FieldPath, Visitor, walk};

/// Read `path`, decode it as `kind` and merge the tagged fields into `dest`.
pub(crate) fn cascade_file<T: Cascade + Default>(
    dest: &mut T,
    kind: SourceKind,
    path: &Path,
    verbosity: Verbosity,
) -> Result<(), SourceError> {
    let content = read(kind, path)?;
    if kind == SourceKind::Yaml && content.trim().is_empty() {
        note!(verbosity, path = %path.display(), "empty yaml file, nothing to merge");
        return Ok(());
    }
    let tree = decode(kind, &content)?;
    if tree.is_null() {
        note!(verbosity, kind = %kind, path = %path.display(), "null document, nothing to merge");
        return Ok(());
    }
    note!(verbosity, kind = %kind, path = %path.display(), "decoded config file");

    let mut scratch = T::default();
    populate(&mut scratch, &tree, kind, verbosity)?;
    merge::merge(dest, &mut scratch, kind, verbosity);
    Ok(())
}

pub(crate) fn read(kind: SourceKind, path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a document into a generic tree with the decoder for `kind`.
pub(crate) fn decode(kind: SourceKind, content: &str) -> Result<Value, SourceError> {
    let tree = match kind {
        SourceKind::Toml => toml::from_str(content)?,
        SourceKind::Yaml => serde_yaml::from_str(content)?,
        SourceKind::Json => serde_json::from_str(content)?,
        other => unreachable!("{other} is not a structured file format"),
    };
    Ok(tree)
}

/// Fill `scratch` from `tree`, keyed by each field's `kind` tag.
pub(crate) fn populate(
    scratch: &mut dyn Cascade,
    tree: &Value,
    kind: SourceKind,
    verbosity: Verbosity,
) -> Result<(), SourceError> {
    let Some(root) = tree.as_object() else {
        return Err(SourceError::NotATable {
            kind,
            field: String::new(),
            found: describe(tree),
        });
    };
    let mut visitor = DecodeVisitor {
        kind,
        verbosity,
        tables: vec![Some(root)],
    };
    walk(scratch, &mut visitor)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

struct DecodeVisitor<'a> {
    kind: SourceKind,
    verbosity: Verbosity,
    /// Table of each record on the current path; `None` where the document has none.
    tables: Vec<Option<&'a Map<String, Value>>>,
}

impl<'a> DecodeVisitor<'a> {
    fn current(&self) -> Option<&'a Map<String, Value>> {
        self.tables.last().copied().flatten()
    }
}

impl Visitor for DecodeVisitor<'_> {
    fn leaf(
        &mut self,
        path: &FieldPath,
        info: &FieldInfo,
        leaf: &mut dyn Leaf,
    ) -> Result<(), SourceError> {
        let Some(key) = info.tag(self.kind) else {
            return Ok(());
        };
        let Some(value) = self.current().and_then(|table| table.get(key)) else {
            note!(self.verbosity, field = %path, key, "key not found");
            return Ok(());
        };

        leaf.decode(value.clone())
            .map_err(|source| SourceError::Decode {
                kind: self.kind,
                field: path.to_string(),
                source,
            })
    }

    fn enter(&mut self, path: &FieldPath, info: &FieldInfo) -> Result<bool, SourceError> {
        let Some(key) = info.tag(self.kind) else {
            note!(self.verbosity, field = %path, "no {} tag, record skipped", self.kind);
            return Ok(false);
        };
        let table = match self.current().and_then(|table| table.get(key)) {
            None | Some(Value::Null) => None,
            Some(Value::Object(table)) => Some(table),
            Some(other) => {
                return Err(SourceError::NotATable {
                    kind: self.kind,
                    field: path.to_string(),
                    found: describe(other),
                });
            }
        };
        self.tables.push(table);
        Ok(true)
    }

    fn leave(&mut self, _path: &FieldPath, _info: &FieldInfo) {
        self.tables.pop();
    }
}
