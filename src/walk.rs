//! Recursive traversal of a [`Cascade`] record.
//!
//! Every cascader is a [`Visitor`]; the walker owns the recursion and the dotted
//! path of the current field, visitors only decide what happens at each field.

use std::fmt;

use crate::error::SourceError;
use crate::field::{Cascade, FieldInfo, FieldMut, Leaf};

/// Per-field callbacks driven by [`walk`].
pub trait Visitor {
    /// Called for every leaf field.
    fn leaf(
        &mut self,
        path: &FieldPath,
        info: &FieldInfo,
        leaf: &mut dyn Leaf,
    ) -> Result<(), SourceError>;

    /// Called before descending into a nested record. Returning `false` skips it.
    fn enter(&mut self, _path: &FieldPath, _info: &FieldInfo) -> Result<bool, SourceError> {
        Ok(true)
    }

    /// Called after a nested record that [`enter`](Self::enter) accepted.
    fn leave(&mut self, _path: &FieldPath, _info: &FieldInfo) {}
}

/// Dotted path from the root record to the current field, e.g. `server.port`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldPath(Vec<&'static str>);

impl FieldPath {
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Visit every field of `record` in declaration order, recursing into nested
/// records the visitor accepts.
pub fn walk(record: &mut dyn Cascade, visitor: &mut dyn Visitor) -> Result<(), SourceError> {
    walk_at(record, visitor, &mut FieldPath::default())
}

fn walk_at(
    record: &mut dyn Cascade,
    visitor: &mut dyn Visitor,
    path: &mut FieldPath,
) -> Result<(), SourceError> {
    let fields = record.fields();

    for (index, info) in fields.iter().enumerate() {
        let Some(field) = record.field_mut(index) else {
            continue;
        };

        path.0.push(info.name);
        let result = match field {
            FieldMut::Leaf(leaf) => visitor.leaf(path, info, leaf),
            FieldMut::Nested(nested) => match visitor.enter(path, info) {
                Ok(true) => {
                    let result = walk_at(nested, visitor, path);
                    visitor.leave(path, info);
                    result
                }
                Ok(false) => Ok(()),
                Err(e) => Err(e),
            },
        };
        path.0.pop();
        result?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::Kind;
    use crate::fixtures::test::{Deep, ServerConfig};

    #[derive(Default)]
    struct Recorder {
        leaves: Vec<(String, Kind, bool)>,
        entered: Vec<String>,
        left: Vec<String>,
        skip: Option<&'static str>,
    }

    impl Visitor for Recorder {
        fn leaf(
            &mut self,
            path: &FieldPath,
            _info: &FieldInfo,
            leaf: &mut dyn Leaf,
        ) -> Result<(), SourceError> {
            self.leaves
                .push((path.to_string(), leaf.kind(), leaf.is_optional()));
            Ok(())
        }

        fn enter(&mut self, path: &FieldPath, info: &FieldInfo) -> Result<bool, SourceError> {
            self.entered.push(path.to_string());
            Ok(self.skip != Some(info.name))
        }

        fn leave(&mut self, path: &FieldPath, _info: &FieldInfo) {
            self.left.push(path.to_string());
        }
    }

    fn leaf_paths(recorder: &Recorder) -> Vec<&str> {
        recorder.leaves.iter().map(|(p, _, _)| p.as_str()).collect()
    }

    #[test]
    fn visits_in_declaration_order() {
        let mut config = ServerConfig::default();
        let mut recorder = Recorder::default();
        walk(&mut config, &mut recorder).unwrap();
        assert_eq!(
            leaf_paths(&recorder),
            ["token", "server.host", "server.port", "verbose"]
        );
        assert_eq!(recorder.entered, ["server"]);
        assert_eq!(recorder.left, ["server"]);
    }

    #[test]
    fn reports_kind_and_optional_shape() {
        let mut config = Deep::default();
        let mut recorder = Recorder::default();
        walk(&mut config, &mut recorder).unwrap();
        assert!(
            recorder
                .leaves
                .contains(&("name".to_string(), Kind::String, true))
        );
        assert!(
            recorder
                .leaves
                .contains(&("tags".to_string(), Kind::List, false))
        );
    }

    #[test]
    fn recurses_to_any_depth_and_materialises_optional_records() {
        let mut config = Deep::default();
        assert!(config.outer.is_none());
        let mut recorder = Recorder::default();
        walk(&mut config, &mut recorder).unwrap();
        assert!(config.outer.is_some());
        assert!(
            leaf_paths(&recorder).contains(&"outer.middle.inner.level")
        );
        assert_eq!(
            recorder.entered,
            ["outer", "outer.middle", "outer.middle.inner"]
        );
        assert_eq!(
            recorder.left,
            ["outer.middle.inner", "outer.middle", "outer"]
        );
    }

    #[test]
    fn refused_records_are_skipped() {
        let mut config = ServerConfig::default();
        let mut recorder = Recorder {
            skip: Some("server"),
            ..Recorder::default()
        };
        walk(&mut config, &mut recorder).unwrap();
        assert_eq!(leaf_paths(&recorder), ["token", "verbose"]);
        assert!(recorder.left.is_empty());
    }

    #[test]
    fn skipped_fields_are_not_visited() {
        let mut config = ServerConfig::default();
        let mut recorder = Recorder::default();
        walk(&mut config, &mut recorder).unwrap();
        assert!(!leaf_paths(&recorder).contains(&"internal"));
    }

    #[test]
    fn depth_counts_nesting() {
        let mut path = FieldPath::default();
        path.0.push("a");
        assert_eq!(path.depth(), 0);
        path.0.push("b");
        assert_eq!(path.depth(), 1);
        assert_eq!(path.to_string(), "a.b");
    }
}
