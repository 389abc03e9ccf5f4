use crate::field::{Cascade, FieldMut};
use crate::types::{SourceKind, Verbosity, note};

/// Copy every field tagged for `kind` from `scratch` onto `dest`.
///
/// Nested records recurse when tagged; leaves are overwritten unconditionally,
/// which is what lets a later file win over an earlier one. Untagged fields are
/// left alone, so an earlier source's value survives a file that has no say in it.
pub fn merge(
    dest: &mut dyn Cascade,
    scratch: &mut dyn Cascade,
    kind: SourceKind,
    verbosity: Verbosity,
) {
    merge_at(dest, scratch, kind, verbosity, "");
}

fn merge_at(
    dest: &mut dyn Cascade,
    scratch: &mut dyn Cascade,
    kind: SourceKind,
    verbosity: Verbosity,
    prefix: &str,
) {
    for (index, info) in dest.fields().iter().enumerate() {
        if info.tag(kind).is_none() {
            continue;
        }
        let path = if prefix.is_empty() {
            info.name.to_string()
        } else {
            format!("{prefix}.{}", info.name)
        };

        match (dest.field_mut(index), scratch.field_mut(index)) {
            (Some(FieldMut::Leaf(to)), Some(FieldMut::Leaf(from))) => {
                to.copy_from(&*from);
                note!(verbosity, field = %path, "merged from {kind}");
            }
            (Some(FieldMut::Nested(to)), Some(FieldMut::Nested(from))) => {
                merge_at(to, from, kind, verbosity, &path);
            }
            _ => {}
        }
    }
}
