use crate::coerce::Style;
use crate::error::{ConversionError, SourceError};
use crate::field::{Cascade, FieldInfo, Leaf};
use crate::types::{SourceKind, Verbosity, note};
use crate::walk::{FieldPath, Visitor, walk};

/// Fill every field that is still at its zero value from its `default` literal.
///
/// Runs after all other sources, so a non-zero field always means some source
/// set it and the literal must not apply.
pub(crate) fn cascade_defaults(
    dest: &mut dyn Cascade,
    verbosity: Verbosity,
) -> Result<(), SourceError> {
    walk(dest, &mut DefaultVisitor { verbosity })
}

struct DefaultVisitor {
    verbosity: Verbosity,
}

impl Visitor for DefaultVisitor {
    fn leaf(
        &mut self,
        path: &FieldPath,
        info: &FieldInfo,
        leaf: &mut dyn Leaf,
    ) -> Result<(), SourceError> {
        if !leaf.is_zero() {
            return Ok(());
        }
        let Some(literal) = info.tag(SourceKind::Default) else {
            return Ok(());
        };

        leaf.assign(literal, Style::Plain)
            .map_err(|source| ConversionError {
                field: path.to_string(),
                value: literal.to_string(),
                kind: leaf.kind(),
                source,
            })?;
        note!(self.verbosity, field = %path, value = literal, "assigned default");
        Ok(())
    }
}
