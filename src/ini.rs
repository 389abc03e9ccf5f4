//! INI files.
//!
//! Unlike the structured formats, INI values are raw strings and are assigned
//! straight into the destination with the plain coercion rules. Keys before the
//! first section header form the general section, which top-level fields read. A
//! nested record whose `ini` tag names a section reads that section instead.
//!
//! Only one level of sections exists: a record nested inside a section record is
//! not visited.
//!
//! Backslashes are literal, so `path = C:\new\tmp` reads exactly as written.

use std::path::Path;

use ini::{Ini, ParseOption, Properties};

use crate::coerce::Style;
use crate::error::{ConversionError, SourceError};
use crate::field::{Cascade, FieldInfo, Leaf};
use crate::file;
use crate::types::{SourceKind, Verbosity, note};
use crate::walk::{FieldPath, Visitor, walk};

pub(crate) fn cascade_ini(
    dest: &mut dyn Cascade,
    path: &Path,
    verbosity: Verbosity,
) -> Result<(), SourceError> {
    let content = file::read(SourceKind::Ini, path)?;
    let document = parse(&content)?;
    apply(dest, &document, verbosity)
}

pub(crate) fn parse(content: &str) -> Result<Ini, SourceError> {
    let options = ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    };
    Ok(Ini::load_from_str_opt(content, options)?)
}

pub(crate) fn apply(
    dest: &mut dyn Cascade,
    document: &Ini,
    verbosity: Verbosity,
) -> Result<(), SourceError> {
    let mut visitor = IniVisitor {
        document,
        verbosity,
        sections: vec![document.general_section()],
    };
    walk(dest, &mut visitor)
}

struct IniVisitor<'a> {
    document: &'a Ini,
    verbosity: Verbosity,
    sections: Vec<&'a Properties>,
}

impl Visitor for IniVisitor<'_> {
    fn leaf(
        &mut self,
        path: &FieldPath,
        info: &FieldInfo,
        leaf: &mut dyn Leaf,
    ) -> Result<(), SourceError> {
        let Some(key) = info.tag(SourceKind::Ini) else {
            return Ok(());
        };
        let Some(raw) = self.sections.last().and_then(|section| section.get(key)) else {
            note!(self.verbosity, field = %path, key, "key not found in ini");
            return Ok(());
        };

        leaf.assign(raw, Style::Plain)
            .map_err(|source| ConversionError {
                field: path.to_string(),
                value: raw.to_string(),
                kind: leaf.kind(),
                source,
            })?;
        note!(self.verbosity, field = %path, value = raw, "assigned from ini");
        Ok(())
    }

    fn enter(&mut self, path: &FieldPath, info: &FieldInfo) -> Result<bool, SourceError> {
        let Some(name) = info.tag(SourceKind::Ini) else {
            return Ok(false);
        };
        if path.depth() > 0 {
            note!(self.verbosity, field = %path, "ini sections do not nest, record skipped");
            return Ok(false);
        }
        let Some(section) = self.document.section(Some(name)) else {
            note!(self.verbosity, field = %path, section = name, "section not found in ini");
            return Ok(false);
        };
        self.sections.push(section);
        Ok(true)
    }

    fn leave(&mut self, _path: &FieldPath, _info: &FieldInfo) {
        self.sections.pop();
    }
}
