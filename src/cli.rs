//! Command-line arguments.
//!
//! Arguments are tokenized into a [`FlagTable`] first, then fields are matched
//! against it by their `cli` tag, a comma-separated alias list such as `"p,port"`.
//!
//! # Tokenizing
//!
//! - `--name=value` takes the inline value; `--name value` consumes the next token
//!   unless it starts with `-`; a bare `--name` gets an empty value.
//! - `-n value` works the same way. Everything after the single dash is the
//!   name, so `-p8080` is the flag `p8080`, not `-p` with a value.
//! - Tokens that do not start with `-` and a lone `-` are ignored.
//! - `--` ends the options: every token after it is left alone.
//! - Flags belonging to `bool` fields never take a value: `-v config.toml` sets
//!   `v` and leaves `config.toml` alone. This is why the destination is scanned
//!   for boolean aliases before tokenizing.
//! - Repeated flags accumulate, which `Vec<String>` fields collect in order. A
//!   scalar field ends up with the last occurrence.
//!
//! Negative numbers can only be passed inline (`--offset=-5`), a separate `-5`
//! token reads as a flag.
//!
//! # Unrecognized flags
//!
//! Any flag that no tagged field claims fails the whole invocation with a single
//! error listing all of them.

use std::collections::{BTreeMap, HashSet};

use crate::coerce::{Kind, Style};
use crate::error::{ConversionError, SourceError};
use crate::field::{Cascade, FieldInfo, Leaf};
use crate::types::{SourceKind, Verbosity, note};
use crate::walk::{FieldPath, Visitor, walk};

/// Flag name (without dashes) to every raw value it was given, in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlagTable {
    flags: BTreeMap<String, Vec<String>>,
}

impl FlagTable {
    /// Tokenize `args`. Names in `bool_flags` never consume a value.
    pub fn parse<S: AsRef<str>>(args: &[S], bool_flags: &HashSet<String>) -> Self {
        let mut table = FlagTable::default();
        let mut i = 0;

        while i < args.len() {
            let token = args[i].as_ref();
            i += 1;

            if token == "--" {
                break;
            }
            if !token.starts_with('-') || token.len() <= 1 {
                continue;
            }

            let (name, inline) = match token.strip_prefix("--") {
                Some(long) => match long.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (long, None),
                },
                None => (&token[1..], None),
            };
            if name.is_empty() {
                continue;
            }

            let value = if bool_flags.contains(name) {
                String::new()
            } else if let Some(value) = inline {
                value.to_string()
            } else if let Some(next) = args.get(i).map(AsRef::as_ref)
                && !next.starts_with('-')
            {
                i += 1;
                next.to_string()
            } else {
                String::new()
            };

            table.flags.entry(name.to_string()).or_default().push(value);
        }

        table
    }

    /// All values given for `name`, in order.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.flags.get(name).map(Vec::as_slice)
    }

    /// Flag names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Every `cli` alias of a `bool` field in `dest`, including nested records.
pub fn bool_flags(dest: &mut dyn Cascade) -> HashSet<String> {
    let mut scan = BoolFlagScan::default();
    // The scan visitor never fails
    let _ = walk(dest, &mut scan);
    scan.names
}

#[derive(Default)]
struct BoolFlagScan {
    names: HashSet<String>,
}

impl Visitor for BoolFlagScan {
    fn leaf(
        &mut self,
        _path: &FieldPath,
        info: &FieldInfo,
        leaf: &mut dyn Leaf,
    ) -> Result<(), SourceError> {
        if leaf.kind() == Kind::Bool
            && let Some(tag) = info.tag(SourceKind::Cli)
        {
            self.names.extend(aliases(tag).map(str::to_string));
        }
        Ok(())
    }
}

fn aliases(tag: &str) -> impl Iterator<Item = &str> {
    tag.split(',').map(str::trim).filter(|alias| !alias.is_empty())
}

/// Tokenize `args` against `dest`'s shape and assign the matching fields.
pub(crate) fn cascade_cli<S: AsRef<str>>(
    dest: &mut dyn Cascade,
    args: &[S],
    verbosity: Verbosity,
) -> Result<(), SourceError> {
    let bools = bool_flags(dest);
    let table = FlagTable::parse(args, &bools);
    note!(verbosity, flags = ?table, "parsed command line");

    let mut visitor = CliVisitor {
        table: &table,
        recognized: HashSet::new(),
        verbosity,
    };
    walk(dest, &mut visitor)?;

    let unrecognized: Vec<String> = table
        .names()
        .filter(|name| !visitor.recognized.contains(name))
        .map(str::to_string)
        .collect();
    if !unrecognized.is_empty() {
        return Err(SourceError::UnrecognizedOptions(unrecognized));
    }
    Ok(())
}

struct CliVisitor<'a> {
    table: &'a FlagTable,
    recognized: HashSet<&'a str>,
    verbosity: Verbosity,
}

impl Visitor for CliVisitor<'_> {
    fn leaf(
        &mut self,
        path: &FieldPath,
        info: &FieldInfo,
        leaf: &mut dyn Leaf,
    ) -> Result<(), SourceError> {
        let Some(tag) = info.tag(SourceKind::Cli) else {
            return Ok(());
        };

        // Every alias present counts as recognized, the first one supplies the values
        let table = self.table;
        let mut chosen: Option<(&str, &[String])> = None;
        for alias in aliases(tag) {
            if let Some((name, values)) = table.flags.get_key_value(alias) {
                self.recognized.insert(name.as_str());
                if chosen.is_none() {
                    chosen = Some((name.as_str(), values.as_slice()));
                }
            }
        }
        let Some((name, values)) = chosen else {
            return Ok(());
        };

        for raw in values {
            leaf.assign(raw, Style::Cli)
                .map_err(|source| ConversionError {
                    field: path.to_string(),
                    value: raw.clone(),
                    kind: leaf.kind(),
                    source,
                })?;
        }
        note!(self.verbosity, field = %path, flag = name, ?values, "assigned from cli");
        Ok(())
    }
}
