//! Tag-driven configuration cascading. Annotate a struct, list your sources,
//! and go.
//!
//! Cascade fills one typed record from an ordered list of sources: TOML, YAML,
//! JSON and INI files, environment variables and command-line arguments. Each
//! field says, per source, where its value lives. A final pass fills whatever is
//! still unset from compiled defaults.
//!
//! ```ignore
//! use cascade::{Cascade, Cascader, Source};
//!
//! #[derive(Cascade, Default)]
//! struct AppConfig {
//!     #[cascade(toml = "token", env = "APP_TOKEN", cli = "t,token", default = "anonymous")]
//!     token: String,
//!
//!     #[cascade(toml = "server", yaml = "server")]
//!     server: Server,
//! }
//!
//! #[derive(Cascade, Default)]
//! struct Server {
//!     #[cascade(toml = "port", yaml = "port", env = "PORT", cli = "p,port", default = 8080)]
//!     port: u16,
//! }
//!
//! let config: AppConfig = Cascader::new()
//!     .source(Source::toml("/etc/myapp.toml"))
//!     .source(Source::env())
//!     .source(Source::process_cli())
//!     .load()?;
//! ```
//!
//! # Tags as the source of truth
//!
//! A field takes part in a source only when it carries that source's tag:
//!
//! | tag | meaning |
//! |-----|---------|
//! | `toml`, `yaml`, `json` | key in the current table of the document |
//! | `ini` | key in the current section; on a nested record, the section name |
//! | `env` | variable name |
//! | `cli` | comma-separated flag aliases, without dashes |
//! | `default` | literal used when every source left the field at zero |
//!
//! An absent tag, an empty tag and `-` all mean the same thing: the source never
//! touches the field. `#[cascade(skip)]` removes a field from every source.
//!
//! Nested records are fields whose type also derives [`Cascade`]. Env, CLI and
//! the default pass always descend into them. File sources descend only when the
//! record itself has a tag for the format, and treat that tag as the key of the
//! sub-table. `Option<R>` of a record is created with `R::default()` the first
//! time a source descends into it.
//!
//! # Layer precedence
//!
//! ```text
//! Defaults          #[cascade(default = ...)], zero fields only
//!        ↑ overridden by
//! Sources           in the order given, later sources win
//! ```
//!
//! Every source is **sparse**: a missing key, variable or flag leaves the field
//! as the previous source left it. File sources are the exception for fields they
//! are tagged for: a document is decoded into a fresh `T::default()` and every
//! tagged field is copied over, so a key missing from the document resets the
//! field to its zero value. Untagged fields survive.
//!
//! # Value coercion
//!
//! Structured files carry typed values and are decoded with serde. Everything
//! else is a string, coerced according to the field's type (see [`coerce`]):
//! `bool` is `true` for `"true"` or `"yes"` (and a bare CLI flag), numbers are
//! parsed and fail loudly. `Vec<String>` fields collect one value per assignment,
//! which is how repeated CLI flags accumulate.
//!
//! # Command-line arguments
//!
//! See [`cli`] for the tokenizing rules. Any flag that no field claims fails the
//! invocation with [`SourceError::UnrecognizedOptions`] listing all of them.
//!
//! # Error handling
//!
//! The first failing source aborts the invocation and is reported as
//! [`CascadeError::Source`] naming its kind; a bad `default` literal is
//! [`CascadeError::Default`]. Both wrap a [`SourceError`] with the details.
//! Conversion failures name the dotted path of the field (`server.port`).
//!
//! # Diagnostics
//!
//! [`Verbosity::Verbose`] emits every field-level decision as a `tracing` debug
//! event. It never changes the outcome.

extern crate self as cascade;

pub mod cli;
pub mod coerce;
pub mod error;
pub mod field;
pub mod types;
pub mod walk;

mod builder;
mod defaults;
mod env;
mod file;
mod ini;
pub(crate) mod merge;

#[cfg(test)]
mod fixtures;

pub use builder::{Cascader, cascade};
pub use cascade_derive::Cascade;
pub use cli::FlagTable;
pub use coerce::{Kind, Scalar, Style};
pub use error::{CascadeError, ConversionError, SourceError};
pub use field::{Cascade, Field, FieldInfo, FieldMut, Leaf, Tags};
pub use types::{Source, SourceKind, Verbosity};
pub use walk::{FieldPath, Visitor, walk};
