use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// The kind of a configuration source. Also selects which `#[cascade(...)]` tag a
/// field is looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Toml,
    Ini,
    Yaml,
    Json,
    Env,
    Cli,
    /// The terminal pass filling zero-valued fields from `default` literals. It has
    /// no constructor on [`Source`]; every invocation runs it once at the end.
    Default,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Toml => "toml",
            SourceKind::Ini => "ini",
            SourceKind::Yaml => "yaml",
            SourceKind::Json => "json",
            SourceKind::Env => "env",
            SourceKind::Cli => "cli",
            SourceKind::Default => "default",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a source takes its raw data from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Payload {
    Path(PathBuf),
    Args(Vec<String>),
    /// A snapshot of environment variables. `None` reads the process environment
    /// lazily, when the source is applied.
    Vars(Option<HashMap<String, String>>),
}

/// One configuration source, applied in the order given to the
/// [`Cascader`](crate::Cascader).
///
/// ```ignore
/// let sources = [
///     Source::toml("/etc/myapp.toml"),
///     Source::env(),
///     Source::process_cli(),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    kind: SourceKind,
    payload: Payload,
}

impl Source {
    /// Cascade from a TOML file. Fields are matched by their `toml` tag.
    pub fn toml(path: impl AsRef<Path>) -> Self {
        Self::file(SourceKind::Toml, path)
    }

    /// Cascade from a YAML file. Fields are matched by their `yaml` tag.
    pub fn yaml(path: impl AsRef<Path>) -> Self {
        Self::file(SourceKind::Yaml, path)
    }

    /// Cascade from a JSON file. Fields are matched by their `json` tag.
    pub fn json(path: impl AsRef<Path>) -> Self {
        Self::file(SourceKind::Json, path)
    }

    /// Cascade from an INI file. Top-level fields read the unnamed section, nested
    /// records read the section named by their `ini` tag.
    pub fn ini(path: impl AsRef<Path>) -> Self {
        Self::file(SourceKind::Ini, path)
    }

    /// Cascade from the process environment, read when the source is applied.
    pub fn env() -> Self {
        Self {
            kind: SourceKind::Env,
            payload: Payload::Vars(None),
        }
    }

    /// Cascade from a fixed set of variables instead of the process environment.
    ///
    /// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
    pub fn env_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            kind: SourceKind::Env,
            payload: Payload::Vars(Some(vars)),
        }
    }

    /// Cascade from an explicit argument list (without the program name).
    pub fn cli<S: Into<String>>(args: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind: SourceKind::Cli,
            payload: Payload::Args(args.into_iter().map(Into::into).collect()),
        }
    }

    /// Cascade from the arguments this process was started with.
    pub fn process_cli() -> Self {
        Self::cli(std::env::args().skip(1))
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub(crate) fn payload(&self) -> &Payload {
        &self.payload
    }

    fn file(kind: SourceKind, path: impl AsRef<Path>) -> Self {
        Self {
            kind,
            payload: Payload::Path(path.as_ref().to_path_buf()),
        }
    }
}

/// How much the engine reports about its field-by-field decisions.
///
/// `Verbose` emits `tracing` debug events; it never changes the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    #[default]
    Silent,
    Verbose,
}

impl Verbosity {
    pub fn is_verbose(self) -> bool {
        self == Verbosity::Verbose
    }
}

/// Emit a `tracing` debug event when the given [`Verbosity`] is verbose.
macro_rules! note {
    ($verbosity:expr, $($arg:tt)+) => {
        if $verbosity.is_verbose() {
            ::tracing::debug!($($arg)+);
        }
    };
}

pub(crate) use note;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_constructors_keep_kind_and_path() {
        let source = Source::yaml("conf/app.yaml");
        assert_eq!(source.kind(), SourceKind::Yaml);
        assert_eq!(
            source.payload(),
            &Payload::Path(PathBuf::from("conf/app.yaml"))
        );
    }

    #[test]
    fn cli_collects_args_in_order() {
        let source = Source::cli(["-h", "localhost", "--port=80"]);
        assert_eq!(source.kind(), SourceKind::Cli);
        assert_eq!(
            source.payload(),
            &Payload::Args(vec!["-h".into(), "localhost".into(), "--port=80".into()])
        );
    }

    #[test]
    fn process_cli_skips_program_name() {
        let source = Source::process_cli();
        assert_eq!(source.kind(), SourceKind::Cli);
        let expected: Vec<String> = std::env::args().skip(1).collect();
        assert_eq!(source.payload(), &Payload::Args(expected));
    }

    #[test]
    fn env_reads_process_lazily() {
        assert_eq!(Source::env().payload(), &Payload::Vars(None));
    }

    #[test]
    fn env_vars_snapshot() {
        let source = Source::env_vars([("PORT", "3333")]);
        let Payload::Vars(Some(vars)) = source.payload() else {
            panic!("expected a snapshot");
        };
        assert_eq!(vars["PORT"], "3333");
    }

    #[test]
    fn kind_displays_lowercase() {
        assert_eq!(SourceKind::Json.to_string(), "json");
        assert_eq!(SourceKind::Default.to_string(), "default");
    }

    #[test]
    fn verbosity_defaults_to_silent() {
        assert_eq!(Verbosity::default(), Verbosity::Silent);
        assert!(!Verbosity::Silent.is_verbose());
        assert!(Verbosity::Verbose.is_verbose());
    }
}
