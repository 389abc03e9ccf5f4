use crate::cli;
use crate::defaults;
use crate::env;
use crate::error::{CascadeError, SourceError};
use crate::field::Cascade;
use crate::file;
use crate::ini;
use crate::types::{Payload, Source, SourceKind, Verbosity, note};

/// Cascade `sources` into `dest` in order, then fill remaining zero fields from
/// their `default` tags.
///
/// Shorthand for `Cascader::new().sources(sources).apply(dest)`.
pub fn cascade<T: Cascade + Default>(
    dest: &mut T,
    sources: impl IntoIterator<Item = Source>,
) -> Result<(), CascadeError> {
    Cascader::new().sources(sources).apply(dest)
}

/// Builder for one cascading invocation.
///
/// Sources are listed in **priority-ascending** order: each one overwrites the
/// fields it has a value for, so the last source to touch a field wins. The
/// default pass always runs last and only fills fields still at their zero value.
///
/// ```ignore
/// let config: AppConfig = Cascader::new()
///     .source(Source::toml("/etc/myapp.toml"))
///     .source(Source::env())
///     .source(Source::process_cli())
///     .load()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cascader {
    sources: Vec<Source>,
    verbosity: Verbosity,
}

impl Cascader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one source after those already added.
    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Append several sources, keeping their order.
    pub fn sources(mut self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources.extend(sources);
        self
    }

    /// Set the diagnostic level (default: [`Verbosity::Silent`]).
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Run every source against `dest`, then the default pass.
    ///
    /// The first failure aborts the invocation. `dest` keeps whatever the sources
    /// before the failing one wrote, and no default is applied.
    pub fn apply<T: Cascade + Default>(&self, dest: &mut T) -> Result<(), CascadeError> {
        for source in &self.sources {
            let kind = source.kind();
            note!(self.verbosity, kind = %kind, "cascading source");
            apply_source(dest, source, self.verbosity)
                .map_err(|source| CascadeError::Source { kind, source })?;
        }

        note!(self.verbosity, "applying defaults");
        defaults::cascade_defaults(dest, self.verbosity).map_err(CascadeError::Default)
    }

    /// Build a record from `T::default()` and [`apply`](Self::apply) to it.
    pub fn load<T: Cascade + Default>(&self) -> Result<T, CascadeError> {
        let mut dest = T::default();
        self.apply(&mut dest)?;
        Ok(dest)
    }
}

fn apply_source<T: Cascade + Default>(
    dest: &mut T,
    source: &Source,
    verbosity: Verbosity,
) -> Result<(), SourceError> {
    match source.payload() {
        Payload::Path(path) => match source.kind() {
            SourceKind::Ini => ini::cascade_ini(dest, path, verbosity),
            kind => file::cascade_file(dest, kind, path, verbosity),
        },
        Payload::Vars(vars) => env::cascade_env(dest, vars.as_ref(), verbosity),
        Payload::Args(args) => cli::cascade_cli(dest, args.as_slice(), verbosity),
    }
}
