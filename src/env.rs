use std::collections::HashMap;
use std::env::VarError;

use crate::coerce::Style;
use crate::error::{ConversionError, SourceError};
use crate::field::{Cascade, FieldInfo, Leaf};
use crate::types::{SourceKind, Verbosity, note};
use crate::walk::{FieldPath, Visitor, walk};

/// Assign every field with an `env` tag from the variable it names.
///
/// `vars` is a snapshot of the environment; `None` reads the process environment.
/// Unset and empty variables are skipped, leaving the field as it was. A process
/// variable that is not valid UTF-8 is a conversion error for the field. Nested
/// records are always descended, and several fields may name the same variable.
pub(crate) fn cascade_env(
    dest: &mut dyn Cascade,
    vars: Option<&HashMap<String, String>>,
    verbosity: Verbosity,
) -> Result<(), SourceError> {
    let lookup = |name: &str| match vars {
        Some(vars) => Ok(vars.get(name).cloned()),
        None => match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(err) => Err(err),
        },
    };
    let mut visitor = EnvVisitor {
        lookup: &lookup,
        verbosity,
    };
    walk(dest, &mut visitor)
}

type Lookup<'a> = &'a dyn Fn(&str) -> Result<Option<String>, VarError>;

struct EnvVisitor<'a> {
    lookup: Lookup<'a>,
    verbosity: Verbosity,
}

impl Visitor for EnvVisitor<'_> {
    fn leaf(
        &mut self,
        path: &FieldPath,
        info: &FieldInfo,
        leaf: &mut dyn Leaf,
    ) -> Result<(), SourceError> {
        let Some(name) = info.tag(SourceKind::Env) else {
            return Ok(());
        };
        let raw = match (self.lookup)(name) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Ok(()),
            Err(err) => {
                let value = match &err {
                    VarError::NotUnicode(raw) => raw.to_string_lossy().into_owned(),
                    VarError::NotPresent => String::new(),
                };
                return Err(ConversionError {
                    field: path.to_string(),
                    value,
                    kind: leaf.kind(),
                    source: Box::new(err),
                }
                .into());
            }
        };

        leaf.assign(&raw, Style::Plain)
            .map_err(|source| ConversionError {
                field: path.to_string(),
                value: raw.clone(),
                kind: leaf.kind(),
                source,
            })?;
        note!(self.verbosity, field = %path, var = name, value = %raw, "assigned from env");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cascade;
    use crate::fixtures::test::{Deep, Numbers, ServerConfig};

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn applied<T: Cascade + Default>(pairs: &[(&str, &str)]) -> Result<T, SourceError> {
        let mut config = T::default();
        cascade_env(&mut config, Some(&vars(pairs)), Verbosity::Silent)?;
        Ok(config)
    }

    #[test]
    fn assigns_top_level_and_nested() {
        let config: ServerConfig = applied(&[
            ("TOKEN", "token_from_env"),
            ("HOST", "env.localhost"),
            ("PORT", "3333"),
        ])
        .unwrap();
        assert_eq!(config.token, "token_from_env");
        assert_eq!(config.server.host, "env.localhost");
        assert_eq!(config.server.port, 3333);
    }

    #[derive(crate::Cascade, Default)]
    struct SharedVar {
        #[cascade(env = "PORT")]
        other: i32,
        server: SharedVarServer,
    }

    #[derive(crate::Cascade, Default)]
    struct SharedVarServer {
        #[cascade(env = "PORT")]
        port: i32,
    }

    #[test]
    fn one_variable_feeds_several_fields() {
        let config: SharedVar = applied(&[("PORT", "3333")]).unwrap();
        assert_eq!(config.other, 3333);
        assert_eq!(config.server.port, 3333);
    }

    #[test]
    fn empty_and_unset_are_skipped() {
        let mut config = ServerConfig {
            token: "earlier".into(),
            ..Default::default()
        };
        cascade_env(&mut config, Some(&vars(&[("TOKEN", "")])), Verbosity::Silent).unwrap();
        assert_eq!(config.token, "earlier");
        assert_eq!(config.server.port, 0);
    }

    #[test]
    fn plain_bool_rules_apply() {
        let config: ServerConfig = applied(&[("VERBOSE", "true")]).unwrap();
        assert!(config.verbose);
        let config: ServerConfig = applied(&[("VERBOSE", "1")]).unwrap();
        assert!(!config.verbose);
    }

    #[test]
    fn optional_fields_get_some() {
        let config: Numbers = applied(&[("LIMIT", "10"), ("DEBUG", "yes")]).unwrap();
        assert_eq!(config.limit, Some(10));
        assert_eq!(config.debug, Some(true));
    }

    #[test]
    fn list_appends_single_value() {
        let config: Deep = applied(&[("TAGS", "a,b")]).unwrap();
        assert_eq!(config.tags, ["a,b"]);
    }

    #[test]
    fn invalid_number_is_conversion_error() {
        let err = applied::<Numbers>(&[("COUNT", "lots")]).unwrap_err();
        assert!(err.to_string().contains("'lots'"));
        assert!(err.to_string().contains("count"));
    }

    #[derive(crate::Cascade, Default)]
    struct SearchPath {
        #[cascade(env = "PATH")]
        path: String,
    }

    #[test]
    fn process_environment_is_read() {
        let Some(expected) = std::env::var_os("PATH") else {
            return;
        };
        let mut config = SearchPath::default();
        cascade_env(&mut config, None, Verbosity::Silent).unwrap();
        assert_eq!(config.path, expected.to_string_lossy());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_variable_is_conversion_error() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let lookup = |_: &str| -> Result<Option<String>, VarError> {
            Err(VarError::NotUnicode(OsString::from_vec(vec![b'a', 0xff])))
        };
        let mut visitor = EnvVisitor {
            lookup: &lookup,
            verbosity: Verbosity::Silent,
        };
        let mut config = SearchPath::default();
        let err = walk(&mut config, &mut visitor).unwrap_err();
        let SourceError::Conversion(err) = err else {
            panic!("expected a conversion error, got {err:?}");
        };
        assert_eq!(err.field, "path");
        assert_eq!(err.value, "a\u{fffd}");
        assert!(config.path.is_empty());
    }

    #[test]
    fn process_environment_without_tagged_vars_changes_nothing() {
        #[derive(crate::Cascade, Default)]
        struct Unlikely {
            #[cascade(env = "CASCADE_TEST_SURELY_UNSET_VARIABLE")]
            value: String,
        }

        let mut config = Unlikely {
            value: "kept".into(),
        };
        cascade_env(&mut config, None, Verbosity::Silent).unwrap();
        assert_eq!(config.value, "kept");
    }
}
