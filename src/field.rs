//! The field view every cascader works through.
//!
//! A destination record exposes its fields through [`Cascade`]: a static table of
//! [`FieldInfo`] (name plus per-source tags) and indexed mutable access. Each
//! field's type decides, through [`Field`], whether it is a leaf or a nested
//! record. `#[derive(Cascade)]` writes both for a struct; the impls below cover
//! the supported leaf types:
//!
//! - `String`, `bool`, every integer and float primitive;
//! - `Option<T>` of those, zero while `None`;
//! - `Vec<String>`, which accumulates one value per assignment.
//!
//! `Option<R>` of a nested record `R` is materialised with `R::default()` on
//! first access.

use std::any::Any;

use serde::Deserialize;

use crate::coerce::{Kind, ParseFailure, Scalar, Style};
use crate::types::SourceKind;

/// A record whose fields can be cascaded. Usually derived with
/// `#[derive(Cascade)]`.
pub trait Cascade {
    /// Field table in declaration order. Skipped fields are not listed.
    fn fields(&self) -> &'static [FieldInfo];

    /// Mutable access to the field at `index` in [`fields()`](Self::fields).
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

/// Static description of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub tags: Tags,
}

impl FieldInfo {
    /// The lookup key for `kind`, or `None` when the tag is absent, empty or `-`.
    pub fn tag(&self, kind: SourceKind) -> Option<&'static str> {
        self.tags
            .get(kind)
            .filter(|tag| !tag.is_empty() && *tag != "-")
    }
}

/// Raw per-source tags of a field, as written in `#[cascade(...)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags {
    pub toml: Option<&'static str>,
    pub yaml: Option<&'static str>,
    pub json: Option<&'static str>,
    pub ini: Option<&'static str>,
    pub env: Option<&'static str>,
    pub cli: Option<&'static str>,
    pub default: Option<&'static str>,
}

impl Tags {
    pub fn get(&self, kind: SourceKind) -> Option<&'static str> {
        match kind {
            SourceKind::Toml => self.toml,
            SourceKind::Yaml => self.yaml,
            SourceKind::Json => self.json,
            SourceKind::Ini => self.ini,
            SourceKind::Env => self.env,
            SourceKind::Cli => self.cli,
            SourceKind::Default => self.default,
        }
    }
}

/// A field borrowed for writing.
pub enum FieldMut<'a> {
    Leaf(&'a mut dyn Leaf),
    Nested(&'a mut dyn Cascade),
}

/// Converts a concrete field into a [`FieldMut`].
pub trait Field {
    fn as_field_mut(&mut self) -> FieldMut<'_>;
}

/// A settable scalar field.
pub trait Leaf {
    fn kind(&self) -> Kind;

    /// Whether the field is an `Option`.
    fn is_optional(&self) -> bool;

    fn is_zero(&self) -> bool;

    /// Coerce `raw` and store it. Lists append instead of replacing.
    fn assign(&mut self, raw: &str, style: Style) -> Result<(), ParseFailure>;

    /// Replace the value with one taken from a decoded document.
    fn decode(&mut self, value: serde_json::Value) -> Result<(), serde_json::Error>;

    /// Overwrite with `other` when it holds the same type.
    fn copy_from(&mut self, other: &dyn Leaf);

    fn as_any(&self) -> &dyn Any;
}

macro_rules! scalar_leaf {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Leaf for $ty {
                fn kind(&self) -> Kind {
                    <$ty as Scalar>::KIND
                }

                fn is_optional(&self) -> bool {
                    false
                }

                fn is_zero(&self) -> bool {
                    Scalar::is_zero(self)
                }

                fn assign(&mut self, raw: &str, style: Style) -> Result<(), ParseFailure> {
                    if let Some(value) = <$ty as Scalar>::parse(raw, style)? {
                        *self = value;
                    }
                    Ok(())
                }

                fn decode(&mut self, value: serde_json::Value) -> Result<(), serde_json::Error> {
                    *self = <$ty>::deserialize(value)?;
                    Ok(())
                }

                fn copy_from(&mut self, other: &dyn Leaf) {
                    if let Some(other) = other.as_any().downcast_ref::<$ty>() {
                        self.clone_from(other);
                    }
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }

            impl Leaf for Option<$ty> {
                fn kind(&self) -> Kind {
                    <$ty as Scalar>::KIND
                }

                fn is_optional(&self) -> bool {
                    true
                }

                fn is_zero(&self) -> bool {
                    self.is_none()
                }

                fn assign(&mut self, raw: &str, style: Style) -> Result<(), ParseFailure> {
                    if let Some(value) = <$ty as Scalar>::parse(raw, style)? {
                        *self = Some(value);
                    }
                    Ok(())
                }

                fn decode(&mut self, value: serde_json::Value) -> Result<(), serde_json::Error> {
                    *self = Option::<$ty>::deserialize(value)?;
                    Ok(())
                }

                fn copy_from(&mut self, other: &dyn Leaf) {
                    if let Some(other) = other.as_any().downcast_ref::<Option<$ty>>() {
                        self.clone_from(other);
                    }
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }

            impl Field for $ty {
                fn as_field_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::Leaf(self)
                }
            }

            impl Field for Option<$ty> {
                fn as_field_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::Leaf(self)
                }
            }
        )+
    };
}

scalar_leaf!(
    String, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Leaf for Vec<String> {
    fn kind(&self) -> Kind {
        Kind::List
    }

    fn is_optional(&self) -> bool {
        false
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn assign(&mut self, raw: &str, _style: Style) -> Result<(), ParseFailure> {
        self.push(raw.to_string());
        Ok(())
    }

    fn decode(&mut self, value: serde_json::Value) -> Result<(), serde_json::Error> {
        *self = Vec::<String>::deserialize(value)?;
        Ok(())
    }

    fn copy_from(&mut self, other: &dyn Leaf) {
        if let Some(other) = other.as_any().downcast_ref::<Vec<String>>() {
            self.clone_from(other);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Field for Vec<String> {
    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Leaf(self)
    }
}

impl<R: Cascade + Default> Field for Option<R> {
    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Nested(self.get_or_insert_with(R::default))
    }
}
