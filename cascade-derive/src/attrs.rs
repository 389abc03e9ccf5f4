use proc_macro2::Span;
use quote::ToTokens;
use syn::spanned::Spanned;

/////////////////////////////////////////////////////////////////////////////////////////

pub(crate) const TAG_NAMES: [&str; 7] = ["toml", "yaml", "json", "ini", "env", "cli", "default"];

/////////////////////////////////////////////////////////////////////////////////////////

pub(crate) struct CascadeFieldOpts {
    /// Indexed like [`TAG_NAMES`]
    pub tags: [Option<String>; 7],
    pub skip: bool,
    pub span: Span,
}

impl CascadeFieldOpts {
    fn new(span: Span) -> Self {
        Self {
            tags: Default::default(),
            skip: false,
            span,
        }
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        let index = TAG_NAMES.iter().position(|t| *t == name)?;
        self.tags[index].as_deref()
    }

    pub fn merge(&mut self, other: Self) -> syn::Result<()> {
        self.span = other.span;

        for (index, tag) in other.tags.into_iter().enumerate() {
            if tag.is_none() {
                continue;
            }
            if self.tags[index].is_some() {
                return Err(syn::Error::new(
                    other.span,
                    format!("`{}` specified more than once", TAG_NAMES[index]),
                ));
            }
            self.tags[index] = tag;
        }

        self.skip |= other.skip;

        Ok(())
    }

    pub fn parse(field: &syn::Field) -> syn::Result<Self> {
        let mut opts = Self::new(field.span());

        for attr in field.attrs.iter() {
            if attr.path().is_ident("cascade") {
                let more_opts = Self::parse_from(attr)?;
                opts.merge(more_opts)?;
            }
        }

        Ok(opts)
    }

    fn parse_from(attr: &syn::Attribute) -> syn::Result<Self> {
        let mut opts = Self::new(attr.span());

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                opts.skip = true;
                return Ok(());
            }

            let Some(index) = TAG_NAMES.iter().position(|t| meta.path.is_ident(t)) else {
                return Err(syn::Error::new(
                    meta.path.span(),
                    format!("unknown cascade option `{}`", meta.path.to_token_stream()),
                ));
            };

            let value = meta.value()?;
            let negative = value.peek(syn::Token![-]);
            if negative {
                value.parse::<syn::Token![-]>()?;
            }
            let lit: syn::Lit = value.parse()?;
            opts.tags[index] = Some(if negative {
                negated_to_string(&lit)?
            } else {
                lit_to_string(&lit)?
            });
            Ok(())
        })?;

        Ok(opts)
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

/// Tags are plain strings, but `default = 8080` and `default = true` read better than
/// their quoted forms, so numeric and boolean literals are accepted as well.
fn lit_to_string(lit: &syn::Lit) -> syn::Result<String> {
    match lit {
        syn::Lit::Str(s) => Ok(s.value()),
        syn::Lit::Int(i) => Ok(i.base10_digits().to_string()),
        syn::Lit::Float(f) => Ok(f.base10_digits().to_string()),
        syn::Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(syn::Error::new(
            other.span(),
            "expected a string, integer, float or boolean literal",
        )),
    }
}

/// `default = -5` arrives as a minus sign followed by an unsigned literal.
fn negated_to_string(lit: &syn::Lit) -> syn::Result<String> {
    match lit {
        syn::Lit::Int(i) => Ok(format!("-{}", i.base10_digits())),
        syn::Lit::Float(f) => Ok(format!("-{}", f.base10_digits())),
        other => Err(syn::Error::new(
            other.span(),
            "only integer and float literals can be negated",
        )),
    }
}

/////////////////////////////////////////////////////////////////////////////////////////
