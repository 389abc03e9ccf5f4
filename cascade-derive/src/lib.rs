mod attrs;
mod record;

/////////////////////////////////////////////////////////////////////////////////////////

/// Implements `cascade::Cascade` for a struct with named fields.
///
/// Per-field lookup keys are given with `#[cascade(...)]`:
///
/// ```ignore
/// #[derive(Cascade, Default)]
/// struct Server {
///     #[cascade(toml = "port", env = "PORT", cli = "p,port", default = 8080)]
///     port: u16,
/// }
/// ```
///
/// A key of `"-"` opts the field out of that source, `#[cascade(skip)]` removes the
/// field from every source.
#[proc_macro_derive(Cascade, attributes(cascade))]
pub fn derive_cascade(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    match record::cascade_impl(input) {
        Ok(output) => proc_macro::TokenStream::from(output),
        Err(err) => err.to_compile_error().into(),
    }
}

/////////////////////////////////////////////////////////////////////////////////////////
