//! Procedural macros for scene-focus

use darling::{FromDeriveInput, FromField};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name as a static string.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum AppAction {
///     Router(NavAction),
///     Increment,
/// }
///
/// assert_eq!(AppAction::Increment.name(), "Increment");
/// ```
#[proc_macro_derive(Action)]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let syn::Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "Action can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let arms = data.variants.iter().map(|variant| {
        let ident = &variant.ident;
        let label = ident.to_string();
        let pattern = match &variant.fields {
            syn::Fields::Unit => quote! { #name::#ident },
            syn::Fields::Unnamed(_) => quote! { #name::#ident(..) },
            syn::Fields::Named(_) => quote! { #name::#ident { .. } },
        };
        quote! { #pattern => #label }
    });

    let expanded = quote! {
        impl #impl_generics scene_focus::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#arms,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Container-level attributes for #[derive(Screen)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(screen), supports(struct_named, struct_unit))]
struct ScreenOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<(), ScreenField>,

    /// Fixed scene key for every instance
    #[darling(default)]
    id: Option<String>,
}

/// Field-level attributes
#[derive(Debug, FromField)]
#[darling(attributes(screen))]
struct ScreenField {
    ident: Option<syn::Ident>,

    /// This field holds the scene key
    #[darling(default)]
    id: bool,
}

/// Derive macro for the Screen trait
///
/// The scene key comes either from a fixed container attribute or from one
/// field marked `#[screen(id)]`, converted with `ScreenId::from`.
///
/// # Example
/// ```ignore
/// #[derive(Screen)]
/// #[screen(id = "settings")]
/// struct Settings;
///
/// #[derive(Screen)]
/// struct Detail {
///     #[screen(id)]
///     scene_key: String,
///     item: u64,
/// }
/// ```
#[proc_macro_derive(Screen, attributes(screen))]
pub fn derive_screen(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ScreenOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let id_fields: Vec<&syn::Ident> = match &opts.data {
        darling::ast::Data::Struct(fields) => fields
            .iter()
            .filter(|field| field.id)
            .filter_map(|field| field.ident.as_ref())
            .collect(),
        darling::ast::Data::Enum(_) => Vec::new(),
    };

    let body = match (&opts.id, id_fields.as_slice()) {
        (Some(id), []) => quote! { scene_focus::ScreenId::from(#id) },
        (None, [field]) => quote! {
            scene_focus::ScreenId::from(::core::clone::Clone::clone(&self.#field))
        },
        (Some(_), [_, ..]) => {
            return syn::Error::new_spanned(
                &opts.ident,
                "use either #[screen(id = \"...\")] or a #[screen(id)] field, not both",
            )
            .to_compile_error()
            .into();
        }
        (None, []) => {
            return syn::Error::new_spanned(
                &opts.ident,
                "Screen needs #[screen(id = \"...\")] or a field marked #[screen(id)]",
            )
            .to_compile_error()
            .into();
        }
        (None, [_, _, ..]) => {
            return syn::Error::new_spanned(
                &opts.ident,
                "only one field can be marked #[screen(id)]",
            )
            .to_compile_error()
            .into();
        }
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics scene_focus::Screen for #name #ty_generics #where_clause {
            fn screen_id(&self) -> scene_focus::ScreenId {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}
