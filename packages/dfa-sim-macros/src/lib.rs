use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Attribute, Expr, GenericArgument, Ident, PathArguments, Token, Type, Visibility, braced,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// One `name: Type = default` line. A `#[nested]` marker means the field is
/// itself a config and is read from a TOML table.
struct Setting {
    docs: Vec<Attribute>,
    nested: bool,
    name: Ident,
    ty: Type,
    default: Expr,
}

impl Parse for Setting {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut docs = input.call(Attribute::parse_outer)?;
        let before = docs.len();
        docs.retain(|attr| !attr.path().is_ident("nested"));
        let nested = docs.len() != before;

        let name = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty = input.parse()?;
        input.parse::<Token![=]>()?;
        let default = input.parse()?;

        Ok(Setting {
            docs,
            nested,
            name,
            ty,
            default,
        })
    }
}

fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|segment| {
        segment.ident == "Option"
            && matches!(
                &segment.arguments,
                PathArguments::AngleBracketed(args)
                    if matches!(args.args.first(), Some(GenericArgument::Type(_)))
            )
    })
}

impl Setting {
    fn declaration(&self) -> TokenStream2 {
        let Setting { docs, name, ty, .. } = self;
        quote! { #( #docs )* #name: #ty }
    }

    /// Fields of the partial twin are optional, nested configs use their own
    /// partial type.
    fn partial_declaration(&self) -> TokenStream2 {
        let Setting { name, ty, .. } = self;
        if self.nested {
            quote! { #name: Option<<#ty as crate::config::ConfigFile>::Partial> }
        } else if is_option(ty) {
            quote! { #name: #ty }
        } else {
            quote! { #name: Option<#ty> }
        }
    }

    fn completion(&self) -> TokenStream2 {
        let Setting {
            name, ty, default, ..
        } = self;
        if self.nested {
            quote! {
                #name: partial.#name
                    .map(<#ty as crate::config::ConfigFile>::from_partial)
                    .unwrap_or_else(|| #default)
            }
        } else if is_option(ty) {
            quote! { #name: partial.#name.or_else(|| #default) }
        } else {
            quote! { #name: partial.#name.unwrap_or_else(|| #default) }
        }
    }

    fn accessors(&self) -> TokenStream2 {
        let Setting { name, ty, .. } = self;
        let setter = format_ident!("with_{}", name);
        let getter = format_ident!("get_{}", name);
        quote! {
            pub fn #setter(mut self, #name: #ty) -> Self {
                self.#name = #name;
                self
            }

            pub fn #getter(&self) -> &#ty {
                &self.#name
            }
        }
    }
}

struct ConfigStruct {
    docs: Vec<Attribute>,
    vis: Visibility,
    name: Ident,
    settings: Vec<Setting>,
}

impl Parse for ConfigStruct {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let docs = input.call(Attribute::parse_outer)?;
        let vis = input.parse()?;
        input.parse::<Token![struct]>()?;
        let name = input.parse()?;

        let body;
        braced!(body in input);
        let settings = body
            .parse_terminated(Setting::parse, Token![,])?
            .into_iter()
            .collect();

        Ok(ConfigStruct {
            docs,
            vis,
            name,
            settings,
        })
    }
}

/// Declares a config struct together with a `Partial*` twin in which every
/// setting is optional. The twin is what TOML deserializes into; loading is
/// provided by `crate::config::ConfigFile`, which the expansion implements.
///
/// ```ignore
/// config! {
///     /// Docs are forwarded.
///     pub struct ServerConfig {
///         port: u16 = 8000,
///         #[nested]
///         logger: LoggerConfig = LoggerConfig::default(),
///     }
/// }
/// ```
#[proc_macro]
pub fn config(input: TokenStream) -> TokenStream {
    let ConfigStruct {
        docs,
        vis,
        name,
        settings,
    } = parse_macro_input!(input as ConfigStruct);
    let partial = format_ident!("Partial{}", name);
    let label = name.to_string();

    let declarations = settings.iter().map(Setting::declaration);
    let partial_declarations = settings.iter().map(Setting::partial_declaration);
    let completions = settings.iter().map(Setting::completion);
    let accessors = settings.iter().map(Setting::accessors);

    quote! {
        #( #docs )*
        #[derive(Debug, Clone, serde::Serialize)]
        #vis struct #name {
            #( #declarations, )*
        }

        #[derive(Debug, Clone, Default, serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        #vis struct #partial {
            #( #partial_declarations, )*
        }

        impl crate::config::ConfigFile for #name {
            type Partial = #partial;
            const NAME: &'static str = #label;

            fn from_partial(partial: #partial) -> Self {
                #name {
                    #( #completions, )*
                }
            }
        }

        impl Default for #name {
            fn default() -> Self {
                <Self as crate::config::ConfigFile>::from_partial(#partial::default())
            }
        }

        impl #name {
            #( #accessors )*
        }
    }
    .into()
}
