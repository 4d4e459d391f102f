use proc_macro2::TokenStream;
use quote::quote;
use rematch_engine::parse;
use syn::parse::{Parse, ParseStream};
use syn::{Attribute, LitStr};

#[cfg(feature = "dot")]
use std::fs::File;
#[cfg(feature = "dot")]
use syn::{Expr, ExprLit, Lit, Meta, MetaNameValue};

pub(crate) struct RegexInput {
    attrs: Vec<Attribute>,
    pattern: LitStr,
}

impl Parse for RegexInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let pattern = input.parse()?;
        Ok(Self { attrs, pattern })
    }
}

impl RegexInput {
    pub fn compile(self) -> TokenStream {
        let mut errors = Vec::new();
        #[cfg(feature = "dot")]
        let mut graph = None;

        for i in self.attrs {
            let attr = i.meta.clone();
            match attr {
                #[cfg(feature = "dot")]
                Meta::NameValue(MetaNameValue {
                    path,
                    value:
                        Expr::Lit(ExprLit {
                            lit: Lit::Str(s), ..
                        }),
                    ..
                }) if path.is_ident("graph") => {
                    graph = Some(s);
                }
                i => errors.push(syn::Error::new_spanned(i, "unexpected attribute")),
            }
        }

        let text = self.pattern.value();
        let ast = match parse(&text) {
            Ok(ast) => ast,
            Err(err) => {
                errors.push(syn::Error::new(
                    self.pattern.span(),
                    format!("malformed pattern: {err}"),
                ));
                return compile_errors(errors);
            }
        };

        #[cfg(feature = "dot")]
        if let Some(path) = graph {
            if let Err(err) = write_graph(&path, &ast) {
                errors.push(err);
            }
        }

        if !errors.is_empty() {
            return compile_errors(errors);
        }

        let tree = ast.emit();
        quote!({
            match ::rematch::Regex::from_ast(&#tree) {
                ::std::result::Result::Ok(regex) => regex,
                ::std::result::Result::Err(err) => {
                    ::std::panic!("regex!({:?}) cannot be compiled: {}", #text, err)
                }
            }
        })
    }
}

#[cfg(feature = "dot")]
fn write_graph(path: &LitStr, ast: &rematch_engine::Ast) -> syn::Result<()> {
    let file = path.value();
    let regex = rematch_engine::Regex::from_ast(ast)
        .map_err(|e| syn::Error::new(path.span(), format!("can't compile for graphing: {e}")))?;
    let mut f = File::create(&file)
        .map_err(|e| syn::Error::new(path.span(), format!("can't open dot file {file}: {e}")))?;
    regex
        .output_dot(&mut f)
        .map_err(|e| syn::Error::new(path.span(), format!("failed while graphing at {file}: {e}")))
}

fn compile_errors(errors: Vec<syn::Error>) -> TokenStream {
    errors
        .into_iter()
        .reduce(|mut all, e| {
            all.combine(e);
            all
        })
        .map(|e| e.to_compile_error())
        .unwrap_or_default()
}
