use crate::regex::RegexInput;
use proc_macro::TokenStream;
use syn::parse_macro_input;

mod regex;

/// Checks a pattern while the calling crate compiles and expands to the
/// matching `rematch::Regex`.
///
/// With the `dot` feature, `#[graph = "path.dot"]` in front of the pattern
/// writes the automaton to that file.
#[proc_macro]
pub fn regex(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as RegexInput);
    input.compile().into()
}
