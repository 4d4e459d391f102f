use crate::Ast;
use proc_macro2::TokenStream;
use quote::quote;

impl Ast {
    /// Rust code that rebuilds this tree through the `rematch` crate.
    ///
    /// Shared subtrees are written out once per occurrence, which the compiler
    /// treats the same as a shared reference.
    pub fn emit(&self) -> TokenStream {
        match self {
            Ast::Literal(c) => quote!(::rematch::Ast::Literal(#c)),
            Ast::NullString => quote!(::rematch::Ast::NullString),
            Ast::Dot => quote!(::rematch::Ast::Dot),
            Ast::CharClass(set) => {
                let set = set.iter();
                quote!(::rematch::Ast::CharClass(::std::vec![#(#set),*]))
            }
            Ast::Star(op) => {
                let op = op.emit();
                quote!(::rematch::Ast::Star(::std::rc::Rc::new(#op)))
            }
            Ast::Choice(l, r) => {
                let (l, r) = (l.emit(), r.emit());
                quote!(::rematch::Ast::Choice(
                    ::std::rc::Rc::new(#l),
                    ::std::rc::Rc::new(#r)
                ))
            }
            Ast::Concat(l, r) => {
                let (l, r) = (l.emit(), r.emit());
                quote!(::rematch::Ast::Concat(
                    ::std::rc::Rc::new(#l),
                    ::std::rc::Rc::new(#r)
                ))
            }
        }
    }
}
