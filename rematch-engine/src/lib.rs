//! The parser, compiler and simulator behind `rematch`.
//!
//! A pattern goes through three stages:
//! [`parse`] turns it into an [`Ast`], [`NfaBuilder::compile`] turns the tree
//! into an [`Nfa`] using Thompson's construction, and [`Regex`] simulates the
//! automaton on an input by tracking the set of active states.

use thiserror::Error;

mod ast;
mod compile;
mod matcher;
mod nfa;
mod parse;
mod regex;
mod walk;

#[cfg(feature = "emit")]
mod emit;

#[cfg(feature = "dot")]
mod dot;

pub use ast::{Ast, Kind, Leaf};
pub use compile::Fragment;
pub use matcher::Matcher;
pub use nfa::{Arrow, ArrowKind, Nfa, NfaBuilder, State, StateId};
pub use parse::{parse, ParseError};
pub use regex::Regex;
pub use walk::{BreadthFirst, InOrder, Visit};

pub trait RegexMatcher {
    type Alphabet;

    /// accepts the specified symbol.
    ///
    /// If accepting failed, the new state is empty.
    fn accept(&mut self, inp: Self::Alphabet);
    fn accept_many(&mut self, inp: impl IntoIterator<Item = Self::Alphabet>) {
        for i in inp {
            self.accept(i);
        }
    }

    /// Returns true if the regular expression accepts the input iterator
    fn accepts(&mut self, iter: impl IntoIterator<Item = Self::Alphabet>) -> bool {
        for i in iter {
            if self.is_empty() {
                return false;
            }
            self.accept(i);
        }

        self.is_accepting()
    }

    fn is_accepting(&self) -> bool;
    fn is_empty(&self) -> bool;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed pattern: {0}")]
    MalformedPattern(#[from] ParseError),
    /// No construction exists for this kind of node. Every [`Kind`] the
    /// parser produces is supported.
    #[error("cannot compile {0} nodes")]
    UnsupportedNode(Kind),
}
