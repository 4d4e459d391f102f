use crate::nfa::{Nfa, NfaBuilder, StateId};
use crate::{parse, Ast, Error, Matcher, RegexMatcher};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A compiled pattern.
///
/// ```
/// use rematch_engine::Regex;
///
/// let re = Regex::new("a(b|d)*").unwrap();
/// assert!(re.matches("abdb"));
/// assert!(!re.matches("abc"));
/// ```
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    nfa: Nfa,
    start: BTreeSet<StateId>,
    accept: BTreeSet<StateId>,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let ast = parse(pattern)?;
        Self::build(pattern.to_owned(), &ast)
    }

    /// Compiles an already parsed tree. [`Regex::pattern`] will return the
    /// printed form of `ast`.
    pub fn from_ast(ast: &Ast) -> Result<Self, Error> {
        Self::build(ast.to_string(), ast)
    }

    fn build(pattern: String, ast: &Ast) -> Result<Self, Error> {
        let mut builder = NfaBuilder::new();
        let fragment = builder.compile(ast)?;
        let nfa = builder.finish();
        log::debug!(
            "compiled {pattern:?} into {} states, {} accepting",
            nfa.state_count(),
            fragment.accept.len()
        );

        Ok(Self {
            pattern,
            start: nfa.epsilon_closure(fragment.start),
            accept: fragment.accept,
            nfa,
        })
    }

    /// Returns true if the whole of `input` is in the language of the pattern.
    pub fn matches(&self, input: &str) -> bool {
        self.matcher().accepts(input.chars())
    }

    /// A matcher positioned before the first symbol of the input.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(self)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    /// The states active before any input is consumed.
    pub fn start(&self) -> &BTreeSet<StateId> {
        &self.start
    }

    pub fn accept(&self) -> &BTreeSet<StateId> {
        &self.accept
    }
}

impl FromStr for Regex {
    type Err = Error;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        Self::new(pattern)
    }
}

impl TryFrom<&str> for Regex {
    type Error = Error;

    fn try_from(pattern: &str) -> Result<Self, Self::Error> {
        Self::new(pattern)
    }
}
