use crate::nfa::StateId;
use crate::{Regex, RegexMatcher};
use std::collections::BTreeSet;

/// Runs a [`Regex`] one symbol at a time.
///
/// The matcher only reads the automaton, so any number of them can run on
/// the same regex.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    regex: &'a Regex,
    active: BTreeSet<StateId>,
}

impl<'a> Matcher<'a> {
    pub(crate) fn new(regex: &'a Regex) -> Self {
        Self {
            regex,
            active: regex.start().clone(),
        }
    }

    /// The states the simulation currently occupies.
    pub fn active(&self) -> &BTreeSet<StateId> {
        &self.active
    }
}

impl RegexMatcher for Matcher<'_> {
    type Alphabet = char;

    fn accept(&mut self, symbol: char) {
        if self.active.is_empty() {
            return;
        }

        let nfa = self.regex.nfa();
        self.active = self
            .active
            .iter()
            .flat_map(|&state| nfa.step(state, symbol))
            .collect();
        log::trace!("{symbol:?}: {} active", self.active.len());
    }

    fn is_accepting(&self) -> bool {
        !self.active.is_disjoint(self.regex.accept())
    }

    fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
