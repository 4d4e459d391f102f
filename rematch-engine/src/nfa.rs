use std::collections::{BTreeSet, HashSet};
use std::fmt::{Display, Formatter};

/// A state of an [`Nfa`], identified by its index in the automaton.
///
/// Two ids are equal iff they name the same allocated state; what the state
/// contains plays no part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An arrow is identified by where it starts and its position among that
/// state's arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ArrowId {
    source: StateId,
    index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrowKind {
    Value(char),
    Wildcard,
    CharClass(Box<[char]>),
    Epsilon,
}

/// A labelled edge. The source is the state that owns the arrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrow {
    pub kind: ArrowKind,
    pub target: StateId,
}

impl Arrow {
    pub fn is_epsilon(&self) -> bool {
        matches!(self.kind, ArrowKind::Epsilon)
    }

    /// Returns the target if the arrow fires on `symbol`.
    ///
    /// Epsilon arrows fire on anything; the simulation never offers them a
    /// symbol and follows them through [`Nfa::epsilon_closure`] instead.
    pub fn fire(&self, symbol: char) -> Option<StateId> {
        let fires = match &self.kind {
            ArrowKind::Value(value) => *value == symbol,
            ArrowKind::Wildcard => true,
            ArrowKind::CharClass(set) => set.contains(&symbol),
            ArrowKind::Epsilon => true,
        };
        fires.then_some(self.target)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    arrows: Vec<Arrow>,
}

impl State {
    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }
}

/// Collects states and arrows while an automaton is being built.
///
/// Arrows can only be appended. [`NfaBuilder::finish`] hands out the read-only
/// [`Nfa`].
#[derive(Debug, Default)]
pub struct NfaBuilder {
    states: Vec<State>,
}

impl NfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self) -> StateId {
        self.states.push(State::default());
        StateId(self.states.len() - 1)
    }

    /// # Panics
    ///
    /// Panics if `source` was not allocated by this builder.
    pub fn add_arrow(&mut self, source: StateId, kind: ArrowKind, target: StateId) {
        self.states[source.0].arrows.push(Arrow { kind, target });
    }

    pub fn finish(self) -> Nfa {
        Nfa {
            states: self.states,
        }
    }
}

/// A compiled automaton. It cannot be changed once built.
///
/// Every method taking a [`StateId`] panics when given an id that does not
/// belong to this automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    states: Vec<State>,
}

impl Nfa {
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    pub fn arrows(&self, id: StateId) -> &[Arrow] {
        self.state(id).arrows()
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states.iter().enumerate().map(|(i, s)| (StateId(i), s))
    }

    /// All states reachable from `state` over zero or more epsilon arrows.
    ///
    /// Each arrow is traversed at most once. States are not marked as
    /// visited, so a state entered again through another arrow still has its
    /// remaining arrows followed; this terminates on epsilon cycles.
    pub fn epsilon_closure(&self, state: StateId) -> BTreeSet<StateId> {
        let mut closure = BTreeSet::from([state]);
        let mut followed = HashSet::new();
        let mut pending = vec![state];

        while let Some(current) = pending.pop() {
            for (index, arrow) in self.arrows(current).iter().enumerate() {
                let id = ArrowId {
                    source: current,
                    index,
                };
                if arrow.is_epsilon() && followed.insert(id) {
                    closure.insert(arrow.target);
                    pending.push(arrow.target);
                }
            }
        }

        closure
    }

    /// The states reached from `state` by consuming `symbol`, closed over
    /// epsilon arrows.
    pub fn step(&self, state: StateId, symbol: char) -> BTreeSet<StateId> {
        let direct: BTreeSet<_> = self
            .arrows(state)
            .iter()
            .filter(|arrow| !arrow.is_epsilon())
            .filter_map(|arrow| arrow.fire(symbol))
            .collect();

        let mut next = direct.clone();
        for &reached in &direct {
            next.extend(self.epsilon_closure(reached));
        }
        next
    }
}
