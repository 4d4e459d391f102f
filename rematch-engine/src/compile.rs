use crate::nfa::{ArrowKind, NfaBuilder, StateId};
use crate::{Ast, Error, Kind};
use std::collections::BTreeSet;

/// The automaton for one subtree: where it starts, and the states in which
/// it may stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub start: StateId,
    pub accept: BTreeSet<StateId>,
}

/// Work left to do while compiling. Inner nodes are entered, their children
/// compiled, and then the children's fragments joined.
enum Task<'a> {
    Enter(&'a Ast),
    Join(Kind),
}

impl NfaBuilder {
    /// Adds the states for `ast` using Thompson's construction.
    ///
    /// Each call allocates fresh states, including when the same subtree is
    /// reached twice through a shared reference. Subtrees are compiled left
    /// to right from an explicit worklist, so deep trees do not grow the
    /// call stack.
    pub fn compile(&mut self, ast: &Ast) -> Result<Fragment, Error> {
        let mut tasks = vec![Task::Enter(ast)];
        let mut done = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Enter(node) => match node {
                    Ast::Literal(value) => done.push(self.single(ArrowKind::Value(*value))),
                    Ast::Dot => done.push(self.single(ArrowKind::Wildcard)),
                    Ast::CharClass(set) => {
                        done.push(self.single(ArrowKind::CharClass(set.as_slice().into())))
                    }
                    Ast::NullString => {
                        let state = self.add_state();
                        done.push(Fragment {
                            start: state,
                            accept: BTreeSet::from([state]),
                        });
                    }
                    Ast::Star(op) => {
                        tasks.push(Task::Join(Kind::Star));
                        tasks.push(Task::Enter(op));
                    }
                    Ast::Choice(l, r) | Ast::Concat(l, r) => {
                        tasks.push(Task::Join(node.kind()));
                        tasks.push(Task::Enter(r));
                        tasks.push(Task::Enter(l));
                    }
                },
                Task::Join(kind) => {
                    let fragment = self.join(kind, &mut done)?;
                    done.push(fragment);
                }
            }
        }

        take(&mut done, ast.kind())
    }

    /// Combines the fragments of the children of a `kind` node, which are
    /// on top of `done` with the rightmost child last.
    fn join(&mut self, kind: Kind, done: &mut Vec<Fragment>) -> Result<Fragment, Error> {
        let fragment = match kind {
            Kind::Concat => {
                let right = take(done, kind)?;
                let left = take(done, kind)?;
                for &state in &left.accept {
                    self.add_arrow(state, ArrowKind::Epsilon, right.start);
                }
                Fragment {
                    start: left.start,
                    accept: right.accept,
                }
            }
            Kind::Choice => {
                let right = take(done, kind)?;
                let left = take(done, kind)?;
                let split = self.add_state();
                self.add_arrow(split, ArrowKind::Epsilon, left.start);
                self.add_arrow(split, ArrowKind::Epsilon, right.start);

                let mut accept = left.accept;
                accept.extend(right.accept);
                Fragment {
                    start: split,
                    accept,
                }
            }
            Kind::Star => {
                let inner = take(done, kind)?;
                let entry = self.add_state();
                self.add_arrow(entry, ArrowKind::Epsilon, inner.start);
                for &state in &inner.accept {
                    self.add_arrow(state, ArrowKind::Epsilon, inner.start);
                }

                // zero repetitions stop right at the entry
                let mut accept = inner.accept;
                accept.insert(entry);
                Fragment {
                    start: entry,
                    accept,
                }
            }
            leaf => return Err(Error::UnsupportedNode(leaf)),
        };

        Ok(fragment)
    }

    /// Two states joined by one labelled arrow.
    fn single(&mut self, kind: ArrowKind) -> Fragment {
        let accept = self.add_state();
        let start = self.add_state();
        self.add_arrow(start, kind, accept);
        Fragment {
            start,
            accept: BTreeSet::from([accept]),
        }
    }
}

/// Leaves are compiled directly and never joined, so a missing fragment
/// means the node of `kind` could not be compiled.
fn take(done: &mut Vec<Fragment>, kind: Kind) -> Result<Fragment, Error> {
    done.pop().ok_or(Error::UnsupportedNode(kind))
}
