//! Diagnostic walks over an expression tree. Nothing in matching depends on them.

use crate::ast::{Ast, Kind, Leaf};
use std::collections::VecDeque;

/// One step of a walk: either a leaf with its payload, or an inner node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit<'a> {
    Leaf(Leaf<'a>, Kind),
    Node(Kind),
}

#[derive(Debug, Clone)]
enum Frame<'a> {
    Enter(&'a Ast),
    Emit(Kind),
}

/// Left subtree, then the node, then the right subtree.
#[derive(Debug, Clone)]
pub struct InOrder<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Frame::Emit(kind) => return Some(Visit::Node(kind)),
                Frame::Enter(node) => {
                    if let Some(leaf) = node.leaf() {
                        return Some(Visit::Leaf(leaf, node.kind()));
                    }
                    if let Some(right) = node.right() {
                        self.stack.push(Frame::Enter(&**right));
                    }
                    self.stack.push(Frame::Emit(node.kind()));
                    if let Some(left) = node.left() {
                        self.stack.push(Frame::Enter(&**left));
                    }
                }
            }
        }
    }
}

/// Level order: the root, then its children, then theirs.
#[derive(Debug, Clone)]
pub struct BreadthFirst<'a> {
    queue: VecDeque<&'a Ast>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        if let Some(leaf) = node.leaf() {
            return Some(Visit::Leaf(leaf, node.kind()));
        }
        self.queue.extend(node.left().map(|l| &**l));
        self.queue.extend(node.right().map(|r| &**r));
        Some(Visit::Node(node.kind()))
    }
}

impl Ast {
    pub fn walk_in_order(&self) -> InOrder<'_> {
        InOrder {
            stack: vec![Frame::Enter(self)],
        }
    }

    pub fn walk_breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst {
            queue: VecDeque::from([self]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Visit;
    use crate::{parse, Kind, Leaf};

    #[test]
    fn in_order() {
        let ast = parse("ab*|c?").unwrap();
        let walked: Vec<Visit> = ast.walk_in_order().collect();
        assert_eq!(
            walked,
            vec![
                Visit::Leaf(Leaf::Symbol('a'), Kind::Literal),
                Visit::Node(Kind::Concat),
                Visit::Leaf(Leaf::Symbol('b'), Kind::Literal),
                Visit::Node(Kind::Star),
                Visit::Node(Kind::Choice),
                Visit::Leaf(Leaf::Symbol('c'), Kind::Literal),
                Visit::Node(Kind::Choice),
                Visit::Leaf(Leaf::Empty, Kind::NullString),
            ]
        );
    }

    #[test]
    fn breadth_first() {
        let ast = parse("ab*|[xy].").unwrap();
        let walked: Vec<Visit> = ast.walk_breadth_first().collect();
        assert_eq!(
            walked,
            vec![
                Visit::Node(Kind::Choice),
                Visit::Node(Kind::Concat),
                Visit::Node(Kind::Concat),
                Visit::Leaf(Leaf::Symbol('a'), Kind::Literal),
                Visit::Node(Kind::Star),
                Visit::Leaf(Leaf::Set(&['x', 'y']), Kind::CharClass),
                Visit::Leaf(Leaf::Any, Kind::Dot),
                Visit::Leaf(Leaf::Symbol('b'), Kind::Literal),
            ]
        );
    }

    #[test]
    fn single_leaf() {
        let ast = parse("").unwrap();
        assert_eq!(
            ast.walk_in_order().collect::<Vec<_>>(),
            ast.walk_breadth_first().collect::<Vec<_>>()
        );
        assert_eq!(ast.walk_in_order().count(), 1);
    }

    #[test]
    fn restartable() {
        let ast = parse("(a|b)+c").unwrap();
        let mut walk = ast.walk_in_order();
        walk.next();
        let rest = walk.clone();
        assert_eq!(walk.collect::<Vec<_>>(), rest.collect::<Vec<_>>());
        assert_eq!(
            ast.walk_breadth_first().collect::<Vec<_>>(),
            ast.walk_breadth_first().collect::<Vec<_>>()
        );
    }
}
