use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// A node of a parsed pattern.
///
/// Children are reference counted and may be shared: `a+` parses to
/// `Concat(a, Star(a))` where both occurrences of `a` are the same allocation.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    Literal(char),
    NullString,
    Dot,
    CharClass(Vec<char>),
    Star(Rc<Ast>),
    Choice(Rc<Ast>, Rc<Ast>),
    Concat(Rc<Ast>, Rc<Ast>),
}

/// The variant of an [`Ast`] node, without its payload.
#[derive(Hash, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Literal,
    NullString,
    Dot,
    CharClass,
    Star,
    Choice,
    Concat,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::Literal => "Literal",
            Kind::NullString => "NullString",
            Kind::Dot => "Dot",
            Kind::CharClass => "CharClass",
            Kind::Star => "Star",
            Kind::Choice => "Choice",
            Kind::Concat => "Concat",
        };
        write!(f, "{name}")
    }
}

/// The payload stored in a leaf node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf<'a> {
    Symbol(char),
    Any,
    Set(&'a [char]),
    Empty,
}

impl Display for Leaf<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Leaf::Symbol(c) => write!(f, "{c}"),
            Leaf::Any => write!(f, "."),
            Leaf::Set(set) => set.iter().try_for_each(|c| write!(f, "{c}")),
            Leaf::Empty => Ok(()),
        }
    }
}

impl Ast {
    pub fn kind(&self) -> Kind {
        match self {
            Ast::Literal(_) => Kind::Literal,
            Ast::NullString => Kind::NullString,
            Ast::Dot => Kind::Dot,
            Ast::CharClass(_) => Kind::CharClass,
            Ast::Star(_) => Kind::Star,
            Ast::Choice(_, _) => Kind::Choice,
            Ast::Concat(_, _) => Kind::Concat,
        }
    }

    /// Returns the payload if this node is a leaf.
    pub fn leaf(&self) -> Option<Leaf<'_>> {
        match self {
            Ast::Literal(c) => Some(Leaf::Symbol(*c)),
            Ast::NullString => Some(Leaf::Empty),
            Ast::Dot => Some(Leaf::Any),
            Ast::CharClass(set) => Some(Leaf::Set(set)),
            Ast::Star(_) | Ast::Choice(_, _) | Ast::Concat(_, _) => None,
        }
    }

    /// The left child. The operand of a `Star` is its left child.
    pub fn left(&self) -> Option<&Rc<Ast>> {
        match self {
            Ast::Star(l) | Ast::Choice(l, _) | Ast::Concat(l, _) => Some(l),
            _ => None,
        }
    }

    pub fn right(&self) -> Option<&Rc<Ast>> {
        match self {
            Ast::Choice(_, r) | Ast::Concat(_, r) => Some(r),
            _ => None,
        }
    }
}

fn is_meta(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '.' | '*' | '+' | '?' | '|' | '\\')
}

enum Piece<'a> {
    Node(&'a Ast),
    Text(&'static str),
}

/// Prints the tree as a fully parenthesized pattern.
///
/// Parsing the output gives back a tree that matches the same strings.
/// Character classes are printed verbatim, so a class containing `]` has no
/// printed form that parses back.
impl Display for Ast {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // pieces are pushed in reverse of the order they are printed in
        let mut pending = vec![Piece::Node(self)];

        while let Some(piece) = pending.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };

            match node {
                Ast::Literal(c) if is_meta(*c) => write!(f, "\\{c}")?,
                Ast::Literal(c) => write!(f, "{c}")?,
                Ast::NullString => f.write_str("()")?,
                Ast::Dot => f.write_str(".")?,
                Ast::CharClass(set) => write!(f, "[{}]", Leaf::Set(set))?,
                Ast::Star(op) => {
                    pending.extend([Piece::Text(")*"), Piece::Node(&**op), Piece::Text("(")])
                }
                Ast::Choice(l, r) => pending.extend([
                    Piece::Text(")"),
                    Piece::Node(&**r),
                    Piece::Text("|"),
                    Piece::Node(&**l),
                    Piece::Text("("),
                ]),
                Ast::Concat(l, r) => pending.extend([Piece::Node(&**r), Piece::Node(&**l)]),
            }
        }

        Ok(())
    }
}

impl Ast {
    /// Moves the children that are themselves inner nodes into `into`,
    /// leaving empty leaves in their place.
    fn detach_children(&mut self, into: &mut Vec<Rc<Ast>>) {
        let children = match self {
            Ast::Star(op) => [Some(op), None],
            Ast::Choice(l, r) | Ast::Concat(l, r) => [Some(l), Some(r)],
            _ => return,
        };
        for child in children.into_iter().flatten() {
            if child.leaf().is_none() {
                into.push(std::mem::replace(child, Rc::new(Ast::NullString)));
            }
        }
    }
}

/// Frees the tree with a worklist instead of one nested drop per level.
impl Drop for Ast {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);

        while let Some(mut child) = pending.pop() {
            // shared children are only released here, not taken apart
            if let Some(node) = Rc::get_mut(&mut child) {
                node.detach_children(&mut pending);
            }
        }
    }
}
