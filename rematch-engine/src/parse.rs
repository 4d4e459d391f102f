use crate::Ast;
use std::iter::Enumerate;
use std::rc::Rc;
use std::str::Chars;
use thiserror::Error;

/// Why a pattern could not be parsed. Positions count characters, not bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{quantifier}' at position {position} has nothing to repeat")]
    MissingOperand { quantifier: char, position: usize },
    #[error("group opened at position {position} is never closed")]
    UnterminatedGroup { position: usize },
    #[error("character class opened at position {position} is never closed")]
    UnterminatedClass { position: usize },
    #[error("')' at position {position} does not close any group")]
    UnmatchedClose { position: usize },
    #[error("'\\' at position {position} is not followed by a symbol")]
    DanglingEscape { position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::MissingOperand { position, .. }
            | ParseError::UnterminatedGroup { position }
            | ParseError::UnterminatedClass { position }
            | ParseError::UnmatchedClose { position }
            | ParseError::DanglingEscape { position } => *position,
        }
    }
}

/// A group being parsed, or the pattern itself.
struct Scope {
    /// Where the `(` was. `None` for the whole pattern.
    opened: Option<usize>,
    /// Left-hand sides of the `|`s seen so far, leftmost first.
    choices: Vec<Rc<Ast>>,
    stack: Vec<Rc<Ast>>,
}

impl Scope {
    fn new(opened: Option<usize>) -> Self {
        Self {
            opened,
            choices: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// `|` extends to the end of the group and nests to the right:
    /// `a|b|c` is `Choice(a, Choice(b, c))`.
    fn finish(self) -> Rc<Ast> {
        let last = concat_all(self.stack);
        self.choices
            .into_iter()
            .rev()
            .fold(last, |right, left| Rc::new(Ast::Choice(left, right)))
    }
}

struct PatternParser<'a> {
    input: Enumerate<Chars<'a>>,
}

impl<'a> PatternParser<'a> {
    fn new(pattern: &'a str) -> Self {
        Self {
            input: pattern.chars().enumerate(),
        }
    }

    /// Open groups are kept on an explicit stack, so nesting depth is only
    /// bounded by memory.
    fn pattern(&mut self) -> Result<Rc<Ast>, ParseError> {
        let mut outer = Vec::new();
        let mut scope = Scope::new(None);

        while let Some((position, symbol)) = self.input.next() {
            match symbol {
                '(' => outer.push(std::mem::replace(&mut scope, Scope::new(Some(position)))),
                ')' => match outer.pop() {
                    Some(enclosing) => {
                        let group = std::mem::replace(&mut scope, enclosing).finish();
                        scope.stack.push(group);
                    }
                    None => return Err(ParseError::UnmatchedClose { position }),
                },
                '.' => scope.stack.push(Rc::new(Ast::Dot)),
                '[' => {
                    let set = self.class(position)?;
                    scope.stack.push(Rc::new(Ast::CharClass(set)));
                }
                '*' => {
                    let op = operand(&mut scope.stack, symbol, position)?;
                    scope.stack.push(Rc::new(Ast::Star(op)));
                }
                '?' => {
                    let op = operand(&mut scope.stack, symbol, position)?;
                    scope
                        .stack
                        .push(Rc::new(Ast::Choice(op, Rc::new(Ast::NullString))));
                }
                '+' => {
                    let op = operand(&mut scope.stack, symbol, position)?;
                    scope
                        .stack
                        .push(Rc::new(Ast::Concat(op.clone(), Rc::new(Ast::Star(op)))));
                }
                '|' => {
                    let left = concat_all(std::mem::take(&mut scope.stack));
                    scope.choices.push(left);
                }
                '\\' => match self.input.next() {
                    Some((_, escaped)) => scope.stack.push(Rc::new(Ast::Literal(escaped))),
                    None => return Err(ParseError::DanglingEscape { position }),
                },
                _ => scope.stack.push(Rc::new(Ast::Literal(symbol))),
            }
        }

        match scope.opened {
            // the innermost group is the one reported
            Some(position) => Err(ParseError::UnterminatedGroup { position }),
            None => Ok(scope.finish()),
        }
    }

    /// Reads a character class body; the opening `[` was at `position`.
    fn class(&mut self, position: usize) -> Result<Vec<char>, ParseError> {
        let mut set = Vec::new();
        for (_, symbol) in self.input.by_ref() {
            if symbol == ']' {
                return Ok(set);
            }
            set.push(symbol);
        }
        Err(ParseError::UnterminatedClass { position })
    }
}

fn operand(stack: &mut Vec<Rc<Ast>>, quantifier: char, position: usize) -> Result<Rc<Ast>, ParseError> {
    stack.pop().ok_or(ParseError::MissingOperand {
        quantifier,
        position,
    })
}

/// Left fold with `Concat`. Nothing to fold is the empty string.
fn concat_all(stack: Vec<Rc<Ast>>) -> Rc<Ast> {
    stack
        .into_iter()
        .reduce(|l, r| Rc::new(Ast::Concat(l, r)))
        .unwrap_or_else(|| Rc::new(Ast::NullString))
}

/// Parses a pattern into an expression tree.
///
/// ```
/// use rematch_engine::{parse, Ast};
///
/// assert_eq!(*parse("").unwrap(), Ast::NullString);
/// assert!(parse("a(b").is_err());
/// ```
pub fn parse(pattern: &str) -> Result<Rc<Ast>, ParseError> {
    let ast = PatternParser::new(pattern).pattern()?;
    log::debug!("parsed {pattern:?} as {ast}");
    Ok(ast)
}

#[cfg(test)]
mod tests {
    // Expected tree shapes for the operator precedence rules.

    use crate::{parse, Ast, Ast::*, ParseError};
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn lit(c: char) -> Rc<Ast> {
        Rc::new(Literal(c))
    }

    fn star(op: Rc<Ast>) -> Rc<Ast> {
        Rc::new(Star(op))
    }

    fn choice(l: Rc<Ast>, r: Rc<Ast>) -> Rc<Ast> {
        Rc::new(Choice(l, r))
    }

    fn concat(l: Rc<Ast>, r: Rc<Ast>) -> Rc<Ast> {
        Rc::new(Concat(l, r))
    }

    fn null() -> Rc<Ast> {
        Rc::new(NullString)
    }

    #[test]
    fn test_literals() {
        for c in "abcxyzABCXYZ0189 é".chars() {
            assert_eq!(parse(&c.to_string()).unwrap(), lit(c));
        }
    }

    #[test]
    fn test_null_string() {
        assert_eq!(parse("").unwrap(), null());
    }

    #[test]
    fn test_operators() {
        assert_eq!(parse("a*").unwrap(), star(lit('a')));
        assert_eq!(parse("a|b").unwrap(), choice(lit('a'), lit('b')));
        assert_eq!(parse("ab").unwrap(), concat(lit('a'), lit('b')));
        assert_eq!(parse("a?").unwrap(), choice(lit('a'), null()));
        assert_eq!(parse(".").unwrap(), Rc::new(Dot));
        assert_eq!(parse("[abc]").unwrap(), Rc::new(CharClass(vec!['a', 'b', 'c'])));
    }

    #[test]
    fn test_plus_shares_operand() {
        let ast = parse("a+").unwrap();
        assert_eq!(ast, concat(lit('a'), star(lit('a'))));

        let Concat(first, repeated) = &*ast else {
            panic!("expected a concatenation, got {ast:?}");
        };
        let Star(second) = &**repeated else {
            panic!("expected a star, got {repeated:?}");
        };
        assert!(Rc::ptr_eq(first, second));
    }

    #[test]
    fn test_escapes() {
        for metachar in r"*?+.\()|[]".chars() {
            let pattern = format!("\\{metachar}");
            assert_eq!(parse(&pattern).unwrap(), lit(metachar));
        }
        assert_eq!(parse(r"\a").unwrap(), lit('a'));
    }

    #[test]
    fn test_class_is_verbatim() {
        assert_eq!(parse("[a.*(]").unwrap(), Rc::new(CharClass(vec!['a', '.', '*', '('])));
        assert_eq!(parse("[]").unwrap(), Rc::new(CharClass(vec![])));
        assert_eq!(parse(r"[\]").unwrap(), Rc::new(CharClass(vec!['\\'])));
    }

    #[test]
    fn test_complex_expression() {
        assert_eq!(
            parse("ab*(c|d)?").unwrap(),
            concat(
                concat(lit('a'), star(lit('b'))),
                choice(choice(lit('c'), lit('d')), null())
            )
        );
    }

    #[test]
    fn test_nested_parens() {
        assert_eq!(
            parse("(ab(a|d)e)").unwrap(),
            concat(
                concat(concat(lit('a'), lit('b')), choice(lit('a'), lit('d'))),
                lit('e')
            )
        );
        assert_eq!(parse("((a))").unwrap(), lit('a'));
    }

    #[test]
    fn test_alternation_is_right_associative() {
        assert_eq!(
            parse("a|b|c").unwrap(),
            choice(lit('a'), choice(lit('b'), lit('c')))
        );
        assert_eq!(
            parse("ab|cd").unwrap(),
            choice(concat(lit('a'), lit('b')), concat(lit('c'), lit('d')))
        );
    }

    #[test]
    fn test_alternation_inside_group() {
        assert_eq!(
            parse("(a|b)*").unwrap(),
            star(choice(lit('a'), lit('b')))
        );
        assert_eq!(
            parse("(a|b)c|d").unwrap(),
            choice(concat(choice(lit('a'), lit('b')), lit('c')), lit('d'))
        );
    }

    #[test]
    fn test_empty_operands() {
        assert_eq!(parse("()").unwrap(), null());
        assert_eq!(parse("a|").unwrap(), choice(lit('a'), null()));
        assert_eq!(parse("|a").unwrap(), choice(null(), lit('a')));
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            parse("*").unwrap_err(),
            ParseError::MissingOperand {
                quantifier: '*',
                position: 0
            }
        );
        assert_eq!(
            parse("a|+").unwrap_err(),
            ParseError::MissingOperand {
                quantifier: '+',
                position: 2
            }
        );
        assert_eq!(
            parse("(?)").unwrap_err(),
            ParseError::MissingOperand {
                quantifier: '?',
                position: 1
            }
        );
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(
            parse("(ab").unwrap_err(),
            ParseError::UnterminatedGroup { position: 0 }
        );
        assert_eq!(
            parse("a(b|c").unwrap_err(),
            ParseError::UnterminatedGroup { position: 1 }
        );
        assert_eq!(
            parse("((a)").unwrap_err(),
            ParseError::UnterminatedGroup { position: 0 }
        );
        assert_eq!(
            parse("x[ab").unwrap_err(),
            ParseError::UnterminatedClass { position: 1 }
        );
    }

    #[test]
    fn test_unmatched_close() {
        assert_eq!(
            parse("ab)").unwrap_err(),
            ParseError::UnmatchedClose { position: 2 }
        );
        assert_eq!(
            parse("a|b)c").unwrap_err(),
            ParseError::UnmatchedClose { position: 3 }
        );
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 50_000;
        let pattern = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse(&pattern).unwrap(), lit('a'));

        let pattern = format!("{}a", "(".repeat(depth));
        assert_eq!(
            parse(&pattern).unwrap_err(),
            ParseError::UnterminatedGroup {
                position: depth - 1
            }
        );
    }

    #[test]
    fn test_long_pattern() {
        let n = 100_000;
        let ast = parse(&"a".repeat(n)).unwrap();
        assert_eq!(ast.kind(), crate::Kind::Concat);
        assert_eq!(ast.walk_in_order().count(), 2 * n - 1);

        let ast = parse(&"a*".repeat(n)).unwrap();
        assert_eq!(ast.walk_breadth_first().count(), 3 * n - 1);
    }

    #[test]
    fn test_dangling_escape() {
        let err = parse("ab\\").unwrap_err();
        assert_eq!(err, ParseError::DanglingEscape { position: 2 });
        assert_eq!(err.position(), 2);
    }
}
