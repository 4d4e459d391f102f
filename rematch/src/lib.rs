#![warn(missing_docs)]
//! An NFA based regular expression matching engine.
//!
//! Patterns are parsed into an expression tree, compiled into a
//! nondeterministic automaton with Thompson's construction, and run by
//! keeping track of every state the automaton could be in.
//!
//! ```rust
//! use rematch::Regex;
//!
//! let re = Regex::new("a(b|d)").unwrap();
//! assert!(re.matches("ab"));
//! assert!(re.matches("ad"));
//! assert!(!re.matches("ac"));
//! ```
//!
//! ## Syntax
//!
//! | pattern | matches |
//! |---------|---------|
//! | `x`     | the symbol `x` |
//! | `.`     | any one symbol |
//! | `[xyz]` | one of the symbols between the brackets, taken verbatim |
//! | `e*`    | zero or more `e` |
//! | `e+`    | one or more `e` |
//! | `e?`    | zero or one `e` |
//! | `e\|f`  | `e` or `f`; binds loosest and extends to the end of the group |
//! | `(e)`   | `e` |
//! | `\x`    | `x`, even when it is one of the symbols above |
//!
//! A match always covers the whole input. There are no anchors, captures or
//! backreferences.
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

pub use rematch_engine::*;

/// Compile a pattern while your crate is compiled.
///
/// Malformed patterns are reported as compile errors. The expression
/// evaluates to a [`Regex`].
///
/// ```rust
/// use rematch::regex;
///
/// let re = regex!("(a|b)*c");
/// assert!(re.matches("abbac"));
/// assert!(!re.matches("abba"));
/// ```
///
/// ```compile_fail
/// let re = rematch::regex!("(a|b");
/// ```
pub use rematch_macros::regex;
