use ascii_tree::Tree::{Leaf, Node};
use rematch::{Ast, Leaf as Payload};

/// Returns a representation of the expression tree as an ASCII tree.
pub fn ast_ascii_tree(ast: &Ast) -> ascii_tree::Tree {
    match ast.leaf() {
        Some(Payload::Empty) => Leaf(vec![ast.kind().to_string()]),
        Some(value) => Leaf(vec![format!("{} {value}", ast.kind())]),
        None => Node(
            ast.kind().to_string(),
            ast.left()
                .into_iter()
                .chain(ast.right())
                .map(|child| ast_ascii_tree(child))
                .collect(),
        ),
    }
}
