use crate::{ArrowKind, Regex};
use std::io;
use std::io::Write;

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn label(kind: &ArrowKind) -> String {
    match kind {
        ArrowKind::Value(c) => escape(&c.to_string()),
        ArrowKind::Wildcard => "any".to_string(),
        ArrowKind::CharClass(set) => escape(&format!("[{}]", set.iter().collect::<String>())),
        ArrowKind::Epsilon => "ε".to_string(),
    }
}

impl Regex {
    /// Writes the automaton in graphviz format. Accepting states are drawn
    /// with a double circle, the states active before any input is read are
    /// filled.
    pub fn output_dot(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "digraph {{")?;
        writeln!(w, "label=\"{}\"", escape(self.pattern()))?;

        for (src, state) in self.nfa().states() {
            let mut attrs = String::new();
            if self.accept().contains(&src) {
                attrs.push_str(", shape=doublecircle");
            }
            if self.start().contains(&src) {
                attrs.push_str(", style=filled");
            }
            writeln!(w, "node[label=\"{src}\"{attrs}] id{src}")?;

            for arrow in state.arrows() {
                let style = if arrow.is_epsilon() { ", style=dashed" } else { "" };
                writeln!(
                    w,
                    "id{src} -> id{} [label=\"{}\"{style}]",
                    arrow.target,
                    label(&arrow.kind)
                )?;
            }
        }

        writeln!(w, "}}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Regex;

    #[test]
    fn test_dot() {
        let re = Regex::new("a\"|b*").unwrap();
        let mut out = Vec::new();
        re.output_dot(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("digraph {\n"));
        assert!(out.ends_with("}\n"));
        assert!(out.contains("label=\"a\\\"|b*\""));
        assert!(out.contains("shape=doublecircle"));
        assert!(out.contains("[label=\"b\"]"));
        assert!(out.contains("style=dashed"));
        assert_eq!(out.matches(" -> ").count(), 8);
    }
}
