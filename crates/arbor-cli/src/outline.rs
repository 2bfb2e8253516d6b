//! Indented text rendering of a compiled tree.

use std::fmt::{self, Write};

use arbor_bt::Node;
use arbor_core::Kwargs;

pub fn render(root: &Node) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_node(&mut out, root, 0)?;
    Ok(out)
}

fn write_node(out: &mut impl Write, node: &Node, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match node {
        Node::Loop(lp) => writeln!(out, "{indent}Loop x{}", lp.count())?,
        Node::Condition(c) => writeln!(out, "{indent}? {}{}", c.capability(), args(c.kwargs()))?,
        Node::Action(a) => writeln!(out, "{indent}! {}{}", a.capability(), args(a.kwargs()))?,
        _ => writeln!(out, "{indent}{}", node.kind())?,
    }
    for child in node.children() {
        write_node(out, child, depth + 1)?;
    }
    Ok(())
}

fn args(kwargs: &Kwargs) -> String {
    if kwargs.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = kwargs.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("({})", parts.join(", "))
}
