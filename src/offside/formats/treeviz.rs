//! Treeviz formatter for block trees
//!
//! One line per node, with box-drawing connectors showing nesting:
//!
//! ```text
//! ├─ stmt: def f ( x ) :
//! │ ├─ stmt: if x :
//! │ │ └─ stmt: return 1
//! │ └─ stmt: return 2
//! └─ stmt: f ( 3 )
//! ```
//!
//! Labels are truncated to 30 characters.

use crate::offside::structure::Node;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(nodes: &[Node]) -> String {
    let mut result = String::new();
    append_children(&mut result, nodes, "");
    result
}

fn append_node(result: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let node_type = match node {
        Node::Statement { .. } => "stmt",
        Node::Block(_) => "block",
    };

    result.push_str(&format!(
        "{}{} {}: {}\n",
        prefix,
        connector,
        node_type,
        truncate(&node.label(), 30)
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, node.children(), &new_prefix);
}

fn append_children(result: &mut String, children: &[Node], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, prefix, is_last);
    }
}
