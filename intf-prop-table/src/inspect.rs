use conf_tree_core::{ConfigTree, LineId};

/// Render the parsed config forest with a configurable max depth.
pub fn render_tree(tree: &ConfigTree, max_depth: usize) -> String {
    let mut out = String::new();
    for id in tree.top_level() {
        render_line(tree, id, 0, max_depth, &mut out);
    }
    out
}

fn render_line(tree: &ConfigTree, id: LineId, depth: usize, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{}{}\n", indent, tree.text(id)));

    if depth >= max_depth {
        return;
    }

    for &child in tree.children(id) {
        render_line(tree, child, depth + 1, max_depth, out);
    }
}
